use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ikprint_cli::config::{Settings, load_settings, settings_path, settings_to_toml};
use ikprint_cli::workflow::{DocumentTarget, RunSummary, run_workflow};
use ikprint_core::render;
use ikprint_ingest::CodeExtractor;
use ikprint_model::{Code, CodeList};
use ikprint_output::SinkKind;
use tracing::info;

use crate::cli::{ConfigArgs, ExtractArgs, RenderArgs, RunArgs};
use crate::summary::print_extracted;

pub fn run_print(args: &RunArgs, config: Option<&Path>) -> Result<RunSummary> {
    let mut settings = load_settings(config)?;
    apply_run_overrides(&mut settings, args);

    let target = match (&args.file, &args.name) {
        (Some(file), _) => DocumentTarget::File(file.clone()),
        (None, Some(name)) => DocumentTarget::Name(name.clone()),
        (None, None) => DocumentTarget::Prompt,
    };

    let mut preview = settings
        .output
        .preview_sink()
        .context("set up preview sink")?;
    let mut sink = settings.output.output_sink().context("set up output sink")?;
    info!(
        sink = %settings.output.sink,
        preview = %settings.output.preview,
        "sinks ready"
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_workflow(
        &settings,
        target,
        &mut input,
        &mut output,
        &mut preview,
        &mut sink,
    )
}

pub fn run_extract(args: &ExtractArgs, config: Option<&Path>) -> Result<()> {
    let settings = load_settings(config)?;
    let extractor = CodeExtractor::new(&settings.extraction)?;
    let codes = extractor.extract_file(&args.file)?;
    print_extracted(&args.file, &codes);
    Ok(())
}

pub fn run_render(args: &RenderArgs, config: Option<&Path>) -> Result<()> {
    let settings = load_settings(config)?;
    let codes = args
        .codes
        .iter()
        .map(|value| Code::new(value.as_str()))
        .collect::<Result<Vec<_>, _>>()?;
    let list: CodeList = codes.into_iter().collect();
    settings.layout.capacity().check(list.len())?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(render(list.as_slice(), &settings.layout).as_bytes())
        .and_then(|()| writeln!(stdout))
        .context("write rendering")?;
    Ok(())
}

pub fn run_config(args: &ConfigArgs, config: Option<&Path>) -> Result<()> {
    let settings = if args.default {
        Settings::default()
    } else {
        load_settings(config)?
    };
    match config.map(Path::to_path_buf).or_else(settings_path) {
        Some(path) => println!("# {}", path.display()),
        None => println!("# settings location unavailable"),
    }
    print!("{}", settings_to_toml(&settings)?);
    Ok(())
}

/// Command-line flags take precedence over the settings file.
fn apply_run_overrides(settings: &mut Settings, args: &RunArgs) {
    if let Some(dir) = &args.dir {
        settings.documents.directory = dir.clone();
    }
    if let Some(path) = &args.output {
        settings.output.path = Some(path.clone());
        settings.output.sink = SinkKind::File;
    }
    if let Some(sink) = args.sink {
        settings.output.sink = sink.into();
    }
    if let Some(preview) = args.preview {
        settings.output.preview = preview.into();
    }
}
