//! The complete run: find the document, extract, refine, deliver.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use ikprint_core::RefinementSession;
use ikprint_ingest::{CodeExtractor, document_label, find_documents};
use ikprint_model::CodeList;
use ikprint_output::OutputSink;
use tracing::{info, info_span};

use crate::config::Settings;
use crate::logging::redact_value;
use crate::prompt::{ask_patient_name, run_refinement, select_document};

/// How the admission document for a run is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTarget {
    /// Ask the operator for a patient name.
    Prompt,
    /// Search the document directory for this name.
    Name(String),
    /// Use this document directly.
    File(PathBuf),
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub document: PathBuf,
    /// Codes found in the document, duplicates included.
    pub extracted: usize,
    pub codes: CodeList,
    pub rendering: String,
}

/// Resolves `target` to one document, asking the operator where needed.
pub fn resolve_document<R: BufRead, W: Write>(
    settings: &Settings,
    target: DocumentTarget,
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf> {
    let name = match target {
        DocumentTarget::File(path) => return Ok(path),
        DocumentTarget::Name(name) => name.to_lowercase(),
        DocumentTarget::Prompt => ask_patient_name(input, output)?,
    };
    info!(name = redact_value(&name), "searching admission documents");
    let matches = find_documents(&settings.documents, &name)?;
    select_document(matches, input, output)
}

/// Extracts the deduplicated code list from `document`.
pub fn extract_codes(settings: &Settings, document: &Path) -> Result<(usize, CodeList)> {
    let extractor = CodeExtractor::new(&settings.extraction)?;
    let codes = extractor.extract_file(document)?;
    let extracted = codes.len();
    let list: CodeList = codes.into_iter().collect();
    info!(
        document = redact_value(&document_label(document)),
        extracted,
        unique = list.len(),
        "codes extracted"
    );
    Ok((extracted, list))
}

/// Runs the whole workflow against the given streams and sinks.
///
/// The capacity guard runs on the deduplicated list before any preview is
/// shown. Only the final rendering reaches `sink`.
pub fn run_workflow<R: BufRead, W: Write>(
    settings: &Settings,
    target: DocumentTarget,
    input: &mut R,
    output: &mut W,
    preview: &mut dyn OutputSink,
    sink: &mut dyn OutputSink,
) -> Result<RunSummary> {
    let span = info_span!("run");
    let _guard = span.enter();
    let started = Instant::now();

    let document = resolve_document(settings, target, input, output)?;
    let (extracted, codes) = extract_codes(settings, &document)?;

    let session = RefinementSession::start(codes, settings.layout)?;
    let outcome = run_refinement(session, input, output, preview)?;

    sink.deliver(&outcome.rendering)
        .context("deliver final page")?;
    info!(
        codes = outcome.codes.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "page delivered"
    );

    Ok(RunSummary {
        document,
        extracted,
        codes: outcome.codes,
        rendering: outcome.rendering,
    })
}
