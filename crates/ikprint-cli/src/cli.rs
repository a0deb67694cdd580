//! CLI argument definitions for ikprint.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ikprint_output::SinkKind;

#[derive(Parser)]
#[command(
    name = "ikprint",
    version,
    about = "Print diagnosis codes from an admission document onto a pre-printed form",
    long_about = "Print diagnosis codes from an admission document onto a pre-printed form.\n\n\
                  Codes are read from the diagnosis table of a .docx admission document,\n\
                  refined interactively and laid out as a fixed-width grid."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient names, file names and codes in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file to use instead of the default location.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find a patient's admission document, refine its codes and print them.
    Run(RunArgs),

    /// List the codes found in one admission document.
    Extract(ExtractArgs),

    /// Render codes to stdout with the configured layout.
    Render(RenderArgs),

    /// Show the settings file location and the effective settings.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Patient name to search for (prompted when omitted).
    #[arg(value_name = "NAME", conflicts_with = "file")]
    pub name: Option<String>,

    /// Directory holding the admission documents.
    #[arg(long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Use this document instead of searching by name.
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Destination of the final page.
    #[arg(long = "sink", value_enum)]
    pub sink: Option<SinkArg>,

    /// Page file written by the `file` sink.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Destination of the previews shown while editing.
    #[arg(long = "preview", value_enum)]
    pub preview: Option<SinkArg>,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Admission document to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Codes in print order.
    #[arg(value_name = "CODE", required = true)]
    pub codes: Vec<String>,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Show built-in defaults instead of the loaded settings.
    #[arg(long = "default")]
    pub default: bool,
}

/// CLI sink choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum SinkArg {
    Terminal,
    File,
    Viewer,
    Print,
}

impl From<SinkArg> for SinkKind {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Terminal => SinkKind::Terminal,
            SinkArg::File => SinkKind::File,
            SinkArg::Viewer => SinkKind::Viewer,
            SinkArg::Print => SinkKind::Print,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
