//! Output configuration and sink construction.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::command::{
    CommandSink, DEFAULT_KEEP_FILE, DEFAULT_PRINTER, DEFAULT_VIEWER, default_command,
};
use crate::error::{OutputError, Result};
use crate::sink::{FileSink, OutputSink, TerminalSink};

/// Kind of destination for a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// Standard output.
    Terminal,
    /// A file at [`OutputOptions::path`].
    File,
    /// The configured text viewer.
    Viewer,
    /// The configured print command.
    Print,
}

impl SinkKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::File => "file",
            Self::Viewer => "viewer",
            Self::Print => "print",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Settings for previews during editing and for the final page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Destination of the final page.
    pub sink: SinkKind,
    /// Destination of the intermediate renderings shown while editing.
    pub preview: SinkKind,
    /// Viewer command line; the page file path is appended.
    pub viewer: Vec<String>,
    /// Print command line; the page file path is appended.
    pub printer: Vec<String>,
    /// Keep temporary page files after the viewer or printer returns.
    ///
    /// On by default where the default viewer detaches from the page file.
    pub keep_file: bool,
    /// Destination for the `file` sink.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            sink: SinkKind::Viewer,
            preview: SinkKind::Terminal,
            viewer: default_command(DEFAULT_VIEWER),
            printer: default_command(DEFAULT_PRINTER),
            keep_file: DEFAULT_KEEP_FILE,
            path: None,
        }
    }
}

impl OutputOptions {
    /// Sink for the final page.
    pub fn output_sink(&self) -> Result<Box<dyn OutputSink>> {
        self.build(self.sink, false)
    }

    /// Sink for previews; terminal previews skip the page offset.
    pub fn preview_sink(&self) -> Result<Box<dyn OutputSink>> {
        self.build(self.preview, true)
    }

    fn build(&self, kind: SinkKind, preview: bool) -> Result<Box<dyn OutputSink>> {
        let sink: Box<dyn OutputSink> = match kind {
            SinkKind::Terminal if preview => Box::new(TerminalSink::stdout().compact()),
            SinkKind::Terminal => Box::new(TerminalSink::stdout()),
            SinkKind::File => {
                let path = self.path.clone().ok_or(OutputError::MissingPath)?;
                Box::new(FileSink::new(path))
            }
            SinkKind::Viewer => {
                Box::new(CommandSink::viewer(&self.viewer)?.keep_file(self.keep_file))
            }
            SinkKind::Print => {
                Box::new(CommandSink::printer(&self.printer)?.keep_file(self.keep_file))
            }
        };
        Ok(sink)
    }
}
