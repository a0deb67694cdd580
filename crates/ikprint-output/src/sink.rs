//! Destinations for a rendered page.

use std::fs;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{OutputError, Result};

/// Something that makes a rendering visible or printable.
pub trait OutputSink {
    /// Delivers `text` as-is, UTF-8 encoded where bytes are written.
    fn deliver(&mut self, text: &str) -> Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn deliver(&mut self, text: &str) -> Result<()> {
        (**self).deliver(text)
    }
}

/// Writes renderings to a stream, stdout by default.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    writer: W,
    compact: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            compact: false,
        }
    }

    /// Drops the leading blank lines of the page offset before writing.
    ///
    /// Used for on-screen previews, where the offset only scrolls the page away.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    fn deliver(&mut self, text: &str) -> Result<()> {
        let text = if self.compact {
            text.trim_start_matches('\n')
        } else {
            text
        };
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(OutputError::Write)
    }
}

/// Writes renderings to a file, replacing previous contents.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn deliver(&mut self, text: &str) -> Result<()> {
        fs::write(&self.path, text.as_bytes()).map_err(|source| OutputError::FileWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = text.len(), "page written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_sink_writes_exact_text() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.deliver("\n\nI10       ").unwrap();
        assert_eq!(sink.into_inner(), b"\n\nI10       ");
    }

    #[test]
    fn compact_terminal_sink_drops_offset() {
        let mut sink = TerminalSink::new(Vec::new()).compact();
        sink.deliver("\n\n\nI10\n\nR51").unwrap();
        assert_eq!(sink.into_inner(), b"I10\n\nR51");
    }

    #[test]
    fn file_sink_replaces_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("page.txt");
        let mut sink = FileSink::new(&path);
        sink.deliver("first").unwrap();
        sink.deliver("M54.5 Ä").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "M54.5 Ä");
    }

    #[test]
    fn file_sink_reports_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut sink = FileSink::new(dir.path().join("missing").join("page.txt"));
        let err = sink.deliver("I10").unwrap_err();
        assert!(matches!(err, OutputError::FileWrite { .. }));
    }

    #[test]
    fn boxed_sinks_deliver() {
        let mut sink: Box<dyn OutputSink> = Box::new(TerminalSink::new(io::sink()));
        assert!(sink.deliver("I10").is_ok());
    }
}
