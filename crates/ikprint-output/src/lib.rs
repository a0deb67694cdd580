//! Delivery of rendered pages.

pub mod command;
pub mod error;
pub mod options;
pub mod sink;

pub use command::{CommandSink, DEFAULT_KEEP_FILE, DEFAULT_PRINTER, DEFAULT_VIEWER};
pub use error::{OutputError, Result};
pub use options::{OutputOptions, SinkKind};
pub use sink::{FileSink, OutputSink, TerminalSink};
