//! Error types for output delivery.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Writing the rendering to a stream failed.
    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),

    /// Writing the rendering to a file failed.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating the temporary page file failed.
    #[error("failed to create temporary page file: {0}")]
    TempFile(#[source] std::io::Error),

    /// The configured command line is empty.
    #[error("no {role} command configured")]
    EmptyCommand { role: &'static str },

    /// The viewer or print command could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The viewer or print command exited unsuccessfully.
    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: String },

    /// A file sink was chosen without a destination path.
    #[error("file output needs a destination path")]
    MissingPath,
}

pub type Result<T> = std::result::Result<T, OutputError>;
