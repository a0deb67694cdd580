//! Error types for document discovery and code extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a single `.docx` package.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file is not a readable zip package.
    #[error("not a document package: {0}")]
    Package(#[source] zip::result::ZipError),

    /// A required package part is absent.
    #[error("package part '{part}' not found")]
    MissingPart { part: String },

    /// Failed to read a package part.
    #[error("failed to read package part: {0}")]
    Io(#[from] std::io::Error),

    /// The document markup could not be parsed.
    #[error("malformed document markup: {message}")]
    Xml { message: String },

    /// No `w:body` element below the document root.
    #[error("document has no body")]
    MissingBody,

    /// The body has fewer children than the configured table index.
    #[error("document body has no element at index {index}")]
    TableNotFound { index: usize },

    /// The body child at the configured index is something other than a table.
    #[error("document body element {index} is '{found}', expected a table")]
    NotATable { index: usize, found: String },

    /// A selected table row lacks the configured cell.
    #[error("table row {row} has no cell at column {column}")]
    MissingCell { row: usize, column: usize },
}

/// Errors that can occur while locating documents and extracting codes.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open a document.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Discovery Errors ===
    /// No document name contains the search term.
    #[error("could not find any files matching <{term}> in {dir}")]
    NoMatches { term: String, dir: PathBuf },

    // === Extraction Errors ===
    /// The configured code pattern is not a valid regular expression.
    #[error("invalid code pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The document could not be read in the expected layout.
    #[error("{path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
