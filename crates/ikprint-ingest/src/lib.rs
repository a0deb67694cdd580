//! Locating admission documents and reading diagnosis codes out of them.

pub mod discovery;
pub mod docx;
pub mod error;
pub mod extract;

pub use discovery::{DocumentSource, document_label, find_documents, list_documents};
pub use docx::{CellSelection, CellText, DOCUMENT_PART, read_cells, read_cells_from_xml};
pub use error::{DocumentError, IngestError, Result};
pub use extract::{CodeExtractor, DEFAULT_CODE_PATTERN, ExtractionOptions};
