//! Diagnosis code extraction from the admission document's diagnosis table.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use ikprint_model::Code;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::docx::{CellSelection, read_cells};
use crate::error::{DocumentError, IngestError, Result};

/// Permissive ICD-10 shape: one capital letter, digits, optional decimal part.
pub const DEFAULT_CODE_PATTERN: &str = r"[A-Z]\d+(?:\.\d+)?";

/// Where the diagnoses sit in the document and how codes are recognized.
///
/// The defaults describe the admission template in use: diagnoses are in
/// the third cell of rows 12 to 16 of the first table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    pub table_index: usize,
    /// First diagnosis row (inclusive).
    pub first_row: usize,
    /// End of the diagnosis rows (exclusive).
    pub end_row: usize,
    pub cell_column: usize,
    pub code_pattern: String,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            table_index: 0,
            first_row: 12,
            end_row: 17,
            cell_column: 2,
            code_pattern: DEFAULT_CODE_PATTERN.to_string(),
        }
    }
}

impl ExtractionOptions {
    pub fn cell_selection(&self) -> CellSelection {
        CellSelection {
            table_index: self.table_index,
            rows: self.first_row..self.end_row,
            column: self.cell_column,
        }
    }
}

/// Pulls codes out of admission documents.
#[derive(Debug, Clone)]
pub struct CodeExtractor {
    selection: CellSelection,
    pattern: Regex,
}

impl CodeExtractor {
    pub fn new(options: &ExtractionOptions) -> Result<Self> {
        let pattern =
            Regex::new(&options.code_pattern).map_err(|source| IngestError::InvalidPattern {
                pattern: options.code_pattern.clone(),
                source,
            })?;
        Ok(Self {
            selection: options.cell_selection(),
            pattern,
        })
    }

    /// Extracts codes from the document at `path`, in document order.
    ///
    /// Duplicates are kept; the editor's code list drops them.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<Code>> {
        let file = File::open(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.extract(file).map_err(|source| IngestError::Document {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Extracts codes from an in-memory or on-disk `.docx` package.
    pub fn extract<R: Read + Seek>(
        &self,
        package: R,
    ) -> std::result::Result<Vec<Code>, DocumentError> {
        let cells = read_cells(package, &self.selection)?;
        let mut codes = Vec::new();
        for cell in &cells {
            let found = self.codes_in_text(&cell.text);
            debug!(row = cell.row, codes = found.len(), "diagnosis row scanned");
            codes.extend(found);
        }
        Ok(codes)
    }

    /// Every pattern match in `text`, left to right.
    pub fn codes_in_text(&self, text: &str) -> Vec<Code> {
        self.pattern
            .find_iter(text)
            .filter_map(|m| match Code::new(m.as_str()) {
                Ok(code) => Some(code),
                Err(err) => {
                    warn!(error = %err, "pattern matched an unusable code");
                    None
                }
            })
            .collect()
    }
}
