//! Minimal WordprocessingML reader.
//!
//! Reads exactly one thing: the text of one cell column across a range of
//! rows of one top-level table in `word/document.xml`. The markup is
//! streamed, nothing else of the document is kept.

use std::io::{BufRead, BufReader, Read, Seek};
use std::ops::Range;

use quick_xml::NsReader;
use quick_xml::events::{BytesRef, Event};
use quick_xml::name::{Namespace, ResolveResult};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::DocumentError;

/// Main document part of a `.docx` package.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// WordprocessingML main namespace.
const WORDML_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Which cells to read from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSelection {
    /// Index of the table among the body's child elements.
    pub table_index: usize,
    /// Half-open range of row indices within the table.
    pub rows: Range<usize>,
    /// Index of the cell within each selected row.
    pub column: usize,
}

/// Text of one selected cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellText {
    pub row: usize,
    pub text: String,
}

/// Opens the package and reads the selected cells from its main part.
pub fn read_cells<R: Read + Seek>(
    package: R,
    selection: &CellSelection,
) -> Result<Vec<CellText>, DocumentError> {
    let mut archive = ZipArchive::new(package).map_err(DocumentError::Package)?;
    let part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
        ZipError::FileNotFound => DocumentError::MissingPart {
            part: DOCUMENT_PART.to_string(),
        },
        other => DocumentError::Package(other),
    })?;
    read_cells_from_xml(BufReader::new(part), selection)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Body,
    Table,
    Row,
    Cell,
    Other,
}

fn classify(ns: &ResolveResult<'_>, local_name: &[u8]) -> Element {
    if !matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == WORDML_NS) {
        return Element::Other;
    }
    match local_name {
        b"body" => Element::Body,
        b"tbl" => Element::Table,
        b"tr" => Element::Row,
        b"tc" => Element::Cell,
        _ => Element::Other,
    }
}

/// Walk state. Depth counts open elements: the document root sits at depth
/// 1, the body at 2, its children at 3, table rows at 4 and cells at 5.
#[derive(Debug, Default)]
struct TableWalk {
    depth: usize,
    body_seen: bool,
    in_body: bool,
    body_children: usize,
    in_table: bool,
    table_done: bool,
    rows_seen: usize,
    current_row: Option<usize>,
    cells_seen: usize,
    cell_found: bool,
    in_cell: bool,
    text: String,
    cells: Vec<CellText>,
}

impl TableWalk {
    /// Handles an opening tag. `parent_depth` is the depth before entering.
    fn open(
        &mut self,
        element: Element,
        local_name: &[u8],
        selection: &CellSelection,
    ) -> Result<(), DocumentError> {
        let parent_depth = self.depth;
        match parent_depth {
            1 if element == Element::Body && !self.body_seen => {
                self.body_seen = true;
                self.in_body = true;
            }
            2 if self.in_body => {
                if self.body_children == selection.table_index {
                    if element != Element::Table {
                        return Err(DocumentError::NotATable {
                            index: selection.table_index,
                            found: String::from_utf8_lossy(local_name).into_owned(),
                        });
                    }
                    self.in_table = true;
                }
                self.body_children += 1;
            }
            3 if self.in_table && element == Element::Row => {
                if selection.rows.contains(&self.rows_seen) {
                    self.current_row = Some(self.rows_seen);
                    self.cells_seen = 0;
                    self.cell_found = false;
                }
                self.rows_seen += 1;
            }
            4 if self.current_row.is_some() && element == Element::Cell => {
                if self.cells_seen == selection.column {
                    self.in_cell = true;
                    self.cell_found = true;
                    self.text.clear();
                }
                self.cells_seen += 1;
            }
            _ => {}
        }
        Ok(())
    }

    /// Handles a closing tag at the current depth.
    fn close(&mut self, selection: &CellSelection) -> Result<(), DocumentError> {
        match self.depth {
            2 if self.in_body => self.in_body = false,
            3 if self.in_table => {
                self.in_table = false;
                self.table_done = true;
            }
            4 => {
                if let Some(row) = self.current_row.take() {
                    if !self.cell_found {
                        return Err(DocumentError::MissingCell {
                            row,
                            column: selection.column,
                        });
                    }
                    self.cells.push(CellText {
                        row,
                        text: std::mem::take(&mut self.text),
                    });
                }
            }
            5 if self.in_cell => self.in_cell = false,
            _ => {}
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if self.in_cell {
            self.text.push_str(text);
        }
    }
}

/// Reads the selected cells from `word/document.xml` markup.
pub fn read_cells_from_xml<R: BufRead>(
    xml: R,
    selection: &CellSelection,
) -> Result<Vec<CellText>, DocumentError> {
    let mut reader = NsReader::from_reader(xml);
    let mut buf = Vec::new();
    let mut walk = TableWalk::default();

    loop {
        let (ns, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(xml_error)?;
        match event {
            Event::Start(e) => {
                let element = classify(&ns, e.local_name().as_ref());
                walk.open(element, e.local_name().as_ref(), selection)?;
                walk.depth += 1;
            }
            Event::Empty(e) => {
                let element = classify(&ns, e.local_name().as_ref());
                walk.open(element, e.local_name().as_ref(), selection)?;
                walk.depth += 1;
                walk.close(selection)?;
                walk.depth -= 1;
            }
            Event::End(_) => {
                walk.close(selection)?;
                walk.depth = walk.depth.saturating_sub(1);
            }
            Event::Text(e) => {
                if walk.in_cell {
                    let text = e.decode().map_err(xml_error)?;
                    walk.push_text(&text);
                }
            }
            Event::CData(e) => {
                if walk.in_cell {
                    let text = e.decode().map_err(xml_error)?;
                    walk.push_text(&text);
                }
            }
            Event::GeneralRef(e) => {
                if walk.in_cell {
                    let text = resolve_reference(&e)?;
                    walk.push_text(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
        if walk.table_done {
            break;
        }
    }

    if !walk.body_seen {
        return Err(DocumentError::MissingBody);
    }
    if walk.body_children <= selection.table_index {
        return Err(DocumentError::TableNotFound {
            index: selection.table_index,
        });
    }
    Ok(walk.cells)
}

/// Expands a character or predefined entity reference.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, DocumentError> {
    if let Some(ch) = reference.resolve_char_ref().map_err(xml_error)? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(xml_error)?;
    match quick_xml::escape::resolve_predefined_entity(&name) {
        Some(value) => Ok(value.to_string()),
        None => Err(DocumentError::Xml {
            message: format!("unknown entity reference '&{name};'"),
        }),
    }
}

fn xml_error(err: impl std::fmt::Display) -> DocumentError {
    DocumentError::Xml {
        message: err.to_string(),
    }
}
