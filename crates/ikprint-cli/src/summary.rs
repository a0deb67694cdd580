use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ikprint_cli::workflow::RunSummary;
use ikprint_ingest::document_label;
use ikprint_model::{Code, CodeList};

pub fn print_summary(summary: &RunSummary) {
    println!("Document: {}", document_label(&summary.document));
    let mut table = Table::new();
    table.set_header(vec![header_cell("Extracted"), header_cell("Printed")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(summary.extracted),
        Cell::new(summary.codes.len()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if !summary.codes.is_empty() {
        println!("Codes: {}", summary.codes);
    }
}

/// Prints extracted codes in document order, marking repeats.
pub fn print_extracted(document: &Path, codes: &[Code]) {
    println!("Document: {}", document_label(document));
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Code"), header_cell("Note")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    let mut seen = CodeList::new();
    for (idx, code) in codes.iter().enumerate() {
        let note = if seen.add(code.clone()) {
            Cell::new("")
        } else {
            dim_cell("duplicate")
        };
        table.add_row(vec![Cell::new(idx + 1), Cell::new(code), note]);
    }
    println!("{table}");
    println!("{} codes, {} unique", codes.len(), seen.len());
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
