//! Packs a code list into the fixed-width grid printed on the form.
//!
//! Codes fill the page column by column: the list is cut into chunks of
//! `column_height`, each chunk becomes one printed column, and the output is
//! read row by row across the chunks.
//!
//! ```text
//! M54.5      R51
//!
//! E11.9
//!
//! I10
//!
//! F32.1
//! ```
//!
//! Rendering never truncates. Callers run the capacity guard first.

use std::num::NonZeroUsize;

use ikprint_model::{Code, Layout};

const FIELD_SEPARATOR: &str = " ";
const ROW_SEPARATOR: &str = "\n\n";

/// Transposes `codes` into printed rows.
///
/// Row `i` holds the `i`-th code of every column. Columns shorter than
/// `column_height` contribute an empty field.
pub fn grid_rows(codes: &[Code], column_height: NonZeroUsize) -> Vec<Vec<&str>> {
    let columns: Vec<&[Code]> = codes.chunks(column_height.get()).collect();
    // The first column is always the tallest.
    let row_count = columns.first().map_or(0, |column| column.len());
    (0..row_count)
        .map(|row| {
            columns
                .iter()
                .map(|column| column.get(row).map_or("", Code::as_str))
                .collect()
        })
        .collect()
}

/// Renders the grid without the leading vertical offset.
pub fn render_grid(codes: &[Code], layout: &Layout) -> String {
    let width = layout.field_width;
    grid_rows(codes, layout.column_height)
        .into_iter()
        .map(|fields| {
            fields
                .into_iter()
                .map(|field| format!("{field:<width$}"))
                .collect::<Vec<_>>()
                .join(FIELD_SEPARATOR)
        })
        .collect::<Vec<_>>()
        .join(ROW_SEPARATOR)
}

/// Renders the full page text: vertical offset followed by the grid.
pub fn render(codes: &[Code], layout: &Layout) -> String {
    let grid = render_grid(codes, layout);
    let mut page = String::with_capacity(layout.vertical_offset + grid.len());
    page.push_str(&"\n".repeat(layout.vertical_offset));
    page.push_str(&grid);
    page
}
