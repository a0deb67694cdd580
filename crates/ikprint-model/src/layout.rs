//! Page geometry of the pre-printed form.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::CapacityError;

/// Codes stacked vertically in one printed column.
pub const DEFAULT_COLUMN_HEIGHT: NonZeroUsize = NonZeroUsize::new(4).unwrap();
/// Columns placed side by side.
pub const DEFAULT_ROW_LENGTH: NonZeroUsize = NonZeroUsize::new(7).unwrap();
/// Width every field is left-justified and padded to.
pub const DEFAULT_FIELD_WIDTH: usize = 10;
/// Newlines printed before the first row to reach the form's code box.
pub const DEFAULT_VERTICAL_OFFSET: usize = 34;

/// Maximum grid a single page can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub column_height: NonZeroUsize,
    pub row_length: NonZeroUsize,
}

impl Capacity {
    pub const fn new(column_height: NonZeroUsize, row_length: NonZeroUsize) -> Self {
        Self {
            column_height,
            row_length,
        }
    }

    /// Number of codes that fit on one page, saturating at `usize::MAX`.
    pub fn max_codes(&self) -> usize {
        self.column_height.get().saturating_mul(self.row_length.get())
    }

    /// Capacity guard run before a list is handed to the editor.
    pub fn check(&self, count: usize) -> Result<(), CapacityError> {
        let max = self.max_codes();
        if count > max {
            return Err(CapacityError { count, max });
        }
        Ok(())
    }

    pub fn fits(&self, count: usize) -> bool {
        count <= self.max_codes()
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_HEIGHT, DEFAULT_ROW_LENGTH)
    }
}

/// Rendering configuration: grid capacity plus the fixed text constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub column_height: NonZeroUsize,
    pub row_length: NonZeroUsize,
    pub field_width: usize,
    pub vertical_offset: usize,
}

impl Layout {
    pub fn capacity(&self) -> Capacity {
        Capacity::new(self.column_height, self.row_length)
    }

    #[must_use]
    pub fn with_vertical_offset(mut self, lines: usize) -> Self {
        self.vertical_offset = lines;
        self
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            column_height: DEFAULT_COLUMN_HEIGHT,
            row_length: DEFAULT_ROW_LENGTH,
            field_width: DEFAULT_FIELD_WIDTH,
            vertical_offset: DEFAULT_VERTICAL_OFFSET,
        }
    }
}
