use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid code {0:?}: codes must be non-empty and contain no whitespace")]
    InvalidCode(String),
}

/// Raised by the capacity guard when a code list will not fit on one page.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("too many diagnoses to fit on paper: {count} (current max: {max})")]
pub struct CapacityError {
    pub count: usize,
    pub max: usize,
}
