//! Grid-subsystem error type.
//!
//! Every variant is a construction-time failure.  Searching a successfully
//! built `GridMap` never errors: an impossible query is simply "no path".

use thiserror::Error;

/// Errors produced by `gn-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid must have non-zero dimensions (got {width}x{height})")]
    EmptyGrid { width: usize, height: usize },

    #[error("occupancy has {got} cells, expected {expected} for the declared dimensions")]
    CellCountMismatch { expected: usize, got: usize },

    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, got: usize },

    #[error("invalid occupancy value {value:?} at row {row}, column {col} (expected 0 or 1)")]
    InvalidCell { row: usize, col: usize, value: String },

    #[error("grid dimension {0} does not fit a signed 32-bit coordinate")]
    TooLarge(usize),

    #[error("a {width}x{height} grid has too many cells to allocate")]
    TooManyCells { width: usize, height: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
