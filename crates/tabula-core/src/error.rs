//! Error types for tabula-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors reported by sheet operations.
///
/// These abort the requested mutation and are never stored in a cell.
/// Errors produced while computing a formula are [`crate::CellError`] values
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Position outside the grid, or the invalid sentinel
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    /// Formula text could not be compiled
    #[error("Formula parse error: {0}")]
    FormulaParse(String),

    /// The new formula would make a cell depend on itself
    #[error("Circular reference detected involving cell {0}")]
    CircularDependency(String),
}

impl Error {
    /// Create an invalid-position error for a row/column pair
    pub fn invalid_position(row: u32, col: u32) -> Self {
        Error::InvalidPosition(format!("(row {}, col {})", row, col))
    }
}
