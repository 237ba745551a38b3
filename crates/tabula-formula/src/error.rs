//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while compiling a formula
///
/// Failures during evaluation are not errors of this type: they are
/// [`tabula_core::CellError`] values carried inside the computed result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<FormulaError> for tabula_core::Error {
    fn from(err: FormulaError) -> Self {
        match err {
            FormulaError::Parse(msg) => tabula_core::Error::FormulaParse(msg),
        }
    }
}
