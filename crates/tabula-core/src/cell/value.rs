//! Cell value types

use super::format_number;
use std::fmt;

/// The value of a cell: the resting value of text content or the result of a
/// formula evaluation
///
/// No numeric/string coercion happens here; that is the formula evaluator's
/// job.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Numeric value
    Number(f64),

    /// String value
    String(String),

    /// Error value (#REF!, #VALUE!, #ARITHM!)
    Error(CellError),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// The empty string value held by empty cells
    pub fn empty() -> Self {
        CellValue::String(String::new())
    }

    /// Get the value as a number, if it is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as a string slice, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the error, if the value is one
    pub fn as_error(&self) -> Option<CellError> {
        match self {
            CellValue::Error(e) => Some(*e),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<CellError> for CellValue {
    fn from(e: CellError) -> Self {
        CellValue::Error(e)
    }
}

/// Categories of errors produced while computing a formula
///
/// Two errors are equal when their categories are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// #REF! - The formula reads an invalid position
    Ref,
    /// #VALUE! - Referenced text cannot be read as a number
    Value,
    /// #ARITHM! - An operation produced a non-finite number
    Arithmetic,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Ref => "#REF!",
            CellError::Value => "#VALUE!",
            CellError::Arithmetic => "#ARITHM!",
        }
    }

    /// Parse an error string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "#REF!" => Some(CellError::Ref),
            "#VALUE!" => Some(CellError::Value),
            "#ARITHM!" => Some(CellError::Arithmetic),
            _ => None,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(3.5), CellValue::Number(3.5));
        assert_eq!(CellValue::from("hello").as_str(), Some("hello"));
        assert_eq!(
            CellValue::from(CellError::Ref).as_error(),
            Some(CellError::Ref)
        );
        assert_eq!(CellValue::default(), CellValue::string(""));
    }

    #[test]
    fn test_no_implicit_coercion() {
        assert_eq!(CellValue::string("42").as_number(), None);
        assert_eq!(CellValue::Number(42.0).as_str(), None);
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Number(1.0 / 3.0).to_string(), "0.333333");
        assert_eq!(CellValue::Number(1e20).to_string(), "1e+20");
        assert_eq!(CellValue::string("text").to_string(), "text");
        assert_eq!(CellValue::Error(CellError::Value).to_string(), "#VALUE!");
    }

    #[test]
    fn test_cell_error_display() {
        assert_eq!(CellError::Ref.to_string(), "#REF!");
        assert_eq!(CellError::Value.to_string(), "#VALUE!");
        assert_eq!(CellError::Arithmetic.to_string(), "#ARITHM!");
    }

    #[test]
    fn test_cell_error_parse() {
        assert_eq!(CellError::from_str("#ARITHM!"), Some(CellError::Arithmetic));
        assert_eq!(CellError::from_str("#DIV/0!"), None);
    }
}
