//! Cell content variants

use tabula_core::{CellValue, Position};
use tabula_formula::{CellLookup, Formula, FormulaResult};

/// Marker that makes the rest of the input literal text
pub const ESCAPE_SIGN: char = '\'';

/// Marker that starts a formula
pub const FORMULA_SIGN: char = '=';

/// What a cell holds
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellContent {
    /// Nothing; reads as the empty string
    #[default]
    Empty,
    /// Raw user text, possibly starting with [`ESCAPE_SIGN`]
    Text(String),
    /// A compiled formula
    Formula(Formula),
}

impl CellContent {
    /// Classify and build content from user input
    ///
    /// The empty string is [`CellContent::Empty`]. Input longer than one
    /// character that starts with `=` is compiled as a formula. Anything else,
    /// including a lone `=`, is text.
    pub fn parse(text: &str) -> FormulaResult<Self> {
        if text.is_empty() {
            return Ok(CellContent::Empty);
        }
        match text.strip_prefix(FORMULA_SIGN) {
            Some(source) if !source.is_empty() => Ok(CellContent::Formula(Formula::parse(source)?)),
            _ => Ok(CellContent::Text(text.to_string())),
        }
    }

    /// Display text: verbatim input for text, `=` plus the canonical
    /// expression for formulas
    pub fn text(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(text) => text.clone(),
            CellContent::Formula(formula) => format!("{}{}", FORMULA_SIGN, formula.expression()),
        }
    }

    /// Positions read by a formula; empty for other content
    pub fn referenced_cells(&self) -> &[Position] {
        match self {
            CellContent::Formula(formula) => formula.referenced_cells(),
            _ => &[],
        }
    }

    /// Whether this is a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellContent::Formula(_))
    }

    pub(crate) fn evaluate<L: CellLookup + ?Sized>(&self, cells: &L) -> CellValue {
        match self {
            CellContent::Empty => CellValue::empty(),
            CellContent::Text(text) => {
                let value = text.strip_prefix(ESCAPE_SIGN).unwrap_or(text);
                CellValue::string(value)
            }
            CellContent::Formula(formula) => formula.evaluate(cells),
        }
    }
}
