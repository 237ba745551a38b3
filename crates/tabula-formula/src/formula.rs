//! Compiled formulas bound to cell values
//!
//! [`Formula`] wraps a parsed expression and bridges it to cell values: it
//! coerces referenced cell values to numbers and turns evaluation failures into
//! [`CellValue::Error`] results.

use crate::ast::FormulaExpr;
use crate::error::FormulaResult;
use crate::parser::parse_formula;
use ahash::AHashSet;
use tabula_core::{CellError, CellValue, Position};

/// Read access to the computed values of other cells
pub trait CellLookup {
    /// The value of the cell at a valid `pos`, or `None` if there is no cell
    fn lookup(&self, pos: Position) -> Option<CellValue>;
}

/// A compiled formula
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expr: FormulaExpr,
    referenced: Vec<Position>,
}

impl Formula {
    /// Compile formula source (the text after `=`)
    pub fn parse(source: &str) -> FormulaResult<Self> {
        let expr = parse_formula(source)?;
        Ok(Self::from_expr(expr))
    }

    /// Wrap an already parsed expression
    pub fn from_expr(expr: FormulaExpr) -> Self {
        let mut seen = AHashSet::new();
        let referenced = expr
            .cells()
            .into_iter()
            .filter(|pos| pos.is_valid() && seen.insert(*pos))
            .collect();
        Self { expr, referenced }
    }

    /// The parsed expression
    pub fn expr(&self) -> &FormulaExpr {
        &self.expr
    }

    /// Canonical text of the expression, without the leading `=`
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }

    /// Valid referenced positions, deduplicated, in first-seen order
    pub fn referenced_cells(&self) -> &[Position] {
        &self.referenced
    }

    /// Evaluate against the cells visible through `cells`
    ///
    /// Never fails: errors become [`CellValue::Error`].
    pub fn evaluate<L: CellLookup + ?Sized>(&self, cells: &L) -> CellValue {
        let mut resolver = |pos: Position| resolve_argument(cells, pos);
        match self.expr.execute(&mut resolver) {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::Error(e),
        }
    }
}

/// Read a referenced cell as a numeric formula argument
fn resolve_argument<L: CellLookup + ?Sized>(cells: &L, pos: Position) -> Result<f64, CellError> {
    if !pos.is_valid() {
        return Err(CellError::Ref);
    }

    match cells.lookup(pos) {
        None => Ok(0.0),
        Some(CellValue::Number(n)) => Ok(n),
        Some(CellValue::String(s)) => parse_number(&s),
        Some(CellValue::Error(e)) => Err(e),
    }
}

/// Interpret text as a number: empty is zero, otherwise the rest of the string
/// after leading whitespace must be a finite float literal
fn parse_number(s: &str) -> Result<f64, CellError> {
    if s.is_empty() {
        return Ok(0.0);
    }
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(CellError::Value),
    }
}
