//! Formula evaluator
//!
//! Executes formula ASTs to produce numbers. Cell references are resolved
//! through a caller-supplied resolver, and the first failure (from the
//! resolver or from arithmetic) aborts the whole evaluation.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use tabula_core::{CellError, Position};

impl FormulaExpr {
    /// Execute the expression, resolving every cell reference with `resolver`
    ///
    /// Any non-finite intermediate or final result fails with
    /// [`CellError::Arithmetic`].
    ///
    /// # Example
    /// ```rust
    /// use tabula_core::CellError;
    /// use tabula_formula::parse_formula;
    ///
    /// let ast = parse_formula("A1*2").unwrap();
    /// assert_eq!(ast.execute(&mut |_| Ok(21.0)), Ok(42.0));
    ///
    /// let ast = parse_formula("1/0").unwrap();
    /// assert_eq!(ast.execute(&mut |_| Ok(0.0)), Err(CellError::Arithmetic));
    /// ```
    pub fn execute<F>(&self, resolver: &mut F) -> Result<f64, CellError>
    where
        F: FnMut(Position) -> Result<f64, CellError>,
    {
        let value = match self {
            FormulaExpr::Number(n) => *n,
            FormulaExpr::CellRef(pos) => resolver(*pos)?,
            FormulaExpr::BinaryOp { op, left, right } => {
                let lhs = left.execute(resolver)?;
                let rhs = right.execute(resolver)?;
                evaluate_binary_op(*op, lhs, rhs)
            }
            FormulaExpr::UnaryOp { op, operand } => {
                let value = operand.execute(resolver)?;
                match op {
                    UnaryOperator::Plus => value,
                    UnaryOperator::Negate => -value,
                }
            }
        };

        check_finite(value)
    }
}

fn evaluate_binary_op(op: BinaryOperator, lhs: f64, rhs: f64) -> f64 {
    match op {
        BinaryOperator::Add => lhs + rhs,
        BinaryOperator::Subtract => lhs - rhs,
        BinaryOperator::Multiply => lhs * rhs,
        BinaryOperator::Divide => lhs / rhs,
    }
}

fn check_finite(value: f64) -> Result<f64, CellError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CellError::Arithmetic)
    }
}
