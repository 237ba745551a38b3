//! Formula Abstract Syntax Tree types
//!
//! The [`fmt::Display`] implementation is the canonical re-rendering of an
//! expression: no whitespace and only the parentheses needed to rebuild the
//! same tree. Numbers use [`format_number`], and malformed references print
//! as `#REF!`, which the parser reads back as a malformed reference.

use std::fmt;
use tabula_core::{format_number, CellError, Position};

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal (always finite)
    Number(f64),
    /// Single cell reference, [`Position::NONE`] when malformed
    CellRef(Position),
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

impl BinaryOperator {
    pub fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }

    /// Whether `a op (b op' c)` differs from `a op b op' c` at equal precedence
    fn is_left_associative_only(self) -> bool {
        matches!(self, BinaryOperator::Subtract | BinaryOperator::Divide)
    }
}

impl UnaryOperator {
    pub fn symbol(self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Negate => '-',
        }
    }
}

impl FormulaExpr {
    fn precedence(&self) -> u8 {
        match self {
            FormulaExpr::BinaryOp { op, .. } => op.precedence(),
            FormulaExpr::UnaryOp { .. } => 3,
            FormulaExpr::Number(_) | FormulaExpr::CellRef(_) => 4,
        }
    }

    /// Every cell reference in source order, duplicates and malformed
    /// references included
    pub fn cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        self.collect_cells(&mut cells);
        cells
    }

    fn collect_cells(&self, out: &mut Vec<Position>) {
        match self {
            FormulaExpr::Number(_) => {}
            FormulaExpr::CellRef(pos) => out.push(*pos),
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.collect_cells(out);
                right.collect_cells(out);
            }
            FormulaExpr::UnaryOp { operand, .. } => operand.collect_cells(out),
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaExpr::Number(n) => f.write_str(&format_number(*n)),
            FormulaExpr::CellRef(pos) if pos.is_valid() => write!(f, "{}", pos),
            FormulaExpr::CellRef(_) => write!(f, "{}", CellError::Ref),
            FormulaExpr::BinaryOp { op, left, right } => {
                let prec = op.precedence();
                left.fmt_child(f, left.precedence() < prec)?;
                write!(f, "{}", op.symbol())?;
                let right_prec = right.precedence();
                right.fmt_child(
                    f,
                    right_prec < prec || (right_prec == prec && op.is_left_associative_only()),
                )
            }
            FormulaExpr::UnaryOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                operand.fmt_child(f, operand.precedence() < self.precedence())
            }
        }
    }
}
