//! # tabula-formula
//!
//! Formula compiler and evaluator for tabula.
//!
//! This crate provides:
//! - Formula parsing (text → AST)
//! - Canonical re-printing of an AST (`Display`)
//! - Formula execution against a cell resolver
//! - [`Formula`], which binds a compiled expression to cell values
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{CellValue, Position};
//! use tabula_formula::{CellLookup, Formula};
//!
//! struct Constant;
//!
//! impl CellLookup for Constant {
//!     fn lookup(&self, _pos: Position) -> Option<CellValue> {
//!         Some(CellValue::from("4"))
//!     }
//! }
//!
//! let formula = Formula::parse("( A1 + 2 ) * B1").unwrap();
//! assert_eq!(formula.expression(), "(A1+2)*B1");
//! assert_eq!(formula.evaluate(&Constant), CellValue::Number(24.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use formula::{CellLookup, Formula};
pub use parser::parse_formula;
