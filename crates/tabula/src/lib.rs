//! # tabula
//!
//! A spreadsheet evaluation engine: a grid of cells holding text or formulas
//! that reference other cells, with lazy memoized evaluation and cycle
//! rejection at edit time.
//!
//! ## Features
//!
//! - Empty, text and formula cells; a leading `'` stores literal text
//! - Arithmetic formulas over cell references (`=(A1+B2)/2`)
//! - Circular references rejected before an edit is committed
//! - Computed values cached per cell and invalidated along dependency edges
//! - Printable-area computation and tab-separated printing
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! let a1 = Position::parse("A1").unwrap();
//! let b1 = Position::parse("B1").unwrap();
//!
//! sheet.set_cell(a1, "=B1/2").unwrap();
//! sheet.set_cell(b1, "'10").unwrap();
//! assert_eq!(sheet.value(a1).unwrap(), Some(CellValue::Number(5.0)));
//!
//! // A formula that would read itself is refused
//! assert!(matches!(sheet.set_cell(b1, "=A1"), Err(Error::CircularDependency(_))));
//!
//! let mut out = Vec::new();
//! sheet.print_texts(&mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "=B1/2\t'10\n");
//! ```

pub mod cell;
pub mod content;
mod cycle;
pub mod dependency;
pub mod options;
pub mod prelude;
pub mod sheet;

pub use cell::Cell;
pub use content::CellContent;
pub use dependency::DependencyGraph;
pub use options::{CachePolicy, SheetOptions};
pub use sheet::Sheet;

// Re-export core types
pub use tabula_core::{CellError, CellValue, Error, Position, Result, Size, MAX_COLS, MAX_ROWS};

// Re-export formula types
pub use tabula_formula::{parse_formula, CellLookup, Formula, FormulaError, FormulaExpr};
