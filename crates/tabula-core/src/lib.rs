//! # tabula-core
//!
//! Core data structures for the tabula spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout tabula:
//! - [`CellValue`] - Represents cell values (numbers, strings, errors)
//! - [`CellError`] - The `#REF!`, `#VALUE!` and `#ARITHM!` error categories
//! - [`Position`] and [`Size`] - Cell addressing and area dimensions
//! - [`Error`] - Structural errors reported by sheet operations
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{CellValue, Position};
//!
//! let pos = Position::parse("C5").unwrap();
//! assert_eq!((pos.row, pos.col), (4, 2));
//! assert_eq!(CellValue::from(1.5).to_string(), "1.5");
//! ```

pub mod cell;
pub mod error;

// Re-exports for convenience
pub use cell::{format_number, CellError, CellValue, Position, Size};
pub use error::{Error, Result};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 16_384;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u32 = 16_384;
