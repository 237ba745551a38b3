//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value of a cell
//! - [`CellError`] - Errors produced by formula evaluation
//! - [`Position`] - A cell's location (e.g., "A1")
//! - [`Size`] - Dimensions of an area of the sheet
//! - [`format_number`] - Display form of numbers

mod format;
mod position;
mod value;

pub use format::format_number;
pub use position::{Position, Size};
pub use value::{CellError, CellValue};
