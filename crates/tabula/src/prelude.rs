//! Prelude module - common imports for tabula users
//!
//! ```rust
//! use tabula::prelude::*;
//! ```

pub use crate::{
    // Configuration
    CachePolicy,
    // Main types
    Cell,
    CellContent,
    // Value types
    CellError,
    CellValue,
    // Error types
    Error,
    Position,
    Result,
    Sheet,
    SheetOptions,
    Size,
};
