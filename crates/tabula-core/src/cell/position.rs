//! Cell position and sheet size types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A zero-based (row, column) grid coordinate
///
/// In A1 notation columns are letters (A=0, Z=25, AA=26, ...) and rows are
/// 1-based numbers, so `B3` is row 2, column 1.
///
/// Positions outside `[0, MAX_ROWS) x [0, MAX_COLS)` are invalid. The formula
/// parser uses [`Position::NONE`] to represent malformed references, and an
/// invalid position is never used to index the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u32,
}

impl Position {
    /// The invalid sentinel position
    pub const NONE: Position = Position {
        row: u32::MAX,
        col: u32::MAX,
    };

    /// Create a new position
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Whether this position lies inside the grid limits
    pub fn is_valid(&self) -> bool {
        self.row < MAX_ROWS && self.col < MAX_COLS
    }

    /// Parse A1 notation, mapping anything malformed or out of range to
    /// [`Position::NONE`]
    ///
    /// # Examples
    /// ```
    /// use tabula_core::Position;
    ///
    /// assert_eq!(Position::from_a1("B3"), Position::new(2, 1));
    /// assert_eq!(Position::from_a1("A0"), Position::NONE);
    /// assert_eq!(Position::from_a1("b3"), Position::NONE);
    /// ```
    pub fn from_a1(s: &str) -> Self {
        Self::parse_a1(s).unwrap_or(Position::NONE)
    }

    /// Parse A1 notation, failing for anything that is not an in-range
    /// reference
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_a1(s).ok_or_else(|| Error::InvalidPosition(format!("'{}'", s)))
    }

    fn parse_a1(s: &str) -> Option<Self> {
        let split = s.find(|c: char| !c.is_ascii_uppercase())?;
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let col = Self::letters_to_column(letters)?;

        let mut row: u32 = 0;
        for b in digits.bytes() {
            row = row.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
            if row > MAX_ROWS {
                return None;
            }
        }
        // Rows are 1-based in A1 notation
        let row = row.checked_sub(1)?;

        let pos = Position::new(row, col);
        pos.is_valid().then_some(pos)
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = u64::from(col) + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert upper-case column letters to an index (A = 0, Z = 25, AA = 26)
    ///
    /// Returns `None` for non-letters or columns past [`MAX_COLS`].
    pub fn letters_to_column(letters: &str) -> Option<u32> {
        if letters.is_empty() {
            return None;
        }

        let mut col: u32 = 0;
        for b in letters.bytes() {
            if !b.is_ascii_uppercase() {
                return None;
            }
            col = col * 26 + u32::from(b - b'A') + 1;
            if col > MAX_COLS {
                return None;
            }
        }

        Some(col - 1)
    }

    /// Format as A1-style string, empty for invalid positions
    pub fn to_a1_string(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Dimensions of a rectangular area of the sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub rows: u32,
    pub cols: u32,
}

impl Size {
    /// Create a new size
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }
}
