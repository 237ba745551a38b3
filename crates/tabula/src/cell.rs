//! A single grid cell with a memoized value

use crate::content::CellContent;
use once_cell::unsync::OnceCell;
use tabula_core::{CellValue, Position};
use tabula_formula::CellLookup;

/// One addressable grid slot: its content plus the last computed value
///
/// Cells are owned by a [`crate::Sheet`] and changed only through it, so the
/// sheet can reject cycles and keep dependent caches up to date.
#[derive(Debug, Default)]
pub struct Cell {
    content: CellContent,
    cache: OnceCell<CellValue>,
}

impl Cell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// The current content
    pub fn content(&self) -> &CellContent {
        &self.content
    }

    /// The computed value, evaluated on first use and cached afterwards
    ///
    /// `cells` resolves formula references. Whatever lookup computes the value
    /// first, the result stays cached until the owning sheet changes a cell
    /// this one reads or [`Cell::invalidate_cache`] is called; later calls
    /// return it without consulting `cells`. Pass the owning sheet unless a
    /// cached value from another source is wanted.
    pub fn value<L: CellLookup + ?Sized>(&self, cells: &L) -> CellValue {
        self.cache
            .get_or_init(|| self.content.evaluate(cells))
            .clone()
    }

    /// The display text
    pub fn text(&self) -> String {
        self.content.text()
    }

    /// Valid positions the content reads, without duplicates
    pub fn referenced_cells(&self) -> &[Position] {
        self.content.referenced_cells()
    }

    /// Whether a computed value is currently memoized
    pub fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Drop the memoized value so the next read recomputes it
    pub fn invalidate_cache(&mut self) {
        self.cache.take();
    }

    /// Replace the content; callers have already validated it
    pub(crate) fn set_content(&mut self, content: CellContent) {
        self.content = content;
        self.invalidate_cache();
    }

    pub(crate) fn clear(&mut self) {
        self.set_content(CellContent::Empty);
    }
}
