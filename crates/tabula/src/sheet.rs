//! Sheet: a growable sparse grid of cells

use crate::cell::Cell;
use crate::content::CellContent;
use crate::cycle::find_cycle;
use crate::dependency::DependencyGraph;
use crate::options::{CachePolicy, SheetOptions};
use std::io::{self, Write};
use tabula_core::{CellValue, Error, Position, Result, Size};
use tabula_formula::CellLookup;

/// A spreadsheet: owns every cell and the dependency edges between them
///
/// Storage is a ragged grid. Rows are allocated up to the highest row ever
/// written and, within a row, columns up to the highest column written in
/// that row. Slots that were never written hold no cell.
///
/// ```rust
/// use tabula::{CellValue, Position, Sheet};
///
/// let mut sheet = Sheet::new();
/// sheet.set_cell(Position::parse("A1")?, "2")?;
/// sheet.set_cell(Position::parse("B1")?, "=A1*21")?;
///
/// let b1 = sheet.cell(Position::parse("B1")?)?.unwrap();
/// assert_eq!(b1.value(&sheet), CellValue::Number(42.0));
/// assert_eq!(b1.text(), "=A1*21");
/// # Ok::<(), tabula::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Sheet {
    cells: Vec<Vec<Option<Cell>>>,
    graph: DependencyGraph,
    options: SheetOptions,
}

impl Sheet {
    /// Create an empty sheet with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sheet with the given options
    pub fn with_options(options: SheetOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The sheet options
    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    /// Set the content of the cell at `pos` from user input
    ///
    /// Fails without changing the sheet's content if the position is
    /// invalid, the formula does not compile, or the formula would make the
    /// cell depend on itself.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        check_position(pos)?;
        self.ensure_cell(pos);

        let content = CellContent::parse(text)?;
        if let Some(via) = find_cycle(self, pos, content.referenced_cells()) {
            log::warn!("rejected formula for {}: circular reference through {}", pos, via);
            return Err(Error::CircularDependency(pos.to_string()));
        }

        self.graph.set_precedents(pos, content.referenced_cells());
        if let Some(cell) = self.slot_mut(pos) {
            cell.set_content(content);
        }
        log::debug!("set {} to {:?}", pos, text);

        self.invalidate_dependents(pos);
        Ok(())
    }

    /// The cell at `pos`, or `None` if it was never written
    pub fn cell(&self, pos: Position) -> Result<Option<&Cell>> {
        check_position(pos)?;
        Ok(self.slot(pos))
    }

    /// Mutable access to the cell at `pos`, or `None` if it was never written
    pub fn cell_mut(&mut self, pos: Position) -> Result<Option<&mut Cell>> {
        check_position(pos)?;
        Ok(self.slot_mut(pos))
    }

    /// The computed value at `pos`, or `None` if there is no cell
    pub fn value(&self, pos: Position) -> Result<Option<CellValue>> {
        Ok(self.cell(pos)?.map(|cell| cell.value(self)))
    }

    /// The display text at `pos`, or `None` if there is no cell
    pub fn text(&self, pos: Position) -> Result<Option<String>> {
        Ok(self.cell(pos)?.map(Cell::text))
    }

    /// Reset the cell at `pos` to empty content
    ///
    /// The slot stays allocated. Positions never written are left alone.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        check_position(pos)?;

        match self.slot_mut(pos) {
            Some(cell) => cell.clear(),
            None => return Ok(()),
        }
        self.graph.clear_precedents(pos);
        log::debug!("cleared {}", pos);

        self.invalidate_dependents(pos);
        Ok(())
    }

    /// The smallest area, anchored at A1, holding every cell with
    /// non-empty text
    pub fn printable_size(&self) -> Size {
        let mut size = Size::default();

        for (row, cells) in self.cells.iter().enumerate() {
            for (col, slot) in cells.iter().enumerate() {
                if slot.as_ref().map_or(false, |cell| !cell.text().is_empty()) {
                    size.rows = size.rows.max(row as u32 + 1);
                    size.cols = size.cols.max(col as u32 + 1);
                }
            }
        }

        size
    }

    /// Write computed values over the printable area, tab-separated, one
    /// line per row
    pub fn print_values<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, |cell| cell.value(self).to_string())
    }

    /// Write display texts over the printable area, tab-separated, one line
    /// per row
    pub fn print_texts<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, Cell::text)
    }

    fn print_with<W, F>(&self, out: &mut W, render: F) -> io::Result<()>
    where
        W: Write + ?Sized,
        F: Fn(&Cell) -> String,
    {
        let size = self.printable_size();

        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    out.write_all(b"\t")?;
                }
                if let Some(cell) = self.slot(Position::new(row, col)) {
                    out.write_all(render(cell).as_bytes())?;
                }
            }
            out.write_all(b"\n")?;
        }

        Ok(())
    }

    /// The cell at an already validated position
    pub(crate) fn slot(&self, pos: Position) -> Option<&Cell> {
        self.cells
            .get(pos.row as usize)?
            .get(pos.col as usize)?
            .as_ref()
    }

    fn slot_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.cells
            .get_mut(pos.row as usize)?
            .get_mut(pos.col as usize)?
            .as_mut()
    }

    /// Grow the grid to include `pos` and create an empty cell there if
    /// needed
    fn ensure_cell(&mut self, pos: Position) {
        let (row, col) = (pos.row as usize, pos.col as usize);

        if self.cells.len() <= row {
            log::debug!("growing sheet to {} rows", row + 1);
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, || None);
        }
        cells[col].get_or_insert_with(Cell::new);
    }

    fn invalidate_dependents(&mut self, pos: Position) {
        if self.options.cache_policy == CachePolicy::SelfOnly {
            return;
        }

        for dependent in self.graph.transitive_dependents(pos) {
            if let Some(cell) = self.slot_mut(dependent) {
                log::trace!("invalidating {} after change to {}", dependent, pos);
                cell.invalidate_cache();
            }
        }
    }
}

impl CellLookup for Sheet {
    fn lookup(&self, pos: Position) -> Option<CellValue> {
        self.slot(pos).map(|cell| cell.value(self))
    }
}

fn check_position(pos: Position) -> Result<()> {
    if pos.is_valid() {
        Ok(())
    } else {
        Err(Error::invalid_position(pos.row, pos.col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pos(a1: &str) -> Position {
        Position::from_a1(a1)
    }

    fn printed_values(sheet: &Sheet) -> String {
        let mut out = Vec::new();
        sheet.print_values(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn printed_texts(sheet: &Sheet) -> String {
        let mut out = Vec::new();
        sheet.print_texts(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_grid_grows_lazily() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("C2"), "x").unwrap();

        assert_eq!(sheet.cells.len(), 2);
        assert!(sheet.cells[0].is_empty());
        assert_eq!(sheet.cells[1].len(), 3);
        assert!(sheet.cell(pos("A2")).unwrap().is_none());
        assert!(sheet.cell(pos("Z100")).unwrap().is_none());
        assert!(sheet.cell(pos("C2")).unwrap().is_some());
    }

    #[test]
    fn test_invalid_position_is_rejected() {
        let mut sheet = Sheet::new();
        let bad = Position::new(16384, 0);

        assert!(matches!(sheet.set_cell(bad, "1"), Err(Error::InvalidPosition(_))));
        assert!(matches!(sheet.cell(bad), Err(Error::InvalidPosition(_))));
        assert!(matches!(sheet.cell_mut(Position::NONE), Err(Error::InvalidPosition(_))));
        assert!(matches!(sheet.clear_cell(bad), Err(Error::InvalidPosition(_))));
        assert!(sheet.cells.is_empty());
    }

    #[test]
    fn test_parse_failure_keeps_previous_content() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=1+2").unwrap();
        assert_eq!(sheet.value(pos("A1")).unwrap(), Some(CellValue::Number(3.0)));

        let err = sheet.set_cell(pos("A1"), "=1+").unwrap_err();
        assert!(matches!(err, Error::FormulaParse(_)));
        assert_eq!(sheet.text(pos("A1")).unwrap().as_deref(), Some("=1+2"));
        assert!(sheet.cell(pos("A1")).unwrap().unwrap().is_cached());
    }

    #[test]
    fn test_cycle_rejection_keeps_cache() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=B1+1").unwrap();
        sheet.set_cell(pos("B1"), "1").unwrap();
        assert_eq!(sheet.value(pos("A1")).unwrap(), Some(CellValue::Number(2.0)));

        let err = sheet.set_cell(pos("B1"), "=A1").unwrap_err();
        assert_eq!(err, Error::CircularDependency("B1".into()));
        assert_eq!(sheet.text(pos("B1")).unwrap().as_deref(), Some("1"));
        assert!(sheet.cell(pos("A1")).unwrap().unwrap().is_cached());
        assert_eq!(sheet.value(pos("A1")).unwrap(), Some(CellValue::Number(2.0)));
    }

    #[test]
    fn test_dependents_are_invalidated() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "1").unwrap();
        sheet.set_cell(pos("B1"), "=A1*2").unwrap();
        sheet.set_cell(pos("C1"), "=B1+1").unwrap();
        assert_eq!(sheet.value(pos("C1")).unwrap(), Some(CellValue::Number(3.0)));

        sheet.set_cell(pos("A1"), "5").unwrap();
        assert!(!sheet.cell(pos("B1")).unwrap().unwrap().is_cached());
        assert!(!sheet.cell(pos("C1")).unwrap().unwrap().is_cached());
        assert_eq!(sheet.value(pos("C1")).unwrap(), Some(CellValue::Number(11.0)));

        sheet.clear_cell(pos("A1")).unwrap();
        assert_eq!(sheet.value(pos("C1")).unwrap(), Some(CellValue::Number(1.0)));
    }

    #[test]
    fn test_dependent_on_missing_cell_sees_new_value() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=B1").unwrap();
        assert_eq!(sheet.value(pos("A1")).unwrap(), Some(CellValue::Number(0.0)));

        sheet.set_cell(pos("B1"), "7").unwrap();
        assert_eq!(sheet.value(pos("A1")).unwrap(), Some(CellValue::Number(7.0)));
    }

    #[test]
    fn test_self_only_policy_keeps_stale_dependents() {
        let mut sheet =
            Sheet::with_options(SheetOptions::default().with_cache_policy(CachePolicy::SelfOnly));
        sheet.set_cell(pos("A1"), "1").unwrap();
        sheet.set_cell(pos("B1"), "=A1").unwrap();
        assert_eq!(sheet.value(pos("B1")).unwrap(), Some(CellValue::Number(1.0)));

        sheet.set_cell(pos("A1"), "2").unwrap();
        assert_eq!(sheet.value(pos("B1")).unwrap(), Some(CellValue::Number(1.0)));

        sheet.cell_mut(pos("B1")).unwrap().unwrap().invalidate_cache();
        assert_eq!(sheet.value(pos("B1")).unwrap(), Some(CellValue::Number(2.0)));
    }

    #[test]
    fn test_clear_cell() {
        let mut sheet = Sheet::new();
        sheet.clear_cell(pos("D4")).unwrap();
        assert!(sheet.cells.is_empty());

        sheet.set_cell(pos("B2"), "=A1").unwrap();
        sheet.clear_cell(pos("B2")).unwrap();
        let cell = sheet.cell(pos("B2")).unwrap().unwrap();
        assert_eq!(cell.text(), "");
        assert!(cell.referenced_cells().is_empty());
        assert_eq!(sheet.graph.get_dependents(pos("A1")).count(), 0);
    }

    #[test]
    fn test_printable_size() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.printable_size(), Size::new(0, 0));

        sheet.set_cell(pos("C5"), "x").unwrap();
        assert_eq!(sheet.printable_size(), Size::new(5, 3));

        sheet.set_cell(pos("E1"), "y").unwrap();
        assert_eq!(sheet.printable_size(), Size::new(5, 5));

        // Empty cells do not count
        sheet.set_cell(pos("Z30"), "").unwrap();
        sheet.clear_cell(pos("E1")).unwrap();
        assert_eq!(sheet.printable_size(), Size::new(5, 3));
    }

    #[test]
    fn test_print_values_and_texts() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=(1+2)*2").unwrap();
        sheet.set_cell(pos("B1"), "'=oops").unwrap();
        sheet.set_cell(pos("A2"), "=1/0").unwrap();
        sheet.set_cell(pos("C2"), "=A1/4").unwrap();

        assert_eq!(printed_values(&sheet), "6\t=oops\t\n#ARITHM!\t\t1.5\n");
        assert_eq!(printed_texts(&sheet), "=(1+2)*2\t'=oops\t\n=1/0\t\t=A1/4\n");
    }

    #[test]
    fn test_print_empty_sheet() {
        let sheet = Sheet::new();
        assert_eq!(printed_values(&sheet), "");
        assert_eq!(printed_texts(&sheet), "");
    }
}
