//! Circular dependency detection for formula cells.
//!
//! Before a formula is committed we verify that none of the cells it reads
//! can reach the cell being written (e.g. A1 references B1, B1 references
//! C1, C1 references A1). The check runs against the current grid, so a
//! rejected formula leaves no trace.

use crate::sheet::Sheet;
use ahash::AHashSet;
use tabula_core::Position;

/// Check whether giving `target` a formula that reads `references` would
/// close a cycle. Returns the reference through which `target` is reached.
///
/// Depth-first search from each reference, with one visited set shared by
/// all branches: a cell already explored cannot lead back to `target`
/// because the graph does not change during the check. Positions without a
/// cell are dead ends.
pub(crate) fn find_cycle(
    sheet: &Sheet,
    target: Position,
    references: &[Position],
) -> Option<Position> {
    let mut visited = AHashSet::new();

    references
        .iter()
        .copied()
        .find(|&start| reaches(sheet, start, target, &mut visited))
}

fn reaches(
    sheet: &Sheet,
    current: Position,
    target: Position,
    visited: &mut AHashSet<Position>,
) -> bool {
    if current == target {
        return true;
    }

    if !visited.insert(current) {
        return false;
    }

    let Some(cell) = sheet.slot(current) else {
        return false;
    };

    cell.referenced_cells()
        .iter()
        .any(|&next| reaches(sheet, next, target, visited))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(a1: &str) -> Position {
        Position::from_a1(a1)
    }

    #[test]
    fn test_self_reference() {
        let sheet = Sheet::new();
        assert_eq!(find_cycle(&sheet, pos("A1"), &[pos("A1")]), Some(pos("A1")));
    }

    #[test]
    fn test_long_cycle() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("B1"), "=C1").unwrap();
        sheet.set_cell(pos("C1"), "=D1+E1").unwrap();
        sheet.set_cell(pos("E1"), "=A1").unwrap();

        assert_eq!(
            find_cycle(&sheet, pos("A1"), &[pos("Z9"), pos("B1")]),
            Some(pos("B1"))
        );
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("B1"), "=D1").unwrap();
        sheet.set_cell(pos("C1"), "=D1").unwrap();
        sheet.set_cell(pos("D1"), "5").unwrap();

        assert_eq!(find_cycle(&sheet, pos("A1"), &[pos("B1"), pos("C1")]), None);
    }

    #[test]
    fn test_missing_cells_are_dead_ends() {
        let sheet = Sheet::new();
        assert_eq!(find_cycle(&sheet, pos("A1"), &[pos("B1"), pos("C7")]), None);
    }
}
