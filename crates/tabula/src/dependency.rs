//! Dependency tracking between formula cells

use ahash::{AHashMap, AHashSet};
use tabula_core::Position;

/// Dependency graph for formula cells
///
/// Tracks which cells depend on which other cells, keyed by position so that
/// edges may point at positions that hold no cell yet.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Cell → Cells that depend on it (dependents)
    dependents: AHashMap<Position, AHashSet<Position>>,
    /// Cell → Cells it depends on (precedents)
    precedents: AHashMap<Position, AHashSet<Position>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency: dependent depends on precedent
    pub fn add_dependency(&mut self, precedent: Position, dependent: Position) {
        self.dependents
            .entry(precedent)
            .or_default()
            .insert(dependent);
        self.precedents
            .entry(dependent)
            .or_default()
            .insert(precedent);
    }

    /// Replace every precedent of `cell` with `precedents`
    pub fn set_precedents(&mut self, cell: Position, precedents: &[Position]) {
        self.clear_precedents(cell);
        for &precedent in precedents {
            self.add_dependency(precedent, cell);
        }
    }

    /// Remove the edges from `cell` to the cells it depends on
    ///
    /// Edges from cells depending on `cell` stay: they still read this
    /// position whatever it holds.
    pub fn clear_precedents(&mut self, cell: Position) {
        if let Some(precedents) = self.precedents.remove(&cell) {
            for precedent in precedents {
                if let Some(deps) = self.dependents.get_mut(&precedent) {
                    deps.remove(&cell);
                    if deps.is_empty() {
                        self.dependents.remove(&precedent);
                    }
                }
            }
        }
    }

    /// Get cells that depend on the given cell
    pub fn get_dependents(&self, cell: Position) -> impl Iterator<Item = Position> + '_ {
        self.dependents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get cells that the given cell depends on
    pub fn get_precedents(&self, cell: Position) -> impl Iterator<Item = Position> + '_ {
        self.precedents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Every cell that transitively depends on `cell`, excluding `cell`
    /// itself
    pub fn transitive_dependents(&self, cell: Position) -> Vec<Position> {
        let mut result = Vec::new();
        let mut visited = AHashSet::new();
        let mut stack: Vec<Position> = self.get_dependents(cell).collect();
        visited.insert(cell);

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.get_dependents(current));
        }

        result
    }
}
