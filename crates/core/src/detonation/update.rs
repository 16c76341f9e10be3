//! The set of cell changes produced by one detonation.

use crate::core_types::{Cell, FlameMask, Position};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One changed cell, in a form suitable for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlastEntry {
    pub position: Position,
    pub cell: Cell,
}

/// Cells changed by a detonation, keyed by position.
///
/// Holds the merged result of every chained bomb in the same tick. The host
/// applies it with [`Terrain::apply`](crate::Terrain::apply).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlastUpdate {
    changes: FxHashMap<Position, Cell>,
}

impl BlastUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.changes.get(&position).copied()
    }

    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        self.changes.contains_key(&position)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Iterate changes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.changes.iter().map(|(&pos, &cell)| (pos, cell))
    }

    /// Changes sorted row-major, `(y, x)` ascending.
    pub fn sorted(&self) -> Vec<BlastEntry> {
        let mut entries: Vec<BlastEntry> = self
            .iter()
            .map(|(position, cell)| BlastEntry { position, cell })
            .collect();
        entries.sort_unstable_by_key(|e| e.position.row_major_key());
        entries
    }

    pub fn as_map(&self) -> &FxHashMap<Position, Cell> {
        &self.changes
    }

    pub fn into_map(self) -> FxHashMap<Position, Cell> {
        self.changes
    }

    /// OR `mask` into the flame already recorded at `position`.
    pub(crate) fn merge_flame(&mut self, position: Position, mask: FlameMask) {
        let merged = match self.changes.get(&position) {
            Some(Cell::Flame(existing)) => *existing | mask,
            _ => mask,
        };
        self.changes.insert(position, Cell::Flame(merged));
    }

    pub(crate) fn destroy_wall(&mut self, position: Position) {
        self.changes.insert(position, Cell::Empty);
    }
}
