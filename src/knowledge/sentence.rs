//! Logical sentences about the board.
//!
//! A `Sentence` states that exactly `count` of `cells` are mines. Sentences
//! only ever shrink: learning that one of their cells is a mine or safe
//! removes that cell (and, for a mine, one from the count).
//!
//! ```
//! use std::collections::BTreeSet;
//! use minesweeper_kb::core::Cell;
//! use minesweeper_kb::knowledge::Sentence;
//!
//! let mut sentence = Sentence::new([Cell::new(0, 1), Cell::new(1, 1)], 1);
//! assert!(sentence.known_mines().is_none());
//!
//! sentence.mark_safe(Cell::new(0, 1));
//! let expected: BTreeSet<_> = [Cell::new(1, 1)].into_iter().collect();
//! assert_eq!(sentence.known_mines(), Some(&expected));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::contradiction::Contradiction;
use crate::core::Cell;

/// "Exactly `count` of these cells are mines."
///
/// Equality and hashing are structural over `(cells, count)`; the cell set is
/// ordered so two sentences with the same members compare equal regardless
/// of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Create a sentence.
    ///
    /// Use [`Sentence::try_new`] when `count` might exceed the number of cells.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        debug_assert!(
            count <= cells.len(),
            "sentence claims {} mines among {} cells",
            count,
            cells.len()
        );
        Self { cells, count }
    }

    /// Create a sentence, rejecting counts outside `0..=cells.len()`.
    ///
    /// `count` is signed so that derived counts (a difference of two counts)
    /// can be checked here before they are ever stored.
    pub fn try_new(
        cells: impl IntoIterator<Item = Cell>,
        count: i64,
    ) -> Result<Self, Contradiction> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        match usize::try_from(count) {
            Ok(count) if count <= cells.len() => Ok(Self { cells, count }),
            _ => Err(Contradiction::CountOutOfRange {
                cells: cells.into_iter().collect(),
                count,
            }),
        }
    }

    /// The cells this sentence constrains.
    #[must_use]
    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// How many of the cells are mines.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// An empty sentence carries no information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if `cell` is constrained by this sentence.
    #[must_use]
    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// All cells, if every one of them must be a mine.
    #[must_use]
    pub fn known_mines(&self) -> Option<&BTreeSet<Cell>> {
        (!self.cells.is_empty() && self.cells.len() == self.count).then_some(&self.cells)
    }

    /// All cells, if none of them can be a mine.
    #[must_use]
    pub fn known_safes(&self) -> Option<&BTreeSet<Cell>> {
        (!self.cells.is_empty() && self.count == 0).then_some(&self.cells)
    }

    /// Remove a cell known to be a mine, decrementing the count.
    ///
    /// The cell must be present and the count non-zero. Violations are caller
    /// bugs: they panic in debug builds and leave the sentence untouched in
    /// release builds.
    pub fn mark_mine(&mut self, cell: Cell) {
        debug_assert!(self.cells.contains(&cell), "mark_mine: {} not in {}", cell, self);
        debug_assert!(self.count > 0, "mark_mine: {} in zero-count sentence {}", cell, self);
        if self.count == 0 || !self.cells.remove(&cell) {
            return;
        }
        self.count -= 1;
    }

    /// Remove a cell known to be safe. No-op if absent.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    /// Check if this sentence's cells are a strict, non-empty subset of `other`'s.
    #[must_use]
    pub fn is_strict_subset_of(&self, other: &Sentence) -> bool {
        !self.cells.is_empty()
            && self.cells.len() < other.cells.len()
            && self.cells.is_subset(&other.cells)
    }

    /// Subset resolution: `superset - self`.
    ///
    /// Given `self.cells ⊂ superset.cells`, the cells only `superset` covers
    /// hold exactly `superset.count - self.count` mines. Returns a
    /// contradiction if that count does not fit the remaining cells.
    pub fn subtract_from(&self, superset: &Sentence) -> Result<Sentence, Contradiction> {
        let cells = superset.cells.difference(&self.cells).copied();
        Sentence::try_new(cells, superset.count as i64 - self.count as i64)
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "}} = {}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn test_known_mines_when_all_cells_mined() {
        let sentence = Sentence::new([c(0, 0), c(0, 1)], 2);
        assert_eq!(sentence.known_mines().map(|s| s.len()), Some(2));
        assert!(sentence.known_safes().is_none());
    }

    #[test]
    fn test_known_safes_when_count_zero() {
        let sentence = Sentence::new([c(0, 0), c(0, 1), c(0, 2)], 0);
        assert_eq!(sentence.known_safes().map(|s| s.len()), Some(3));
        assert!(sentence.known_mines().is_none());
    }

    #[test]
    fn test_empty_sentence_knows_nothing() {
        let sentence = Sentence::new([], 0);
        assert!(sentence.is_empty());
        assert!(sentence.known_mines().is_none());
        assert!(sentence.known_safes().is_none());
    }

    #[test]
    fn test_mark_mine_removes_and_decrements() {
        let mut sentence = Sentence::new([c(0, 0), c(0, 1), c(1, 0)], 2);
        sentence.mark_mine(c(0, 1));
        assert_eq!(sentence, Sentence::new([c(0, 0), c(1, 0)], 1));
    }

    #[test]
    fn test_mark_safe_absent_is_noop() {
        let mut sentence = Sentence::new([c(0, 0), c(0, 1)], 1);
        sentence.mark_safe(c(5, 5));
        assert_eq!(sentence.len(), 2);
        assert_eq!(sentence.count(), 1);

        sentence.mark_safe(c(0, 0));
        assert_eq!(sentence, Sentence::new([c(0, 1)], 1));
    }

    #[test]
    #[should_panic(expected = "zero-count sentence")]
    #[cfg(debug_assertions)]
    fn test_mark_mine_on_zero_count_panics_in_debug() {
        let mut sentence = Sentence::new([c(0, 0)], 0);
        sentence.mark_mine(c(0, 0));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = Sentence::new([c(1, 1), c(0, 0), c(2, 2)], 1);
        let b = Sentence::new([c(2, 2), c(1, 1), c(0, 0)], 1);
        assert_eq!(a, b);
        assert_ne!(a, Sentence::new([c(2, 2), c(1, 1), c(0, 0)], 2));
    }

    #[test]
    fn test_try_new_rejects_out_of_range_counts() {
        assert!(Sentence::try_new([c(0, 0)], -1).is_err());
        assert!(Sentence::try_new([c(0, 0)], 2).is_err());
        assert!(Sentence::try_new([c(0, 0)], 1).is_ok());
        assert!(Sentence::try_new([], 0).is_ok());
    }

    #[test]
    fn test_strict_subset() {
        let big = Sentence::new([c(0, 0), c(0, 1), c(0, 2)], 2);
        let small = Sentence::new([c(0, 0), c(0, 1)], 1);
        assert!(small.is_strict_subset_of(&big));
        assert!(!big.is_strict_subset_of(&small));
        assert!(!big.is_strict_subset_of(&big));
        assert!(!Sentence::new([], 0).is_strict_subset_of(&big));
    }

    #[test]
    fn test_subtract_from() {
        let big = Sentence::new([c(0, 0), c(0, 1), c(0, 2)], 2);
        let small = Sentence::new([c(0, 0), c(0, 1)], 1);
        assert_eq!(small.subtract_from(&big).unwrap(), Sentence::new([c(0, 2)], 1));
    }

    #[test]
    fn test_subtract_from_detects_contradiction() {
        let big = Sentence::new([c(0, 0), c(0, 1), c(0, 2)], 0);
        let small = Sentence::new([c(0, 0), c(0, 1)], 1);
        let err = small.subtract_from(&big).unwrap_err();
        assert_eq!(
            err,
            Contradiction::CountOutOfRange {
                cells: vec![c(0, 2)],
                count: -1
            }
        );
    }

    #[test]
    fn test_display() {
        let sentence = Sentence::new([c(1, 0), c(0, 1)], 1);
        assert_eq!(sentence.to_string(), "{(0, 1), (1, 0)} = 1");
    }
}
