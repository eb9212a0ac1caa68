//! Board coordinates.
//!
//! A `Cell` is a `(row, col)` pair. Cells are plain values: they are copied,
//! compared and hashed by value and never mutated once created.
//!
//! ## Ordering
//!
//! Cells order row-major: `(0, 5) < (1, 0)`. The agent relies on this for
//! deterministic tie-breaks (e.g. the "smallest" safe move).
//!
//! ```
//! use minesweeper_kb::core::Cell;
//!
//! let corner = Cell::new(0, 0);
//! let neighbors = corner.neighbors(8, 8);
//!
//! assert_eq!(
//!     neighbors.as_slice(),
//!     &[Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
//! );
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A board coordinate.
///
/// Bounds are not stored in the cell; functions that care about the board
/// take `height` and `width` explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index, 0-based from the top.
    pub row: usize,
    /// Column index, 0-based from the left.
    pub col: usize,
}

impl Cell {
    /// Create a cell at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if this cell lies on a `height` x `width` board.
    #[must_use]
    pub const fn in_bounds(self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// The in-bounds cells adjacent to this one (up to 8), row-major.
    ///
    /// The cell itself is never included. SmallVec keeps the common case
    /// off the heap.
    #[must_use]
    pub fn neighbors(self, height: usize, width: usize) -> SmallVec<[Cell; 8]> {
        let mut out = SmallVec::new();
        let rows = self.row.saturating_sub(1)..=(self.row + 1).min(height.saturating_sub(1));
        for row in rows {
            let cols = self.col.saturating_sub(1)..=(self.col + 1).min(width.saturating_sub(1));
            for col in cols {
                let cell = Cell::new(row, col);
                if cell != self && cell.in_bounds(height, width) {
                    out.push(cell);
                }
            }
        }
        out
    }

    /// Iterate over every cell of a `height` x `width` board, row-major.
    ///
    /// ```
    /// use minesweeper_kb::core::Cell;
    ///
    /// let cells: Vec<_> = Cell::all(2, 3).collect();
    /// assert_eq!(cells.len(), 6);
    /// assert_eq!(cells[3], Cell::new(1, 0));
    /// ```
    pub fn all(height: usize, width: usize) -> impl Iterator<Item = Cell> {
        (0..height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
