//! Ground truth: where the mines are.

use rustc_hash::FxHashSet;

use crate::core::{AgentRng, BoardConfig, Cell, ConfigError};

/// What the game loop needs from a board.
///
/// The agent never sees this; the driver asks it whether a revealed cell is
/// a mine and, if not, how many mines surround it.
pub trait Minefield {
    /// Number of rows.
    fn height(&self) -> usize;

    /// Number of columns.
    fn width(&self) -> usize;

    /// Total number of mines.
    fn mine_count(&self) -> usize;

    /// Check if `cell` holds a mine.
    fn is_mine(&self, cell: Cell) -> bool;

    /// Mines among the in-bounds neighbours of `cell`, not counting `cell`.
    fn neighbor_mine_count(&self, cell: Cell) -> usize {
        cell.neighbors(self.height(), self.width())
            .into_iter()
            .filter(|neighbor| self.is_mine(*neighbor))
            .count()
    }

    /// Number of cells that are not mines.
    fn safe_cell_count(&self) -> usize {
        (self.height() * self.width()).saturating_sub(self.mine_count())
    }
}

/// A board with a fixed set of mines.
#[derive(Clone, Debug)]
pub struct Board {
    height: usize,
    width: usize,
    mines: FxHashSet<Cell>,
}

impl Board {
    /// Place `config.mines` mines uniformly at random.
    pub fn generate(config: &BoardConfig, rng: &mut AgentRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let width = config.width;
        let mines = rng
            .sample_indices(config.cell_count(), config.mines)
            .into_iter()
            .map(|index| Cell::new(index / width, index % width))
            .collect();

        Ok(Self {
            height: config.height,
            width,
            mines,
        })
    }

    /// Build a board with mines at exactly the given cells.
    pub fn from_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, ConfigError> {
        let mines: FxHashSet<Cell> = mines.into_iter().collect();
        BoardConfig::new(height, width, mines.len()).validate()?;
        if let Some(outside) = mines.iter().find(|cell| !cell.in_bounds(height, width)) {
            return Err(ConfigError::MineOutOfBounds {
                row: outside.row,
                col: outside.col,
                height,
                width,
            });
        }
        Ok(Self {
            height,
            width,
            mines,
        })
    }

    /// Mine cells, row-major.
    #[must_use]
    pub fn mines(&self) -> Vec<Cell> {
        let mut mines: Vec<Cell> = self.mines.iter().copied().collect();
        mines.sort_unstable();
        mines
    }

    /// Check if the flagged cells are exactly the mines.
    #[must_use]
    pub fn won(&self, flagged: impl IntoIterator<Item = Cell>) -> bool {
        let flagged: FxHashSet<Cell> = flagged.into_iter().collect();
        flagged == self.mines
    }
}

impl Minefield for Board {
    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn mine_count(&self) -> usize {
        self.mines.len()
    }

    fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "--".repeat(self.width) + "-";
        for row in 0..self.height {
            writeln!(f, "{}", rule)?;
            for col in 0..self.width {
                let glyph = if self.is_mine(Cell::new(row, col)) { "|X" } else { "| " };
                write!(f, "{}", glyph)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_places_exact_mine_count() {
        let mut rng = AgentRng::new(42);
        let board = Board::generate(&BoardConfig::new(8, 8, 10), &mut rng).unwrap();

        assert_eq!(board.mine_count(), 10);
        assert!(board.mines().iter().all(|cell| cell.in_bounds(8, 8)));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = BoardConfig::default();
        let first = Board::generate(&config, &mut AgentRng::new(9)).unwrap();
        let second = Board::generate(&config, &mut AgentRng::new(9)).unwrap();
        assert_eq!(first.mines(), second.mines());
    }

    #[test]
    fn test_generate_rejects_bad_config() {
        let mut rng = AgentRng::new(1);
        let err = Board::generate(&BoardConfig::new(2, 2, 5), &mut rng).unwrap_err();
        assert_eq!(err, ConfigError::TooManyMines { mines: 5, cells: 4 });
    }

    #[test]
    fn test_from_mines_rejects_out_of_bounds() {
        let err = Board::from_mines(3, 3, [Cell::new(3, 0)]).unwrap_err();
        assert!(matches!(err, ConfigError::MineOutOfBounds { row: 3, col: 0, .. }));
    }

    #[test]
    fn test_neighbor_mine_count() {
        let board = Board::from_mines(3, 3, [Cell::new(0, 0), Cell::new(2, 2)]).unwrap();

        assert_eq!(board.neighbor_mine_count(Cell::new(1, 1)), 2);
        assert_eq!(board.neighbor_mine_count(Cell::new(0, 1)), 1);
        assert_eq!(board.neighbor_mine_count(Cell::new(0, 2)), 0);
        // A mine does not count itself
        assert_eq!(board.neighbor_mine_count(Cell::new(0, 0)), 0);
    }

    #[test]
    fn test_won_requires_exact_flags() {
        let board = Board::from_mines(3, 3, [Cell::new(0, 0), Cell::new(2, 2)]).unwrap();

        assert!(board.won([Cell::new(2, 2), Cell::new(0, 0)]));
        assert!(!board.won([Cell::new(0, 0)]));
        assert!(!board.won([Cell::new(0, 0), Cell::new(2, 2), Cell::new(1, 1)]));
    }

    #[test]
    fn test_safe_cell_count() {
        let board = Board::from_mines(4, 5, [Cell::new(1, 1)]).unwrap();
        assert_eq!(board.safe_cell_count(), 19);
    }

    #[test]
    fn test_display() {
        let board = Board::from_mines(2, 2, [Cell::new(0, 1)]).unwrap();
        let expected = "-----\n| |X|\n-----\n| | |\n-----\n";
        assert_eq!(board.to_string(), expected);
    }
}
