//! Moves chosen by the agent.

use serde::{Deserialize, Serialize};

use crate::core::Cell;

/// How a move was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// The cell is known to be safe.
    Safe,
    /// Nothing was known to be safe; the cell was picked at random among
    /// unrevealed cells not known to be mines.
    Random,
}

/// A cell to reveal next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Cell to reveal.
    pub cell: Cell,
    /// Whether the cell is certain to be safe.
    pub kind: MoveKind,
}

impl Move {
    /// A move to a known safe cell.
    #[must_use]
    pub const fn safe(cell: Cell) -> Self {
        Self {
            cell,
            kind: MoveKind::Safe,
        }
    }

    /// A guess.
    #[must_use]
    pub const fn random(cell: Cell) -> Self {
        Self {
            cell,
            kind: MoveKind::Random,
        }
    }

    /// Check if this move is certain to be safe.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.kind == MoveKind::Safe
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            MoveKind::Safe => write!(f, "safe {}", self.cell),
            MoveKind::Random => write!(f, "guess {}", self.cell),
        }
    }
}
