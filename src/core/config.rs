//! Board and agent configuration.
//!
//! - `BoardConfig`: dimensions and mine count of a generated board
//! - `AgentConfig`: what the agent knows up front (board size), its RNG
//!   seed, and the resolution pass cap
//!
//! Both are plain data with builder-style setters and serde support.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default cap on resolution passes per observation.
///
/// Real boards settle in a handful of passes; hitting the cap means the
/// engine is looping and is reported as a contradiction.
pub const DEFAULT_MAX_RESOLUTION_PASSES: usize = 256;

/// Board dimensions and mine count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of rows.
    pub height: usize,

    /// Number of columns.
    pub width: usize,

    /// Number of mines to place.
    pub mines: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
        }
    }
}

impl BoardConfig {
    /// Create a board configuration.
    pub fn new(height: usize, width: usize, mines: usize) -> Self {
        Self {
            height,
            width,
            mines,
        }
    }

    /// Set the number of mines.
    #[must_use]
    pub fn with_mines(mut self, mines: usize) -> Self {
        self.mines = mines;
        self
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Number of cells that are not mines.
    #[must_use]
    pub fn safe_cell_count(&self) -> usize {
        self.cell_count().saturating_sub(self.mines)
    }

    /// Check that a board can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::EmptyBoard {
                height: self.height,
                width: self.width,
            });
        }
        if self.mines > self.cell_count() {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                cells: self.cell_count(),
            });
        }
        Ok(())
    }
}

/// Agent configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Board rows the agent reasons about.
    pub height: usize,

    /// Board columns the agent reasons about.
    pub width: usize,

    /// Seed for the random fallback move.
    pub seed: u64,

    /// Maximum resolution passes per observation before giving up.
    pub max_resolution_passes: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            seed: 42,
            max_resolution_passes: DEFAULT_MAX_RESOLUTION_PASSES,
        }
    }
}

impl AgentConfig {
    /// Create a config for a `height` x `width` board.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }

    /// Create a config matching a board configuration.
    pub fn for_board(board: &BoardConfig) -> Self {
        Self::new(board.height, board.width)
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the resolution pass cap.
    #[must_use]
    pub fn with_max_resolution_passes(mut self, passes: usize) -> Self {
        self.max_resolution_passes = passes;
        self
    }
}
