//! The per-turn driver around a knowledge base.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::moves::Move;
use crate::core::{AgentConfig, AgentRng, AgentRngState, Cell, SnapshotError};
use crate::knowledge::{InferenceStats, KnowledgeBase, ResolutionReport};

/// Encoded form of an agent, minus its config.
#[derive(Deserialize)]
struct AgentSnapshot {
    knowledge: KnowledgeBase,
    rng: AgentRngState,
}

/// Borrowing twin of [`AgentSnapshot`] for encoding.
#[derive(Serialize)]
struct AgentSnapshotRef<'a> {
    knowledge: &'a KnowledgeBase,
    rng: AgentRngState,
}

/// A Minesweeper player that only acts on what it can prove.
///
/// The agent owns its knowledge base exclusively. Move queries never change
/// what it knows; only [`Agent::record`] does.
#[derive(Clone, Debug)]
pub struct Agent {
    config: AgentConfig,
    knowledge: KnowledgeBase,
    rng: AgentRng,
}

impl Agent {
    /// Create an agent with no knowledge.
    pub fn new(config: AgentConfig) -> Self {
        let knowledge = KnowledgeBase::new(config.height, config.width)
            .with_max_passes(config.max_resolution_passes);
        let rng = AgentRng::new(config.seed);
        Self {
            config,
            knowledge,
            rng,
        }
    }

    /// Resume from a snapshot taken with [`Agent::snapshot`].
    ///
    /// The board size must match `config`. The pass cap comes from
    /// `config`; the RNG resumes where the snapshot left it.
    pub fn restore(config: AgentConfig, snapshot: &[u8]) -> Result<Self, SnapshotError> {
        let AgentSnapshot { knowledge, rng } = bincode::deserialize(snapshot)?;
        knowledge.validate()?;
        if (knowledge.height(), knowledge.width()) != (config.height, config.width) {
            return Err(SnapshotError::SizeMismatch {
                snapshot_height: knowledge.height(),
                snapshot_width: knowledge.width(),
                height: config.height,
                width: config.width,
            });
        }

        let knowledge = knowledge.with_max_passes(config.max_resolution_passes);
        let rng = AgentRng::from_state(&rng);
        Ok(Self {
            config,
            knowledge,
            rng,
        })
    }

    /// Encode the agent's knowledge and RNG position.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        let snapshot = AgentSnapshotRef {
            knowledge: &self.knowledge,
            rng: self.rng.state(),
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// The agent's configuration.
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Read-only view of what the agent knows.
    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Cumulative inference statistics.
    #[must_use]
    pub fn stats(&self) -> &InferenceStats {
        self.knowledge.stats()
    }

    /// Record a revealed cell and its neighbouring mine count.
    pub fn record(&mut self, cell: Cell, count: usize) -> ResolutionReport {
        let report = self.knowledge.record_observation(cell, count);
        debug!(
            %cell,
            count,
            new_safes = report.new_safes.len(),
            new_mines = report.new_mines.len(),
            "observation resolved"
        );
        report
    }

    /// The smallest (row-major) known-safe cell not yet revealed.
    #[must_use]
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.knowledge.safe_moves().into_iter().next()
    }

    /// A uniformly random unrevealed cell not known to be a mine.
    ///
    /// Candidates are ordered row-major before sampling so the same seed
    /// always picks the same cell.
    pub fn make_random_move(&mut self) -> Option<Cell> {
        let candidates = self.random_candidates();
        self.rng.choose(&candidates).copied()
    }

    /// A safe move if one is known, otherwise a random one.
    pub fn next_move(&mut self) -> Option<Move> {
        if let Some(cell) = self.make_safe_move() {
            return Some(Move::safe(cell));
        }
        self.make_random_move().map(Move::random)
    }

    /// Cells to flag: every known mine, row-major.
    #[must_use]
    pub fn flagged(&self) -> Vec<Cell> {
        let mut mines: Vec<Cell> = self.knowledge.mines().iter().copied().collect();
        mines.sort_unstable();
        mines
    }

    fn random_candidates(&self) -> Vec<Cell> {
        Cell::all(self.config.height, self.config.width)
            .filter(|cell| !self.knowledge.has_moved(*cell) && !self.knowledge.is_known_mine(*cell))
            .collect()
    }

    /// Draw what the agent believes about the board.
    ///
    /// `F` known mine, digit revealed cell (with its count), `.` known safe
    /// but unrevealed, `#` unknown. Counts come from `revealed`, which maps a
    /// revealed cell to its count; revealed cells without one show as `0`.
    pub fn render_view(&self, revealed: impl Fn(Cell) -> Option<usize>) -> String {
        let mut out = String::new();
        for row in 0..self.config.height {
            for col in 0..self.config.width {
                let cell = Cell::new(row, col);
                let glyph = if self.knowledge.is_known_mine(cell) {
                    'F'
                } else if self.knowledge.has_moved(cell) {
                    revealed(cell)
                        .and_then(|count| char::from_digit(count as u32, 10))
                        .unwrap_or('0')
                } else if self.knowledge.is_known_safe(cell) {
                    '.'
                } else {
                    '#'
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
