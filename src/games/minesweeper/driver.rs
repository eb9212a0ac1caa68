//! The game loop: agent picks, board answers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::Minefield;
use crate::agent::{Agent, Move, MoveKind};
use crate::core::Cell;
use crate::knowledge::InferenceStats;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every safe cell was revealed.
    Won,
    /// The agent revealed a mine.
    Lost { cell: Cell },
    /// The agent had no move left but safe cells remained.
    Stalled,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// How the game ended.
    pub outcome: GameOutcome,
    /// Moves played, including a losing one.
    pub turns: usize,
    /// Moves made on cells known to be safe.
    pub safe_moves: usize,
    /// Moves made by guessing.
    pub random_moves: usize,
    /// Mines the agent identified.
    pub flagged: usize,
    /// The agent's inference statistics at the end of the game.
    pub inference: InferenceStats,
}

/// Plays one agent against one board.
///
/// Each turn asks the agent for a move (safe first, random otherwise),
/// checks it against the board, and on success records the revealed count.
pub struct GameDriver<M: Minefield> {
    field: M,
    agent: Agent,
    revealed: FxHashMap<Cell, usize>,
    history: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl<M: Minefield> GameDriver<M> {
    /// Start a game.
    pub fn new(field: M, agent: Agent) -> Self {
        Self {
            field,
            agent,
            revealed: FxHashMap::default(),
            history: Vec::new(),
            outcome: None,
        }
    }

    /// The board.
    pub fn field(&self) -> &M {
        &self.field
    }

    /// The agent.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Count shown on a revealed cell.
    pub fn revealed_count(&self, cell: Cell) -> Option<usize> {
        self.revealed.get(&cell).copied()
    }

    /// The outcome, once the game is over.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Play one turn. Returns the outcome once the game has ended.
    pub fn step(&mut self) -> Option<GameOutcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        let Some(next) = self.agent.next_move() else {
            return self.finish(self.settled_outcome());
        };
        self.history.push(next);
        debug!(turn = self.history.len(), %next, "move");

        if self.field.is_mine(next.cell) {
            return self.finish(GameOutcome::Lost { cell: next.cell });
        }

        let count = self.field.neighbor_mine_count(next.cell);
        self.revealed.insert(next.cell, count);
        self.agent.record(next.cell, count);

        if self.revealed.len() == self.field.safe_cell_count() {
            return self.finish(GameOutcome::Won);
        }
        None
    }

    /// Play until the game ends.
    pub fn play(mut self) -> GameSummary {
        let outcome = loop {
            if let Some(outcome) = self.step() {
                break outcome;
            }
        };
        self.summary(outcome)
    }

    /// Draw the agent's view with the counts it has seen.
    pub fn render(&self) -> String {
        self.agent.render_view(|cell| self.revealed_count(cell))
    }

    fn settled_outcome(&self) -> GameOutcome {
        if self.revealed.len() == self.field.safe_cell_count() {
            GameOutcome::Won
        } else {
            GameOutcome::Stalled
        }
    }

    fn finish(&mut self, outcome: GameOutcome) -> Option<GameOutcome> {
        info!(
            ?outcome,
            turns = self.history.len(),
            flagged = self.agent.flagged().len(),
            "game over"
        );
        self.outcome = Some(outcome);
        self.outcome
    }

    fn summary(&self, outcome: GameOutcome) -> GameSummary {
        let safe_moves = self.history.iter().filter(|m| m.kind == MoveKind::Safe).count();
        GameSummary {
            outcome,
            turns: self.history.len(),
            safe_moves,
            random_moves: self.history.len() - safe_moves,
            flagged: self.agent.flagged().len(),
            inference: self.agent.stats().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AgentConfig;
    use crate::games::minesweeper::Board;

    fn agent(height: usize, width: usize, seed: u64) -> Agent {
        Agent::new(AgentConfig::new(height, width).with_seed(seed))
    }

    #[test]
    fn test_mine_free_board_is_won() {
        let board = Board::from_mines(4, 4, []).unwrap();
        let summary = GameDriver::new(board, agent(4, 4, 1)).play();

        assert_eq!(summary.outcome, GameOutcome::Won);
        assert_eq!(summary.turns, 16);
        // One guess opens the board, everything after is deduced
        assert_eq!(summary.random_moves, 1);
        assert_eq!(summary.inference.contradictions, 0);
        assert_eq!(summary.inference.observations, 16);
    }

    #[test]
    fn test_all_mine_board_is_lost_immediately() {
        let board = Board::from_mines(1, 2, [Cell::new(0, 0), Cell::new(0, 1)]).unwrap();
        let summary = GameDriver::new(board, agent(1, 2, 1)).play();

        assert!(matches!(summary.outcome, GameOutcome::Lost { .. }));
        assert_eq!(summary.turns, 1);
    }

    #[test]
    fn test_step_after_end_is_stable() {
        let board = Board::from_mines(2, 2, []).unwrap();
        let mut driver = GameDriver::new(board, agent(2, 2, 3));
        let outcome = loop {
            if let Some(outcome) = driver.step() {
                break outcome;
            }
        };

        assert_eq!(outcome, GameOutcome::Won);
        assert_eq!(driver.step(), Some(GameOutcome::Won));
        assert_eq!(driver.history().len(), 4);
    }

    #[test]
    fn test_safe_moves_never_hit_mines() {
        for seed in 0..20 {
            let mines = [Cell::new(0, 4), Cell::new(2, 2), Cell::new(4, 0)];
            let board = Board::from_mines(5, 5, mines).unwrap();
            let mut driver = GameDriver::new(board, agent(5, 5, seed));
            while driver.step().is_none() {}

            if let Some(GameOutcome::Lost { cell }) = driver.outcome() {
                let last = driver.history().last().unwrap();
                assert_eq!(last.cell, cell);
                assert_eq!(last.kind, MoveKind::Random, "seed {} lost on a safe move", seed);
            }
        }
    }

    #[test]
    fn test_render_shows_counts() {
        let board = Board::from_mines(1, 3, [Cell::new(0, 2)]).unwrap();
        let mut driver = GameDriver::new(board, agent(1, 3, 5));
        while driver.step().is_none() {}

        assert_eq!(driver.outcome(), Some(GameOutcome::Won));
        assert_eq!(driver.render(), "01F\n");
    }
}
