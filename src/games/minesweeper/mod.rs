//! Minesweeper board and game loop.
//!
//! These sit around the inference engine rather than inside it:
//! - `Board`: random or fixed mine placement, neighbour counts, text rendering
//! - `Minefield`: the trait the game loop consumes
//! - `GameDriver`: asks the agent for moves and feeds back revealed counts
//!
//! ```
//! use minesweeper_kb::agent::Agent;
//! use minesweeper_kb::core::{AgentConfig, Cell};
//! use minesweeper_kb::games::minesweeper::{Board, GameDriver, GameOutcome};
//!
//! let board = Board::from_mines(3, 3, []).unwrap();
//! let agent = Agent::new(AgentConfig::new(3, 3));
//!
//! let summary = GameDriver::new(board, agent).play();
//! assert_eq!(summary.outcome, GameOutcome::Won);
//! ```

mod board;
mod driver;

pub use board::{Board, Minefield};
pub use driver::{GameDriver, GameOutcome, GameSummary};
