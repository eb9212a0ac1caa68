//! The playing agent.
//!
//! An [`Agent`] feeds revealed cells into its [`KnowledgeBase`] and picks the
//! next cell to reveal:
//!
//! 1. the smallest known-safe unrevealed cell, if any
//! 2. otherwise a uniformly random unrevealed cell not known to be a mine
//! 3. otherwise nothing: every unrevealed cell is a known mine
//!
//! ```
//! use minesweeper_kb::agent::{Agent, MoveKind};
//! use minesweeper_kb::core::{AgentConfig, Cell};
//!
//! let mut agent = Agent::new(AgentConfig::new(8, 8).with_seed(1));
//! agent.record(Cell::new(0, 0), 0);
//!
//! let next = agent.next_move().unwrap();
//! assert_eq!(next.kind, MoveKind::Safe);
//! assert_eq!(next.cell, Cell::new(0, 1));
//! ```
//!
//! [`KnowledgeBase`]: crate::knowledge::KnowledgeBase

mod moves;
mod player;

pub use moves::{Move, MoveKind};
pub use player::Agent;
