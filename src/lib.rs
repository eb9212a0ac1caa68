//! # minesweeper-kb
//!
//! A Minesweeper player that reasons with propositional knowledge.
//!
//! Every revealed cell becomes a sentence: "exactly N of these neighbouring
//! cells are mines". The knowledge base keeps those sentences alongside the
//! sets of cells it has proven safe or mined, and after every observation
//! resolves to a fixed point:
//!
//! 1. known facts are reconciled into every sentence
//! 2. sentences with count 0 mark their cells safe; sentences whose count
//!    equals their size mark their cells as mines
//! 3. for every pair where one sentence is a strict subset of another, the
//!    difference is inferred as a new sentence
//!
//! The agent plays a known-safe cell when it has one and guesses otherwise.
//!
//! ## Modules
//!
//! - `core`: cells, configuration, RNG, setup errors
//! - `knowledge`: sentences, the knowledge base and its resolver
//! - `agent`: move selection on top of the knowledge base
//! - `games`: a ground-truth board and the game loop
//! - `sim`: batch play with aggregate statistics

pub mod agent;
pub mod core;
pub mod games;
pub mod knowledge;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{AgentConfig, AgentRng, BoardConfig, Cell, ConfigError, SnapshotError};

pub use crate::knowledge::{
    Contradiction, InferenceStats, KnowledgeBase, ResolutionReport, Sentence,
};

pub use crate::agent::{Agent, Move, MoveKind};

pub use crate::games::minesweeper::{Board, GameDriver, GameOutcome, GameSummary, Minefield};

pub use crate::sim::{run_simulation, SimulationConfig, SimulationSummary};
