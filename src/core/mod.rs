//! Core types shared by the knowledge base, agent and board.
//!
//! Cells, configuration, deterministic RNG and setup errors. Nothing here
//! knows about inference.

pub mod cell;
pub mod config;
pub mod error;
pub mod rng;

pub use cell::Cell;
pub use config::{AgentConfig, BoardConfig, DEFAULT_MAX_RESOLUTION_PASSES};
pub use error::{ConfigError, SnapshotError};
pub use rng::{AgentRng, AgentRngState};
