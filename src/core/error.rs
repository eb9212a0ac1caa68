//! Error types for fallible setup and checkpointing.
//!
//! Inference itself never fails: contradictions found while resolving are
//! diagnostics (see [`crate::knowledge::Contradiction`]), not errors.

use thiserror::Error;

/// Invalid board or agent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column, got {height}x{width}")]
    EmptyBoard { height: usize, width: usize },

    #[error("cannot place {mines} mines on a board of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },

    #[error("mine at {row},{col} lies outside a {height}x{width} board")]
    MineOutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
}

/// Failure encoding, decoding or accepting a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// The bytes decoded but describe a state resolution could never reach.
    #[error("invalid snapshot: {0}")]
    Invalid(String),

    #[error("snapshot is {snapshot_height}x{snapshot_width}, config is {height}x{width}")]
    SizeMismatch {
        snapshot_height: usize,
        snapshot_width: usize,
        height: usize,
        width: usize,
    },
}
