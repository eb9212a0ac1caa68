//! Contradictions detected during inference.
//!
//! Observations from a well-behaved board never produce these. When one
//! does appear, the offending derivation is discarded, the event is logged,
//! and resolution carries on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Cell;

/// A logically impossible conclusion that was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Contradiction {
    /// A sentence would need a negative count, or more mines than cells.
    #[error("{count} mines cannot fit in {} cells", .cells.len())]
    CountOutOfRange { cells: Vec<Cell>, count: i64 },

    /// A cell would have to be both safe and a mine.
    #[error("cell {0} is required to be both safe and a mine")]
    SafeAndMine(Cell),

    /// Two sentences over the same cells disagree on the count.
    #[error("cells {cells:?} carry conflicting mine counts {stored} and {derived}")]
    ConflictingCounts {
        cells: Vec<Cell>,
        stored: usize,
        derived: usize,
    },

    /// Resolution kept changing state past the configured pass cap.
    #[error("resolution did not reach a fixed point within {0} passes")]
    PassLimitExceeded(usize),
}
