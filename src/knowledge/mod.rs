//! Logical inference over revealed cells.
//!
//! - `Sentence`: "exactly N of these cells are mines"
//! - `KnowledgeBase`: sentences plus the known safe/mine sets, with a
//!   resolver that runs to a fixed point after every observation
//! - `Contradiction`: conclusions the resolver refused to store
//! - `ResolutionReport` / `InferenceStats`: what was learned, per call and
//!   cumulatively

mod base;
mod contradiction;
mod sentence;
mod stats;

pub use base::KnowledgeBase;
pub use contradiction::Contradiction;
pub use sentence::Sentence;
pub use stats::{InferenceStats, ResolutionReport};
