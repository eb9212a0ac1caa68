//! Inference statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

use super::contradiction::Contradiction;
use crate::core::Cell;

/// What a single call to the resolver learned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Passes run, including the final pass that changed nothing.
    pub passes: usize,

    /// Cells newly known to be mines, in the order they were learned.
    pub new_mines: Vec<Cell>,

    /// Cells newly known to be safe, in the order they were learned.
    pub new_safes: Vec<Cell>,

    /// Sentences added (the observation itself plus derived ones).
    pub sentences_added: usize,

    /// Sentences removed because they emptied or duplicated another.
    pub sentences_removed: usize,

    /// Derivations refused as contradictory.
    pub contradictions: Vec<Contradiction>,
}

impl ResolutionReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if anything new was learned.
    #[must_use]
    pub fn learned_anything(&self) -> bool {
        !self.new_mines.is_empty() || !self.new_safes.is_empty() || self.sentences_added > 0
    }

    /// Check if resolution ran into a contradiction.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.contradictions.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: ResolutionReport) {
        self.passes += other.passes;
        self.new_mines.extend(other.new_mines);
        self.new_safes.extend(other.new_safes);
        self.sentences_added += other.sentences_added;
        self.sentences_removed += other.sentences_removed;
        self.contradictions.extend(other.contradictions);
    }
}

/// Cumulative statistics over the lifetime of a knowledge base.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceStats {
    /// Observations recorded.
    pub observations: u64,

    /// Resolution passes run.
    pub passes: u64,

    /// Sentences produced by subset resolution.
    pub sentences_derived: u64,

    /// Cells learned to be mines.
    pub mines_learned: u64,

    /// Cells learned to be safe, revealed cells included.
    pub safes_learned: u64,

    /// Contradictions refused.
    pub contradictions: u64,

    /// Largest number of sentences held at once.
    pub peak_sentences: usize,
}

impl InferenceStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Average passes per observation.
    #[must_use]
    pub fn avg_passes_per_observation(&self) -> f64 {
        if self.observations == 0 {
            0.0
        } else {
            self.passes as f64 / self.observations as f64
        }
    }

    /// Fold another knowledge base's statistics into this one.
    pub fn absorb(&mut self, other: &InferenceStats) {
        self.observations += other.observations;
        self.passes += other.passes;
        self.sentences_derived += other.sentences_derived;
        self.mines_learned += other.mines_learned;
        self.safes_learned += other.safes_learned;
        self.contradictions += other.contradictions;
        self.peak_sentences = self.peak_sentences.max(other.peak_sentences);
    }
}
