//! The knowledge base and its fixed-point resolver.
//!
//! ## State
//!
//! - `moves_made`: cells the agent has revealed (append-only)
//! - `safes` / `mines`: cells known safe / known mined (grow monotonically,
//!   always disjoint)
//! - `sentences`: the working constraints, in insertion order
//!
//! ## Resolution
//!
//! Every observation is followed by passes of:
//!
//! 1. **Reconcile**: strip already-known cells out of every sentence
//! 2. **Extract**: a sentence whose cells are all mines (or all safe) turns
//!    into global facts, which are pushed into every other sentence
//! 3. **Compact**: empty and duplicate sentences are dropped by building the
//!    next container, never by removing while iterating
//! 4. **Subset resolution**: for `S2 ⊂ S1`, add `S1 - S2` with count
//!    `S1.count - S2.count`
//!
//! until a pass changes nothing. Derivations that would break
//! `0 <= count <= |cells|` are refused and reported as [`Contradiction`]s.
//!
//! ```
//! use minesweeper_kb::core::Cell;
//! use minesweeper_kb::knowledge::{KnowledgeBase, Sentence};
//!
//! let mut kb = KnowledgeBase::new(8, 8);
//! let (a, b, c) = (Cell::new(5, 5), Cell::new(5, 6), Cell::new(5, 7));
//!
//! kb.add_sentence(Sentence::new([a, b, c], 2));
//! kb.add_sentence(Sentence::new([a, b], 1));
//!
//! assert!(kb.is_known_mine(c));
//! ```

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use super::contradiction::Contradiction;
use super::sentence::Sentence;
use super::stats::{InferenceStats, ResolutionReport};
use crate::core::config::DEFAULT_MAX_RESOLUTION_PASSES;
use crate::core::{Cell, SnapshotError};

/// A fact about a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fact {
    Mine,
    Safe,
}

/// Everything the agent knows about the board.
///
/// The knowledge base owns all of its sentences; callers only ever see them
/// through shared references.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeBase {
    height: usize,
    width: usize,
    max_passes: usize,
    moves_made: FxHashSet<Cell>,
    safes: FxHashSet<Cell>,
    mines: FxHashSet<Cell>,
    sentences: Vec<Sentence>,
    stats: InferenceStats,
}

impl KnowledgeBase {
    /// Create an empty knowledge base for a `height` x `width` board.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            max_passes: DEFAULT_MAX_RESOLUTION_PASSES,
            moves_made: FxHashSet::default(),
            safes: FxHashSet::default(),
            mines: FxHashSet::default(),
            sentences: Vec::new(),
            stats: InferenceStats::default(),
        }
    }

    /// Set the cap on resolution passes per call (at least 1).
    #[must_use]
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes.max(1);
        self
    }

    // === Queries ===

    /// Board rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Board columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells that have been revealed.
    #[must_use]
    pub fn moves_made(&self) -> &FxHashSet<Cell> {
        &self.moves_made
    }

    /// Cells known to be safe, revealed ones included.
    #[must_use]
    pub fn safes(&self) -> &FxHashSet<Cell> {
        &self.safes
    }

    /// Cells known to be mines.
    #[must_use]
    pub fn mines(&self) -> &FxHashSet<Cell> {
        &self.mines
    }

    /// Stored sentences in insertion order.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Cumulative inference statistics.
    #[must_use]
    pub fn stats(&self) -> &InferenceStats {
        &self.stats
    }

    /// Known-safe cells that have not been revealed yet, row-major.
    #[must_use]
    pub fn safe_moves(&self) -> BTreeSet<Cell> {
        self.safes.difference(&self.moves_made).copied().collect()
    }

    /// Check if `cell` is known to be a mine.
    #[must_use]
    pub fn is_known_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Check if `cell` is known to be safe.
    #[must_use]
    pub fn is_known_safe(&self, cell: Cell) -> bool {
        self.safes.contains(&cell)
    }

    /// Check if `cell` has been revealed.
    #[must_use]
    pub fn has_moved(&self, cell: Cell) -> bool {
        self.moves_made.contains(&cell)
    }

    // === Updates ===

    /// Record that `cell` was revealed and has `count` mines around it.
    ///
    /// Adds the cell to the moves made and the known safes, stores a
    /// sentence over its unrevealed neighbours, and resolves to a fixed
    /// point before returning. Already known neighbours stay in the new
    /// sentence; resolution strips them out.
    pub fn record_observation(&mut self, cell: Cell, count: usize) -> ResolutionReport {
        let mut report = ResolutionReport::new();
        if !cell.in_bounds(self.height, self.width) {
            warn!(
                %cell,
                height = self.height,
                width = self.width,
                "ignoring observation outside the board"
            );
            return report;
        }

        debug!(%cell, count, "recording observation");
        self.stats.observations += 1;
        self.moves_made.insert(cell);
        self.learn(cell, Fact::Safe, &mut report);

        let candidates: Vec<Cell> = cell
            .neighbors(self.height, self.width)
            .into_iter()
            .filter(|neighbor| !self.moves_made.contains(neighbor))
            .collect();

        match Sentence::try_new(candidates, count as i64) {
            Ok(sentence) if sentence.is_empty() => {}
            Ok(sentence) => {
                self.insert_sentence(sentence, &mut report);
            }
            Err(contradiction) => Self::flag(&mut self.stats, &mut report, contradiction),
        }

        self.resolve_into(&mut report);
        report
    }

    /// Add an externally known sentence and resolve.
    ///
    /// Empty sentences are ignored; duplicates are not stored twice. A
    /// sentence reaching off the board is ignored with a warning.
    pub fn add_sentence(&mut self, sentence: Sentence) -> ResolutionReport {
        let mut report = ResolutionReport::new();
        let (height, width) = (self.height, self.width);
        if let Some(cell) = sentence.cells().iter().find(|c| !c.in_bounds(height, width)) {
            warn!(%sentence, %cell, "ignoring sentence outside the board");
            return report;
        }
        if !sentence.is_empty() {
            debug!(%sentence, "adding sentence");
            self.insert_sentence(sentence, &mut report);
        }
        self.resolve_into(&mut report);
        report
    }

    /// Run resolution to a fixed point.
    ///
    /// Observations already do this; calling it again changes nothing.
    pub fn resolve(&mut self) -> ResolutionReport {
        let mut report = ResolutionReport::new();
        self.resolve_into(&mut report);
        report
    }

    // === Snapshots ===

    /// Encode the full knowledge base.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a knowledge base produced by [`KnowledgeBase::to_bytes`].
    ///
    /// Decoded state is checked before it is accepted; see
    /// [`KnowledgeBase::validate`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let kb: Self = bincode::deserialize(bytes)?;
        kb.validate()?;
        Ok(kb)
    }

    /// Check state that did not come from resolution.
    ///
    /// Every sentence must be non-empty, hold at most as many mines as cells
    /// and lie on the board; known safes and mines must be disjoint and on
    /// the board; revealed cells must be known safe.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let invalid = |reason: String| -> Result<(), SnapshotError> {
            Err(SnapshotError::Invalid(reason))
        };
        let on_board = |cell: Cell| cell.in_bounds(self.height, self.width);

        if self.height == 0 || self.width == 0 {
            return invalid(format!("empty {}x{} board", self.height, self.width));
        }
        if self.max_passes == 0 {
            return invalid("pass cap of zero".to_string());
        }
        for sentence in &self.sentences {
            if sentence.is_empty() {
                return invalid("empty sentence".to_string());
            }
            if sentence.count() > sentence.len() {
                return invalid(format!("sentence {} claims too many mines", sentence));
            }
            if let Some(cell) = sentence.cells().iter().find(|cell| !on_board(**cell)) {
                return invalid(format!("sentence {} mentions off-board {}", sentence, cell));
            }
        }
        let known = self.safes.iter().chain(&self.mines).chain(&self.moves_made);
        if let Some(cell) = known.filter(|cell| !on_board(**cell)).min() {
            return invalid(format!("off-board cell {}", cell));
        }
        if let Some(cell) = self.safes.intersection(&self.mines).min() {
            return invalid(format!("{} is both safe and a mine", cell));
        }
        let unsafe_move = self.moves_made.iter().filter(|cell| !self.safes.contains(*cell)).min();
        if let Some(cell) = unsafe_move {
            return invalid(format!("revealed {} is not known safe", cell));
        }
        Ok(())
    }

    // === Resolution ===

    fn resolve_into(&mut self, report: &mut ResolutionReport) {
        let mut passes = 0;
        loop {
            if passes == self.max_passes {
                let contradiction = Contradiction::PassLimitExceeded(self.max_passes);
                error!(%contradiction, sentences = self.sentences.len(), "resolution aborted");
                Self::flag(&mut self.stats, report, contradiction);
                break;
            }
            passes += 1;

            let changed = self.run_pass(report);
            trace!(pass = passes, sentences = self.sentences.len(), changed, "resolution pass");
            if !changed {
                break;
            }
        }

        let before = self.sentences.len();
        self.sentences.retain(|sentence| !sentence.is_empty());
        report.sentences_removed += before - self.sentences.len();

        report.passes += passes;
        self.stats.passes += passes as u64;
        self.stats.peak_sentences = self.stats.peak_sentences.max(self.sentences.len());
    }

    /// One pass; returns whether anything changed.
    fn run_pass(&mut self, report: &mut ResolutionReport) -> bool {
        let mut changed = self.reconcile(report);

        for i in 0..self.sentences.len() {
            let (cells, fact) = if let Some(cells) = self.sentences[i].known_mines() {
                (cells.clone(), Fact::Mine)
            } else if let Some(cells) = self.sentences[i].known_safes() {
                (cells.clone(), Fact::Safe)
            } else {
                continue;
            };
            for cell in cells {
                changed |= self.learn(cell, fact, report);
            }
        }

        changed |= self.compact(report);

        for sentence in self.derive_subsets(report) {
            if self.insert_sentence(sentence, report) {
                self.stats.sentences_derived += 1;
                changed = true;
            }
        }

        changed
    }

    /// Strip known mines and safes out of every sentence.
    fn reconcile(&mut self, report: &mut ResolutionReport) -> bool {
        let mut changed = false;
        for sentence in &mut self.sentences {
            let known: Vec<(Cell, Fact)> = sentence
                .cells()
                .iter()
                .filter_map(|cell| {
                    if self.mines.contains(cell) {
                        Some((*cell, Fact::Mine))
                    } else if self.safes.contains(cell) {
                        Some((*cell, Fact::Safe))
                    } else {
                        None
                    }
                })
                .collect();

            for (cell, fact) in known {
                match Self::absorb(sentence, cell, fact) {
                    Ok(absorbed) => changed |= absorbed,
                    Err(contradiction) => {
                        Self::flag(&mut self.stats, report, contradiction);
                        *sentence = Sentence::default();
                        changed = true;
                        break;
                    }
                }
            }
        }
        changed
    }

    /// Make `cell` a global fact and push it into every sentence.
    ///
    /// Returns whether anything changed. A fact that contradicts the opposite
    /// global set is refused.
    fn learn(&mut self, cell: Cell, fact: Fact, report: &mut ResolutionReport) -> bool {
        let (known, opposite) = match fact {
            Fact::Mine => (&mut self.mines, &self.safes),
            Fact::Safe => (&mut self.safes, &self.mines),
        };
        if opposite.contains(&cell) {
            Self::flag(&mut self.stats, report, Contradiction::SafeAndMine(cell));
            return false;
        }

        let mut changed = known.insert(cell);
        if changed {
            debug!(%cell, ?fact, "learned");
            match fact {
                Fact::Mine => {
                    self.stats.mines_learned += 1;
                    report.new_mines.push(cell);
                }
                Fact::Safe => {
                    self.stats.safes_learned += 1;
                    report.new_safes.push(cell);
                }
            }
        }

        for sentence in &mut self.sentences {
            match Self::absorb(sentence, cell, fact) {
                Ok(absorbed) => changed |= absorbed,
                Err(contradiction) => {
                    Self::flag(&mut self.stats, report, contradiction);
                    *sentence = Sentence::default();
                    changed = true;
                }
            }
        }
        changed
    }

    /// Apply a fact to one sentence.
    ///
    /// Refuses facts the sentence cannot absorb without breaking its count
    /// invariant: a mine in an all-safe sentence, or a safe cell in an
    /// all-mine sentence.
    fn absorb(sentence: &mut Sentence, cell: Cell, fact: Fact) -> Result<bool, Contradiction> {
        if !sentence.contains(&cell) {
            return Ok(false);
        }
        match fact {
            Fact::Mine if sentence.count() == 0 => Err(Contradiction::SafeAndMine(cell)),
            Fact::Safe if sentence.count() == sentence.len() => {
                Err(Contradiction::SafeAndMine(cell))
            }
            Fact::Mine => {
                sentence.mark_mine(cell);
                Ok(true)
            }
            Fact::Safe => {
                sentence.mark_safe(cell);
                Ok(true)
            }
        }
    }

    /// Rebuild the sentence list without empty or duplicate entries.
    fn compact(&mut self, report: &mut ResolutionReport) -> bool {
        let before = self.sentences.len();
        let mut counts: FxHashMap<BTreeSet<Cell>, usize> = FxHashMap::default();
        let mut kept = Vec::with_capacity(before);

        for sentence in std::mem::take(&mut self.sentences) {
            if sentence.is_empty() {
                continue;
            }
            match counts.get(sentence.cells()) {
                None => {
                    counts.insert(sentence.cells().clone(), sentence.count());
                    kept.push(sentence);
                }
                Some(&stored) if stored == sentence.count() => {}
                Some(&stored) => Self::flag(
                    &mut self.stats,
                    report,
                    Contradiction::ConflictingCounts {
                        cells: sentence.cells().iter().copied().collect(),
                        stored,
                        derived: sentence.count(),
                    },
                ),
            }
        }

        self.sentences = kept;
        let removed = before - self.sentences.len();
        report.sentences_removed += removed;
        removed > 0
    }

    /// Subset resolution over every ordered pair, in insertion order.
    ///
    /// Returns new sentences not already stored, deduplicated.
    fn derive_subsets(&mut self, report: &mut ResolutionReport) -> Vec<Sentence> {
        let mut derived: Vec<Sentence> = Vec::new();
        let mut refused = Vec::new();

        for superset in &self.sentences {
            for subset in &self.sentences {
                if !subset.is_strict_subset_of(superset) {
                    continue;
                }
                match subset.subtract_from(superset) {
                    Ok(sentence) => {
                        if !self.sentences.contains(&sentence) && !derived.contains(&sentence) {
                            trace!(%superset, %subset, %sentence, "derived");
                            derived.push(sentence);
                        }
                    }
                    Err(contradiction) => refused.push(contradiction),
                }
            }
        }

        for contradiction in refused {
            Self::flag(&mut self.stats, report, contradiction);
        }
        derived
    }

    /// Store a sentence unless one over the same cells already exists.
    ///
    /// Returns whether it was stored.
    fn insert_sentence(&mut self, sentence: Sentence, report: &mut ResolutionReport) -> bool {
        if let Some(existing) = self.sentences.iter().find(|s| s.cells() == sentence.cells()) {
            if existing.count() != sentence.count() {
                let contradiction = Contradiction::ConflictingCounts {
                    cells: sentence.cells().iter().copied().collect(),
                    stored: existing.count(),
                    derived: sentence.count(),
                };
                Self::flag(&mut self.stats, report, contradiction);
            }
            return false;
        }

        debug!(%sentence, "stored sentence");
        self.sentences.push(sentence);
        report.sentences_added += 1;
        true
    }

    /// Log and count a refused conclusion, once per report.
    fn flag(
        stats: &mut InferenceStats,
        report: &mut ResolutionReport,
        contradiction: Contradiction,
    ) {
        if report.contradictions.contains(&contradiction) {
            return;
        }
        warn!(%contradiction, "contradiction refused");
        stats.contradictions += 1;
        report.contradictions.push(contradiction);
    }
}

impl std::fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "KnowledgeBase {}x{}: {} moves, {} safe, {} mines, {} sentences",
            self.height,
            self.width,
            self.moves_made.len(),
            self.safes.len(),
            self.mines.len(),
            self.sentences.len()
        )?;
        for sentence in &self.sentences {
            writeln!(f, "  {}", sentence)?;
        }
        Ok(())
    }
}
