//! Knowledge base integration tests.
//!
//! These drive the resolver through observations and added sentences and
//! check what it concludes.

use minesweeper_kb::core::Cell;
use minesweeper_kb::knowledge::{Contradiction, KnowledgeBase, Sentence};

fn cell(row: usize, col: usize) -> Cell {
    Cell::new(row, col)
}

// =============================================================================
// Sentence Resolution Tests
// =============================================================================

/// Test that subtracting a subset isolates the remaining mine.
#[test]
fn test_subset_isolates_mine() {
    let mut kb = KnowledgeBase::new(5, 5);
    let (a, b, c) = (cell(0, 0), cell(0, 1), cell(0, 2));

    kb.add_sentence(Sentence::new([a, b, c], 2));
    let report = kb.add_sentence(Sentence::new([a, b], 1));

    assert!(kb.is_known_mine(c));
    assert_eq!(report.new_mines, vec![c]);
    assert!(!kb.is_known_mine(a));
    assert!(!kb.is_known_safe(a));
}

/// Test that a sentence whose count equals its size marks every cell a mine.
#[test]
fn test_full_sentence_marks_mines() {
    let mut kb = KnowledgeBase::new(5, 5);
    kb.add_sentence(Sentence::new([cell(1, 1), cell(2, 2)], 2));

    assert!(kb.is_known_mine(cell(1, 1)));
    assert!(kb.is_known_mine(cell(2, 2)));
    assert!(kb.sentences().is_empty());
}

/// Test that a zero-count sentence marks every cell safe.
#[test]
fn test_zero_sentence_marks_safes() {
    let mut kb = KnowledgeBase::new(5, 5);
    let cells = [cell(0, 0), cell(3, 3), cell(4, 4)];
    kb.add_sentence(Sentence::new(cells, 0));

    for c in cells {
        assert!(kb.is_known_safe(c));
    }
    assert!(kb.sentences().is_empty());
    assert_eq!(kb.safe_moves().len(), 3);
}

/// Test that an impossible observation is refused rather than stored.
#[test]
fn test_impossible_count_is_refused() {
    let mut kb = KnowledgeBase::new(8, 8);
    // A corner has three neighbours
    let report = kb.record_observation(cell(0, 0), 4);

    assert!(!report.is_consistent());
    assert!(matches!(
        report.contradictions[0],
        Contradiction::CountOutOfRange { count: 4, .. }
    ));
    assert!(kb.sentences().is_empty());
    assert!(kb.mines().is_empty());
    assert!(kb.has_moved(cell(0, 0)));
}

// =============================================================================
// Observation Scenario Tests
// =============================================================================

/// Test that a zero in the corner clears its neighbours and leaves nothing behind.
#[test]
fn test_corner_zero_on_empty_board() {
    let mut kb = KnowledgeBase::new(8, 8);
    kb.record_observation(cell(0, 0), 0);

    for c in [cell(0, 1), cell(1, 0), cell(1, 1)] {
        assert!(kb.is_known_safe(c), "{} should be safe", c);
    }
    assert!(kb.sentences().is_empty());
    assert!(kb.mines().is_empty());
}

/// Test that the last unresolved neighbour of a one is found once the rest
/// are proven safe by other observations.
#[test]
fn test_last_neighbour_becomes_mine() {
    // Ground truth: a single mine at (4, 4)
    let mut kb = KnowledgeBase::new(8, 8);

    kb.record_observation(cell(3, 3), 1);
    assert!(kb.mines().is_empty());

    kb.record_observation(cell(2, 2), 0);
    kb.record_observation(cell(4, 2), 0);
    assert!(!kb.is_known_mine(cell(4, 4)));

    let report = kb.record_observation(cell(2, 4), 0);

    assert!(kb.is_known_mine(cell(4, 4)));
    assert!(report.new_mines.contains(&cell(4, 4)));
    for c in [cell(2, 3), cell(3, 2), cell(3, 4), cell(4, 3)] {
        assert!(kb.is_known_safe(c));
    }
    assert!(report.is_consistent());
}

/// Test chained deductions across overlapping observations on a strip.
#[test]
fn test_strip_deduction() {
    // 1x4 strip, mine at (0, 3)
    let mut kb = KnowledgeBase::new(1, 4);
    kb.record_observation(cell(0, 1), 0);
    kb.record_observation(cell(0, 2), 1);

    assert!(kb.is_known_mine(cell(0, 3)));
    assert!(kb.is_known_safe(cell(0, 0)));
    assert_eq!(kb.safe_moves().into_iter().collect::<Vec<_>>(), vec![cell(0, 0)]);
}

// =============================================================================
// Invariant Tests
// =============================================================================

/// Test that resolving again after an observation learns nothing.
#[test]
fn test_resolution_is_idempotent() {
    let mut kb = KnowledgeBase::new(6, 6);
    kb.record_observation(cell(2, 2), 2);
    kb.record_observation(cell(0, 0), 1);
    kb.record_observation(cell(5, 5), 0);

    let sentences = kb.sentences().to_vec();
    let safes = kb.safes().clone();
    let mines = kb.mines().clone();

    let report = kb.resolve();

    assert!(!report.learned_anything());
    assert_eq!(report.passes, 1);
    assert_eq!(kb.sentences(), sentences.as_slice());
    assert_eq!(kb.safes(), &safes);
    assert_eq!(kb.mines(), &mines);
}

/// Test that known sets only ever grow.
#[test]
fn test_knowledge_is_monotone() {
    // Mines at (0, 2) and (2, 0) on a 3x3 board
    let observations = [
        (cell(0, 0), 0),
        (cell(1, 1), 2),
        (cell(2, 2), 0),
        (cell(0, 1), 1),
    ];
    let mut kb = KnowledgeBase::new(3, 3);
    let mut safes = kb.safes().clone();
    let mut mines = kb.mines().clone();

    for (c, count) in observations {
        kb.record_observation(c, count);
        assert!(safes.is_subset(kb.safes()));
        assert!(mines.is_subset(kb.mines()));
        safes = kb.safes().clone();
        mines = kb.mines().clone();
    }

    assert!(kb.is_known_mine(cell(0, 2)));
    assert!(kb.is_known_mine(cell(2, 0)));
}

/// Test that stored sentences never mention decided cells.
#[test]
fn test_sentences_exclude_known_cells() {
    let mut kb = KnowledgeBase::new(5, 5);
    kb.record_observation(cell(0, 0), 1);
    kb.record_observation(cell(2, 2), 3);
    kb.record_observation(cell(4, 4), 0);
    kb.record_observation(cell(1, 1), 2);

    for sentence in kb.sentences() {
        assert!(!sentence.is_empty());
        assert!(sentence.count() <= sentence.len());
        for c in sentence.cells() {
            assert!(!kb.is_known_safe(*c), "{} holds known safe {}", sentence, c);
            assert!(!kb.is_known_mine(*c), "{} holds known mine {}", sentence, c);
        }
    }
}

/// Test that revealed cells are never offered as safe moves.
#[test]
fn test_safe_moves_exclude_revealed() {
    let mut kb = KnowledgeBase::new(4, 4);
    kb.record_observation(cell(0, 0), 0);
    kb.record_observation(cell(0, 1), 0);

    let moves = kb.safe_moves();
    assert!(!moves.contains(&cell(0, 0)));
    assert!(!moves.contains(&cell(0, 1)));
    assert!(moves.contains(&cell(1, 2)));
}

// =============================================================================
// Snapshot Tests
// =============================================================================

/// Test that a restored knowledge base keeps deducing from where it left off.
#[test]
fn test_snapshot_continues() {
    let mut kb = KnowledgeBase::new(1, 4);
    kb.record_observation(cell(0, 1), 0);

    let mut restored = KnowledgeBase::from_bytes(&kb.to_bytes().unwrap()).unwrap();
    restored.record_observation(cell(0, 2), 1);

    assert!(restored.is_known_mine(cell(0, 3)));
    assert_eq!(restored.stats().observations, 2);
}
