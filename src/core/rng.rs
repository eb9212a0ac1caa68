//! Seeded randomness.
//!
//! Only two things in the crate are random: where a generated board puts its
//! mines, and which cell the agent guesses when it knows of no safe one.
//! Both draw from an `AgentRng`, so one seed replays a whole game.
//!
//! A simulation forks one master stream into a board stream and an agent
//! seed per game; forks are numbered, so the N-th fork of a given seed is
//! always the same stream.
//!
//! ```
//! use minesweeper_kb::core::AgentRng;
//!
//! let mut master = AgentRng::new(42);
//! let mut board = master.fork();
//! let mut agent = master.fork();
//!
//! let cells: Vec<u32> = (0..16).collect();
//! let a: Vec<_> = (0..8).map(|_| *board.choose(&cells).unwrap()).collect();
//! let b: Vec<_> = (0..8).map(|_| *agent.choose(&cells).unwrap()).collect();
//! assert_ne!(a, b);
//! ```

use rand::seq::{index, SliceRandom};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Golden-ratio increment separating fork seeds.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A ChaCha8 stream that remembers its seed and how often it was forked.
#[derive(Clone, Debug)]
pub struct AgentRng {
    stream: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl AgentRng {
    /// Start a stream from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the next child stream.
    ///
    /// Children depend only on the parent seed and the fork number, never on
    /// how much the parent has drawn.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Uniform pick from `candidates`; `None` when empty.
    pub fn choose<'a, T>(&mut self, candidates: &'a [T]) -> Option<&'a T> {
        candidates.choose(&mut self.stream)
    }

    /// `amount` distinct indices from `0..length`.
    ///
    /// Panics if `amount > length`; board configs are validated first.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.stream, length, amount).into_vec()
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> AgentRngState {
        AgentRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
            forks: self.forks,
        }
    }

    /// Resume a captured stream.
    #[must_use]
    pub fn from_state(state: &AgentRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(state.seed);
        stream.set_word_pos(state.word_pos);
        Self {
            stream,
            seed: state.seed,
            forks: state.forks,
        }
    }
}

/// Checkpoint of an [`AgentRng`]; constant size however far it has run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    pub forks: u64,
}
