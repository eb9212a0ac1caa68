//! Batch simulation of many games.
//!
//! Each game gets its own board and agent, both seeded by forking one master
//! RNG, so a `(config, seed)` pair always reproduces the same run.
//!
//! ```
//! use minesweeper_kb::core::BoardConfig;
//! use minesweeper_kb::sim::{run_simulation, SimulationConfig};
//!
//! let config = SimulationConfig::new()
//!     .with_board(BoardConfig::new(6, 6, 4))
//!     .with_games(3)
//!     .with_seed(7);
//!
//! let summary = run_simulation(&config).unwrap();
//! assert_eq!(summary.games, 3);
//! ```

mod runner;

pub use runner::{run_simulation, SimulationConfig, SimulationSummary};
