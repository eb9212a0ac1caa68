//! Games the agent can play.
//!
//! - `minesweeper`: the classic board, generated at random or from a fixed
//!   layout, and the loop that plays an [`Agent`](crate::agent::Agent) on it

pub mod minesweeper;
