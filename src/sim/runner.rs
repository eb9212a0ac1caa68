//! Batch play for measuring the agent.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agent::Agent;
use crate::core::{AgentConfig, AgentRng, BoardConfig, ConfigError, DEFAULT_MAX_RESOLUTION_PASSES};
use crate::games::minesweeper::{Board, GameDriver, GameOutcome, GameSummary};
use crate::knowledge::InferenceStats;

/// Configuration for a simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Board every game is played on.
    pub board: BoardConfig,

    /// Number of games.
    pub games: usize,

    /// Master seed; each game forks its own board and agent streams.
    pub seed: u64,

    /// Resolution pass cap handed to each agent.
    pub max_resolution_passes: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            games: 100,
            seed: 0,
            max_resolution_passes: DEFAULT_MAX_RESOLUTION_PASSES,
        }
    }
}

impl SimulationConfig {
    /// Create a new simulation config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board.
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Set the number of games.
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the resolution pass cap.
    pub fn with_max_resolution_passes(mut self, passes: usize) -> Self {
        self.max_resolution_passes = passes;
        self
    }
}

/// Aggregate results of a simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Games played.
    pub games: usize,
    /// Games where every safe cell was revealed.
    pub wins: usize,
    /// Games lost on a mine.
    pub losses: usize,
    /// Games that ran out of moves.
    pub stalls: usize,
    /// Moves across all games.
    pub turns: usize,
    /// Guesses across all games.
    pub random_moves: usize,
    /// Inference statistics summed over every agent.
    pub inference: InferenceStats,
}

impl SimulationSummary {
    /// Fraction of games won.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    fn record(&mut self, game: &GameSummary) {
        self.games += 1;
        match game.outcome {
            GameOutcome::Won => self.wins += 1,
            GameOutcome::Lost { .. } => self.losses += 1,
            GameOutcome::Stalled => self.stalls += 1,
        }
        self.turns += game.turns;
        self.random_moves += game.random_moves;
        self.inference.absorb(&game.inference);
    }
}

/// Play `config.games` independent games and summarise them.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationSummary, ConfigError> {
    config.board.validate()?;
    let mut master = AgentRng::new(config.seed);
    let mut summary = SimulationSummary::default();

    for game_index in 0..config.games {
        let mut board_rng = master.fork();
        let agent_seed = master.fork().seed();

        let board = Board::generate(&config.board, &mut board_rng)?;
        let agent_config = AgentConfig::for_board(&config.board)
            .with_seed(agent_seed)
            .with_max_resolution_passes(config.max_resolution_passes);

        let game = GameDriver::new(board, Agent::new(agent_config)).play();
        summary.record(&game);
        info!(game = game_index, outcome = ?game.outcome, turns = game.turns, "simulated game");
    }

    info!(
        games = summary.games,
        wins = summary.wins,
        win_rate = summary.win_rate(),
        "simulation complete"
    );
    Ok(summary)
}
