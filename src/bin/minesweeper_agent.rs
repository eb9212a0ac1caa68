//! Play Minesweeper with the knowledge-based agent.
//!
//! Runs a batch of games and prints aggregate results. With `--show-board`
//! and a single game, also prints the mine layout and the agent's final view.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use minesweeper_kb::core::{AgentConfig, AgentRng, BoardConfig, DEFAULT_MAX_RESOLUTION_PASSES};
use minesweeper_kb::games::minesweeper::{Board, GameDriver};
use minesweeper_kb::sim::{run_simulation, SimulationConfig};
use minesweeper_kb::Agent;

/// Knowledge-based Minesweeper agent
#[derive(Parser, Debug)]
#[command(name = "minesweeper-agent")]
#[command(about = "Plays Minesweeper by propositional inference", long_about = None)]
#[command(version)]
struct Cli {
    /// Board rows
    #[arg(long, default_value_t = 8)]
    height: usize,

    /// Board columns
    #[arg(long, default_value_t = 8)]
    width: usize,

    /// Number of mines
    #[arg(short, long, default_value_t = 8)]
    mines: usize,

    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: usize,

    /// Master seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Cap on resolution passes per observation
    #[arg(long, default_value_t = DEFAULT_MAX_RESOLUTION_PASSES)]
    max_passes: usize,

    /// Print the board and the agent's view (single game only)
    #[arg(long)]
    show_board: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let board = BoardConfig::new(cli.height, cli.width, cli.mines);
    board.validate()?;

    if cli.show_board && cli.games == 1 {
        return play_single(&cli, board);
    }

    let config = SimulationConfig::new()
        .with_board(board)
        .with_games(cli.games)
        .with_seed(cli.seed)
        .with_max_resolution_passes(cli.max_passes);

    info!(games = config.games, seed = config.seed, "starting simulation");
    let summary = run_simulation(&config)?;

    println!("games:         {}", summary.games);
    println!("wins:          {}", summary.wins);
    println!("losses:        {}", summary.losses);
    println!("stalls:        {}", summary.stalls);
    println!("win rate:      {:.1}%", summary.win_rate() * 100.0);
    println!("turns:         {}", summary.turns);
    println!("guesses:       {}", summary.random_moves);
    println!(
        "passes/obs:    {:.2}",
        summary.inference.avg_passes_per_observation()
    );
    println!("contradictions: {}", summary.inference.contradictions);
    Ok(())
}

fn play_single(cli: &Cli, board: BoardConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = AgentRng::new(cli.seed);
    let field = Board::generate(&board, &mut rng)?;
    let agent = Agent::new(
        AgentConfig::for_board(&board)
            .with_seed(rng.fork().seed())
            .with_max_resolution_passes(cli.max_passes),
    );

    println!("{}", field);

    let mut driver = GameDriver::new(field, agent);
    let outcome = loop {
        if let Some(outcome) = driver.step() {
            break outcome;
        }
    };

    println!("{}", driver.render());
    println!("outcome: {:?}", outcome);
    println!("turns:   {}", driver.history().len());
    println!("flagged: {}", driver.agent().flagged().len());
    println!(
        "won by flags: {}",
        driver.field().won(driver.agent().flagged())
    );
    Ok(())
}
