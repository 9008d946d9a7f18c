//! Actor - plays tic-tac-toe with the MCTS engine
//!
//! A short-lived process that:
//! 1. Loads configuration (CLI > env > config.toml > defaults)
//! 2. Runs the engine for one side of a game against a random opponent,
//!    reusing the search tree from move to move
//! 3. Logs the candidate moves, tree statistics and the final result

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod config;
mod game;

use crate::config::Config;
use crate::game::{Match, Outcome};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let engine_side = config.engine_side()?;
    let mcts_config = config.mcts_config()?;
    info!(
        side = %engine_side,
        iterations = mcts_config.iterations,
        exploration_constant = mcts_config.exploration_constant,
        tie_break = ?mcts_config.tie_break,
        unvisited = ?mcts_config.unvisited,
        "Starting game"
    );

    let mut game = Match::new(
        mcts_config,
        engine_side,
        config.engine_seed(),
        config.opponent_seed(),
    )
    .with_max_plies(config.max_plies)
    .with_top_moves(config.top_moves);

    match game.play() {
        Ok(record) => {
            info!(
                plies = record.plies,
                "Final board:\n{}", record.board
            );
            match record.outcome {
                Outcome::EngineWon => info!("Engine ({}) won", engine_side),
                Outcome::OpponentWon => info!("Opponent ({}) won", engine_side.opponent()),
                Outcome::Draw => info!("Game drawn"),
                Outcome::Unfinished => info!(max_plies = config.max_plies, "Ply limit reached"),
            }
            Ok(())
        }
        Err(e) => {
            error!("Game failed: {}", e);
            Err(e)
        }
    }
}
