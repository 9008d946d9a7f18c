//! Configuration for the actor binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_tictactoe::Player;
use mcts::{MctsConfig, TieBreak, Unvisited};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_exploration_constant() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_tie_break() -> String {
    CENTRAL_CONFIG.mcts.tie_break.clone()
}

fn default_unvisited() -> String {
    CENTRAL_CONFIG.mcts.unvisited.clone()
}

fn default_side() -> String {
    CENTRAL_CONFIG.actor.side.clone()
}

fn default_max_plies() -> u32 {
    CENTRAL_CONFIG.actor.max_plies
}

fn default_top_moves() -> usize {
    CENTRAL_CONFIG.actor.top_moves
}

#[derive(Parser, Debug, Clone)]
#[command(name = "actor")]
#[command(about = "Plays a game of tic-tac-toe against the MCTS engine")]
#[command(
    long_about = "Runs the MCTS engine for one side of a tic-tac-toe game while a
seeded random opponent plays the other side.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Exploration constant C in the UCT formula
    #[arg(long, default_value_t = default_exploration_constant())]
    pub exploration_constant: f64,

    /// Explorations run before every engine move
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// Tie-breaking policy (coin_flip, uniform)
    #[arg(long, default_value_t = default_tie_break())]
    pub tie_break: String,

    /// Treatment of unvisited children (skip, prefer)
    #[arg(long, default_value_t = default_unvisited())]
    pub unvisited: String,

    /// Seed for the engine's generator (random when absent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Side played by the engine (X moves first)
    #[arg(long, default_value_t = default_side())]
    pub side: String,

    /// Stop after this many plies even if the game is unfinished
    #[arg(long, default_value_t = default_max_plies())]
    pub max_plies: u32,

    /// Number of ranked moves logged before each engine move
    #[arg(long, default_value_t = default_top_moves())]
    pub top_moves: usize,

    /// Seed for the random opponent (random when absent)
    #[arg(long)]
    pub opponent_seed: Option<u64>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if self.iterations == 0 {
            return Err(anyhow!("iterations must be greater than 0"));
        }

        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(anyhow!(
                "exploration_constant must be a non-negative number, got {}",
                self.exploration_constant
            ));
        }

        if self.max_plies == 0 {
            return Err(anyhow!("max_plies must be greater than 0"));
        }

        self.engine_side()?;
        self.mcts_config()?;

        Ok(())
    }

    /// Side the engine plays
    pub fn engine_side(&self) -> Result<Player> {
        self.side
            .parse()
            .map_err(|e| anyhow!("invalid side: {}", e))
    }

    /// Engine seed: the CLI value, else the one from config.toml
    pub fn engine_seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.mcts.seed)
    }

    /// Opponent seed: the CLI value, else the one from config.toml
    pub fn opponent_seed(&self) -> Option<u64> {
        self.opponent_seed.or(CENTRAL_CONFIG.actor.opponent_seed)
    }

    /// Search parameters for the engine
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let tie_break: TieBreak = self.tie_break.parse().map_err(|e: String| anyhow!(e))?;
        let unvisited: Unvisited = self.unvisited.parse().map_err(|e: String| anyhow!(e))?;

        Ok(MctsConfig::default()
            .with_exploration_constant(self.exploration_constant)
            .with_iterations(self.iterations)
            .with_tie_break(tie_break)
            .with_unvisited(unvisited))
    }
}
