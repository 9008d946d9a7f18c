//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the binaries and the documented defaults cannot drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    exploration_constant: f64,
    iterations: u32,
    tie_break: String,
    unvisited: String,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    side: String,
    max_plies: u32,
    top_moves: usize,
    #[serde(default)]
    opponent_seed: Option<u64>,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn tie_break() -> &'static str {
    &DEFAULTS.mcts.tie_break
}
pub fn unvisited() -> &'static str {
    &DEFAULTS.mcts.unvisited
}
pub fn seed() -> Option<u64> {
    DEFAULTS.mcts.seed
}

// Actor
pub fn side() -> &'static str {
    &DEFAULTS.actor.side
}
pub fn max_plies() -> u32 {
    DEFAULTS.actor.max_plies
}
pub fn top_moves() -> usize {
    DEFAULTS.actor.top_moves
}
pub fn opponent_seed() -> Option<u64> {
    DEFAULTS.actor.opponent_seed
}
