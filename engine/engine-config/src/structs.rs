//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_exploration_constant() -> f64 {
    defaults::exploration_constant()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_tie_break() -> String {
    defaults::tie_break().into()
}
fn d_unvisited() -> String {
    defaults::unvisited().into()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_side() -> String {
    defaults::side().into()
}
fn d_max_plies() -> u32 {
    defaults::max_plies()
}
fn d_top_moves() -> usize {
    defaults::top_moves()
}
fn d_opponent_seed() -> Option<u64> {
    defaults::opponent_seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search parameters. Policies are kept as strings here and parsed by the
/// consumer, so a typo surfaces as an error where it is used.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f64,
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    #[serde(default = "d_tie_break")]
    pub tie_break: String,
    #[serde(default = "d_unvisited")]
    pub unvisited: String,
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: defaults::exploration_constant(),
            iterations: defaults::iterations(),
            tie_break: defaults::tie_break().into(),
            unvisited: defaults::unvisited().into(),
            seed: defaults::seed(),
        }
    }
}

/// Actor (game driver) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    #[serde(default = "d_side")]
    pub side: String,
    #[serde(default = "d_max_plies")]
    pub max_plies: u32,
    #[serde(default = "d_top_moves")]
    pub top_moves: usize,
    #[serde(default = "d_opponent_seed")]
    pub opponent_seed: Option<u64>,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            side: defaults::side().into(),
            max_plies: defaults::max_plies(),
            top_moves: defaults::top_moves(),
            opponent_seed: defaults::opponent_seed(),
        }
    }
}
