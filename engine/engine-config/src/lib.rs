//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the actor binary and anything else that drives the search engine.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`MCTS_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! MCTS_<SECTION>_<KEY>=value
//!
//! Examples:
//!     MCTS_COMMON_LOG_LEVEL=debug
//!     MCTS_MCTS_ITERATIONS=5000
//!     MCTS_MCTS_TIE_BREAK=uniform
//!     MCTS_ACTOR_SIDE=X
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_ENV_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
