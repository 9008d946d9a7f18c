//! Generic Monte Carlo Tree Search (MCTS) engine.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! domain implementing the [`Domain`] trait: a successor function and a
//! win test for terminal states. States are opaque to the search.
//!
//! # Overview
//!
//! MCTS builds a search tree by running simulations. Each call to
//! [`MctsSearch::explore`] runs one simulation in four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT (Upper Confidence Bound
//!    applied to Trees) to balance exploration and exploitation
//! 2. **Expansion**: Attach every successor of the reached leaf, descend into
//!    one of them at random, and repeat until a terminal state is reached
//! 3. **Evaluation**: Ask the domain whether the terminal state is a win for
//!    the actor being optimized for
//! 4. **Backpropagation**: Add a visit (and a win, when won) to every node on
//!    the path back to the root
//!
//! [`MctsSearch::commit_move`] advances the root to one of its children,
//! keeping the statistics gathered for that subtree.
//!
//! # Usage
//!
//! ```rust
//! use mcts::{FnDomain, MctsConfig, MctsSearch};
//!
//! // Take 1 or 2 from a pile; whoever empties the pile wins.
//! // States are (pile, player who just moved).
//! let domain = FnDomain::new(
//!     |&(pile, last): &(u32, u8)| {
//!         (1..=2u32.min(pile)).map(|take| (pile - take, 1 - last)).collect()
//!     },
//!     |&(_, last): &(u32, u8), actor: &u8| last == *actor,
//! );
//!
//! let config = MctsConfig::default().with_iterations(500);
//! let mut search = MctsSearch::with_seed(domain, (5, 1), 0u8, config, 42);
//! let result = search.run().unwrap();
//! assert_eq!(result.simulations, 500);
//!
//! let best = result.best_move.unwrap();
//! search.commit_move(&best).unwrap();
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `exploration_constant`: `C` in the UCT formula (default: sqrt(2))
//! - `tie_break`: how equal UCT scores are resolved (default: coin flip)
//! - `unvisited`: whether never-simulated children are skipped (default) or
//!   tried first
//! - `iterations`: number of explorations per [`MctsSearch::run`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MctsSearch                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  MctsTree   │  │   Domain    │  │     ChaCha20Rng     │  │
//! │  │  (arena)    │  │ (game rules)│  │  (owned entropy)    │  │
//! │  └──────┬──────┘  └──────┬──────┘  └──────────┬──────────┘  │
//! │         │                │                    │             │
//! │         ▼                ▼                    ▼             │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │              select → expand → evaluate →            │   │
//! │  │                     backpropagate                    │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod domain;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{MctsConfig, TieBreak, Unvisited};
pub use domain::{Domain, DomainError, FnDomain};
pub use node::{MctsNode, NodeId, NodeSnapshot};
pub use search::{run_mcts, MctsSearch, MoveStats, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
