//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm, one `explore` call per iteration:
//! 1. Selection: Traverse the tree using UCT to find a leaf
//! 2. Expansion: Expand the leaf and keep expanding one random child until
//!    a terminal state is reached
//! 3. Evaluation: Ask the domain whether the terminal state is a win
//! 4. Backpropagation: Update statistics along the path back to the root

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::domain::{Domain, DomainError};
use crate::node::{MctsNode, NodeId, NodeSnapshot};
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("An unknown state has been given as the next move")]
    UnrecognizedMove,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    /// Most simulated move from the root, if the root has been expanded
    pub best_move: Option<S>,

    /// Win rate at root
    pub win_rate: f64,

    /// Number of simulations backpropagated through the root
    pub simulations: u32,
}

/// Statistics of one candidate move (a direct child of the root).
#[derive(Debug, Clone, PartialEq)]
pub struct MoveStats<S> {
    pub state: S,
    pub wins: u32,
    pub simulations: u32,
    pub win_rate: f64,
}

impl<S: Clone> From<&MctsNode<S>> for MoveStats<S> {
    fn from(node: &MctsNode<S>) -> Self {
        Self {
            state: node.state.clone(),
            wins: node.wins,
            simulations: node.simulations,
            win_rate: node.win_rate(),
        }
    }
}

/// MCTS search state.
///
/// Owns the tree, the random generator and the identity of the actor whose
/// wins are counted. The tree persists across calls, so `explore` can be
/// interleaved with `commit_move` to reuse the subtree of the move played.
pub struct MctsSearch<D: Domain> {
    tree: MctsTree<D::State>,
    domain: D,
    actor: D::Actor,
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl<D: Domain> MctsSearch<D> {
    /// Create a new MCTS search rooted at `initial`.
    pub fn new(
        domain: D,
        initial: D::State,
        actor: D::Actor,
        config: MctsConfig,
        rng: ChaCha20Rng,
    ) -> Self {
        Self {
            tree: MctsTree::new(initial),
            domain,
            actor,
            config,
            rng,
        }
    }

    /// Create a new MCTS search with a generator seeded from `seed`.
    pub fn with_seed(
        domain: D,
        initial: D::State,
        actor: D::Actor,
        config: MctsConfig,
        seed: u64,
    ) -> Self {
        Self::new(
            domain,
            initial,
            actor,
            config,
            ChaCha20Rng::seed_from_u64(seed),
        )
    }

    /// Run one iteration (select -> expand -> evaluate -> backpropagate).
    ///
    /// Errors from the domain abort the iteration before any statistics are
    /// updated. Nodes attached by a partially completed expansion remain.
    pub fn explore(&mut self) -> Result<(), SearchError> {
        // Selection: traverse to a leaf
        let selected = self.select();

        // Expansion: walk a random path down to a terminal state
        let leaf = self.expand(selected)?;

        // Evaluation
        let won = self
            .domain
            .is_win(&self.tree.get(leaf).state, &self.actor)?;

        // Backpropagation
        self.tree.backpropagate(leaf, won);

        trace!(
            selected = selected.0,
            leaf = leaf.0,
            won,
            nodes = self.tree.len(),
            "MCTS exploration complete"
        );

        Ok(())
    }

    /// Run `config.iterations` explorations and report the root statistics.
    pub fn run(&mut self) -> Result<SearchResult<D::State>, SearchError> {
        for _ in 0..self.config.iterations {
            self.explore()?;
        }

        let root = self.tree.root_node();
        Ok(SearchResult {
            best_move: self.best_move(),
            win_rate: root.win_rate(),
            simulations: root.simulations,
        })
    }

    /// Advance the tree to `next`, a direct successor of the root.
    ///
    /// The matching child becomes the new root and keeps its statistics;
    /// every sibling subtree is released. If no child matches, the tree is
    /// left untouched and `SearchError::UnrecognizedMove` is returned.
    pub fn commit_move(&mut self, next: &D::State) -> Result<(), SearchError> {
        let child = self
            .tree
            .find_child(self.tree.root(), next)
            .ok_or(SearchError::UnrecognizedMove)?;

        let before = self.tree.len();
        self.tree.reroot(child);

        debug!(
            released = before - self.tree.len(),
            kept = self.tree.len(),
            root_simulations = self.tree.root_node().simulations,
            "Committed move"
        );

        Ok(())
    }

    /// Select a leaf node by traversing the tree using UCT.
    fn select(&mut self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            if self.tree.get(current).is_leaf() {
                return current;
            }

            current = self
                .tree
                .select_child(current, &self.config, &mut self.rng)
                .expect("selection found no child of a non-leaf node");
        }
    }

    /// Expand from `node_id` down to a terminal state.
    ///
    /// At each step every successor is attached, then one of the new
    /// children is picked uniformly and expanded in turn. Returns the
    /// terminal node reached, which is `node_id` itself when it has no
    /// successors.
    fn expand(&mut self, node_id: NodeId) -> Result<NodeId, SearchError> {
        let mut current = node_id;

        loop {
            let successors = self.domain.successors(&self.tree.get(current).state)?;
            if successors.is_empty() {
                return Ok(current);
            }

            let count = successors.len();
            for state in successors {
                self.tree.add_child(current, state);
            }

            let pick = self.rng.gen_range(0..count);
            let children = &self.tree.get(current).children;
            current = children[children.len() - count + pick];
        }
    }

    /// Statistics of every move available from the root, most simulated
    /// first. Equal simulation counts are ordered by win rate, then by
    /// child order.
    pub fn ranked_moves(&self) -> Vec<MoveStats<D::State>> {
        let mut moves: Vec<MoveStats<D::State>> = self
            .tree
            .children(self.tree.root())
            .map(MoveStats::from)
            .collect();

        moves.sort_by(|a, b| {
            b.simulations.cmp(&a.simulations).then_with(|| {
                b.win_rate
                    .partial_cmp(&a.win_rate)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        moves
    }

    /// The most simulated move from the root.
    /// Returns None if the root has no children.
    pub fn best_move(&self) -> Option<D::State> {
        self.ranked_moves().into_iter().next().map(|m| m.state)
    }

    /// Capture the state, statistics and child states of a node.
    pub fn snapshot(&self, node_id: NodeId) -> NodeSnapshot<D::State> {
        self.tree.snapshot(node_id)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<D::State> {
        &self.tree
    }

    /// Get the current root node.
    pub fn root(&self) -> &MctsNode<D::State> {
        self.tree.root_node()
    }

    pub fn actor(&self) -> &D::Actor {
        &self.actor
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn domain(&self) -> &D {
        &self.domain
    }
}

/// Convenience function to run a single MCTS search from `initial`.
pub fn run_mcts<D: Domain>(
    domain: D,
    initial: D::State,
    actor: D::Actor,
    config: MctsConfig,
    rng: ChaCha20Rng,
) -> Result<SearchResult<D::State>, SearchError> {
    let mut search = MctsSearch::new(domain, initial, actor, config, rng);
    search.run()
}
