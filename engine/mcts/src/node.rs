//! MCTS tree node representation.
//!
//! Each node holds a snapshot of a domain state together with the win and
//! simulation counts backpropagated through it. Nodes live in the arena owned
//! by [`MctsTree`](crate::tree::MctsTree) and refer to each other by index.

use serde::{Deserialize, Serialize};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S> {
    /// Parent node index (NONE for root). Never owns the parent.
    pub parent: NodeId,

    /// Domain state represented by this node
    pub state: S,

    /// Number of winning outcomes backpropagated through this node
    pub wins: u32,

    /// Number of simulations backpropagated through this node
    pub simulations: u32,

    /// Successor nodes. Empty until the node is expanded, and stays empty
    /// for terminal states.
    pub children: Vec<NodeId>,
}

impl<S> MctsNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Self {
        Self::new_child(NodeId::NONE, state)
    }

    /// Create a new child node of `parent`.
    pub fn new_child(parent: NodeId, state: S) -> Self {
        Self {
            parent,
            state,
            wins: 0,
            simulations: 0,
            children: Vec::new(),
        }
    }

    /// Fraction of simulations that ended in a win.
    /// Returns 0.0 if never simulated.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.wins as f64 / self.simulations as f64
        }
    }

    /// UCT score of this node as seen from a parent with `parent_simulations`.
    ///
    /// UCT(s) = W(s)/N(s) + c * sqrt(ln(N_parent) / N(s))
    ///
    /// Undefined for unvisited nodes; returns `None` so callers skip them.
    #[inline]
    pub fn uct_score(&self, parent_simulations_ln: f64, exploration_constant: f64) -> Option<f64> {
        if self.simulations == 0 {
            return None;
        }
        let exploration = (parent_simulations_ln / self.simulations as f64).sqrt();
        Some(self.win_rate() + exploration_constant * exploration)
    }

    #[inline]
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    #[inline]
    pub fn add_visit(&mut self) {
        self.simulations += 1;
    }

    /// Check if this is a leaf node (no children).
    ///
    /// Unexpanded and terminal nodes both report `true`.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Check if this node is the root of its tree.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Serializable view of a single node: its state, its statistics and the
/// states of its direct children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot<S> {
    pub state: S,
    pub wins: u32,
    pub simulations: u32,
    pub children: Vec<S>,
}

impl<S> NodeSnapshot<S> {
    pub fn win_rate(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.wins as f64 / self.simulations as f64
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
