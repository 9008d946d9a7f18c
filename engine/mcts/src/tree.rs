//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Children are owned downward through
//! their parent's `children` list; the `parent` index is a plain back-link,
//! so the tree cannot form ownership cycles.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{MctsConfig, TieBreak, Unvisited};
use crate::node::{MctsNode, NodeId, NodeSnapshot};

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct MctsTree<S> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S>>,

    /// Root node index (0 after construction and after every reroot)
    root: NodeId,
}

impl<S> MctsTree<S> {
    /// Create a new tree with a single root wrapping `root_state`.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    ///
    /// Panics if `id` does not belong to this tree; that only happens when
    /// the arena bookkeeping is broken.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Get the root node.
    #[inline]
    pub fn root_node(&self) -> &MctsNode<S> {
        self.get(self.root)
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<S>] {
        &self.nodes
    }

    /// Iterate over the children of a node.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &MctsNode<S>> + '_ {
        self.get(id).children.iter().map(move |child| self.get(*child))
    }

    /// Append a child holding `state` to `parent_id`.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, state: S) -> NodeId {
        let child_id = self.allocate(MctsNode::new_child(parent_id, state));

        // Add to parent's children
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Select the child of `node_id` to descend into, using UCT.
    ///
    /// Unvisited children have no defined score. With `Unvisited::Skip` they
    /// are ignored; with `Unvisited::Prefer` one of them is taken before any
    /// score is computed. Among visited children the highest score wins,
    /// with ties resolved by `config.tie_break`. When no child has been
    /// visited yet the choice is uniform over all children. Returns `None`
    /// only for a leaf.
    pub fn select_child<R: Rng>(
        &self,
        node_id: NodeId,
        config: &MctsConfig,
        rng: &mut R,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        if node.is_leaf() {
            return None;
        }

        if config.unvisited == Unvisited::Prefer {
            let unvisited: Vec<NodeId> = node
                .children
                .iter()
                .copied()
                .filter(|child| self.get(*child).simulations == 0)
                .collect();
            if let Some(child) = unvisited.choose(rng) {
                return Some(*child);
            }
        }

        // ln(1) = 0; clamping keeps a zero-visit parent from producing NaN.
        let parent_simulations_ln = (node.simulations.max(1) as f64).ln();
        let scored = node.children.iter().filter_map(|&child| {
            self.get(child)
                .uct_score(parent_simulations_ln, config.exploration_constant)
                .map(|score| (child, score))
        });

        let best = match config.tie_break {
            TieBreak::CoinFlip => {
                let mut best: Option<(NodeId, f64)> = None;
                for (child, score) in scored {
                    let replace = match best {
                        None => true,
                        Some((_, best_score)) if score > best_score => true,
                        Some((_, best_score)) if score == best_score => rng.gen_bool(0.5),
                        Some(_) => false,
                    };
                    if replace {
                        best = Some((child, score));
                    }
                }
                best.map(|(child, _)| child)
            }
            TieBreak::Uniform => {
                let mut best_score = f64::NEG_INFINITY;
                let mut ties = Vec::new();
                for (child, score) in scored {
                    if score > best_score {
                        best_score = score;
                        ties.clear();
                        ties.push(child);
                    } else if score == best_score {
                        ties.push(child);
                    }
                }
                ties.choose(rng).copied()
            }
        };

        best.or_else(|| node.children.choose(rng).copied())
    }

    /// Backpropagate an outcome from `leaf_id` up to and including the root.
    ///
    /// Every node on the path gets a visit, and a win as well when `won`.
    pub fn backpropagate(&mut self, leaf_id: NodeId, won: bool) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            assert!(
                current_id.index() < self.nodes.len(),
                "parent link {:?} points outside the arena",
                current_id
            );
            let node = self.get_mut(current_id);
            node.add_visit();
            if won {
                node.add_win();
            }
            current_id = node.parent;
        }
    }

    /// Depth of a node below the current root.
    pub fn depth(&self, node_id: NodeId) -> u32 {
        let mut depth = 0;
        let mut current = self.get(node_id).parent;
        while current.is_some() {
            depth += 1;
            current = self.get(current).parent;
        }
        depth
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.root_node();
        TreeStats {
            total_nodes: self.nodes.len(),
            root_simulations: root.simulations,
            root_wins: root.wins,
            root_win_rate: root.win_rate(),
            max_depth: self.compute_max_depth(self.root),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId) -> u32 {
        // Iterative so deep paths cannot overflow the stack.
        let mut max_depth = 0;
        let mut stack = vec![(node_id, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self.get(id).children.iter().map(|child| (*child, depth + 1)));
        }
        max_depth
    }
}

impl<S: PartialEq> MctsTree<S> {
    /// Find the first direct child of `parent_id` whose state equals `state`.
    pub fn find_child(&self, parent_id: NodeId, state: &S) -> Option<NodeId> {
        self.get(parent_id)
            .children
            .iter()
            .copied()
            .find(|child| self.get(*child).state == *state)
    }
}

impl<S> MctsTree<S> {
    /// Make `new_root` (a direct child of the current root) the root.
    ///
    /// The chosen subtree keeps all its statistics; every other node is
    /// released. The arena is compacted so released nodes do not linger,
    /// which means node IDs are renumbered: the new root becomes `NodeId(0)`.
    pub fn reroot(&mut self, new_root: NodeId) {
        assert_eq!(
            self.get(new_root).parent,
            self.root,
            "reroot target must be a direct child of the root"
        );

        let mut old_nodes: Vec<Option<MctsNode<S>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut nodes = Vec::new();

        // Breadth-first copy of the kept subtree. Parents are always placed
        // before their children, so the parent remap is known when a child
        // is moved.
        let mut queue = std::collections::VecDeque::from([(new_root, NodeId::NONE)]);
        while let Some((old_id, new_parent)) = queue.pop_front() {
            let mut node = old_nodes[old_id.index()]
                .take()
                .expect("node reachable twice while rerooting");
            let new_id = NodeId(nodes.len() as u32);
            node.parent = new_parent;
            for child in node.children.drain(..) {
                queue.push_back((child, new_id));
            }
            nodes.push(node);
        }

        // Rebuild child lists in the new numbering: children were enqueued
        // in order, so each parent's children occupy consecutive slots in
        // the order they were discovered.
        for id in 1..nodes.len() {
            let parent = nodes[id].parent;
            nodes[parent.index()].children.push(NodeId(id as u32));
        }

        self.nodes = nodes;
        self.root = NodeId(0);
    }
}

impl<S: Clone> MctsTree<S> {
    /// Capture a node's state, statistics and child states.
    pub fn snapshot(&self, node_id: NodeId) -> NodeSnapshot<S> {
        let node = self.get(node_id);
        NodeSnapshot {
            state: node.state.clone(),
            wins: node.wins,
            simulations: node.simulations,
            children: self.children(node_id).map(|child| child.state.clone()).collect(),
        }
    }
}

impl<S> MctsTree<S> {
    /// Rebuild a one-level tree from a snapshot: the root carries the
    /// captured statistics, and each captured child state becomes an
    /// unvisited child.
    pub fn from_snapshot(snapshot: NodeSnapshot<S>) -> Self {
        let NodeSnapshot {
            state,
            wins,
            simulations,
            children,
        } = snapshot;

        let mut tree = Self::new(state);
        let root = tree.root_mut();
        root.wins = wins;
        root.simulations = simulations;
        let root_id = tree.root();
        for child in children {
            tree.add_child(root_id, child);
        }
        tree
    }

    fn root_mut(&mut self) -> &mut MctsNode<S> {
        let root = self.root;
        self.get_mut(root)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_simulations: u32,
    pub root_wins: u32,
    pub root_win_rate: f64,
    pub max_depth: u32,
}
