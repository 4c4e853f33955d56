//! MCTS node types for tree storage.
//!
//! Nodes live in an arena and refer to each other by index: the tree owns
//! every node, children are listed top-down, and the parent link is a plain
//! index used for backpropagation.

use enclosure_core::BucketCounts;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Score given to an unvisited child during selection.
pub const UNVISITED_SCORE: f32 = 1.0;

/// Statistics for a single MCTS node.
#[derive(Clone, Debug)]
pub struct NodeStats {
    /// Number of simulations that passed through this node.
    pub visits: u32,

    /// Cumulative score, from the perspective of the player whose move
    /// produced this node.
    pub wins: f32,

    /// Static bias: negated wall count around the mover's new cell.
    pub heuristic: f32,
}

impl NodeStats {
    pub fn new(heuristic: f32) -> Self {
        Self {
            visits: 0,
            wins: 0.0,
            heuristic,
        }
    }

    /// Mean score, 0.0 if never visited.
    pub fn mean_value(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f32
        }
    }

    /// Selection score of this node as a child of a node with
    /// `parent_visits` visits:
    ///
    /// `wins/n + c·sqrt(ln(N)/n) + h·heuristic/n`
    ///
    /// Unvisited nodes score [`UNVISITED_SCORE`].
    pub fn selection_score(
        &self,
        parent_visits: u32,
        exploration: f32,
        heuristic_weight: f32,
    ) -> f32 {
        if self.visits == 0 {
            return UNVISITED_SCORE;
        }
        debug_assert!(
            parent_visits >= self.visits,
            "parent has {parent_visits} visits but child has {}",
            self.visits
        );
        let n = self.visits as f32;
        let explore = ((parent_visits as f32).ln() / n).sqrt();
        self.wins / n + exploration * explore + heuristic_weight * self.heuristic / n
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct Node<S, A> {
    /// Action that led to this node (None for root).
    pub action: Option<A>,

    /// Parent handle (None for root).
    pub parent: Option<NodeId>,

    /// Child handles, in enumeration order.
    pub children: Vec<NodeId>,

    /// Game state reached at this node, owned.
    pub state: S,

    /// True when the engine's side acts from this state.
    pub turn: bool,

    /// Node statistics (visits, wins, heuristic).
    pub stats: NodeStats,

    /// Bucket counts of the children, cached at expansion.
    /// None before expansion and for forced single-move sets.
    pub buckets: Option<BucketCounts>,

    /// Whether children have been generated.
    pub expanded: bool,
}

impl<S, A> Node<S, A> {
    /// Create an unexpanded node reached by `action`.
    pub fn new(action: Option<A>, state: S, turn: bool, heuristic: f32) -> Self {
        Self {
            action,
            parent: None,
            children: Vec::new(),
            state,
            turn,
            stats: NodeStats::new(heuristic),
            buckets: None,
            expanded: false,
        }
    }

    /// Create a root node for the engine's own turn.
    pub fn root(state: S, heuristic: f32) -> Self {
        Self::new(None, state, true, heuristic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_stats_mean_value() {
        let mut stats = NodeStats::new(-1.0);
        assert_eq!(stats.mean_value(), 0.0);

        stats.visits = 4;
        stats.wins = 2.0;
        assert!((stats.mean_value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unvisited_selection_score() {
        let stats = NodeStats::new(-3.0);
        assert_eq!(stats.selection_score(0, 2.0, 0.05), UNVISITED_SCORE);
        assert_eq!(stats.selection_score(10, 2.0, 0.05), UNVISITED_SCORE);
    }

    #[test]
    fn test_selection_score_formula() {
        let stats = NodeStats {
            visits: 2,
            wins: 1.0,
            heuristic: -2.0,
        };
        let expected = 0.5 + 2.0 * ((8f32).ln() / 2.0).sqrt() + 0.05 * -2.0 / 2.0;
        assert!((stats.selection_score(8, 2.0, 0.05) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_heuristic_penalises_walled_cells() {
        let open = NodeStats {
            visits: 3,
            wins: 0.0,
            heuristic: 0.0,
        };
        let walled = NodeStats {
            heuristic: -3.0,
            ..open.clone()
        };
        assert!(open.selection_score(10, 2.0, 0.05) > walled.selection_score(10, 2.0, 0.05));
    }

    #[test]
    fn test_root_node() {
        let root: Node<(), u8> = Node::root((), -1.0);
        assert_eq!(root.action, None);
        assert_eq!(root.parent, None);
        assert!(root.turn);
        assert!(!root.expanded);
        assert_eq!(root.stats.heuristic, -1.0);
    }
}
