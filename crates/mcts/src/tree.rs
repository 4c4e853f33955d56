//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices avoids Rc/RefCell and reference cycles:
//! the arena owns every node, children are listed by index, and the parent
//! link is a non-owning index. Resetting the tree drops the previous
//! decision's subtree in one go.

use crate::node::{Node, NodeId};

/// Arena-allocated MCTS tree.
#[derive(Debug)]
pub struct Tree<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A> Tree<S, A> {
    /// Create an empty tree; call [`Tree::reset`] to install a root.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S, A> {
        &mut self.nodes[id.0]
    }

    /// Add `node` as the last child of `parent`, returning its ID.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Drop every node and install `root` at [`NodeId::ROOT`].
    pub fn reset(&mut self, mut root: Node<S, A>) {
        root.parent = None;
        self.nodes.clear();
        self.nodes.push(root);
    }

    /// Drop every node, root included.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True before the first decision and after [`Tree::clear`].
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    pub fn root(&self) -> &Node<S, A> {
        self.get(NodeId::ROOT)
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }

    /// Iterate over every node with its ID.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<S, A>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

impl<S, A> Default for Tree<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
