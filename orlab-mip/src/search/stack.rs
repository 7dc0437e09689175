//! Depth-first node stack for B&B tree exploration.

use super::SearchNode;

/// LIFO stack of open nodes.
///
/// The last node pushed is processed first.
#[derive(Debug, Default)]
pub struct NodeStack {
    nodes: Vec<SearchNode>,
}

impl NodeStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the stack.
    pub fn push(&mut self, node: SearchNode) {
        self.nodes.push(node);
    }

    /// Get the next node to process.
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.nodes.pop()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of open nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
