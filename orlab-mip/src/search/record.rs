//! Capped arena of node records for tree visualization.
//!
//! Storage is independent of the search: nodes beyond the cap are still
//! processed, they are just not recorded.

use serde::{Deserialize, Serialize};

use super::{NodeStatus, SearchNode};

/// Snapshot of one search node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identifier.
    pub id: u64,

    /// Parent identifier (lookup key into the same arena).
    pub parent_id: Option<u64>,

    /// Depth in the tree.
    pub depth: usize,

    /// Branching decision, e.g. `x1 <= 3`.
    pub decision: String,

    /// Relaxed objective in the problem's own sense, once solved.
    pub value: Option<f64>,

    /// Final node status.
    pub status: NodeStatus,
}

/// Arena of node records indexed by insertion position.
#[derive(Debug, Clone)]
pub struct TreeRecord {
    records: Vec<NodeRecord>,
    cap: usize,
}

impl TreeRecord {
    /// Create an empty record holding at most `cap` nodes.
    pub fn new(cap: usize) -> Self {
        Self {
            records: Vec::new(),
            cap,
        }
    }

    /// Store a node if there is room, returning its arena index.
    pub fn insert(&mut self, node: &SearchNode) -> Option<usize> {
        if self.records.len() >= self.cap {
            return None;
        }
        self.records.push(NodeRecord {
            id: node.id,
            parent_id: node.parent_id,
            depth: node.depth,
            decision: node.label(),
            value: node.value,
            status: node.status,
        });
        Some(self.records.len() - 1)
    }

    /// Copy a node's final state into its record.
    pub fn update(&mut self, node: &SearchNode) {
        if let Some(rec) = node.record.and_then(|i| self.records.get_mut(i)) {
            rec.value = node.value;
            rec.status = node.status;
        }
    }

    /// Consume into the stored records.
    pub fn into_records(self) -> Vec<NodeRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::BoundChange;

    #[test]
    fn test_cap_and_update() {
        let mut tree = TreeRecord::new(2);
        let mut root = SearchNode::root(vec![(0.0, f64::INFINITY)]);
        root.record = tree.insert(&root);
        assert_eq!(root.record, Some(0));

        let child = root.child(1, BoundChange::down_branch(0, 0.0, f64::INFINITY, 1.5), 0.0);
        assert_eq!(tree.insert(&child), Some(1));
        assert_eq!(tree.insert(&child), None);

        root.value = Some(3.5);
        root.status = NodeStatus::Branched;
        tree.update(&root);

        let records = tree.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, NodeStatus::Branched);
        assert_eq!(records[0].value, Some(3.5));
        assert_eq!(records[1].parent_id, Some(0));
    }
}
