//! Search node representation.

use std::fmt;

use orlab_core::SolveResult;
use serde::{Deserialize, Serialize};

/// Status of a search node.
///
/// Every status other than `Open` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Node is waiting on the stack.
    Open,

    /// Node was branched (children created).
    Branched,

    /// Node relaxation produced an integer point.
    Integer,

    /// Node relaxation is infeasible.
    Infeasible,

    /// Node was discarded by bound.
    Pruned,
}

impl NodeStatus {
    /// True once the status can no longer change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NodeStatus::Open)
    }
}

/// A bound change from branching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundChange {
    /// Variable index.
    pub var: usize,

    /// Previous lower bound.
    pub old_lb: f64,

    /// Previous upper bound.
    pub old_ub: f64,

    /// New lower bound.
    pub new_lb: f64,

    /// New upper bound.
    pub new_ub: f64,
}

impl BoundChange {
    /// Create a "down" branch: x <= floor(value).
    pub fn down_branch(var: usize, old_lb: f64, old_ub: f64, value: f64) -> Self {
        Self {
            var,
            old_lb,
            old_ub,
            new_lb: old_lb,
            new_ub: old_ub.min(value.floor()),
        }
    }

    /// Create an "up" branch: x >= ceil(value).
    pub fn up_branch(var: usize, old_lb: f64, old_ub: f64, value: f64) -> Self {
        Self {
            var,
            old_lb,
            old_ub,
            new_lb: old_lb.max(value.ceil()),
            new_ub: old_ub,
        }
    }

    /// True for a down branch.
    pub fn is_down(&self) -> bool {
        self.new_ub < self.old_ub
    }

    /// Apply to a bounds vector.
    pub fn apply(&self, bounds: &mut [(f64, f64)]) {
        bounds[self.var] = (self.new_lb, self.new_ub);
    }
}

impl fmt::Display for BoundChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_down() {
            write!(f, "x{} <= {}", self.var, self.new_ub)
        } else {
            write!(f, "x{} >= {}", self.var, self.new_lb)
        }
    }
}

/// A node in the B&B search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Unique node identifier.
    pub id: u64,

    /// Parent node ID (None for root).
    pub parent_id: Option<u64>,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// Bound change from parent to this node.
    pub decision: Option<BoundChange>,

    /// Variable bounds at this node.
    pub bounds: Vec<(f64, f64)>,

    /// Parent's relaxed objective, canonical minimization form.
    pub parent_value: Option<f64>,

    /// Relaxation already solved for this node (root only).
    pub cached: Option<SolveResult>,

    /// Relaxed objective once solved, in the problem's own sense.
    pub value: Option<f64>,

    /// Node processing status.
    pub status: NodeStatus,

    /// Index into the visualization record, if stored.
    pub record: Option<usize>,
}

impl SearchNode {
    /// Create the root node.
    pub fn root(bounds: Vec<(f64, f64)>) -> Self {
        Self {
            id: 0,
            parent_id: None,
            depth: 0,
            decision: None,
            bounds,
            parent_value: None,
            cached: None,
            value: None,
            status: NodeStatus::Open,
            record: None,
        }
    }

    /// Create a child node from a bound change.
    pub fn child(&self, id: u64, change: BoundChange, parent_value: f64) -> Self {
        let mut bounds = self.bounds.clone();
        change.apply(&mut bounds);
        Self {
            id,
            parent_id: Some(self.id),
            depth: self.depth + 1,
            decision: Some(change),
            bounds,
            parent_value: Some(parent_value),
            cached: None,
            value: None,
            status: NodeStatus::Open,
            record: None,
        }
    }

    /// Human-readable branching decision.
    pub fn label(&self) -> String {
        match &self.decision {
            Some(change) => change.to_string(),
            None => "Root".to_string(),
        }
    }
}
