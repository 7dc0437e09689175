//! Integer program solution types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::NodeRecord;

/// Status of a branch-and-bound solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpStatus {
    /// Search finished; the incumbent is optimal.
    Optimal,

    /// Node budget exhausted with nodes still pending.
    #[serde(rename = "Limit Reached")]
    LimitReached,

    /// No integer point exists.
    Infeasible,
}

impl fmt::Display for IpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpStatus::Optimal => write!(f, "Optimal"),
            IpStatus::LimitReached => write!(f, "Limit Reached"),
            IpStatus::Infeasible => write!(f, "Infeasible"),
        }
    }
}

/// Branch-and-bound result with diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpSolution {
    /// True if an integer-feasible point was found.
    pub success: bool,

    /// Solve status.
    pub status: IpStatus,

    /// Best integer point found.
    pub x: Option<Vec<f64>>,

    /// Objective of `x` in the problem's own sense.
    pub objective: Option<f64>,

    /// Root relaxation objective (a bound on any integer objective).
    pub root_bound: Option<f64>,

    /// Nodes popped from the stack.
    pub nodes_explored: u64,

    /// Nodes discarded by bound, before or after their solve.
    pub nodes_pruned: u64,

    /// Variables fixed at the root by reduced-cost reasoning.
    pub fixed_vars: Vec<usize>,

    /// Capped record of the search tree for visualization.
    pub tree: Vec<NodeRecord>,
}

/// Tracks the best known integer point (incumbent).
///
/// Values are in canonical minimization form.
#[derive(Debug, Clone)]
pub struct IncumbentTracker {
    /// Current best solution (if any).
    pub solution: Option<Vec<f64>>,

    /// Canonical objective of the incumbent, `+inf` when none.
    pub obj_val: f64,
}

impl Default for IncumbentTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IncumbentTracker {
    /// Create a new incumbent tracker.
    pub fn new() -> Self {
        Self {
            solution: None,
            obj_val: f64::INFINITY,
        }
    }

    /// Check if we have an incumbent.
    pub fn has_incumbent(&self) -> bool {
        self.solution.is_some()
    }

    /// Try to update the incumbent; accepted only on strict improvement.
    ///
    /// Returns true if the incumbent was improved.
    pub fn update(&mut self, x: &[f64], obj: f64) -> bool {
        if obj < self.obj_val {
            self.solution = Some(x.to_vec());
            self.obj_val = obj;
            true
        } else {
            false
        }
    }

    /// True if a canonical value is worse than the incumbent by more than `tol`.
    pub fn dominates(&self, value: f64, tol: f64) -> bool {
        value > self.obj_val + tol
    }
}
