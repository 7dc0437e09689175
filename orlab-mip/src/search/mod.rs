//! Branch-and-bound search tree management.

mod branching;
mod heuristics;
mod node;
mod record;
mod stack;
mod tree;

pub use branching::{select_most_fractional, BranchDecision};
pub use heuristics::{reduced_cost_fixing, round_to_feasible};
pub use node::{BoundChange, NodeStatus, SearchNode};
pub use record::{NodeRecord, TreeRecord};
pub use stack::NodeStack;
pub use tree::BranchAndBound;
