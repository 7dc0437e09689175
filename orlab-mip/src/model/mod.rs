//! Problem and solution types for the integer program engine.

mod problem;
mod solution;

pub use problem::IntegerProgram;
pub use solution::{IncumbentTracker, IpSolution, IpStatus};
