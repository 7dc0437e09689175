//! Integer subproblem oracles.

mod knapsack;

pub use knapsack::{solve_knapsack_checked, ExactKnapsack, KnapsackOracle};
