//! orlab-core: relaxation primitives for small operations-research models
//!
//! This crate provides the two continuous/combinatorial primitives that the
//! meta-algorithms in `orlab-mip` are built on:
//!
//! - **Linear programming**: a dense two-phase primal simplex returning an
//!   optimal vertex with row, equality and bound marginals
//! - **Integer knapsack**: an exact branch-and-bound solver for 0/1 and
//!   unbounded single-row knapsacks
//!
//! # Example
//!
//! ```
//! use orlab_core::{LpProblem, Sense, SolverSettings, solve};
//!
//! // max 3x + 2y s.t. 2x + y <= 100, x + y <= 80, x <= 40
//! let prob = LpProblem::new(vec![3.0, 2.0], Sense::Maximize).with_inequalities(
//!     vec![vec![2.0, 1.0], vec![1.0, 1.0], vec![1.0, 0.0]],
//!     vec![100.0, 80.0, 40.0],
//! );
//!
//! let result = solve(&prob, &SolverSettings::default()).unwrap();
//! assert!((result.obj_val - 180.0).abs() < 1e-9);
//! ```
//!
//! # Sensitivity conventions
//!
//! Marginals are reported as the derivative of the optimal objective, in
//! the problem's own sense, with respect to the right-hand side or bound.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod knapsack;
pub mod problem;
pub mod simplex;
pub mod util;

// Re-export main types
pub use error::{CoreError, CoreResult};
pub use knapsack::{solve_knapsack, ItemBound, KnapsackProblem, KnapsackResult, KnapsackStatus};
pub use problem::{LpProblem, Sense, SolveResult, SolveStatus, SolverSettings};

/// Main LP entry point.
///
/// Solves a linear program with the dense simplex method. Infeasible and
/// unbounded problems are reported through [`SolveStatus`]; `Err` is
/// reserved for malformed input.
pub fn solve(problem: &LpProblem, settings: &SolverSettings) -> CoreResult<SolveResult> {
    simplex::solve_simplex(problem, settings)
}
