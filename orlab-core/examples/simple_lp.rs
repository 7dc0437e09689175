//! Simple LP example with shadow prices.
//!
//! Solves:
//!   maximize    3x + 2y
//!   subject to  2x + y <= 100
//!               x + y  <= 80
//!               x      <= 40
//!               x, y >= 0
//!
//! Optimal solution: x = 20, y = 60, objective = 180.

use orlab_core::{solve, LpProblem, Sense, SolveStatus, SolverSettings};

fn main() {
    println!("orlab - Simple LP Example");
    println!("=========================");
    println!();

    let prob = LpProblem::new(vec![3.0, 2.0], Sense::Maximize).with_inequalities(
        vec![vec![2.0, 1.0], vec![1.0, 1.0], vec![1.0, 0.0]],
        vec![100.0, 80.0, 40.0],
    );

    match solve(&prob, &SolverSettings::default()) {
        Ok(result) => {
            println!("Status: {}", result.status);
            println!("Pivots: {}", result.iterations);
            if result.status == SolveStatus::Optimal {
                println!("x = {:?}", result.x);
                println!("Objective: {:.6}", result.obj_val);
                println!("Shadow prices: {:?}", result.ineq_marginals);
            }
        }
        Err(e) => {
            eprintln!("Solve failed: {}", e);
        }
    }
}
