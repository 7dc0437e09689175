//! Runs each engine on a small instance and reports timings.
//!
//! Run with: cargo run --release -p orlab-mip --example simple_bench

use std::time::Instant;

use orlab_mip::{solve_cutting_stock, solve_generalized_assignment, solve_integer_program};

fn main() {
    println!("=== orlab engine check ===\n");

    integer_program();
    cutting_stock();
    generalized_assignment();
}

/// max 5x + 8y s.t. x + y <= 6, 5x + 9y <= 45, x, y integer
fn integer_program() {
    println!("--- Branch-and-bound ---");
    let start = Instant::now();
    let result = solve_integer_program(
        vec![5.0, 8.0],
        vec![vec![1.0, 1.0], vec![5.0, 9.0]],
        vec![6.0, 45.0],
        true,
        1000,
    );
    let elapsed = start.elapsed();

    match result {
        Ok(sol) => {
            println!("Status: {}", sol.status);
            println!("x = {:?}, objective = {:?}", sol.x, sol.objective);
            println!("Nodes: {} ({} pruned)", sol.nodes_explored, sol.nodes_pruned);
        }
        Err(e) => println!("Error: {}", e),
    }
    println!("Time: {:.3}ms\n", elapsed.as_secs_f64() * 1000.0);
}

/// Rolls of width 100 cut into four item widths.
fn cutting_stock() {
    println!("--- Column generation ---");
    let start = Instant::now();
    let result = solve_cutting_stock(100.0, vec![(45.0, 97.0), (36.0, 610.0), (31.0, 395.0), (14.0, 211.0)]);
    let elapsed = start.elapsed();

    match result {
        Ok(sol) => {
            println!("Status: {} ({:?})", sol.status, sol.termination);
            println!("Rolls (LP bound): {:?}", sol.objective);
            for (p, w) in sol.patterns.iter().zip(&sol.weights) {
                if *w > 1e-9 {
                    println!("  {:?} x {:.3}", p, w);
                }
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    println!("Time: {:.3}ms\n", elapsed.as_secs_f64() * 1000.0);
}

/// Two tasks, two agents.
fn generalized_assignment() {
    println!("--- Lagrangian relaxation ---");
    let start = Instant::now();
    let result = solve_generalized_assignment(
        vec![vec![10.0, 20.0], vec![15.0, 10.0]],
        vec![vec![2.0, 5.0], vec![3.0, 2.0]],
        vec![5.0, 5.0],
    );
    let elapsed = start.elapsed();

    match result {
        Ok(sol) => {
            for line in &sol.log {
                println!("{}", line);
            }
            println!("Upper bound: {:?}", sol.upper_bound);
        }
        Err(e) => println!("Error: {}", e),
    }
    println!("Time: {:.3}ms\n", elapsed.as_secs_f64() * 1000.0);
}
