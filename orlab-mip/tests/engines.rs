//! End-to-end tests for the three engines and the direct endpoints.

use orlab_mip::{
    solve_cutting_stock, solve_farmer, solve_generalized_assignment, solve_integer_program,
    solve_integer_program_with, solve_linear_program, AssignmentStatus, BnbSettings, ColGenStatus,
    IntegerProgram, IpStatus, MipError, Scenario, SimplexBackend, Termination,
};

#[test]
fn test_integer_program_small() {
    // max 5x + 8y s.t. x + y <= 6, 5x + 9y <= 45
    let sol = solve_integer_program(
        vec![5.0, 8.0],
        vec![vec![1.0, 1.0], vec![5.0, 9.0]],
        vec![6.0, 45.0],
        true,
        1000,
    )
    .expect("Solve failed");

    println!("Status: {}", sol.status);
    println!("x = {:?}", sol.x);
    println!("nodes = {}", sol.nodes_explored);

    assert!(sol.success);
    assert_eq!(sol.status, IpStatus::Optimal);
    assert_eq!(sol.x, Some(vec![0.0, 5.0]));
    assert!((sol.objective.unwrap() - 40.0).abs() < 1e-9);
    assert!((sol.root_bound.unwrap() - 41.25).abs() < 1e-9);
    assert!(!sol.tree.is_empty());
}

#[test]
fn test_integer_program_minimize() {
    // min x + y s.t. x + 2y >= 3, 2x + y >= 3 (written as <= rows)
    let sol = solve_integer_program(
        vec![1.0, 1.0],
        vec![vec![-1.0, -2.0], vec![-2.0, -1.0]],
        vec![-3.0, -3.0],
        false,
        1000,
    )
    .unwrap();

    // LP optimum is (1, 1) already
    assert_eq!(sol.status, IpStatus::Optimal);
    assert!((sol.objective.unwrap() - 2.0).abs() < 1e-9);
    assert_eq!(sol.nodes_explored, 1);
}

#[test]
fn test_node_budget_reports_limit() {
    // max sum x s.t. sum 2x <= 15, x <= 1: every relaxation has value 7.5
    let n = 15;
    let mut a_ub = vec![vec![2.0; n]];
    let mut b_ub = vec![15.0];
    for i in 0..n {
        let mut row = vec![0.0; n];
        row[i] = 1.0;
        a_ub.push(row);
        b_ub.push(1.0);
    }
    let prob = IntegerProgram::new(vec![1.0; n], a_ub, b_ub, true).unwrap();
    let settings = BnbSettings::default().with_max_nodes(10);
    let sol = solve_integer_program_with(&prob, settings, &mut SimplexBackend::default()).unwrap();

    assert_eq!(sol.status, IpStatus::LimitReached);
    assert_eq!(sol.nodes_explored, 10);
    if let Some(x) = &sol.x {
        assert!(prob.satisfies_constraints(x, 1e-9));
        assert!(sol.objective.unwrap() <= 7.0 + 1e-9);
    }
}

#[test]
fn test_integer_program_rejects_bad_shape() {
    let err = solve_integer_program(vec![1.0, 1.0], vec![vec![1.0]], vec![1.0], true, 10);
    assert!(matches!(err, Err(MipError::InvalidProblem(_))));
}

#[test]
fn test_cutting_stock_seed_is_optimal() {
    let sol = solve_cutting_stock(10.0, vec![(3.0, 5.0), (5.0, 2.0)]).unwrap();

    assert_eq!(sol.status, ColGenStatus::Optimal);
    assert_eq!(sol.termination, Termination::Converged);
    assert!(!sol.patterns.is_empty());
    for p in &sol.patterns {
        let used = p[0] as f64 * 3.0 + p[1] as f64 * 5.0;
        assert!(used <= 10.0);
    }
    assert_eq!(sol.weights.len(), sol.patterns.len());
}

#[test]
fn test_cutting_stock_generates_columns() {
    let sol = solve_cutting_stock(100.0, vec![(45.0, 97.0), (36.0, 610.0), (31.0, 395.0), (14.0, 211.0)]).unwrap();

    assert_eq!(sol.status, ColGenStatus::Optimal);
    assert!(sol.iterations > 0);
    assert!(sol.iterations <= 50);
    assert_eq!(sol.weights.len(), sol.patterns.len());
    for p in &sol.patterns {
        let used = p[0] as f64 * 45.0 + p[1] as f64 * 36.0 + p[2] as f64 * 31.0 + p[3] as f64 * 14.0;
        assert!(used <= 100.0);
    }
    // fractional lower bound on rolls for this instance
    let total_width = 45.0 * 97.0 + 36.0 * 610.0 + 31.0 * 395.0 + 14.0 * 211.0;
    assert!(sol.objective.unwrap() >= total_width / 100.0 - 1e-6);
}

#[test]
fn test_generalized_assignment() {
    let sol = solve_generalized_assignment(
        vec![vec![10.0, 20.0], vec![15.0, 10.0]],
        vec![vec![2.0, 5.0], vec![3.0, 2.0]],
        vec![5.0, 5.0],
    )
    .unwrap();

    assert_eq!(sol.status, AssignmentStatus::Completed);
    assert!(!sol.lower_bound_history.is_empty());
    assert!(sol.lower_bound_history.len() <= 20);
    let ub = sol.upper_bound.unwrap();
    for lb in &sol.lower_bound_history {
        assert!(*lb <= ub + 1e-9);
    }
}

#[test]
fn test_linear_program() {
    let sol = solve_linear_program(
        vec![3.0, 2.0],
        vec![vec![2.0, 1.0], vec![1.0, 1.0], vec![1.0, 0.0]],
        vec![100.0, 80.0, 40.0],
        None,
        true,
    )
    .unwrap();

    assert!(sol.success);
    assert!((sol.objective.unwrap() - 180.0).abs() < 1e-9);
}

#[test]
fn test_farmer_average_yield() {
    let sol = solve_farmer(
        500.0,
        vec![Scenario {
            name: "average".to_string(),
            probability: 1.0,
            yields: [2.5, 3.0, 20.0],
        }],
    )
    .unwrap();

    // deterministic plan: 120 wheat, 80 corn, 300 beets
    assert!(sol.success);
    let x = sol.x.unwrap();
    assert!((x[0] - 120.0).abs() < 1e-6);
    assert!((x[1] - 80.0).abs() < 1e-6);
    assert!((x[2] - 300.0).abs() < 1e-6);
    assert!(x.iter().sum::<f64>() <= 500.0 + 1e-6);
    assert!((sol.expected_profit.unwrap() - 118_600.0).abs() < 1e-4);
}

#[test]
fn test_results_serialize_status_strings() {
    let ip = solve_integer_program(vec![1.0], vec![vec![1.0]], vec![2.5], true, 0).unwrap();
    let json = serde_json::to_value(&ip).unwrap();
    assert_eq!(json["status"], "Limit Reached");

    let gap = solve_generalized_assignment(vec![vec![1.0]], vec![vec![1.0]], vec![1.0]).unwrap();
    let json = serde_json::to_value(&gap).unwrap();
    assert_eq!(json["status"], "Completed");
}
