//! Root heuristics: rounding and reduced-cost fixing.

use orlab_core::SolveResult;

use crate::model::IntegerProgram;

/// Round a relaxed point to the nearest integers.
///
/// Returns the rounded point if it satisfies every constraint within `tol`.
pub fn round_to_feasible(prob: &IntegerProgram, x: &[f64], tol: f64) -> Option<Vec<f64>> {
    let rounded: Vec<f64> = x.iter().map(|v| v.round()).collect();
    prob.satisfies_constraints(&rounded, tol).then_some(rounded)
}

/// Fix variables that cannot move off their lower bound profitably.
///
/// For each variable within `tol` of its lower bound in the root
/// relaxation, the lower bound marginal `d_j` estimates the objective
/// worsening from raising it by one unit. If `root + d_j` is worse than `incumbent` by more than
/// `tol` (both in canonical minimization form), the upper bound is set to
/// the lower bound. Returns the fixed indices.
pub fn reduced_cost_fixing(
    prob: &IntegerProgram,
    root: &SolveResult,
    incumbent: f64,
    bounds: &mut [(f64, f64)],
    tol: f64,
) -> Vec<usize> {
    let root_value = prob.canonical(root.obj_val);
    let sign = prob.sense().sign();
    let mut fixed = Vec::new();

    for (j, bound) in bounds.iter_mut().enumerate() {
        let (lb, ub) = *bound;
        if !lb.is_finite() || ub <= lb || (root.x[j] - lb).abs() > tol {
            continue;
        }
        let d = sign * root.lower_marginals[j];
        if root_value + d > incumbent + tol {
            *bound = (lb, lb);
            fixed.push(j);
        }
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::{solve_checked, SimplexBackend};
    use orlab_core::SolveStatus;

    #[test]
    fn test_rounding() {
        let ip = IntegerProgram::new(
            vec![5.0, 8.0],
            vec![vec![1.0, 1.0], vec![5.0, 9.0]],
            vec![6.0, 45.0],
            true,
        )
        .unwrap();
        // (2, 4) violates 5x + 9y <= 45
        assert!(round_to_feasible(&ip, &[2.25, 3.75], 1e-6).is_none());
        assert_eq!(round_to_feasible(&ip, &[0.4, 4.6], 1e-6), Some(vec![0.0, 5.0]));
    }

    #[test]
    fn test_fixing_expensive_variable() {
        // max 10 x0 + x1 + x2 s.t. x0 + x1 + x2 <= 1.5, 4 x1 + x0 <= 4
        // root: x0 = 1.5, x1 = x2 = 0, value 15
        // raising x1 by one costs 9 units of objective
        let ip = IntegerProgram::new(
            vec![10.0, 1.0, 1.0],
            vec![vec![1.0, 1.0, 1.0], vec![1.0, 4.0, 0.0]],
            vec![1.5, 4.0],
            true,
        )
        .unwrap();
        let mut backend = SimplexBackend::default();
        let root = solve_checked(&mut backend, &ip.relaxation(&ip.default_bounds())).unwrap();
        assert!((root.obj_val - 15.0).abs() < 1e-9);

        // incumbent x0 = 1 has value 10, canonical -10
        let mut bounds = ip.default_bounds();
        let fixed = reduced_cost_fixing(&ip, &root, -10.0, &mut bounds, 1e-6);
        assert_eq!(fixed, vec![1, 2]);
        assert_eq!(bounds[1], (0.0, 0.0));
        assert_eq!(bounds[0], (0.0, f64::INFINITY));

        // a weak incumbent fixes nothing
        let mut bounds = ip.default_bounds();
        assert!(reduced_cost_fixing(&ip, &root, -1.0, &mut bounds, 1e-6).is_empty());
    }

    #[test]
    fn test_fixing_needs_value_at_bound() {
        // min x0 s.t. x0 <= 10, root slightly above the lower bound
        let ip = IntegerProgram::new(vec![1.0], vec![vec![1.0]], vec![10.0], false).unwrap();
        let root_at = |x0: f64| SolveResult {
            status: SolveStatus::Optimal,
            x: vec![x0],
            obj_val: 0.0,
            ineq_marginals: vec![0.0],
            eq_marginals: vec![],
            lower_marginals: vec![3.0],
            upper_marginals: vec![0.0],
            iterations: 1,
        };

        // 5e-6 off the bound is inside the integrality tolerance but not the bound tolerance
        let mut bounds = ip.default_bounds();
        assert!(reduced_cost_fixing(&ip, &root_at(5e-6), 1.0, &mut bounds, 1e-6).is_empty());
        assert_eq!(bounds[0], (0.0, f64::INFINITY));

        let mut bounds = ip.default_bounds();
        assert_eq!(reduced_cost_fixing(&ip, &root_at(5e-7), 1.0, &mut bounds, 1e-6), vec![0]);
        assert_eq!(bounds[0], (0.0, 0.0));
    }
}
