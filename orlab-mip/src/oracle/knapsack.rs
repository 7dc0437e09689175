//! Integer knapsack oracle.
//!
//! The oracle answers the pricing problem of column generation and the
//! per-agent subproblems of Lagrangian relaxation.

use orlab_core::{solve_knapsack, KnapsackProblem, KnapsackResult, KnapsackStatus};

use crate::error::{MipError, MipResult};

/// Trait for knapsack subproblem solvers.
pub trait KnapsackOracle {
    /// Solve a single-row knapsack.
    fn solve(&mut self, prob: &KnapsackProblem) -> MipResult<KnapsackResult>;
}

/// Exact branch-and-bound knapsack oracle from orlab-core.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactKnapsack;

impl KnapsackOracle for ExactKnapsack {
    fn solve(&mut self, prob: &KnapsackProblem) -> MipResult<KnapsackResult> {
        let res = solve_knapsack(prob)?;
        log::trace!("knapsack: status={:?} value={:.6} nodes={}", res.status, res.value, res.nodes);
        Ok(res)
    }
}

/// Solve through `oracle` and reject malformed optimal responses.
///
/// An optimal answer must have one count per item, fit the capacity and
/// report the value of its own selection.
pub fn solve_knapsack_checked(
    oracle: &mut dyn KnapsackOracle,
    prob: &KnapsackProblem,
) -> MipResult<KnapsackResult> {
    let res = oracle.solve(prob)?;
    if res.status != KnapsackStatus::Optimal {
        return Ok(res);
    }

    if res.counts.len() != prob.profits.len() {
        return Err(MipError::MalformedRelaxation(format!(
            "knapsack reported {} counts for {} items",
            res.counts.len(),
            prob.profits.len()
        )));
    }
    let used: f64 = res
        .counts
        .iter()
        .zip(&prob.weights)
        .map(|(&k, w)| k as f64 * w)
        .sum();
    let value: f64 = res
        .counts
        .iter()
        .zip(&prob.profits)
        .map(|(&k, p)| k as f64 * p)
        .sum();
    let scale = 1.0 + prob.capacity.abs();
    if used > prob.capacity + 1e-9 * scale {
        return Err(MipError::MalformedRelaxation(format!(
            "knapsack selection uses {} of capacity {}",
            used, prob.capacity
        )));
    }
    if !res.value.is_finite() || (value - res.value).abs() > 1e-6 * (1.0 + value.abs()) {
        return Err(MipError::MalformedRelaxation(format!(
            "knapsack value {} disagrees with its selection ({})",
            res.value, value
        )));
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orlab_core::ItemBound;

    struct Overfull;

    impl KnapsackOracle for Overfull {
        fn solve(&mut self, prob: &KnapsackProblem) -> MipResult<KnapsackResult> {
            Ok(KnapsackResult {
                status: KnapsackStatus::Optimal,
                counts: vec![100; prob.profits.len()],
                value: 100.0 * prob.profits.iter().sum::<f64>(),
                nodes: 1,
            })
        }
    }

    fn instance() -> KnapsackProblem {
        KnapsackProblem {
            profits: vec![3.0, 4.0],
            weights: vec![2.0, 3.0],
            capacity: 5.0,
            bound: ItemBound::Binary,
        }
    }

    #[test]
    fn test_exact_oracle() {
        let res = solve_knapsack_checked(&mut ExactKnapsack, &instance()).unwrap();
        assert_eq!(res.counts, vec![1, 1]);
        assert!((res.value - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_overfull_selection_rejected() {
        let err = solve_knapsack_checked(&mut Overfull, &instance()).unwrap_err();
        assert!(matches!(err, MipError::MalformedRelaxation(_)));
    }
}
