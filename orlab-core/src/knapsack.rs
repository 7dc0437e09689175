//! Exact integer knapsack solver.
//!
//! ```text
//! maximize    sum_i p_i a_i
//! subject to  sum_i w_i a_i <= capacity
//!             0 <= a_i <= u_i, a_i integer
//! ```
//!
//! `u_i = 1` for 0/1 knapsacks and `floor(capacity / w_i)` otherwise.
//! Solved by depth-first branch-and-bound over items sorted by
//! profit density, bounded by the fractional (Dantzig) relaxation.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

const CAPACITY_EPS: f64 = 1e-9;
const VALUE_EPS: f64 = 1e-12;

/// Per-item multiplicity limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemBound {
    /// Each item taken at most once.
    Binary,
    /// Each item taken any non-negative number of times.
    Unbounded,
}

/// Knapsack instance.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackProblem {
    /// Profit per unit of each item.
    pub profits: Vec<f64>,
    /// Weight per unit of each item (non-negative).
    pub weights: Vec<f64>,
    /// Capacity of the single constraint row.
    pub capacity: f64,
    /// Multiplicity limit.
    pub bound: ItemBound,
}

/// Status of a knapsack solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnapsackStatus {
    /// Optimal selection found.
    Optimal,
    /// Negative capacity: not even the empty selection fits.
    Infeasible,
    /// A zero-weight item with positive profit can be taken without limit.
    Unbounded,
}

/// Knapsack solution.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackResult {
    /// Solve status.
    pub status: KnapsackStatus,
    /// Chosen multiplicity per item (empty unless optimal).
    pub counts: Vec<u64>,
    /// Total profit of the selection.
    pub value: f64,
    /// Search nodes visited.
    pub nodes: u64,
}

impl KnapsackResult {
    fn failed(status: KnapsackStatus) -> Self {
        Self {
            status,
            counts: Vec::new(),
            value: f64::NEG_INFINITY,
            nodes: 0,
        }
    }
}

/// Solve a knapsack instance exactly.
pub fn solve_knapsack(prob: &KnapsackProblem) -> CoreResult<KnapsackResult> {
    let n = prob.profits.len();
    if prob.weights.len() != n {
        return Err(CoreError::DimensionMismatch(format!(
            "knapsack has {} profits but {} weights",
            n,
            prob.weights.len()
        )));
    }
    if !prob.capacity.is_finite()
        || prob.profits.iter().any(|p| !p.is_finite())
        || prob.weights.iter().any(|w| !w.is_finite())
    {
        return Err(CoreError::InvalidProblem("knapsack data must be finite".to_string()));
    }
    if let Some(i) = prob.weights.iter().position(|&w| w < 0.0) {
        return Err(CoreError::InvalidProblem(format!(
            "knapsack item {} has negative weight",
            i
        )));
    }

    if prob.capacity < -CAPACITY_EPS {
        return Ok(KnapsackResult::failed(KnapsackStatus::Infeasible));
    }
    let capacity = prob.capacity.max(0.0);

    let mut counts = vec![0u64; n];
    let mut items = Vec::new();
    for i in 0..n {
        let (p, w) = (prob.profits[i], prob.weights[i]);
        if p <= 0.0 {
            continue;
        }
        if w <= 0.0 {
            match prob.bound {
                // free profit: always take it
                ItemBound::Binary => counts[i] = 1,
                ItemBound::Unbounded => {
                    return Ok(KnapsackResult::failed(KnapsackStatus::Unbounded));
                }
            }
            continue;
        }
        let limit = match prob.bound {
            ItemBound::Binary => 1,
            ItemBound::Unbounded => ((capacity + CAPACITY_EPS) / w).floor() as u64,
        };
        if limit > 0 {
            items.push(Item { index: i, profit: p, weight: w, limit });
        }
    }

    // densest first; stable sort keeps index order on ties
    items.sort_by(|a, b| {
        (b.profit / b.weight)
            .partial_cmp(&(a.profit / a.weight))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let base_value: f64 = counts
        .iter()
        .zip(&prob.profits)
        .map(|(&c, &p)| c as f64 * p)
        .sum();

    let mut search = Search {
        items: &items,
        current: vec![0; items.len()],
        best: vec![0; items.len()],
        best_value: 0.0,
        nodes: 0,
    };
    search.branch(0, capacity, 0.0);

    for (item, &take) in items.iter().zip(&search.best) {
        counts[item.index] = take;
    }

    Ok(KnapsackResult {
        status: KnapsackStatus::Optimal,
        counts,
        value: base_value + search.best_value,
        nodes: search.nodes,
    })
}

#[derive(Debug, Clone, Copy)]
struct Item {
    index: usize,
    profit: f64,
    weight: f64,
    limit: u64,
}

struct Search<'a> {
    items: &'a [Item],
    current: Vec<u64>,
    best: Vec<u64>,
    best_value: f64,
    nodes: u64,
}

impl Search<'_> {
    fn branch(&mut self, depth: usize, remaining: f64, value: f64) {
        self.nodes += 1;

        if value > self.best_value + VALUE_EPS {
            self.best_value = value;
            self.best.copy_from_slice(&self.current);
        }
        if depth == self.items.len() {
            return;
        }
        if value + self.fractional_bound(depth, remaining) <= self.best_value + VALUE_EPS {
            return;
        }

        let item = self.items[depth];
        let fit = ((remaining + CAPACITY_EPS) / item.weight).floor() as u64;
        let max_take = item.limit.min(fit);

        for take in (0..=max_take).rev() {
            self.current[depth] = take;
            let used = take as f64 * item.weight;
            self.branch(depth + 1, remaining - used, value + take as f64 * item.profit);
        }
        self.current[depth] = 0;
    }

    /// Dantzig bound on the profit still reachable from `depth` onwards.
    fn fractional_bound(&self, depth: usize, mut remaining: f64) -> f64 {
        let mut bound = 0.0;
        for item in &self.items[depth..] {
            if remaining <= 0.0 {
                break;
            }
            let full = item.limit as f64 * item.weight;
            if full <= remaining {
                bound += item.limit as f64 * item.profit;
                remaining -= full;
            } else {
                bound += item.profit * remaining / item.weight;
                remaining = 0.0;
            }
        }
        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_binary(profits: &[f64], weights: &[f64], capacity: f64) -> f64 {
        let n = profits.len();
        let mut best = 0.0_f64;
        for mask in 0u32..(1 << n) {
            let (mut p, mut w) = (0.0, 0.0);
            for i in 0..n {
                if mask & (1 << i) != 0 {
                    p += profits[i];
                    w += weights[i];
                }
            }
            if w <= capacity + 1e-9 {
                best = best.max(p);
            }
        }
        best
    }

    #[test]
    fn test_unbounded_pricing_instance() {
        // duals of the 10-wide roll with widths 3 and 5
        let prob = KnapsackProblem {
            profits: vec![1.0 / 3.0, 0.5],
            weights: vec![3.0, 5.0],
            capacity: 10.0,
            bound: ItemBound::Unbounded,
        };
        let res = solve_knapsack(&prob).unwrap();
        assert_eq!(res.status, KnapsackStatus::Optimal);
        assert!((res.value - 1.0).abs() < 1e-9);
        let used: f64 = res.counts.iter().zip(&prob.weights).map(|(&c, w)| c as f64 * w).sum();
        assert!(used <= 10.0);
    }

    #[test]
    fn test_unbounded_prefers_many_copies() {
        let prob = KnapsackProblem {
            profits: vec![5.0, 3.0],
            weights: vec![4.0, 2.0],
            capacity: 7.0,
            bound: ItemBound::Unbounded,
        };
        let res = solve_knapsack(&prob).unwrap();
        // three of item 1 (weight 6, profit 9) beats 4+2 combos (8)
        assert_eq!(res.counts, vec![0, 3]);
        assert!((res.value - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_binary_matches_brute_force() {
        let profits = vec![10.0, -3.0, 7.5, 4.0, 8.0, 1.0, 6.0];
        let weights = vec![5.0, 1.0, 4.0, 2.5, 6.0, 0.5, 3.0];
        for cap in [0.0, 3.0, 7.0, 10.5, 14.0, 40.0] {
            let prob = KnapsackProblem {
                profits: profits.clone(),
                weights: weights.clone(),
                capacity: cap,
                bound: ItemBound::Binary,
            };
            let res = solve_knapsack(&prob).unwrap();
            let expected = brute_force_binary(&profits, &weights, cap);
            assert!((res.value - expected).abs() < 1e-9, "cap {}: {} vs {}", cap, res.value, expected);
            assert!(res.counts.iter().all(|&c| c <= 1));
            assert_eq!(res.counts[1], 0);
        }
    }

    #[test]
    fn test_no_profitable_items() {
        let prob = KnapsackProblem {
            profits: vec![-1.0, 0.0],
            weights: vec![1.0, 1.0],
            capacity: 5.0,
            bound: ItemBound::Binary,
        };
        let res = solve_knapsack(&prob).unwrap();
        assert_eq!(res.counts, vec![0, 0]);
        assert_eq!(res.value, 0.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let negative = KnapsackProblem {
            profits: vec![1.0],
            weights: vec![1.0],
            capacity: -1.0,
            bound: ItemBound::Binary,
        };
        assert_eq!(solve_knapsack(&negative).unwrap().status, KnapsackStatus::Infeasible);

        let free = KnapsackProblem {
            profits: vec![1.0],
            weights: vec![0.0],
            capacity: 1.0,
            bound: ItemBound::Unbounded,
        };
        assert_eq!(solve_knapsack(&free).unwrap().status, KnapsackStatus::Unbounded);

        let ragged = KnapsackProblem {
            profits: vec![1.0, 2.0],
            weights: vec![1.0],
            capacity: 1.0,
            bound: ItemBound::Binary,
        };
        assert!(matches!(solve_knapsack(&ragged), Err(CoreError::DimensionMismatch(_))));
    }
}
