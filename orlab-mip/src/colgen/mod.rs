//! Delayed column generation for the cutting-stock LP relaxation.
//!
//! The restricted master
//!
//! ```text
//! minimize    sum_t w_t
//! subject to  sum_t p_{i,t} w_t >= q_i    [pi_i]
//!             w >= 0
//! ```
//!
//! is re-solved over a growing pattern pool. Each round prices a new
//! pattern with an unbounded integer knapsack over the demand duals; a
//! pattern is worth adding only if its dual value exceeds one roll.

mod pattern;

pub use pattern::{CuttingStockProblem, Pattern, PatternSet};

use std::fmt;

use orlab_core::{ItemBound, KnapsackProblem, KnapsackStatus, LpProblem, Sense};
use serde::{Deserialize, Serialize};

use crate::error::{MipError, MipResult};
use crate::master::{solve_checked, RelaxationBackend};
use crate::oracle::{solve_knapsack_checked, KnapsackOracle};
use crate::settings::ColGenSettings;

/// Status of a column generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColGenStatus {
    /// Master solved; optimal with respect to the final pattern set.
    Optimal,

    /// The restricted master has no feasible point.
    #[serde(rename = "Master Infeasible")]
    MasterInfeasible,
}

impl fmt::Display for ColGenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColGenStatus::Optimal => write!(f, "Optimal"),
            ColGenStatus::MasterInfeasible => write!(f, "Master Infeasible"),
        }
    }
}

/// Why the pricing loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No pattern prices above one roll.
    Converged,

    /// Pricing regenerated a known pattern.
    DuplicatePattern,

    /// Pattern budget exhausted.
    IterationLimit,

    /// The knapsack oracle failed mid-loop.
    PricingFailed,

    /// The master relaxation failed.
    MasterInfeasible,
}

/// Column generation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuttingStockSolution {
    /// Run status.
    pub status: ColGenStatus,

    /// Loop exit reason.
    pub termination: Termination,

    /// Master objective (number of rolls, fractional).
    pub objective: Option<f64>,

    /// Final pattern set.
    pub patterns: Vec<Pattern>,

    /// Master weights, one per pattern.
    pub weights: Vec<f64>,

    /// Demand duals of the final master.
    pub duals: Vec<f64>,

    /// Patterns appended by pricing.
    pub iterations: usize,

    /// Human-readable iteration log.
    pub log: Vec<String>,
}

/// Column generation driver.
pub struct ColumnGeneration<'a> {
    prob: &'a CuttingStockProblem,
    settings: ColGenSettings,
    patterns: PatternSet,
    log: Vec<String>,
}

impl<'a> ColumnGeneration<'a> {
    /// Create a driver seeded with homogeneous patterns.
    pub fn new(prob: &'a CuttingStockProblem, settings: ColGenSettings) -> Self {
        Self {
            prob,
            settings,
            patterns: PatternSet::homogeneous(prob),
            log: Vec::new(),
        }
    }

    fn push_log(&mut self, line: String) {
        if self.settings.verbose {
            log::info!("{}", line);
        } else {
            log::debug!("{}", line);
        }
        self.log.push(line);
    }

    fn master(&self) -> LpProblem {
        let n_items = self.prob.demands.len();
        let rhs: Vec<f64> = self.prob.quantities().iter().map(|q| -q).collect();
        LpProblem::new(vec![1.0; self.patterns.len()], Sense::Minimize)
            .with_inequalities(self.patterns.negated_coverage(n_items), rhs)
    }

    /// Run the pricing loop.
    pub fn solve(
        mut self,
        backend: &mut dyn RelaxationBackend,
        oracle: &mut dyn KnapsackOracle,
    ) -> MipResult<CuttingStockSolution> {
        self.prob.validate()?;
        let widths = self.prob.widths();
        let mut added = 0;

        let (termination, master) = loop {
            let master = solve_checked(backend, &self.master())?;
            if !master.status.is_optimal() {
                self.push_log(format!("Master problem infeasible ({})", master.status));
                return Ok(self.finish(
                    ColGenStatus::MasterInfeasible,
                    Termination::MasterInfeasible,
                    None,
                    added,
                ));
            }
            if added >= self.settings.max_iter {
                self.push_log(format!("Iteration limit of {} patterns reached", added));
                break (Termination::IterationLimit, master);
            }

            let duals: Vec<f64> = master.ineq_marginals.iter().map(|m| (-m).max(0.0)).collect();
            let pricing = KnapsackProblem {
                profits: duals,
                weights: widths.clone(),
                capacity: self.prob.unit_capacity,
                bound: ItemBound::Unbounded,
            };

            let res = match solve_knapsack_checked(oracle, &pricing) {
                Ok(res) if res.status == KnapsackStatus::Optimal => res,
                Ok(res) => {
                    self.push_log(format!("Pricing failed: knapsack {:?}. Stopping.", res.status));
                    break (Termination::PricingFailed, master);
                }
                Err(e @ MipError::MalformedRelaxation(_)) => return Err(e),
                Err(e) => {
                    self.push_log(format!("Pricing failed: {}. Stopping.", e));
                    break (Termination::PricingFailed, master);
                }
            };

            if res.value <= 1.0 + self.settings.optimality_tol {
                self.push_log(format!(
                    "Optimality reached. Max reduced cost val: {:.4} <= 1",
                    res.value
                ));
                break (Termination::Converged, master);
            }

            if self.patterns.contains(&res.counts) {
                self.push_log("Generated existing pattern. Stopping.".to_string());
                break (Termination::DuplicatePattern, master);
            }

            self.push_log(format!(
                "Iter {}: Added pattern {:?} (Value: {:.4})",
                added, res.counts, res.value
            ));
            self.patterns.insert(res.counts);
            added += 1;
        };

        Ok(self.finish(ColGenStatus::Optimal, termination, Some(master), added))
    }

    fn finish(
        self,
        status: ColGenStatus,
        termination: Termination,
        master: Option<orlab_core::SolveResult>,
        iterations: usize,
    ) -> CuttingStockSolution {
        let (objective, weights, duals) = match master {
            Some(m) => {
                let duals = m.ineq_marginals.iter().map(|v| (-v).max(0.0)).collect();
                (Some(m.obj_val), m.x, duals)
            }
            None => (None, Vec::new(), Vec::new()),
        };
        CuttingStockSolution {
            status,
            termination,
            objective,
            patterns: self.patterns.into_patterns(),
            weights,
            duals,
            iterations,
            log: self.log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::SimplexBackend;
    use crate::oracle::ExactKnapsack;
    use orlab_core::{KnapsackResult, SolveResult, SolveStatus};

    /// Reports every master dual at twice its true value.
    struct DoubledDuals(SimplexBackend);

    impl RelaxationBackend for DoubledDuals {
        fn solve(&mut self, prob: &LpProblem) -> MipResult<SolveResult> {
            let mut res = self.0.solve(prob)?;
            for m in &mut res.ineq_marginals {
                *m *= 2.0;
            }
            Ok(res)
        }
    }

    struct InfeasibleMaster;

    impl RelaxationBackend for InfeasibleMaster {
        fn solve(&mut self, _prob: &LpProblem) -> MipResult<SolveResult> {
            Ok(SolveResult::failed(SolveStatus::Infeasible, 0))
        }
    }

    /// Knapsack oracle that never produces a pattern.
    enum FailingOracle {
        NotOptimal,
        Rejects,
    }

    impl KnapsackOracle for FailingOracle {
        fn solve(&mut self, _prob: &KnapsackProblem) -> MipResult<KnapsackResult> {
            match self {
                FailingOracle::NotOptimal => Ok(KnapsackResult {
                    status: KnapsackStatus::Infeasible,
                    counts: Vec::new(),
                    value: f64::NEG_INFINITY,
                    nodes: 0,
                }),
                FailingOracle::Rejects => {
                    Err(MipError::InvalidProblem("pricing row rejected".to_string()))
                }
            }
        }
    }

    fn run(prob: &CuttingStockProblem, settings: ColGenSettings) -> CuttingStockSolution {
        ColumnGeneration::new(prob, settings)
            .solve(&mut SimplexBackend::default(), &mut ExactKnapsack)
            .unwrap()
    }

    #[test]
    fn test_converges_on_seed() {
        let prob = CuttingStockProblem::new(10.0, vec![(3.0, 5.0), (5.0, 2.0)]).unwrap();
        let sol = run(&prob, ColGenSettings::default());

        assert_eq!(sol.status, ColGenStatus::Optimal);
        assert_eq!(sol.termination, Termination::Converged);
        assert_eq!(sol.patterns, vec![vec![3, 0], vec![0, 2]]);
        assert!((sol.weights[0] - 5.0 / 3.0).abs() < 1e-9);
        assert!((sol.weights[1] - 1.0).abs() < 1e-9);
        assert_eq!(
            sol.log.last().map(String::as_str),
            Some("Optimality reached. Max reduced cost val: 1.0000 <= 1")
        );
    }

    #[test]
    fn test_adds_mixed_pattern() {
        let prob = CuttingStockProblem::new(10.0, vec![(3.0, 10.0), (4.0, 10.0)]).unwrap();
        let sol = run(&prob, ColGenSettings::default());

        assert_eq!(sol.termination, Termination::Converged);
        assert_eq!(sol.iterations, 1);
        assert_eq!(sol.patterns.len(), 3);
        assert_eq!(sol.patterns[2], vec![2, 1]);
        assert_eq!(sol.log[0], "Iter 0: Added pattern [2, 1] (Value: 1.1667)");
        assert_eq!(sol.weights.len(), 3);
        assert!((sol.objective.unwrap() - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_iteration_cap_keeps_weights_aligned() {
        let prob = CuttingStockProblem::new(10.0, vec![(3.0, 10.0), (4.0, 10.0)]).unwrap();
        let sol = run(&prob, ColGenSettings::default().with_max_iter(0));

        assert_eq!(sol.termination, Termination::IterationLimit);
        assert_eq!(sol.patterns.len(), 2);
        assert_eq!(sol.weights.len(), 2);
    }

    #[test]
    fn test_duplicate_pattern_stops() {
        // true duals price both seed patterns at exactly one roll; doubled
        // duals price them at two, so pricing returns a pattern already held
        let prob = CuttingStockProblem::new(10.0, vec![(3.0, 5.0), (5.0, 2.0)]).unwrap();
        let sol = ColumnGeneration::new(&prob, ColGenSettings::default())
            .solve(&mut DoubledDuals(SimplexBackend::default()), &mut ExactKnapsack)
            .unwrap();

        assert_eq!(sol.status, ColGenStatus::Optimal);
        assert_eq!(sol.termination, Termination::DuplicatePattern);
        assert_eq!(sol.iterations, 0);
        assert_eq!(sol.patterns, vec![vec![3, 0], vec![0, 2]]);
        assert_eq!(sol.weights.len(), 2);
        assert_eq!(sol.log, vec!["Generated existing pattern. Stopping.".to_string()]);
    }

    #[test]
    fn test_infeasible_master() {
        let prob = CuttingStockProblem::new(10.0, vec![(3.0, 10.0), (4.0, 10.0)]).unwrap();
        let sol = ColumnGeneration::new(&prob, ColGenSettings::default())
            .solve(&mut InfeasibleMaster, &mut ExactKnapsack)
            .unwrap();

        assert_eq!(sol.status, ColGenStatus::MasterInfeasible);
        assert_eq!(sol.termination, Termination::MasterInfeasible);
        assert!(sol.objective.is_none());
        assert!(sol.weights.is_empty());
        assert!(sol.duals.is_empty());
        assert_eq!(sol.patterns.len(), 2);
        assert_eq!(sol.log, vec!["Master problem infeasible (Infeasible)".to_string()]);
        assert_eq!(serde_json::to_string(&sol.status).unwrap(), "\"Master Infeasible\"");
    }

    #[test]
    fn test_pricing_failure_keeps_master() {
        let prob = CuttingStockProblem::new(10.0, vec![(3.0, 10.0), (4.0, 10.0)]).unwrap();

        let sol = ColumnGeneration::new(&prob, ColGenSettings::default())
            .solve(&mut SimplexBackend::default(), &mut FailingOracle::NotOptimal)
            .unwrap();
        assert_eq!(sol.status, ColGenStatus::Optimal);
        assert_eq!(sol.termination, Termination::PricingFailed);
        assert_eq!(sol.iterations, 0);
        assert_eq!(sol.weights.len(), sol.patterns.len());
        assert!(sol.objective.is_some());
        assert_eq!(
            sol.log.last().map(String::as_str),
            Some("Pricing failed: knapsack Infeasible. Stopping.")
        );

        let sol = ColumnGeneration::new(&prob, ColGenSettings::default())
            .solve(&mut SimplexBackend::default(), &mut FailingOracle::Rejects)
            .unwrap();
        assert_eq!(sol.termination, Termination::PricingFailed);
        assert_eq!(
            sol.log.last().map(String::as_str),
            Some("Pricing failed: Invalid problem: pricing row rejected. Stopping.")
        );
    }
}
