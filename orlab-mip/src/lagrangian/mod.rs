//! Lagrangian relaxation for generalized assignment.
//!
//! Relaxing the "each task exactly once" rows with multipliers `lambda`
//! splits the problem into one 0/1 knapsack per agent:
//!
//! ```text
//! L(lambda) = sum_i lambda_i - sum_j max { sum_i (lambda_i - c_ij) x_ij : sum_i w_ij x_ij <= C_j }
//! ```
//!
//! `L(lambda)` is a lower bound on the assignment cost. Multipliers follow a
//! subgradient method with a diminishing step.

mod problem;

pub use problem::AssignmentProblem;

use std::fmt;

use orlab_core::util::norm2;
use orlab_core::{ItemBound, KnapsackProblem, KnapsackStatus};
use serde::{Deserialize, Serialize};

use crate::error::{MipError, MipResult};
use crate::model::IncumbentTracker;
use crate::oracle::{solve_knapsack_checked, KnapsackOracle};
use crate::settings::LagrangianSettings;

/// Status of a Lagrangian run. The method has no infeasible outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    /// The iteration loop finished.
    Completed,
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Completed")
    }
}

/// Lagrangian relaxation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentSolution {
    /// Always `Completed`.
    pub status: AssignmentStatus,

    /// Lower bound at every iteration.
    pub lower_bound_history: Vec<f64>,

    /// Cost of the best feasible assignment seen.
    pub upper_bound: Option<f64>,

    /// Best feasible assignment, `[task][agent]` 0/1 entries.
    pub assignment: Option<Vec<Vec<f64>>>,

    /// Final multipliers.
    pub multipliers: Vec<f64>,

    /// Human-readable iteration log.
    pub log: Vec<String>,
}

/// Subgradient driver.
pub struct LagrangianRelaxation<'a> {
    prob: &'a AssignmentProblem,
    settings: LagrangianSettings,
    lambda: Vec<f64>,
    incumbent: IncumbentTracker,
    best: Option<Vec<Vec<f64>>>,
    log: Vec<String>,
}

impl<'a> LagrangianRelaxation<'a> {
    /// Create a driver with all multipliers at zero.
    pub fn new(prob: &'a AssignmentProblem, settings: LagrangianSettings) -> Self {
        Self {
            prob,
            settings,
            lambda: vec![0.0; prob.num_tasks()],
            incumbent: IncumbentTracker::new(),
            best: None,
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

    /// Solve every agent's knapsack at the current multipliers.
    ///
    /// Returns the `[task][agent]` selection and the summed subproblem
    /// values, or `None` (with a log entry) if a subproblem failed.
    fn relaxed_assignment(
        &mut self,
        oracle: &mut dyn KnapsackOracle,
    ) -> MipResult<Option<(Vec<Vec<f64>>, f64)>> {
        let n = self.prob.num_tasks();
        let mut x = vec![vec![0.0; self.prob.num_agents()]; n];
        let mut total = 0.0;

        for (j, &capacity) in self.prob.capacities.iter().enumerate() {
            let sub = KnapsackProblem {
                profits: (0..n).map(|i| self.lambda[i] - self.prob.costs[i][j]).collect(),
                weights: (0..n).map(|i| self.prob.weights[i][j]).collect(),
                capacity,
                bound: ItemBound::Binary,
            };
            match solve_knapsack_checked(oracle, &sub) {
                Ok(res) if res.status == KnapsackStatus::Optimal => {
                    for (i, &k) in res.counts.iter().enumerate() {
                        x[i][j] = k as f64;
                    }
                    total += res.value;
                }
                Ok(res) => {
                    self.push_log(format!("Subproblem for agent {} {:?}. Stopping.", j, res.status));
                    return Ok(None);
                }
                Err(e @ MipError::MalformedRelaxation(_)) => return Err(e),
                Err(e) => {
                    self.push_log(format!("Subproblem for agent {} failed: {}. Stopping.", j, e));
                    return Ok(None);
                }
            }
        }
        Ok(Some((x, total)))
    }

    /// Run the subgradient loop.
    pub fn solve(mut self, oracle: &mut dyn KnapsackOracle) -> MipResult<AssignmentSolution> {
        self.prob.validate()?;
        let mut history = Vec::new();

        for k in 0..self.settings.max_iter {
            let Some((x, sub_total)) = self.relaxed_assignment(oracle)? else {
                break;
            };

            let lower_bound = self.lambda.iter().sum::<f64>() - sub_total;
            history.push(lower_bound);

            let g: Vec<f64> = x.iter().map(|row| 1.0 - row.iter().sum::<f64>()).collect();
            let norm = norm2(&g);

            if g.iter().all(|&v| v == 0.0) {
                let cost = self.prob.cost(&x);
                let flat: Vec<f64> = x.iter().flatten().copied().collect();
                if self.incumbent.update(&flat, cost) {
                    self.best = Some(x);
                }
                self.push_log(format!(
                    "Iter {}: Feasible! LB={:.2}, Cost={:.2}",
                    k, lower_bound, cost
                ));
            } else {
                self.push_log(format!(
                    "Iter {}: LB={:.2}, Infeasibility norm={:.2}",
                    k, lower_bound, norm
                ));
            }

            if norm == 0.0 {
                break;
            }

            let step = self.settings.step_numerator / (k + 1) as f64;
            for (l, gi) in self.lambda.iter_mut().zip(&g) {
                *l += step * gi;
            }
        }

        Ok(AssignmentSolution {
            status: AssignmentStatus::Completed,
            lower_bound_history: history,
            upper_bound: self.best.as_ref().map(|_| self.incumbent.obj_val),
            assignment: self.best,
            multipliers: self.lambda,
            log: self.log,
        })
    }
}
