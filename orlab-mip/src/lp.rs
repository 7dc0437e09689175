//! Continuous linear programs through the relaxation backend.

use orlab_core::{LpProblem, Sense, SolveStatus};
use serde::{Deserialize, Serialize};

use crate::error::{MipError, MipResult};
use crate::master::{solve_checked, RelaxationBackend};

/// Linear program in the shape accepted by the CLI.
///
/// `bounds` defaults to `x >= 0`; a `None` end of a pair is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearProgram {
    /// Objective coefficients.
    pub c: Vec<f64>,

    /// Inequality matrix rows.
    pub a_ub: Vec<Vec<f64>>,

    /// Inequality right-hand side.
    pub b_ub: Vec<f64>,

    /// Optional per-variable `(lower, upper)` bounds.
    #[serde(default)]
    pub bounds: Option<Vec<(Option<f64>, Option<f64>)>>,

    /// Maximize instead of minimize.
    #[serde(default)]
    pub maximize: bool,
}

impl LinearProgram {
    /// Convert to the relaxation primitive's problem type.
    pub fn to_problem(&self) -> MipResult<LpProblem> {
        let mut lp = LpProblem::new(self.c.clone(), Sense::from_maximize(self.maximize))
            .with_inequalities(self.a_ub.clone(), self.b_ub.clone());
        if let Some(bounds) = &self.bounds {
            if bounds.len() != self.c.len() {
                return Err(MipError::InvalidProblem(format!(
                    "{} bounds given for {} variables",
                    bounds.len(),
                    self.c.len()
                )));
            }
            lp = lp.with_bounds(
                bounds
                    .iter()
                    .map(|(lo, hi)| (lo.unwrap_or(f64::NEG_INFINITY), hi.unwrap_or(f64::INFINITY)))
                    .collect(),
            );
        }
        Ok(lp)
    }
}

/// Result of a continuous solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LpSolution {
    /// True when an optimal point was found.
    pub success: bool,

    /// Primitive status.
    pub status: SolveStatus,

    /// Optimal point.
    pub x: Option<Vec<f64>>,

    /// Objective value in the problem's own sense.
    pub objective: Option<f64>,

    /// Shadow prices of the inequality rows.
    pub marginals: Option<Vec<f64>>,
}

/// Solve a continuous linear program.
pub fn solve_linear_program_with(
    prog: &LinearProgram,
    backend: &mut dyn RelaxationBackend,
) -> MipResult<LpSolution> {
    let lp = prog.to_problem()?;
    let res = solve_checked(backend, &lp)?;
    log::debug!("lp: {} after {} pivots", res.status, res.iterations);

    if !res.status.is_optimal() {
        return Ok(LpSolution {
            success: false,
            status: res.status,
            x: None,
            objective: None,
            marginals: None,
        });
    }
    Ok(LpSolution {
        success: true,
        status: res.status,
        x: Some(res.x),
        objective: Some(res.obj_val),
        marginals: Some(res.ineq_marginals),
    })
}
