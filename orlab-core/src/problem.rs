//! Problem data structures and validation.
//!
//! This module defines the canonical linear program handed to the
//! relaxation primitive and the result it returns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Optimization sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    /// Minimize the objective (canonical form).
    #[default]
    Minimize,
    /// Maximize the objective.
    Maximize,
}

impl Sense {
    /// Sense from a `maximize` flag.
    pub fn from_maximize(maximize: bool) -> Self {
        if maximize {
            Sense::Maximize
        } else {
            Sense::Minimize
        }
    }

    /// Sign that maps an objective in this sense to minimization form.
    pub fn sign(self) -> f64 {
        match self {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        }
    }
}

/// Linear program in inequality form.
///
/// ```text
/// minimize / maximize   c^T x
/// subject to            A_ub x <= b_ub
///                       A_eq x == b_eq
///                       lower <= x <= upper
/// ```
///
/// Bounds may be infinite. Matrices are dense row-major; the problems this
/// crate serves are small teaching instances.
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Objective coefficients (length n).
    pub c: Vec<f64>,

    /// Inequality matrix rows (each of length n).
    pub a_ub: Vec<Vec<f64>>,

    /// Inequality right-hand side.
    pub b_ub: Vec<f64>,

    /// Equality matrix rows (each of length n).
    pub a_eq: Vec<Vec<f64>>,

    /// Equality right-hand side.
    pub b_eq: Vec<f64>,

    /// Per-variable `(lower, upper)` bounds.
    pub bounds: Vec<(f64, f64)>,

    /// Optimization sense.
    pub sense: Sense,
}

impl LpProblem {
    /// Create a problem with `x >= 0` bounds and no constraints.
    pub fn new(c: Vec<f64>, sense: Sense) -> Self {
        let n = c.len();
        Self {
            c,
            a_ub: Vec::new(),
            b_ub: Vec::new(),
            a_eq: Vec::new(),
            b_eq: Vec::new(),
            bounds: vec![(0.0, f64::INFINITY); n],
            sense,
        }
    }

    /// Set the inequality system.
    pub fn with_inequalities(mut self, a_ub: Vec<Vec<f64>>, b_ub: Vec<f64>) -> Self {
        self.a_ub = a_ub;
        self.b_ub = b_ub;
        self
    }

    /// Set the equality system.
    pub fn with_equalities(mut self, a_eq: Vec<Vec<f64>>, b_eq: Vec<f64>) -> Self {
        self.a_eq = a_eq;
        self.b_eq = b_eq;
        self
    }

    /// Replace the variable bounds.
    pub fn with_bounds(mut self, bounds: Vec<(f64, f64)>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Number of variables (n).
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Number of inequality rows.
    pub fn num_inequalities(&self) -> usize {
        self.b_ub.len()
    }

    /// Number of equality rows.
    pub fn num_equalities(&self) -> usize {
        self.b_eq.len()
    }

    /// Objective value `c^T x` in this problem's sense.
    pub fn objective(&self, x: &[f64]) -> f64 {
        crate::util::dot(&self.c, x)
    }

    /// Check `x` against every constraint and bound within `tol`.
    pub fn is_feasible(&self, x: &[f64], tol: f64) -> bool {
        if x.len() != self.num_vars() {
            return false;
        }
        let ub_ok = self
            .a_ub
            .iter()
            .zip(&self.b_ub)
            .all(|(row, &b)| crate::util::dot(row, x) <= b + tol);
        let eq_ok = self
            .a_eq
            .iter()
            .zip(&self.b_eq)
            .all(|(row, &b)| (crate::util::dot(row, x) - b).abs() <= tol);
        let bounds_ok = self
            .bounds
            .iter()
            .zip(x)
            .all(|(&(lb, ub), &xi)| xi >= lb - tol && xi <= ub + tol);
        ub_ok && eq_ok && bounds_ok
    }

    /// Validate dimensions and finiteness.
    pub fn validate(&self) -> CoreResult<()> {
        let n = self.num_vars();
        if n == 0 {
            return Err(CoreError::InvalidProblem("empty objective vector".to_string()));
        }
        if self.c.iter().any(|v| !v.is_finite()) {
            return Err(CoreError::InvalidProblem("objective has non-finite entries".to_string()));
        }
        check_system("A_ub", &self.a_ub, &self.b_ub, n)?;
        check_system("A_eq", &self.a_eq, &self.b_eq, n)?;
        if self.bounds.len() != n {
            return Err(CoreError::DimensionMismatch(format!(
                "bounds has {} entries, expected {}",
                self.bounds.len(),
                n
            )));
        }
        for (j, &(lb, ub)) in self.bounds.iter().enumerate() {
            if lb.is_nan() || ub.is_nan() || lb == f64::INFINITY || ub == f64::NEG_INFINITY {
                return Err(CoreError::InvalidProblem(format!(
                    "variable {} has unusable bounds ({}, {})",
                    j, lb, ub
                )));
            }
        }
        Ok(())
    }
}

fn check_system(name: &str, a: &[Vec<f64>], b: &[f64], n: usize) -> CoreResult<()> {
    if a.len() != b.len() {
        return Err(CoreError::DimensionMismatch(format!(
            "{} has {} rows but right-hand side has {} entries",
            name,
            a.len(),
            b.len()
        )));
    }
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(CoreError::DimensionMismatch(format!(
                "{} row {} has {} columns, expected {}",
                name,
                i,
                row.len(),
                n
            )));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(CoreError::InvalidProblem(format!(
                "{} row {} has non-finite entries",
                name, i
            )));
        }
    }
    if b.iter().any(|v| !v.is_finite()) {
        return Err(CoreError::InvalidProblem(format!(
            "{} right-hand side has non-finite entries",
            name
        )));
    }
    Ok(())
}

/// Simplex settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Maximum number of pivots across both phases.
    pub max_iter: usize,

    /// Smallest magnitude accepted as a pivot element.
    pub pivot_tol: f64,

    /// Phase-one residual above which the problem is declared infeasible.
    pub feas_tol: f64,

    /// Reduced-cost tolerance for optimality.
    pub opt_tol: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iter: 10_000,
            pivot_tol: 1e-9,
            feas_tol: 1e-7,
            opt_tol: 1e-9,
        }
    }
}

/// Solution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Optimal vertex found.
    Optimal,

    /// No point satisfies the constraints.
    Infeasible,

    /// Objective is unbounded in the optimization direction.
    Unbounded,

    /// Pivot limit reached before optimality.
    IterationLimit,
}

impl SolveStatus {
    /// True when the result carries a usable point.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::IterationLimit => write!(f, "Iteration Limit"),
        }
    }
}

/// Solve result with primal point and sensitivity information.
///
/// All marginals are derivatives of the reported objective (in the
/// problem's own sense) with respect to the corresponding right-hand side
/// or bound. For a minimization, inequality marginals are `<= 0`, lower
/// bound marginals are `>= 0` and upper bound marginals are `<= 0`.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Solution status.
    pub status: SolveStatus,

    /// Primal solution (empty unless optimal).
    pub x: Vec<f64>,

    /// Objective value at `x`.
    pub obj_val: f64,

    /// Marginals of the inequality rows (length m_ub).
    pub ineq_marginals: Vec<f64>,

    /// Marginals of the equality rows (length m_eq).
    pub eq_marginals: Vec<f64>,

    /// Marginals of the variable lower bounds (length n).
    pub lower_marginals: Vec<f64>,

    /// Marginals of the variable upper bounds (length n).
    pub upper_marginals: Vec<f64>,

    /// Number of pivots performed.
    pub iterations: usize,
}

impl SolveResult {
    /// A result without a usable point.
    pub fn failed(status: SolveStatus, iterations: usize) -> Self {
        let obj_val = match status {
            SolveStatus::Unbounded => f64::NEG_INFINITY,
            _ => f64::INFINITY,
        };
        Self {
            status,
            x: Vec::new(),
            obj_val,
            ineq_marginals: Vec::new(),
            eq_marginals: Vec::new(),
            lower_marginals: Vec::new(),
            upper_marginals: Vec::new(),
            iterations,
        }
    }
}
