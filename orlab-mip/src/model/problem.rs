//! Pure integer program representation.

use orlab_core::util::{dot, fractionality};
use orlab_core::{LpProblem, Sense};
use serde::{Deserialize, Serialize};

use crate::error::{MipError, MipResult};

/// Pure integer program.
///
/// ```text
/// maximize / minimize   c^T x
/// subject to            A_ub x <= b_ub
///                       x >= 0, x integer
/// ```
///
/// Objective comparisons inside the search use the canonical minimization
/// form `sign * c^T x`, see [`IntegerProgram::canonical`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerProgram {
    /// Objective coefficients.
    pub c: Vec<f64>,

    /// Inequality matrix rows.
    pub a_ub: Vec<Vec<f64>>,

    /// Inequality right-hand side.
    pub b_ub: Vec<f64>,

    /// Maximize instead of minimize.
    #[serde(default)]
    pub maximize: bool,
}

impl IntegerProgram {
    /// Create and validate an integer program.
    pub fn new(c: Vec<f64>, a_ub: Vec<Vec<f64>>, b_ub: Vec<f64>, maximize: bool) -> MipResult<Self> {
        let prob = Self {
            c,
            a_ub,
            b_ub,
            maximize,
        };
        prob.validate()?;
        Ok(prob)
    }

    /// Check dimensions and finiteness.
    pub fn validate(&self) -> MipResult<()> {
        let n = self.num_vars();
        if n == 0 {
            return Err(MipError::InvalidProblem("objective vector is empty".to_string()));
        }
        if self.a_ub.len() != self.b_ub.len() {
            return Err(MipError::InvalidProblem(format!(
                "A_ub has {} rows but b_ub has {} entries",
                self.a_ub.len(),
                self.b_ub.len()
            )));
        }
        if let Some(i) = self.a_ub.iter().position(|row| row.len() != n) {
            return Err(MipError::InvalidProblem(format!(
                "A_ub row {} has {} columns, expected {}",
                i,
                self.a_ub[i].len(),
                n
            )));
        }
        let finite = self.c.iter().chain(&self.b_ub).all(|v| v.is_finite())
            && self.a_ub.iter().flatten().all(|v| v.is_finite());
        if !finite {
            return Err(MipError::InvalidProblem("problem data must be finite".to_string()));
        }
        Ok(())
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Optimization sense.
    pub fn sense(&self) -> Sense {
        Sense::from_maximize(self.maximize)
    }

    /// Objective value `c^T x` in the problem's own sense.
    pub fn objective(&self, x: &[f64]) -> f64 {
        dot(&self.c, x)
    }

    /// Map an objective value to canonical minimization form.
    pub fn canonical(&self, value: f64) -> f64 {
        self.sense().sign() * value
    }

    /// Default bounds `[0, +inf)` for every variable.
    pub fn default_bounds(&self) -> Vec<(f64, f64)> {
        vec![(0.0, f64::INFINITY); self.num_vars()]
    }

    /// LP relaxation over the given variable bounds.
    pub fn relaxation(&self, bounds: &[(f64, f64)]) -> LpProblem {
        LpProblem::new(self.c.clone(), self.sense())
            .with_inequalities(self.a_ub.clone(), self.b_ub.clone())
            .with_bounds(bounds.to_vec())
    }

    /// Check `A_ub x <= b_ub + tol` and `x >= -tol`.
    pub fn satisfies_constraints(&self, x: &[f64], tol: f64) -> bool {
        x.len() == self.num_vars()
            && x.iter().all(|&v| v >= -tol)
            && self
                .a_ub
                .iter()
                .zip(&self.b_ub)
                .all(|(row, &b)| dot(row, x) <= b + tol)
    }

    /// Fractional variables as `(index, value, distance to nearest integer)`.
    pub fn fractional_vars(&self, x: &[f64], tol: f64) -> Vec<(usize, f64, f64)> {
        x.iter()
            .enumerate()
            .filter_map(|(i, &v)| {
                let frac = fractionality(v);
                (frac > tol).then_some((i, v, frac))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> IntegerProgram {
        IntegerProgram::new(
            vec![5.0, 8.0],
            vec![vec![1.0, 1.0], vec![5.0, 9.0]],
            vec![6.0, 45.0],
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_validation() {
        assert!(IntegerProgram::new(vec![], vec![], vec![], true).is_err());
        assert!(IntegerProgram::new(vec![1.0], vec![vec![1.0, 2.0]], vec![1.0], true).is_err());
        assert!(IntegerProgram::new(vec![1.0], vec![vec![1.0]], vec![], true).is_err());
        assert!(IntegerProgram::new(vec![f64::NAN], vec![], vec![], true).is_err());
    }

    #[test]
    fn test_canonical_form() {
        let ip = scenario_a();
        assert_eq!(ip.objective(&[0.0, 5.0]), 40.0);
        assert_eq!(ip.canonical(40.0), -40.0);
        assert_eq!(ip.relaxation(&ip.default_bounds()).sense, Sense::Maximize);
    }

    #[test]
    fn test_constraint_check() {
        let ip = scenario_a();
        assert!(ip.satisfies_constraints(&[0.0, 5.0], 1e-6));
        assert!(!ip.satisfies_constraints(&[2.0, 4.0], 1e-6));
        assert!(!ip.satisfies_constraints(&[-1.0, 0.0], 1e-6));
    }

    #[test]
    fn test_fractional_vars() {
        let ip = scenario_a();
        let frac = ip.fractional_vars(&[2.25, 3.75], 1e-5);
        assert_eq!(frac.len(), 2);
        assert_eq!(frac[0].0, 0);
        assert!((frac[1].2 - 0.25).abs() < 1e-12);
        assert!(ip.fractional_vars(&[1.000001, 3.0], 1e-5).is_empty());
    }
}
