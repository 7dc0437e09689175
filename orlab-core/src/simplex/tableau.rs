//! Dense simplex tableau with Bland's pivoting rule.
//!
//! Column layout:
//!
//! ```text
//! [ structural (n) | slacks (one per <= row) | artificials (one per row) | rhs ]
//! ```
//!
//! Every row gets an artificial column. Since the starting basis is the
//! identity, the artificial block always holds `B^-1`, which yields the
//! row duals without a separate factorization.

use nalgebra::DMatrix;

use super::standard_form::StandardForm;
use crate::problem::SolverSettings;

/// Outcome of one simplex phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhaseOutcome {
    Optimal,
    Unbounded,
    IterationLimit,
}

pub(crate) struct Tableau {
    t: DMatrix<f64>,
    basis: Vec<usize>,
    row_sign: Vec<f64>,
    n_struct: usize,
    art_start: usize,
    rhs: usize,
    pub iterations: usize,
}

impl Tableau {
    /// Build the initial tableau with an identity starting basis.
    pub fn new(sf: &StandardForm) -> Self {
        let m = sf.rows.len();
        let n_struct = sf.num_cols();
        let n_slack = sf.rows.iter().filter(|r| r.has_slack).count();
        let art_start = n_struct + n_slack;
        let rhs = art_start + m;

        let mut t = DMatrix::zeros(m, rhs + 1);
        let mut basis = Vec::with_capacity(m);
        let mut row_sign = Vec::with_capacity(m);
        let mut slack = n_struct;

        for (i, row) in sf.rows.iter().enumerate() {
            let sign = if row.rhs < 0.0 { -1.0 } else { 1.0 };
            for (j, &a) in row.coefs.iter().enumerate() {
                t[(i, j)] = sign * a;
            }
            t[(i, art_start + i)] = 1.0;
            t[(i, rhs)] = sign * row.rhs;

            if row.has_slack {
                t[(i, slack)] = sign;
                basis.push(if sign > 0.0 { slack } else { art_start + i });
                slack += 1;
            } else {
                basis.push(art_start + i);
            }
            row_sign.push(sign);
        }

        Self {
            t,
            basis,
            row_sign,
            n_struct,
            art_start,
            rhs,
            iterations: 0,
        }
    }

    fn num_rows(&self) -> usize {
        self.basis.len()
    }

    /// Phase one: minimize the sum of artificials that start in the basis.
    ///
    /// Returns the remaining infeasibility.
    pub fn phase_one(&mut self, settings: &SolverSettings) -> (PhaseOutcome, f64) {
        let mut cost = vec![0.0; self.rhs];
        for &b in &self.basis {
            if b >= self.art_start {
                cost[b] = 1.0;
            }
        }
        let outcome = self.optimize(&cost, settings);
        let residual: f64 = self
            .basis
            .iter()
            .enumerate()
            .map(|(i, &b)| cost[b] * self.t[(i, self.rhs)])
            .sum();
        (outcome, residual)
    }

    /// Pivot artificials still basic at level zero out of the basis.
    ///
    /// Rows where no non-artificial pivot exists are redundant and keep
    /// their artificial, which can never leave zero.
    pub fn expel_artificials(&mut self, settings: &SolverSettings) {
        for r in 0..self.num_rows() {
            if self.basis[r] < self.art_start {
                continue;
            }
            let col = (0..self.art_start).find(|&j| self.t[(r, j)].abs() > settings.pivot_tol);
            if let Some(q) = col {
                self.pivot(r, q);
            }
        }
    }

    /// Phase two with the standard-form costs.
    pub fn phase_two(&mut self, sf: &StandardForm, settings: &SolverSettings) -> PhaseOutcome {
        let cost = self.full_cost(sf);
        self.optimize(&cost, settings)
    }

    fn full_cost(&self, sf: &StandardForm) -> Vec<f64> {
        let mut cost = vec![0.0; self.rhs];
        cost[..self.n_struct].copy_from_slice(&sf.cost);
        cost
    }

    /// Reduced cost of column `j` under `cost`.
    fn reduced_cost(&self, cost: &[f64], j: usize) -> f64 {
        let mut d = cost[j];
        for (i, &b) in self.basis.iter().enumerate() {
            d -= cost[b] * self.t[(i, j)];
        }
        d
    }

    fn optimize(&mut self, cost: &[f64], settings: &SolverSettings) -> PhaseOutcome {
        loop {
            if self.iterations >= settings.max_iter {
                return PhaseOutcome::IterationLimit;
            }

            // Bland: lowest-index improving column
            let entering =
                (0..self.art_start).find(|&j| self.reduced_cost(cost, j) < -settings.opt_tol);
            let q = match entering {
                Some(q) => q,
                None => return PhaseOutcome::Optimal,
            };

            let mut leaving: Option<(usize, f64)> = None;
            for i in 0..self.num_rows() {
                let a = self.t[(i, q)];
                if a <= settings.pivot_tol {
                    continue;
                }
                let ratio = self.t[(i, self.rhs)].max(0.0) / a;
                leaving = match leaving {
                    None => Some((i, ratio)),
                    Some((r, best)) => {
                        if ratio < best - 1e-12
                            || (ratio <= best + 1e-12 && self.basis[i] < self.basis[r])
                        {
                            Some((i, ratio))
                        } else {
                            Some((r, best))
                        }
                    }
                };
            }

            match leaving {
                Some((r, _)) => self.pivot(r, q),
                None => return PhaseOutcome::Unbounded,
            }
        }
    }

    fn pivot(&mut self, r: usize, q: usize) {
        let p = self.t[(r, q)];
        self.t.row_mut(r).unscale_mut(p);
        let pivot_row = self.t.row(r).clone_owned();
        for i in 0..self.num_rows() {
            if i == r {
                continue;
            }
            let factor = self.t[(i, q)];
            if factor != 0.0 {
                for (j, &v) in pivot_row.iter().enumerate() {
                    self.t[(i, j)] -= factor * v;
                }
                self.t[(i, q)] = 0.0;
            }
        }
        self.basis[r] = q;
        self.iterations += 1;
    }

    /// Values of the structural columns.
    pub fn structural_values(&self) -> Vec<f64> {
        let mut y = vec![0.0; self.n_struct];
        for (i, &b) in self.basis.iter().enumerate() {
            if b < self.n_struct {
                y[b] = self.t[(i, self.rhs)].max(0.0);
            }
        }
        y
    }

    /// Row duals `c_B B^-1`, expressed for the rows as originally signed.
    pub fn row_duals(&self, sf: &StandardForm) -> Vec<f64> {
        let cost = self.full_cost(sf);
        (0..self.num_rows())
            .map(|k| {
                let pi: f64 = self
                    .basis
                    .iter()
                    .enumerate()
                    .map(|(i, &b)| cost[b] * self.t[(i, self.art_start + k)])
                    .sum();
                pi * self.row_sign[k]
            })
            .collect()
    }

    /// Reduced costs of the structural columns under the phase-two costs.
    pub fn structural_reduced_costs(&self, sf: &StandardForm) -> Vec<f64> {
        let cost = self.full_cost(sf);
        (0..self.n_struct)
            .map(|j| self.reduced_cost(&cost, j))
            .collect()
    }
}
