//! Conversion of a bounded LP into simplex standard form.
//!
//! Every original variable is rewritten over non-negative columns:
//!
//! ```text
//! lb finite            x = lb + y          (plus row y <= ub - lb if ub finite)
//! lb = -inf, ub finite x = ub - y
//! free                 x = y+ - y-
//! ```
//!
//! The objective is always expressed in minimization form.

use crate::problem::{LpProblem, Sense};

/// How an original variable maps onto standard-form columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ColumnMap {
    /// `x = lb + y[col]`.
    Shifted { col: usize, lb: f64 },
    /// `x = ub - y[col]`.
    Mirrored { col: usize, ub: f64 },
    /// `x = y[pos] - y[neg]`.
    Split { pos: usize, neg: usize },
}

/// Which original object a standard-form row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowOrigin {
    Inequality(usize),
    Equality(usize),
    UpperBound(usize),
}

/// A single standard-form row.
#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub coefs: Vec<f64>,
    pub rhs: f64,
    /// True for `<=` rows (slack attached), false for equalities.
    pub has_slack: bool,
    pub origin: RowOrigin,
}

/// Standard-form LP: `min cost^T y` over `y >= 0` subject to `rows`.
#[derive(Debug, Clone)]
pub(crate) struct StandardForm {
    pub cost: Vec<f64>,
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnMap>,
    /// Some variable has `lb > ub`.
    pub empty_domain: bool,
}

impl StandardForm {
    /// Build the standard form of a validated problem.
    pub fn build(prob: &LpProblem) -> Self {
        let sign = match prob.sense {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        };

        let mut columns = Vec::with_capacity(prob.num_vars());
        let mut cost = Vec::new();
        let mut empty_domain = false;

        for (j, &(lb, ub)) in prob.bounds.iter().enumerate() {
            let cj = sign * prob.c[j];
            if lb.is_finite() {
                if ub < lb {
                    empty_domain = true;
                }
                columns.push(ColumnMap::Shifted { col: cost.len(), lb });
                cost.push(cj);
            } else if ub.is_finite() {
                columns.push(ColumnMap::Mirrored { col: cost.len(), ub });
                cost.push(-cj);
            } else {
                let pos = cost.len();
                columns.push(ColumnMap::Split { pos, neg: pos + 1 });
                cost.push(cj);
                cost.push(-cj);
            }
        }

        let n_cols = cost.len();
        let mut rows = Vec::with_capacity(prob.num_inequalities() + prob.num_equalities());

        for (i, (a, &b)) in prob.a_ub.iter().zip(&prob.b_ub).enumerate() {
            let (coefs, rhs) = map_row(a, b, &columns, n_cols);
            rows.push(Row {
                coefs,
                rhs,
                has_slack: true,
                origin: RowOrigin::Inequality(i),
            });
        }

        for (i, (a, &b)) in prob.a_eq.iter().zip(&prob.b_eq).enumerate() {
            let (coefs, rhs) = map_row(a, b, &columns, n_cols);
            rows.push(Row {
                coefs,
                rhs,
                has_slack: false,
                origin: RowOrigin::Equality(i),
            });
        }

        for (j, (map, &(_, ub))) in columns.iter().zip(&prob.bounds).enumerate() {
            if let ColumnMap::Shifted { col, lb } = *map {
                if ub.is_finite() {
                    let mut coefs = vec![0.0; n_cols];
                    coefs[col] = 1.0;
                    rows.push(Row {
                        coefs,
                        rhs: ub - lb,
                        has_slack: true,
                        origin: RowOrigin::UpperBound(j),
                    });
                }
            }
        }

        Self {
            cost,
            rows,
            columns,
            empty_domain,
        }
    }

    /// Number of standard-form columns.
    pub fn num_cols(&self) -> usize {
        self.cost.len()
    }

    /// Recover the original variables from standard-form values.
    pub fn recover(&self, y: &[f64]) -> Vec<f64> {
        self.columns
            .iter()
            .map(|map| match *map {
                ColumnMap::Shifted { col, lb } => lb + y[col],
                ColumnMap::Mirrored { col, ub } => ub - y[col],
                ColumnMap::Split { pos, neg } => y[pos] - y[neg],
            })
            .collect()
    }
}

/// Substitute the column maps into one original row.
fn map_row(a: &[f64], b: f64, columns: &[ColumnMap], n_cols: usize) -> (Vec<f64>, f64) {
    let mut coefs = vec![0.0; n_cols];
    let mut rhs = b;
    for (&aj, map) in a.iter().zip(columns) {
        match *map {
            ColumnMap::Shifted { col, lb } => {
                coefs[col] = aj;
                rhs -= aj * lb;
            }
            ColumnMap::Mirrored { col, ub } => {
                coefs[col] = -aj;
                rhs -= aj * ub;
            }
            ColumnMap::Split { pos, neg } => {
                coefs[pos] = aj;
                coefs[neg] = -aj;
            }
        }
    }
    (coefs, rhs)
}
