//! Two-phase primal simplex for small dense LPs.
//!
//! Produces an optimal vertex together with the marginals callers use for
//! dual-price extraction (column generation) and reduced-cost reasoning
//! (branch-and-bound variable fixing).

mod standard_form;
mod tableau;

use crate::error::CoreResult;
use crate::problem::{LpProblem, Sense, SolveResult, SolveStatus, SolverSettings};
use standard_form::{ColumnMap, RowOrigin, StandardForm};
use tableau::{PhaseOutcome, Tableau};

/// Solve a linear program with the dense two-phase simplex method.
///
/// Returns `Err` only for malformed input; infeasible, unbounded and
/// iteration-limited solves are reported through [`SolveStatus`].
pub fn solve_simplex(prob: &LpProblem, settings: &SolverSettings) -> CoreResult<SolveResult> {
    prob.validate()?;

    let sf = StandardForm::build(prob);
    if sf.empty_domain {
        log::debug!("simplex: empty variable domain");
        return Ok(SolveResult::failed(SolveStatus::Infeasible, 0));
    }

    let mut tableau = Tableau::new(&sf);

    let (outcome, residual) = tableau.phase_one(settings);
    if outcome == PhaseOutcome::IterationLimit {
        return Ok(SolveResult::failed(SolveStatus::IterationLimit, tableau.iterations));
    }
    if residual > settings.feas_tol {
        log::debug!("simplex: phase one residual {:.3e}, infeasible", residual);
        return Ok(SolveResult::failed(SolveStatus::Infeasible, tableau.iterations));
    }
    tableau.expel_artificials(settings);

    match tableau.phase_two(&sf, settings) {
        PhaseOutcome::Optimal => {}
        PhaseOutcome::Unbounded => {
            return Ok(SolveResult::failed(SolveStatus::Unbounded, tableau.iterations));
        }
        PhaseOutcome::IterationLimit => {
            return Ok(SolveResult::failed(SolveStatus::IterationLimit, tableau.iterations));
        }
    }

    let y = tableau.structural_values();
    let x = sf.recover(&y);
    let duals = tableau.row_duals(&sf);
    let reduced = tableau.structural_reduced_costs(&sf);

    let n = prob.num_vars();
    let mut ineq_marginals = vec![0.0; prob.num_inequalities()];
    let mut eq_marginals = vec![0.0; prob.num_equalities()];
    let mut lower_marginals = vec![0.0; n];
    let mut upper_marginals = vec![0.0; n];

    for (row, &dual) in sf.rows.iter().zip(&duals) {
        match row.origin {
            RowOrigin::Inequality(i) => ineq_marginals[i] = dual,
            RowOrigin::Equality(i) => eq_marginals[i] = dual,
            RowOrigin::UpperBound(j) => upper_marginals[j] = dual,
        }
    }
    for (j, map) in sf.columns.iter().enumerate() {
        match *map {
            ColumnMap::Shifted { col, .. } => lower_marginals[j] = reduced[col],
            ColumnMap::Mirrored { col, .. } => upper_marginals[j] = -reduced[col],
            ColumnMap::Split { .. } => {}
        }
    }

    let obj_val = prob.objective(&x);
    if prob.sense == Sense::Maximize {
        // marginals were computed for the negated objective
        for v in ineq_marginals
            .iter_mut()
            .chain(eq_marginals.iter_mut())
            .chain(lower_marginals.iter_mut())
            .chain(upper_marginals.iter_mut())
        {
            *v = -*v;
        }
    }

    Ok(SolveResult {
        status: SolveStatus::Optimal,
        x,
        obj_val,
        ineq_marginals,
        eq_marginals,
        lower_marginals,
        upper_marginals,
        iterations: tableau.iterations,
    })
}
