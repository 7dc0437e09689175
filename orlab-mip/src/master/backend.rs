//! Relaxation backend trait and response checks.

use orlab_core::{LpProblem, SolveResult, SolveStatus};

use crate::error::{MipError, MipResult};

/// Trait for continuous relaxation backends (LP solvers).
///
/// A backend is a pure function of its input problem: engines call it
/// zero-to-many times per invocation and never rely on state carried
/// between calls. Infeasible and unbounded problems are reported through
/// [`SolveResult::status`], not as errors.
pub trait RelaxationBackend {
    /// Solve an LP relaxation.
    fn solve(&mut self, prob: &LpProblem) -> MipResult<SolveResult>;

    /// Short backend name for logging.
    fn name(&self) -> &str {
        "relaxation"
    }
}

/// Solve through `backend` and reject malformed optimal responses.
///
/// An optimal result must carry a finite objective, a finite point of the
/// problem's dimension and one marginal per constraint and variable.
pub fn solve_checked(
    backend: &mut dyn RelaxationBackend,
    prob: &LpProblem,
) -> MipResult<SolveResult> {
    let res = backend.solve(prob)?;
    if res.status != SolveStatus::Optimal {
        return Ok(res);
    }

    let n = prob.num_vars();
    let check = |what: &str, v: &[f64], len: usize| -> MipResult<()> {
        if v.len() != len {
            return Err(MipError::MalformedRelaxation(format!(
                "{} reported optimal with {} of length {}, expected {}",
                backend_label(prob),
                what,
                v.len(),
                len
            )));
        }
        if v.iter().any(|x| !x.is_finite()) {
            return Err(MipError::MalformedRelaxation(format!(
                "{} contains non-finite entries",
                what
            )));
        }
        Ok(())
    };

    check("x", &res.x, n)?;
    check("inequality marginals", &res.ineq_marginals, prob.num_inequalities())?;
    check("equality marginals", &res.eq_marginals, prob.num_equalities())?;
    check("lower marginals", &res.lower_marginals, n)?;
    check("upper marginals", &res.upper_marginals, n)?;
    if !res.obj_val.is_finite() {
        return Err(MipError::MalformedRelaxation(
            "optimal relaxation with non-finite objective".to_string(),
        ));
    }
    Ok(res)
}

fn backend_label(prob: &LpProblem) -> String {
    format!(
        "relaxation ({} vars, {} rows)",
        prob.num_vars(),
        prob.num_inequalities() + prob.num_equalities()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use orlab_core::Sense;

    /// Backend that claims optimality without a usable point.
    struct EmptyOptimal;

    impl RelaxationBackend for EmptyOptimal {
        fn solve(&mut self, _prob: &LpProblem) -> MipResult<SolveResult> {
            let mut res = SolveResult::failed(SolveStatus::Optimal, 0);
            res.obj_val = 0.0;
            Ok(res)
        }
    }

    /// Backend that always reports infeasibility.
    struct AlwaysInfeasible;

    impl RelaxationBackend for AlwaysInfeasible {
        fn solve(&mut self, _prob: &LpProblem) -> MipResult<SolveResult> {
            Ok(SolveResult::failed(SolveStatus::Infeasible, 0))
        }
    }

    #[test]
    fn test_malformed_optimal_rejected() {
        let prob = LpProblem::new(vec![1.0, 1.0], Sense::Minimize);
        let err = solve_checked(&mut EmptyOptimal, &prob).unwrap_err();
        assert!(matches!(err, MipError::MalformedRelaxation(_)));
    }

    #[test]
    fn test_failed_status_passes_through() {
        let prob = LpProblem::new(vec![1.0], Sense::Minimize);
        let res = solve_checked(&mut AlwaysInfeasible, &prob).unwrap();
        assert_eq!(res.status, SolveStatus::Infeasible);
        assert_eq!(AlwaysInfeasible.name(), "relaxation");
    }
}
