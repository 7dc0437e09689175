//! Relaxation backend using the orlab-core simplex.

use orlab_core::{LpProblem, SolveResult, SolverSettings};

use super::backend::RelaxationBackend;
use crate::error::MipResult;

/// Simplex-based relaxation backend.
#[derive(Debug, Clone, Default)]
pub struct SimplexBackend {
    /// Simplex settings.
    pub settings: SolverSettings,
}

impl SimplexBackend {
    /// Create a new simplex backend.
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }
}

impl RelaxationBackend for SimplexBackend {
    fn solve(&mut self, prob: &LpProblem) -> MipResult<SolveResult> {
        let res = orlab_core::solve(prob, &self.settings)?;
        log::trace!(
            "simplex: status={} obj={:.6e} pivots={}",
            res.status,
            res.obj_val,
            res.iterations
        );
        Ok(res)
    }

    fn name(&self) -> &str {
        "simplex"
    }
}
