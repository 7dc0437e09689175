//! Branching variable selection.

use super::BoundChange;
use crate::model::IntegerProgram;

/// A branching decision.
#[derive(Debug, Clone)]
pub struct BranchDecision {
    /// Variable to branch on.
    pub var: usize,

    /// Current (fractional) value.
    pub value: f64,

    /// Bound change for "down" branch (x <= floor(value)).
    pub down_branch: BoundChange,

    /// Bound change for "up" branch (x >= ceil(value)).
    pub up_branch: BoundChange,
}

impl BranchDecision {
    /// Children in push order for a guided dive.
    ///
    /// The child on the side nearer the fractional value is returned last,
    /// so it sits on top of the stack and is explored next.
    pub fn dive_order(&self) -> [BoundChange; 2] {
        let frac_part = self.value - self.value.floor();
        if frac_part < 0.5 {
            [self.up_branch, self.down_branch]
        } else {
            [self.down_branch, self.up_branch]
        }
    }
}

/// Select the most fractional variable.
///
/// Picks the maximum distance to the nearest integer, first index on ties.
/// Returns None if `x` is integral within `tol`.
pub fn select_most_fractional(
    prob: &IntegerProgram,
    x: &[f64],
    bounds: &[(f64, f64)],
    tol: f64,
) -> Option<BranchDecision> {
    let mut best: Option<(usize, f64, f64)> = None;
    for (var, value, frac) in prob.fractional_vars(x, tol) {
        if best.map_or(true, |(_, _, f)| frac > f) {
            best = Some((var, value, frac));
        }
    }

    let (var, value, _) = best?;
    let (lb, ub) = bounds[var];
    Some(BranchDecision {
        var,
        value,
        down_branch: BoundChange::down_branch(var, lb, ub, value),
        up_branch: BoundChange::up_branch(var, lb, ub, value),
    })
}
