//! Configuration settings for the engines.

use serde::{Deserialize, Serialize};

/// Branch-and-bound settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BnbSettings {
    // === Termination criteria ===
    /// Maximum number of nodes popped from the stack.
    pub max_nodes: u64,

    // === Tolerances ===
    /// Integer feasibility tolerance.
    /// A value is integral if |x - round(x)| <= int_tol.
    pub int_tol: f64,

    /// Tolerance for bound checks and comparisons against the incumbent.
    pub bound_tol: f64,

    // === Heuristics ===
    /// Seed the incumbent by rounding the root relaxation.
    pub rounding_heuristic: bool,

    /// Fix variables whose root reduced cost rules them out.
    pub reduced_cost_fixing: bool,

    // === Output ===
    /// Maximum number of node records kept for visualization.
    pub record_cap: usize,

    /// Print progress information.
    pub verbose: bool,

    /// Log frequency (print every N nodes).
    pub log_freq: u64,
}

impl Default for BnbSettings {
    fn default() -> Self {
        Self {
            max_nodes: 1000,
            int_tol: 1e-5,
            bound_tol: 1e-6,
            rounding_heuristic: true,
            reduced_cost_fixing: true,
            record_cap: 50,
            verbose: false,
            log_freq: 100,
        }
    }
}

impl BnbSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1,
            ..Self::default()
        }
    }

    /// Set maximum nodes.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Enable or disable both root heuristics.
    pub fn with_root_heuristics(mut self, enabled: bool) -> Self {
        self.rounding_heuristic = enabled;
        self.reduced_cost_fixing = enabled;
        self
    }
}

/// Column generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColGenSettings {
    /// Maximum number of patterns appended.
    pub max_iter: usize,

    /// Pricing value must exceed `1 + optimality_tol` to add a pattern.
    pub optimality_tol: f64,

    /// Print progress information.
    pub verbose: bool,
}

impl Default for ColGenSettings {
    fn default() -> Self {
        Self {
            max_iter: 50,
            optimality_tol: 1e-5,
            verbose: false,
        }
    }
}

impl ColGenSettings {
    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

/// Lagrangian relaxation settings.
///
/// The multiplier step at iteration `k` (zero based) is
/// `step_numerator / (k + 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LagrangianSettings {
    /// Maximum number of subgradient iterations.
    pub max_iter: usize,

    /// Numerator of the diminishing step size.
    pub step_numerator: f64,

    /// Print progress information.
    pub verbose: bool,
}

impl Default for LagrangianSettings {
    fn default() -> Self {
        Self {
            max_iter: 20,
            step_numerator: 10.0,
            verbose: false,
        }
    }
}

impl LagrangianSettings {
    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the step numerator.
    pub fn with_step_numerator(mut self, step: f64) -> Self {
        self.step_numerator = step;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let bnb = BnbSettings::default();
        assert_eq!(bnb.max_nodes, 1000);
        assert_eq!(bnb.int_tol, 1e-5);
        assert_eq!(bnb.bound_tol, 1e-6);
        assert_eq!(bnb.record_cap, 50);

        assert_eq!(ColGenSettings::default().max_iter, 50);
        assert_eq!(LagrangianSettings::default().max_iter, 20);
        assert_eq!(LagrangianSettings::default().step_numerator, 10.0);
    }

    #[test]
    fn test_builders() {
        let bnb = BnbSettings::verbose()
            .with_max_nodes(7)
            .with_root_heuristics(false);
        assert!(bnb.verbose);
        assert_eq!(bnb.max_nodes, 7);
        assert!(!bnb.rounding_heuristic && !bnb.reduced_cost_fixing);
    }

    #[test]
    fn test_partial_json_overrides() {
        let s: LagrangianSettings = serde_json::from_str(r#"{"max_iter": 5}"#).unwrap();
        assert_eq!(s.max_iter, 5);
        assert_eq!(s.step_numerator, 10.0);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        // a misspelled or misplaced key must not silently keep the default
        assert!(serde_json::from_str::<ColGenSettings>(r#"{"max_nodes": 5}"#).is_err());
        assert!(serde_json::from_str::<BnbSettings>(r#"{"max_node": 5}"#).is_err());
        assert!(serde_json::from_str::<LagrangianSettings>(r#"{"step": 2.0}"#).is_err());
    }
}
