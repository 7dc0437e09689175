//! Generalized assignment instances.

use serde::{Deserialize, Serialize};

use crate::error::{MipError, MipResult};

/// Generalized assignment problem.
///
/// Assign every task to exactly one agent at minimum cost without exceeding
/// any agent's capacity. Matrices are indexed `[task][agent]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentProblem {
    /// Cost of giving task `i` to agent `j`.
    pub costs: Vec<Vec<f64>>,

    /// Capacity consumed when agent `j` performs task `i`.
    pub weights: Vec<Vec<f64>>,

    /// Capacity of each agent.
    pub capacities: Vec<f64>,
}

impl AssignmentProblem {
    /// Create and validate an instance.
    pub fn new(costs: Vec<Vec<f64>>, weights: Vec<Vec<f64>>, capacities: Vec<f64>) -> MipResult<Self> {
        let prob = Self {
            costs,
            weights,
            capacities,
        };
        prob.validate()?;
        Ok(prob)
    }

    /// Number of tasks.
    pub fn num_tasks(&self) -> usize {
        self.costs.len()
    }

    /// Number of agents.
    pub fn num_agents(&self) -> usize {
        self.capacities.len()
    }

    /// Check dimensions, finiteness and non-negative weights.
    pub fn validate(&self) -> MipResult<()> {
        let m = self.num_agents();
        if self.num_tasks() == 0 || m == 0 {
            return Err(MipError::InvalidProblem(
                "need at least one task and one agent".to_string(),
            ));
        }
        if self.weights.len() != self.num_tasks() {
            return Err(MipError::InvalidProblem(format!(
                "weights has {} rows, costs has {}",
                self.weights.len(),
                self.num_tasks()
            )));
        }
        for (i, (c, w)) in self.costs.iter().zip(&self.weights).enumerate() {
            if c.len() != m || w.len() != m {
                return Err(MipError::InvalidProblem(format!(
                    "task {} has {} costs and {} weights for {} agents",
                    i,
                    c.len(),
                    w.len(),
                    m
                )));
            }
            if c.iter().chain(w).any(|v| !v.is_finite()) {
                return Err(MipError::InvalidProblem(format!(
                    "task {} has non-finite data",
                    i
                )));
            }
            if let Some(j) = w.iter().position(|&v| v < 0.0) {
                return Err(MipError::InvalidProblem(format!(
                    "task {} has negative weight {} for agent {}",
                    i, w[j], j
                )));
            }
        }
        if self.capacities.iter().any(|v| !v.is_finite()) {
            return Err(MipError::InvalidProblem(
                "capacities must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Total cost of a 0/1 assignment matrix.
    pub fn cost(&self, assignment: &[Vec<f64>]) -> f64 {
        self.costs
            .iter()
            .zip(assignment)
            .flat_map(|(c, x)| c.iter().zip(x).map(|(c, x)| c * x))
            .sum()
    }
}
