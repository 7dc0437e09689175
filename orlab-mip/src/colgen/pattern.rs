//! Cutting patterns and the append-only pattern pool.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{MipError, MipResult};

/// How many copies of each item one unit of stock yields.
pub type Pattern = Vec<u64>;

/// Cutting-stock instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingStockProblem {
    /// Width of one unit of stock (roll length).
    pub unit_capacity: f64,

    /// `(item width, required quantity)` pairs.
    pub demands: Vec<(f64, f64)>,
}

impl CuttingStockProblem {
    /// Create and validate an instance.
    pub fn new(unit_capacity: f64, demands: Vec<(f64, f64)>) -> MipResult<Self> {
        let prob = Self {
            unit_capacity,
            demands,
        };
        prob.validate()?;
        Ok(prob)
    }

    /// Check capacity, widths and quantities.
    pub fn validate(&self) -> MipResult<()> {
        if !(self.unit_capacity.is_finite() && self.unit_capacity > 0.0) {
            return Err(MipError::InvalidProblem(format!(
                "unit capacity must be positive, got {}",
                self.unit_capacity
            )));
        }
        if self.demands.is_empty() {
            return Err(MipError::InvalidProblem("no demand items".to_string()));
        }
        for (i, &(width, quantity)) in self.demands.iter().enumerate() {
            if !(width.is_finite() && width > 0.0) {
                return Err(MipError::InvalidProblem(format!(
                    "item {} has non-positive width {}",
                    i, width
                )));
            }
            if !(quantity.is_finite() && quantity >= 0.0) {
                return Err(MipError::InvalidProblem(format!(
                    "item {} has invalid quantity {}",
                    i, quantity
                )));
            }
        }
        Ok(())
    }

    /// Item widths.
    pub fn widths(&self) -> Vec<f64> {
        self.demands.iter().map(|d| d.0).collect()
    }

    /// Required quantities.
    pub fn quantities(&self) -> Vec<f64> {
        self.demands.iter().map(|d| d.1).collect()
    }

    /// Total width used by a pattern.
    pub fn pattern_width(&self, pattern: &[u64]) -> f64 {
        pattern
            .iter()
            .zip(&self.demands)
            .map(|(&k, d)| k as f64 * d.0)
            .sum()
    }
}

/// Append-only pool of distinct patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    seen: HashSet<Pattern>,
}

impl PatternSet {
    /// One homogeneous pattern per item: as many copies as fit, at least one.
    pub fn homogeneous(prob: &CuttingStockProblem) -> Self {
        let n = prob.demands.len();
        let mut set = Self::default();
        for (i, &(width, _)) in prob.demands.iter().enumerate() {
            let mut pattern = vec![0; n];
            pattern[i] = if width <= prob.unit_capacity {
                (prob.unit_capacity / width).floor() as u64
            } else {
                log::warn!(
                    "item {} (width {}) exceeds unit capacity {}",
                    i,
                    width,
                    prob.unit_capacity
                );
                1
            };
            set.insert(pattern);
        }
        set
    }

    /// Check for an exact duplicate.
    pub fn contains(&self, pattern: &[u64]) -> bool {
        self.seen.contains(pattern)
    }

    /// Append a pattern unless it is already present.
    ///
    /// Returns true if the pattern was added.
    pub fn insert(&mut self, pattern: Pattern) -> bool {
        if !self.seen.insert(pattern.clone()) {
            return false;
        }
        self.patterns.push(pattern);
        true
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in insertion order.
    pub fn as_slice(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Coverage rows `-P` of the master (one row per item, one column per pattern).
    pub fn negated_coverage(&self, num_items: usize) -> Vec<Vec<f64>> {
        (0..num_items)
            .map(|i| self.patterns.iter().map(|p| -(p[i] as f64)).collect())
            .collect()
    }

    /// Consume into the pattern list.
    pub fn into_patterns(self) -> Vec<Pattern> {
        self.patterns
    }
}
