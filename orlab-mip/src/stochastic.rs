//! Two-stage stochastic farm planning.
//!
//! A farmer splits `total_land` acres between wheat, corn and sugar beets
//! before the yield is known. After the harvest, in each scenario `s`, the
//! farmer sells surplus, buys any shortfall of the cattle-feed demand, and
//! sells beets at a quota price up to the quota and at a lower price above
//! it. The deterministic equivalent
//!
//! ```text
//! min  sum_k plant_k x_k + sum_s p_s (buy . y_s - sell . w_s - 36 z1_s - 10 z2_s)
//! s.t. x_0 + x_1 + x_2 <= total_land
//!      yield_s,k x_k + y_s,k - w_s,k >= demand_k      k in {wheat, corn}
//!      yield_s,2 x_2 - z1_s - z2_s  = 0
//!      z1_s <= quota
//! ```
//!
//! is one call to the relaxation primitive.

use orlab_core::{LpProblem, Sense, SolveStatus};
use serde::{Deserialize, Serialize};

use crate::error::{MipError, MipResult};
use crate::master::{solve_checked, RelaxationBackend};

/// Planting cost per acre: wheat, corn, beets.
pub const PLANTING_COST: [f64; 3] = [150.0, 230.0, 260.0];

/// Selling price per ton: wheat, corn, beets under quota, beets over quota.
pub const SELL_PRICE: [f64; 4] = [170.0, 150.0, 36.0, 10.0];

/// Purchase price per ton: wheat, corn.
pub const BUY_PRICE: [f64; 2] = [238.0, 210.0];

/// Feed requirement in tons: wheat, corn.
pub const FEED_DEMAND: [f64; 2] = [200.0, 240.0];

/// Beet tonnage sold at the quota price.
pub const BEET_QUOTA: f64 = 6000.0;

const PER_SCENARIO: usize = 6;

/// One yield outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Label for reports.
    #[serde(default)]
    pub name: String,

    /// Probability weight.
    pub probability: f64,

    /// Tons per acre: wheat, corn, beets.
    pub yields: [f64; 3],
}

/// Farm planning instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerProblem {
    /// Acres available.
    pub total_land: f64,

    /// Yield scenarios.
    pub scenarios: Vec<Scenario>,
}

/// Result of the farm planning solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerSolution {
    /// True when an optimal plan was found.
    pub success: bool,

    /// Primitive status.
    pub status: SolveStatus,

    /// Acres planted: wheat, corn, beets.
    pub x: Option<Vec<f64>>,

    /// Expected profit of the plan.
    pub expected_profit: Option<f64>,

    /// Profit realized in each scenario.
    pub scenario_profits: Vec<f64>,
}

impl FarmerProblem {
    /// Check land, probabilities and yields.
    pub fn validate(&self) -> MipResult<()> {
        if !(self.total_land.is_finite() && self.total_land >= 0.0) {
            return Err(MipError::InvalidProblem(format!(
                "total land must be non-negative, got {}",
                self.total_land
            )));
        }
        if self.scenarios.is_empty() {
            return Err(MipError::InvalidProblem("no scenarios".to_string()));
        }
        for (s, scen) in self.scenarios.iter().enumerate() {
            let bad = !(scen.probability.is_finite() && scen.probability >= 0.0)
                || scen.yields.iter().any(|y| !(y.is_finite() && *y >= 0.0));
            if bad {
                return Err(MipError::InvalidProblem(format!(
                    "scenario {} has invalid probability or yields",
                    s
                )));
            }
        }
        let total: f64 = self.scenarios.iter().map(|s| s.probability).sum();
        if (total - 1.0).abs() > 1e-6 {
            log::warn!("scenario probabilities sum to {}", total);
        }
        Ok(())
    }

    /// Build the deterministic-equivalent LP.
    pub fn deterministic_equivalent(&self) -> LpProblem {
        let n = 3 + PER_SCENARIO * self.scenarios.len();
        let mut c = vec![0.0; n];
        c[..3].copy_from_slice(&PLANTING_COST);

        let mut land = vec![0.0; n];
        land[..3].fill(1.0);
        let mut a_ub = vec![land];
        let mut b_ub = vec![self.total_land];
        let mut a_eq = Vec::new();
        let mut b_eq = Vec::new();

        // per scenario: w_wheat, w_corn, y_wheat, y_corn, z_quota, z_excess
        for (s, scen) in self.scenarios.iter().enumerate() {
            let base = 3 + s * PER_SCENARIO;
            let p = scen.probability;
            c[base] = -SELL_PRICE[0] * p;
            c[base + 1] = -SELL_PRICE[1] * p;
            c[base + 2] = BUY_PRICE[0] * p;
            c[base + 3] = BUY_PRICE[1] * p;
            c[base + 4] = -SELL_PRICE[2] * p;
            c[base + 5] = -SELL_PRICE[3] * p;

            for k in 0..2 {
                let mut row = vec![0.0; n];
                row[k] = -scen.yields[k];
                row[base + k] = 1.0;
                row[base + 2 + k] = -1.0;
                a_ub.push(row);
                b_ub.push(-FEED_DEMAND[k]);
            }

            let mut beets = vec![0.0; n];
            beets[2] = scen.yields[2];
            beets[base + 4] = -1.0;
            beets[base + 5] = -1.0;
            a_eq.push(beets);
            b_eq.push(0.0);

            let mut quota = vec![0.0; n];
            quota[base + 4] = 1.0;
            a_ub.push(quota);
            b_ub.push(BEET_QUOTA);
        }

        LpProblem::new(c, Sense::Minimize)
            .with_inequalities(a_ub, b_ub)
            .with_equalities(a_eq, b_eq)
    }

    fn scenario_profits(&self, x: &[f64]) -> Vec<f64> {
        let planting: f64 = x[..3].iter().zip(&PLANTING_COST).map(|(a, c)| a * c).sum();
        (0..self.scenarios.len())
            .map(|s| {
                let v = &x[3 + s * PER_SCENARIO..3 + (s + 1) * PER_SCENARIO];
                let revenue = v[0] * SELL_PRICE[0]
                    + v[1] * SELL_PRICE[1]
                    + v[4] * SELL_PRICE[2]
                    + v[5] * SELL_PRICE[3];
                let purchase = v[2] * BUY_PRICE[0] + v[3] * BUY_PRICE[1];
                revenue - purchase - planting
            })
            .collect()
    }
}

/// Solve the farm planning problem.
pub fn solve_farmer_with(
    prob: &FarmerProblem,
    backend: &mut dyn RelaxationBackend,
) -> MipResult<FarmerSolution> {
    prob.validate()?;
    let res = solve_checked(backend, &prob.deterministic_equivalent())?;
    if !res.status.is_optimal() {
        log::warn!("farmer problem not solved: {}", res.status);
        return Ok(FarmerSolution {
            success: false,
            status: res.status,
            x: None,
            expected_profit: None,
            scenario_profits: Vec::new(),
        });
    }

    Ok(FarmerSolution {
        success: true,
        status: res.status,
        x: Some(res.x[..3].to_vec()),
        expected_profit: Some(-res.obj_val),
        scenario_profits: prob.scenario_profits(&res.x),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::SimplexBackend;

    fn scenario(name: &str, yields: [f64; 3]) -> Scenario {
        Scenario {
            name: name.to_string(),
            probability: 1.0 / 3.0,
            yields,
        }
    }

    #[test]
    fn test_three_scenarios() {
        let prob = FarmerProblem {
            total_land: 500.0,
            scenarios: vec![
                scenario("good", [3.0, 3.6, 24.0]),
                scenario("average", [2.5, 3.0, 20.0]),
                scenario("bad", [2.0, 2.4, 16.0]),
            ],
        };
        let sol = solve_farmer_with(&prob, &mut SimplexBackend::default()).unwrap();
        assert!(sol.success);

        let x = sol.x.unwrap();
        assert!((x[0] - 170.0).abs() < 1e-6);
        assert!((x[1] - 80.0).abs() < 1e-6);
        assert!((x[2] - 250.0).abs() < 1e-6);
        assert!((sol.expected_profit.unwrap() - 108_390.0).abs() < 1e-4);

        let mean: f64 = sol.scenario_profits.iter().sum::<f64>() / 3.0;
        assert!((mean - 108_390.0).abs() < 1e-4);
    }

    #[test]
    fn test_model_shape() {
        let prob = FarmerProblem {
            total_land: 500.0,
            scenarios: vec![scenario("a", [2.5, 3.0, 20.0]), scenario("b", [2.0, 2.4, 16.0])],
        };
        let lp = prob.deterministic_equivalent();
        assert_eq!(lp.num_vars(), 15);
        assert_eq!(lp.num_inequalities(), 7);
        assert_eq!(lp.num_equalities(), 2);
    }

    #[test]
    fn test_rejects_bad_input() {
        let prob = FarmerProblem {
            total_land: -1.0,
            scenarios: vec![scenario("a", [2.5, 3.0, 20.0])],
        };
        assert!(solve_farmer_with(&prob, &mut SimplexBackend::default()).is_err());

        let prob = FarmerProblem {
            total_land: 100.0,
            scenarios: vec![],
        };
        assert!(matches!(prob.validate(), Err(MipError::InvalidProblem(_))));
    }
}
