//! orlab-mip: decomposition and enumeration engines over an LP primitive
//!
//! Three meta-algorithms drive the simplex and knapsack primitives of
//! `orlab-core`:
//!
//! - **Branch-and-bound** for pure integer programs, depth-first with a
//!   guided dive, a rounding heuristic and reduced-cost fixing at the root
//! - **Column generation** for the cutting-stock LP relaxation, pricing
//!   patterns with an unbounded knapsack
//! - **Lagrangian relaxation** for generalized assignment, with per-agent
//!   0/1 knapsacks and a subgradient multiplier update
//!
//! Two thin endpoints solve a continuous LP and the two-stage farmer's
//! problem directly.
//!
//! # Example
//!
//! ```
//! use orlab_mip::{solve_integer_program, IpStatus};
//!
//! // max 5x + 8y s.t. x + y <= 6, 5x + 9y <= 45, x, y integer
//! let sol = solve_integer_program(
//!     vec![5.0, 8.0],
//!     vec![vec![1.0, 1.0], vec![5.0, 9.0]],
//!     vec![6.0, 45.0],
//!     true,
//!     1000,
//! )
//! .unwrap();
//!
//! assert_eq!(sol.status, IpStatus::Optimal);
//! assert!((sol.objective.unwrap() - 40.0).abs() < 1e-9);
//! ```
//!
//! Every engine is a pure function of its input; iteration logs are
//! returned in the result rather than kept in shared state.

#![warn(missing_docs)]

pub mod colgen;
pub mod error;
pub mod lagrangian;
pub mod lp;
pub mod master;
pub mod model;
pub mod oracle;
pub mod search;
pub mod settings;
pub mod stochastic;

pub use colgen::{ColGenStatus, ColumnGeneration, CuttingStockProblem, CuttingStockSolution, Termination};
pub use error::{MipError, MipResult};
pub use lagrangian::{AssignmentProblem, AssignmentSolution, AssignmentStatus, LagrangianRelaxation};
pub use lp::{solve_linear_program_with, LinearProgram, LpSolution};
pub use master::{RelaxationBackend, SimplexBackend};
pub use model::{IntegerProgram, IpSolution, IpStatus};
pub use oracle::{ExactKnapsack, KnapsackOracle};
pub use search::BranchAndBound;
pub use settings::{BnbSettings, ColGenSettings, LagrangianSettings};
pub use stochastic::{solve_farmer_with, FarmerProblem, FarmerSolution, Scenario};

/// Solve a pure integer program with default settings and the simplex backend.
pub fn solve_integer_program(
    c: Vec<f64>,
    a_ub: Vec<Vec<f64>>,
    b_ub: Vec<f64>,
    maximize: bool,
    max_nodes: u64,
) -> MipResult<IpSolution> {
    let prob = IntegerProgram::new(c, a_ub, b_ub, maximize)?;
    let settings = BnbSettings::default().with_max_nodes(max_nodes);
    solve_integer_program_with(&prob, settings, &mut SimplexBackend::default())
}

/// Solve a pure integer program with explicit settings and backend.
pub fn solve_integer_program_with(
    prob: &IntegerProgram,
    settings: BnbSettings,
    backend: &mut dyn RelaxationBackend,
) -> MipResult<IpSolution> {
    BranchAndBound::new(prob, settings).solve(backend)
}

/// Solve the cutting-stock LP relaxation by column generation.
///
/// `demands` holds `(width, quantity)` pairs.
pub fn solve_cutting_stock(unit_capacity: f64, demands: Vec<(f64, f64)>) -> MipResult<CuttingStockSolution> {
    let prob = CuttingStockProblem::new(unit_capacity, demands)?;
    solve_cutting_stock_with(
        &prob,
        ColGenSettings::default(),
        &mut SimplexBackend::default(),
        &mut ExactKnapsack,
    )
}

/// Column generation with explicit settings, master backend and pricing oracle.
pub fn solve_cutting_stock_with(
    prob: &CuttingStockProblem,
    settings: ColGenSettings,
    backend: &mut dyn RelaxationBackend,
    oracle: &mut dyn KnapsackOracle,
) -> MipResult<CuttingStockSolution> {
    ColumnGeneration::new(prob, settings).solve(backend, oracle)
}

/// Lower-bound a generalized assignment problem by Lagrangian relaxation.
///
/// Matrices are indexed `[task][agent]`.
pub fn solve_generalized_assignment(
    costs: Vec<Vec<f64>>,
    weights: Vec<Vec<f64>>,
    capacities: Vec<f64>,
) -> MipResult<AssignmentSolution> {
    let prob = AssignmentProblem::new(costs, weights, capacities)?;
    solve_generalized_assignment_with(&prob, LagrangianSettings::default(), &mut ExactKnapsack)
}

/// Lagrangian relaxation with explicit settings and subproblem oracle.
pub fn solve_generalized_assignment_with(
    prob: &AssignmentProblem,
    settings: LagrangianSettings,
    oracle: &mut dyn KnapsackOracle,
) -> MipResult<AssignmentSolution> {
    LagrangianRelaxation::new(prob, settings).solve(oracle)
}

/// Solve a continuous LP with the simplex backend.
///
/// `bounds` defaults to `x >= 0`; `None` ends are unbounded.
pub fn solve_linear_program(
    c: Vec<f64>,
    a_ub: Vec<Vec<f64>>,
    b_ub: Vec<f64>,
    bounds: Option<Vec<(Option<f64>, Option<f64>)>>,
    maximize: bool,
) -> MipResult<LpSolution> {
    let prog = LinearProgram {
        c,
        a_ub,
        b_ub,
        bounds,
        maximize,
    };
    solve_linear_program_with(&prog, &mut SimplexBackend::default())
}

/// Solve the two-stage farmer's problem with the simplex backend.
pub fn solve_farmer(total_land: f64, scenarios: Vec<Scenario>) -> MipResult<FarmerSolution> {
    let prob = FarmerProblem {
        total_land,
        scenarios,
    };
    solve_farmer_with(&prob, &mut SimplexBackend::default())
}
