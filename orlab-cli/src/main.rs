//! Command-line driver for the orlab engines.
//!
//! Each subcommand reads a JSON problem (a file, or `-` for stdin) and
//! prints the JSON result. Set `RUST_LOG` for solver diagnostics.

mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orlab_mip::{
    solve_cutting_stock_with, solve_farmer_with, solve_generalized_assignment_with,
    solve_integer_program_with, solve_linear_program_with, AssignmentProblem, BnbSettings,
    ColGenSettings, CuttingStockProblem, ExactKnapsack, FarmerProblem, IntegerProgram,
    LagrangianSettings, LinearProgram, SimplexBackend,
};

use crate::input::{read_json, read_settings, write_json};

#[derive(Parser, Debug)]
#[command(name = "orlab", version, about = "Integer programming and decomposition engines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log solver progress at info level
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Engine settings as JSON; missing fields keep their defaults
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pure integer program by branch-and-bound
    Ip {
        /// Problem file with c, a_ub, b_ub, maximize
        file: PathBuf,

        /// Node budget
        #[arg(long)]
        max_nodes: Option<u64>,

        /// Skip the rounding heuristic and reduced-cost fixing
        #[arg(long)]
        no_heuristics: bool,
    },

    /// Continuous linear program
    Lp {
        /// Problem file with c, a_ub, b_ub, bounds, maximize
        file: PathBuf,
    },

    /// Cutting-stock LP relaxation by column generation
    CuttingStock {
        /// Problem file with unit_capacity and demands
        file: PathBuf,

        /// Maximum number of generated patterns
        #[arg(long)]
        max_iter: Option<usize>,
    },

    /// Generalized assignment by Lagrangian relaxation
    Assignment {
        /// Problem file with costs, weights, capacities
        file: PathBuf,

        /// Subgradient iterations
        #[arg(long)]
        max_iter: Option<usize>,

        /// Step numerator of the diminishing step size
        #[arg(long)]
        step: Option<f64>,
    },

    /// Two-stage stochastic farmer's problem
    Farmer {
        /// Problem file with total_land and scenarios
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Ip {
            file,
            max_nodes,
            no_heuristics,
        } => {
            let prob: IntegerProgram = read_json(&file)?;
            let mut settings: BnbSettings = read_settings(cli.settings.as_deref())?;
            settings.verbose |= cli.verbose;
            if let Some(n) = max_nodes {
                settings = settings.with_max_nodes(n);
            }
            if no_heuristics {
                settings = settings.with_root_heuristics(false);
            }
            let sol = solve_integer_program_with(&prob, settings, &mut SimplexBackend::default())
                .context("Branch-and-bound failed")?;
            log::info!("{} after {} nodes", sol.status, sol.nodes_explored);
            write_json(&sol, cli.compact)
        }
        Commands::Lp { file } => {
            let prog: LinearProgram = read_json(&file)?;
            let sol = solve_linear_program_with(&prog, &mut SimplexBackend::default())
                .context("LP solve failed")?;
            write_json(&sol, cli.compact)
        }
        Commands::CuttingStock { file, max_iter } => {
            let prob: CuttingStockProblem = read_json(&file)?;
            let mut settings: ColGenSettings = read_settings(cli.settings.as_deref())?;
            settings.verbose |= cli.verbose;
            if let Some(n) = max_iter {
                settings = settings.with_max_iter(n);
            }
            let sol = solve_cutting_stock_with(
                &prob,
                settings,
                &mut SimplexBackend::default(),
                &mut ExactKnapsack,
            )
            .context("Column generation failed")?;
            write_json(&sol, cli.compact)
        }
        Commands::Assignment {
            file,
            max_iter,
            step,
        } => {
            let prob: AssignmentProblem = read_json(&file)?;
            let mut settings: LagrangianSettings = read_settings(cli.settings.as_deref())?;
            settings.verbose |= cli.verbose;
            if let Some(n) = max_iter {
                settings = settings.with_max_iter(n);
            }
            if let Some(step) = step {
                settings = settings.with_step_numerator(step);
            }
            let sol = solve_generalized_assignment_with(&prob, settings, &mut ExactKnapsack)
                .context("Lagrangian relaxation failed")?;
            write_json(&sol, cli.compact)
        }
        Commands::Farmer { file } => {
            let prob: FarmerProblem = read_json(&file)?;
            let sol = solve_farmer_with(&prob, &mut SimplexBackend::default())
                .context("Farmer solve failed")?;
            write_json(&sol, cli.compact)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ip_flags() {
        let cli = Cli::parse_from(["orlab", "ip", "model.json", "--max-nodes", "10", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Ip { file, max_nodes, no_heuristics } => {
                assert_eq!(file, PathBuf::from("model.json"));
                assert_eq!(max_nodes, Some(10));
                assert!(!no_heuristics);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_stdin_path() {
        let cli = Cli::parse_from(["orlab", "cutting-stock", "-"]);
        assert!(matches!(cli.command, Commands::CuttingStock { max_iter: None, .. }));
        assert!(cli.settings.is_none());
    }
}
