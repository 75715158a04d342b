use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, anyhow};
use clap::Args;
use skyfreight_optimizer::{
    problem::network::FreightNetwork,
    solver::{
        planner::Planner,
        solution::Solution,
        solver_params::{
            DEFAULT_SEED, RclStrategy, SolverParams, Threads, WarehouseViolationCounting,
        },
    },
};
use tracing::info;

use crate::{
    dataset::{self, DatasetArgs},
    parsers, report,
};

#[derive(Args, Debug)]
pub struct SolverArgs {
    /// Keep the `k` best hub itineraries in the candidate list
    #[arg(long, env = "SKYFREIGHT_RCL_SIZE", value_parser = parsers::parse_rcl_size, conflicts_with = "alpha")]
    pub rcl_size: Option<usize>,

    /// Keep hub itineraries scoring within `alpha` of the best (0 = greedy, 1 = all)
    #[arg(long, env = "SKYFREIGHT_ALPHA", value_parser = parsers::parse_alpha)]
    pub alpha: Option<f64>,

    /// Attempts per order while quantity remains
    #[arg(long, env = "SKYFREIGHT_ATTEMPTS", default_value_t = 5)]
    pub attempts: usize,

    /// Number of independent runs, the fittest one is kept
    #[arg(long, env = "SKYFREIGHT_POPULATION", default_value_t = 1)]
    pub population: usize,

    #[arg(long, env = "SKYFREIGHT_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Threads running independent runs (a number or `auto`)
    #[arg(long, env = "SKYFREIGHT_THREADS", value_parser = parsers::parse_threads, default_value = "auto")]
    pub threads: Threads,

    /// Threads searching hub itineraries within one attempt (a number or `auto`)
    #[arg(long, env = "SKYFREIGHT_SEARCH_THREADS", value_parser = parsers::parse_threads, default_value = "1")]
    pub search_threads: Threads,

    /// Count a single warehouse violation when any hub overflows, instead of one per hub
    #[arg(long)]
    pub any_hub_violation: bool,
}

impl SolverArgs {
    pub fn solver_params(&self) -> SolverParams {
        let defaults = SolverParams::default();
        let rcl = match (self.rcl_size, self.alpha) {
            (_, Some(alpha)) => RclStrategy::Threshold { alpha },
            (Some(size), None) => RclStrategy::Cardinality(size),
            (None, None) => defaults.rcl.clone(),
        };

        SolverParams {
            rcl,
            max_attempts: self.attempts,
            population_size: self.population.max(1),
            seed: self.seed,
            search_threads: self.search_threads.clone(),
            run_threads: self.threads.clone(),
            warehouse_violations: if self.any_hub_violation {
                WarehouseViolationCounting::AnyHub
            } else {
                WarehouseViolationCounting::PerHub
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub solver: SolverArgs,

    /// Writes the plan as JSON
    #[arg(short, long, env = "SKYFREIGHT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Also prints every route
    #[arg(long)]
    pub routes: bool,
}

/// Loads the dataset and plans it with the solver flags.
pub fn load_and_plan(
    dataset: &DatasetArgs,
    solver: &SolverArgs,
) -> Result<(FreightNetwork, Solution), anyhow::Error> {
    let network = dataset::load_network(dataset)?;
    let params = solver.solver_params();
    info!(?params, "Solver parameters");

    let solution = Planner::new(&network, params)
        .plan()
        .ok_or_else(|| anyhow!("The planner produced no solution"))?;

    Ok((network, solution))
}

pub fn run(args: PlanArgs) -> Result<(), anyhow::Error> {
    let (network, solution) = load_and_plan(&args.dataset, &args.solver)?;

    println!("{}", report::summary_table(&solution));
    if !solution.shortfalls().is_empty() {
        println!("{}", report::shortfalls_table(&network, &solution));
    }
    if args.routes {
        println!("{}", report::routes_table(&network, &solution));
    }

    if let Some(output) = &args.output {
        let file = File::create(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        serde_json::to_writer_pretty(
            BufWriter::new(file),
            &report::PlanReport::new(&network, &solution),
        )?;
        info!("Plan written to {}", output.display());
    }

    Ok(())
}
