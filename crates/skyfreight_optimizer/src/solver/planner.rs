use rand::{SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use tracing::{Level, debug, info, instrument, warn};

use crate::{
    ledger::capacity_ledger::CapacityLedger,
    problem::network::FreightNetwork,
    solver::{
        grasp::Grasp,
        population::Population,
        refine::{NoRefinement, RefinePopulation},
        solution::Solution,
        solver_params::SolverParams,
    },
    timer_debug,
};

/// Drives independent GRASP runs over one network and keeps the fittest plan.
///
/// Every run starts from its own copy of an empty [`CapacityLedger`], so runs never see each
/// other's commits and may execute in parallel.
pub struct Planner<'a, R = NoRefinement> {
    network: &'a FreightNetwork,
    params: SolverParams,
    refinement: R,
}

impl<'a> Planner<'a> {
    pub fn new(network: &'a FreightNetwork, params: SolverParams) -> Self {
        Planner {
            network,
            params,
            refinement: NoRefinement,
        }
    }
}

impl<'a, R: RefinePopulation + Sync> Planner<'a, R> {
    pub fn with_refinement<T: RefinePopulation>(self, refinement: T) -> Planner<'a, T> {
        Planner {
            network: self.network,
            params: self.params,
            refinement,
        }
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Seed of run `run`. Run 0 uses the configured seed.
    pub fn run_seed(&self, run: usize) -> u64 {
        self.params.seed.wrapping_add(run as u64)
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn plan(&self) -> Option<Solution> {
        info!(
            orders = self.network.orders().len(),
            hubs = self.network.hubs().len(),
            flights = self.network.flights().len(),
            runs = self.params.population_size.max(1),
            "Planning started"
        );

        let population = self.plan_population();
        let population = self.refinement.refine(self.network, population);
        let best = population.into_best();

        match &best {
            Some(solution) => {
                let metrics = solution.metrics();
                info!(
                    routes = metrics.route_count,
                    on_time = metrics.on_time_orders,
                    orders = metrics.total_orders,
                    flight_violations = metrics.flight_violations,
                    warehouse_violations = metrics.warehouse_violations,
                    "Planning done, fitness {:.2}",
                    metrics.fitness
                );
            }
            None => warn!("Planning produced no solution"),
        }

        best
    }

    /// Constructs `population_size` solutions, one per seed.
    pub fn plan_population(&self) -> Population {
        let runs = self.params.population_size.max(1);
        let initial_ledger = CapacityLedger::new(self.network);
        let search_pool = self.create_search_thread_pool();

        let run = |index: usize| -> Solution {
            let mut rng = SmallRng::seed_from_u64(self.run_seed(index));
            let mut grasp = Grasp::new(self.network, &self.params);
            if let Some(pool) = &search_pool {
                grasp = grasp.with_search_pool(pool);
            }

            let solution = timer_debug!(
                format!("GRASP run {index}"),
                grasp.run(initial_ledger.clone(), &mut rng)
            );
            debug!(run = index, fitness = solution.fitness(), "Run finished");
            solution
        };

        let solutions: Vec<Solution> = match self.create_run_thread_pool(runs) {
            Some(pool) => pool.install(|| (0..runs).into_par_iter().map(run).collect()),
            None => (0..runs).map(run).collect(),
        };

        let mut population = Population::new(runs);
        for solution in solutions {
            population.add_solution(solution);
        }
        population
    }

    fn create_search_thread_pool(&self) -> Option<rayon::ThreadPool> {
        let threads = self.params.search_threads.number_of_threads();
        if threads <= 1 || self.network.hubs().len() <= 1 {
            return None;
        }

        Self::build_thread_pool(threads)
    }

    fn create_run_thread_pool(&self, runs: usize) -> Option<rayon::ThreadPool> {
        let threads = self.params.run_threads.number_of_threads().min(runs);
        if threads <= 1 {
            return None;
        }

        Self::build_thread_pool(threads)
    }

    fn build_thread_pool(threads: usize) -> Option<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .inspect_err(|error| warn!("Falling back to sequential runs: {error}"))
            .ok()
    }
}
