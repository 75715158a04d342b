use crate::{problem::network::FreightNetwork, solver::population::Population};

/// Improvement step applied to the constructed population before the planner picks its best
/// solution.
pub trait RefinePopulation {
    fn refine(&self, network: &FreightNetwork, population: Population) -> Population;
}

/// Keeps the constructed population as is.
pub struct NoRefinement;

impl RefinePopulation for NoRefinement {
    fn refine(&self, _network: &FreightNetwork, population: Population) -> Population {
        population
    }
}
