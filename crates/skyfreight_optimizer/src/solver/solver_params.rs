#[derive(Clone, Debug)]
pub struct SolverParams {
    pub rcl: RclStrategy,

    /// Attempts per order while quantity remains
    pub max_attempts: usize,

    /// Number of independent GRASP runs the planner keeps
    pub population_size: usize,

    /// Seed of the first run, later runs add their index
    pub seed: u64,

    pub search_threads: Threads,
    pub run_threads: Threads,

    pub warehouse_violations: WarehouseViolationCounting,
}

#[derive(Clone, Debug)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

/// How the restricted candidate list is cut from the scored hub candidates.
#[derive(Clone, Debug, PartialEq)]
pub enum RclStrategy {
    /// Keep the `k` best candidates, at least one.
    Cardinality(usize),
    /// Keep candidates scoring at most `best + alpha * (worst - best)`, `alpha` in `[0, 1]`.
    Threshold { alpha: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarehouseViolationCounting {
    /// Each hub with at least one overfull hour counts once.
    PerHub,
    /// One violation in total if any hub is overfull.
    AnyHub,
}

pub const DEFAULT_RCL_SIZE: usize = 3;
pub const DEFAULT_SEED: u64 = 2025;

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            rcl: RclStrategy::Cardinality(DEFAULT_RCL_SIZE),
            max_attempts: 5,
            population_size: 1,
            seed: DEFAULT_SEED,
            search_threads: Threads::Single,
            run_threads: Threads::Auto,
            warehouse_violations: WarehouseViolationCounting::PerHub,
        }
    }
}
