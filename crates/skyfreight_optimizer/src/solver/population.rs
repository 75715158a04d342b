use crate::solver::solution::Solution;

/// Solutions kept sorted by decreasing fitness. Among equal fitness, the one added first stays
/// ahead.
pub struct Population {
    population_size: usize,
    solutions: Vec<Solution>,
}

impl Population {
    pub fn new(population_size: usize) -> Self {
        Population {
            population_size,
            solutions: Vec::with_capacity(population_size),
        }
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn best(&self) -> Option<&Solution> {
        self.solutions.first()
    }

    pub fn into_best(self) -> Option<Solution> {
        self.solutions.into_iter().next()
    }

    pub fn add_solution(&mut self, solution: Solution) {
        let is_duplicate = self.solutions.iter().any(|existing| {
            existing.fitness() == solution.fitness() && existing.is_identical(&solution)
        });

        // Identical runs add nothing to the population
        if is_duplicate {
            return;
        }

        let position = self
            .solutions
            .partition_point(|existing| existing.fitness() >= solution.fitness());

        if position >= self.population_size {
            return;
        }

        if self.solutions.len() == self.population_size {
            self.solutions.pop();
        }

        self.solutions.insert(position, solution);
    }
}
