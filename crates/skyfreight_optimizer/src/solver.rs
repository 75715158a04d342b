pub mod candidate;
pub mod deadline;
pub mod evaluator;
pub mod grasp;
pub mod planner;
pub mod population;
pub mod refine;
pub mod route_search;
pub mod solution;
pub mod solver_params;
