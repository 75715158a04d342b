pub mod airport;
pub mod flight;
pub mod network;
pub mod order;
pub mod planning_week;
