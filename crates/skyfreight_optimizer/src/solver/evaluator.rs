use serde::Serialize;

use crate::{
    ledger::warehouse::Warehouse,
    problem::{network::FreightNetwork, order::OrderIdx, planning_week},
    solver::{solution::Solution, solver_params::WarehouseViolationCounting},
    utils::enumerate_idx::EnumerateIdx,
};

pub const ON_TIME_WEIGHT: f64 = 1000.0;
pub const FLIGHT_VIOLATION_WEIGHT: f64 = 500.0;
pub const WAREHOUSE_VIOLATION_WEIGHT: f64 = 500.0;
pub const ROUTE_COUNT_WEIGHT: f64 = 100.0;

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SolutionMetrics {
    pub total_orders: usize,
    pub on_time_orders: usize,
    pub flight_violations: usize,
    pub warehouse_violations: usize,
    pub route_count: usize,
    pub fitness: f64,
}

impl SolutionMetrics {
    pub fn on_time_rate(&self) -> f64 {
        if self.total_orders == 0 {
            0.0
        } else {
            self.on_time_orders as f64 / self.total_orders as f64
        }
    }
}

pub fn evaluate(
    network: &FreightNetwork,
    solution: &Solution,
    counting: WarehouseViolationCounting,
) -> SolutionMetrics {
    let on_time_orders = network
        .orders()
        .iter()
        .enumerate_idx()
        .filter(|&(order_id, order)| is_on_time(solution, order_id, order.quantity()))
        .count();

    let flight_violations = solution.ledger().overloaded_flights(network).count();
    let warehouse_violations = count_warehouse_violations(solution.ledger().warehouses(), counting);

    let mut metrics = SolutionMetrics {
        total_orders: network.orders().len(),
        on_time_orders,
        flight_violations,
        warehouse_violations,
        route_count: solution.routes().len(),
        fitness: 0.0,
    };
    metrics.fitness = fitness(&metrics);
    metrics
}

fn is_on_time(solution: &Solution, order_id: OrderIdx, requested: u32) -> bool {
    solution.fulfilled(order_id) >= requested
        && solution
            .routes_of(order_id)
            .all(|route| route.meets_deadline())
}

fn is_overfull(warehouse: &Warehouse) -> bool {
    planning_week::week_hours().any(|moment| warehouse.occupancy_at(moment) > warehouse.capacity())
}

pub fn count_warehouse_violations(
    warehouses: &[Warehouse],
    counting: WarehouseViolationCounting,
) -> usize {
    match counting {
        WarehouseViolationCounting::PerHub => warehouses
            .iter()
            .filter(|warehouse| is_overfull(warehouse))
            .count(),
        WarehouseViolationCounting::AnyHub => {
            usize::from(warehouses.iter().any(|warehouse| is_overfull(warehouse)))
        }
    }
}

pub fn fitness(metrics: &SolutionMetrics) -> f64 {
    let fitness = ON_TIME_WEIGHT * metrics.on_time_rate()
        - FLIGHT_VIOLATION_WEIGHT * metrics.flight_violations as f64
        - WAREHOUSE_VIOLATION_WEIGHT * metrics.warehouse_violations as f64
        + ROUTE_COUNT_WEIGHT / (1.0 + metrics.route_count as f64);

    fitness.max(0.0)
}
