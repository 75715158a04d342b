use serde::Serialize;

use crate::{
    ledger::capacity_ledger::CapacityLedger,
    problem::{airport::AirportIdx, flight::FlightIdx, network::FreightNetwork, order::OrderIdx},
    solver::{
        evaluator::{self, SolutionMetrics},
        route_search::Legs,
        solver_params::WarehouseViolationCounting,
    },
};

/// A quantity of one order shipped from `hub` along `legs`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Route {
    order: OrderIdx,
    hub: AirportIdx,
    legs: Legs,
    quantity: u32,
    meets_deadline: bool,
}

impl Route {
    pub fn new(
        order: OrderIdx,
        hub: AirportIdx,
        legs: Legs,
        quantity: u32,
        meets_deadline: bool,
    ) -> Self {
        Route {
            order,
            hub,
            legs,
            quantity,
            meets_deadline,
        }
    }

    pub fn order(&self) -> OrderIdx {
        self.order
    }

    pub fn hub(&self) -> AirportIdx {
        self.hub
    }

    pub fn legs(&self) -> &[FlightIdx] {
        &self.legs
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn meets_deadline(&self) -> bool {
        self.meets_deadline
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortfallReason {
    UnknownDestination,
    /// No hub had a deadline-compliant itinerary.
    NoFeasibleRoute,
    /// Itineraries existed but none had room left.
    CapacityExhausted,
    RetriesExhausted,
}

/// An order left (partially) unserved at the end of a run.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderShortfall {
    pub order: OrderIdx,
    pub missing: u32,
    pub reason: ShortfallReason,
}

/// Outcome of one constructive run: the committed routes, how much of each order they serve and
/// the capacity state they left behind.
#[derive(Serialize, Debug, Clone)]
pub struct Solution {
    routes: Vec<Route>,
    fulfilled: Vec<u32>,
    shortfalls: Vec<OrderShortfall>,
    metrics: SolutionMetrics,

    #[serde(skip)]
    ledger: CapacityLedger,
}

impl Solution {
    pub fn new(
        network: &FreightNetwork,
        routes: Vec<Route>,
        shortfalls: Vec<OrderShortfall>,
        ledger: CapacityLedger,
        counting: WarehouseViolationCounting,
    ) -> Self {
        let mut fulfilled = vec![0; network.orders().len()];
        for route in &routes {
            fulfilled[route.order.get()] += route.quantity;
        }

        let mut solution = Solution {
            routes,
            fulfilled,
            shortfalls,
            metrics: SolutionMetrics::default(),
            ledger,
        };
        solution.metrics = evaluator::evaluate(network, &solution, counting);
        solution
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn routes_of(&self, order_id: OrderIdx) -> impl Iterator<Item = &Route> {
        self.routes
            .iter()
            .filter(move |route| route.order == order_id)
    }

    pub fn fulfilled(&self, order_id: OrderIdx) -> u32 {
        self.fulfilled[order_id.get()]
    }

    pub fn shortfalls(&self) -> &[OrderShortfall] {
        &self.shortfalls
    }

    pub fn metrics(&self) -> &SolutionMetrics {
        &self.metrics
    }

    pub fn fitness(&self) -> f64 {
        self.metrics.fitness
    }

    pub fn ledger(&self) -> &CapacityLedger {
        &self.ledger
    }

    pub fn is_identical(&self, other: &Solution) -> bool {
        self.routes == other.routes
    }
}
