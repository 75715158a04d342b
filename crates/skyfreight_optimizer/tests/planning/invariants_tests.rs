use skyfreight_optimizer::{
    problem::{order::OrderIdx, planning_week},
    solver::{planner::Planner, solver_params::SolverParams},
};

use crate::test_utils;

#[test]
fn test_committed_capacity_stays_within_limits() {
    for seed in [1, 2, 3] {
        let network = test_utils::create_random_network(seed, 15, 120);
        let solution = Planner::new(&network, SolverParams::default())
            .plan()
            .unwrap();
        let ledger = solution.ledger();

        for (index, flight) in network.flights().iter().enumerate() {
            let load = ledger.flight_load(index.into());
            assert!(load <= flight.max_payload());
        }

        for warehouse in ledger.warehouses() {
            for moment in planning_week::week_hours() {
                assert!(warehouse.occupancy_at(moment) <= warehouse.capacity());
            }
            // Occupancy peaks at an arrival.
            for batch in warehouse.batches() {
                assert!(warehouse.occupancy_at(batch.arrival()) <= warehouse.capacity());
            }
        }

        assert_eq!(solution.metrics().flight_violations, 0);
        assert_eq!(solution.metrics().warehouse_violations, 0);
    }
}

#[test]
fn test_fulfilled_never_exceeds_requested() {
    let network = test_utils::create_random_network(8, 15, 120);
    let solution = Planner::new(&network, SolverParams::default())
        .plan()
        .unwrap();

    for (index, order) in network.orders().iter().enumerate() {
        let order_id = OrderIdx::new(index);
        let routed: u32 = solution.routes_of(order_id).map(|route| route.quantity()).sum();

        assert_eq!(routed, solution.fulfilled(order_id));
        assert!(solution.fulfilled(order_id) <= order.quantity());

        let missing = solution
            .shortfalls()
            .iter()
            .find(|shortfall| shortfall.order == order_id)
            .map_or(0, |shortfall| shortfall.missing);
        assert_eq!(solution.fulfilled(order_id) + missing, order.quantity());
    }
}

#[test]
fn test_routes_are_connected_and_end_at_destination() {
    let network = test_utils::create_random_network(4, 15, 120);
    let solution = Planner::new(&network, SolverParams::default())
        .plan()
        .unwrap();

    for route in solution.routes() {
        let legs = route.legs();
        let first = network.flight(legs[0]);
        assert_eq!(first.origin(), route.hub());

        for pair in legs.windows(2) {
            let (landing, onward) = (network.flight(pair[0]), network.flight(pair[1]));
            assert_eq!(landing.destination(), onward.origin());
            assert!(onward.departure() >= landing.arrival() + jiff::SignedDuration::from_hours(1));
        }

        let order = network.order(route.order());
        let last = network.flight(legs[legs.len() - 1]);
        assert_eq!(network.airport(last.destination()).code(), order.destination());
    }
}
