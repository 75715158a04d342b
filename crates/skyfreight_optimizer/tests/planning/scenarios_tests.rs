use jiff::SignedDuration;
use skyfreight_optimizer::{
    ledger::capacity_ledger::CapacityLedger,
    problem::{airport::Continent, flight::FlightIdx, order::OrderIdx},
    solver::{
        deadline,
        planner::Planner,
        route_search::RouteSearch,
        solution::ShortfallReason,
        solver_params::SolverParams,
    },
};

use crate::test_utils::{self, week_time};

#[test]
fn test_single_direct_flight() {
    let network = test_utils::create_network(
        vec![
            test_utils::create_airport("SPIM", Continent::America, -5, 1000),
            test_utils::create_airport("SKBO", Continent::America, -5, 1000),
        ],
        &["SPIM"],
        vec![test_utils::create_flight(
            "SPIM",
            "SKBO",
            (1, 12, 0),
            (1, 15, 0),
            50,
        )],
        vec![test_utils::create_order((1, 8, 0), "SKBO", 10, "0000001")],
    );

    let solution = Planner::new(&network, SolverParams::default())
        .plan()
        .unwrap();

    assert_eq!(solution.routes().len(), 1);
    let route = &solution.routes()[0];
    assert_eq!(route.quantity(), 10);
    assert_eq!(route.legs(), &[FlightIdx::new(0)]);
    assert!(route.meets_deadline());
    assert_eq!(solution.fulfilled(OrderIdx::new(0)), 10);
    assert_eq!(solution.metrics().on_time_orders, 1);
    assert_eq!(solution.metrics().total_orders, 1);
    assert_eq!(solution.metrics().flight_violations, 0);
    assert_eq!(solution.metrics().warehouse_violations, 0);
    // 1000 for the on-time rate plus 100 / (1 + 1 route)
    assert!((solution.fitness() - 1050.0).abs() < 1e-9);
}

#[test]
fn test_unreachable_destination() {
    let network = test_utils::create_network(
        vec![
            test_utils::create_airport("SPIM", Continent::America, -5, 1000),
            test_utils::create_airport("SKBO", Continent::America, -5, 1000),
            test_utils::create_airport("SEQM", Continent::America, -5, 1000),
        ],
        &["SPIM"],
        vec![test_utils::create_flight(
            "SPIM",
            "SKBO",
            (1, 12, 0),
            (1, 15, 0),
            50,
        )],
        vec![test_utils::create_order((1, 8, 0), "SEQM", 10, "0000001")],
    );

    let solution = Planner::new(&network, SolverParams::default())
        .plan()
        .unwrap();

    assert_eq!(solution.fulfilled(OrderIdx::new(0)), 0);
    assert!(solution.routes().is_empty());
    assert_eq!(solution.metrics().on_time_orders, 0);
    assert_eq!(solution.shortfalls().len(), 1);
    assert_eq!(
        solution.shortfalls()[0].reason,
        ShortfallReason::NoFeasibleRoute
    );
    assert_eq!(solution.shortfalls()[0].missing, 10);
}

#[test]
fn test_orders_compete_for_last_unit() {
    let network = test_utils::create_network(
        vec![
            test_utils::create_airport("EBCI", Continent::Europe, 1, 1000),
            test_utils::create_airport("LATI", Continent::Europe, 1, 1000),
        ],
        &["EBCI"],
        vec![test_utils::create_flight(
            "EBCI",
            "LATI",
            (2, 9, 0),
            (2, 11, 0),
            1,
        )],
        vec![
            test_utils::create_order((1, 20, 0), "LATI", 1, "0000001"),
            test_utils::create_order((1, 21, 0), "LATI", 1, "0000002"),
        ],
    );

    let solution = Planner::new(&network, SolverParams::default())
        .plan()
        .unwrap();

    assert_eq!(solution.routes().len(), 1);
    assert_eq!(solution.fulfilled(OrderIdx::new(0)), 1);
    assert_eq!(solution.fulfilled(OrderIdx::new(1)), 0);
    assert_eq!(solution.ledger().flight_load(FlightIdx::new(0)), 1);
    assert_eq!(solution.metrics().flight_violations, 0);
    assert_eq!(solution.metrics().on_time_orders, 1);
}

#[test]
fn test_overlapping_transit_batches_block_the_warehouse() {
    let network = test_utils::create_network(
        vec![
            test_utils::create_airport("UBBB", Continent::Asia, 4, 1000),
            test_utils::create_airport("OMDB", Continent::Asia, 4, 5),
            test_utils::create_airport("VIDP", Continent::Asia, 5, 1000),
        ],
        &["UBBB"],
        vec![
            test_utils::create_flight("UBBB", "OMDB", (2, 6, 0), (2, 8, 0), 10),
            test_utils::create_flight("UBBB", "OMDB", (2, 9, 0), (2, 11, 0), 10),
            test_utils::create_flight("OMDB", "VIDP", (2, 14, 0), (2, 18, 0), 10),
            test_utils::create_flight("OMDB", "VIDP", (2, 16, 0), (2, 20, 0), 10),
        ],
        vec![],
    );
    let omdb = network.airport_id("OMDB").unwrap();
    let mut ledger = CapacityLedger::new(&network);

    ledger.commit_itinerary(
        &network,
        OrderIdx::new(0),
        &[FlightIdx::new(0), FlightIdx::new(2)],
        3,
    );
    ledger.commit_itinerary(
        &network,
        OrderIdx::new(1),
        &[FlightIdx::new(1), FlightIdx::new(3)],
        3,
    );

    let warehouse = ledger.warehouse(omdb);
    assert_eq!(warehouse.occupancy_at(week_time((2, 12, 0))), 6);
    assert!(!warehouse.has_room_for_interval(1, week_time((2, 11, 0)), week_time((2, 14, 0))));
    assert!(warehouse.has_room_for_interval(1, week_time((2, 17, 0)), week_time((2, 18, 0))));

    // No leg may land in OMDB while both batches are there.
    let search = RouteSearch::new(&network, &ledger);
    assert!(
        search
            .find(
                network.airport_id("UBBB").unwrap(),
                omdb,
                week_time((2, 8, 0)),
                SignedDuration::from_hours(48),
            )
            .is_none()
    );
}

#[test]
fn test_deadline_boundary() {
    let network = test_utils::create_network(
        vec![
            test_utils::create_airport("SPIM", Continent::America, -5, 1000),
            test_utils::create_airport("SKBO", Continent::America, -5, 1000),
            test_utils::create_airport("SEQM", Continent::America, -5, 1000),
        ],
        &["SPIM"],
        vec![
            test_utils::create_flight("SPIM", "SKBO", (3, 5, 0), (3, 8, 0), 50),
            test_utils::create_flight("SPIM", "SEQM", (3, 5, 0), (3, 8, 1), 50),
        ],
        vec![
            test_utils::create_order((1, 8, 0), "SKBO", 5, "0000001"),
            test_utils::create_order((1, 8, 0), "SEQM", 5, "0000002"),
        ],
    );
    let spim = network.airport(network.airport_id("SPIM").unwrap());
    let skbo = network.airport(network.airport_id("SKBO").unwrap());
    let window = deadline::deadline_window(spim, skbo);

    assert_eq!(window, SignedDuration::from_hours(48));
    assert!(deadline::is_met(
        &network,
        &[FlightIdx::new(0)],
        week_time((1, 8, 0)),
        skbo,
        window
    ));
    assert!(!deadline::is_met(
        &network,
        &[FlightIdx::new(1)],
        week_time((1, 8, 0)),
        skbo,
        window
    ));

    let solution = Planner::new(&network, SolverParams::default())
        .plan()
        .unwrap();

    assert_eq!(solution.fulfilled(OrderIdx::new(0)), 5);
    assert_eq!(solution.fulfilled(OrderIdx::new(1)), 0);
    assert_eq!(solution.metrics().on_time_orders, 1);
}

#[test]
fn test_other_continent_gets_three_days() {
    let network = test_utils::create_network(
        vec![
            test_utils::create_airport("EBCI", Continent::Europe, 1, 1000),
            test_utils::create_airport("SKBO", Continent::America, -5, 1000),
        ],
        &["EBCI"],
        vec![test_utils::create_flight(
            "EBCI",
            "SKBO",
            (3, 22, 0),
            (4, 3, 0),
            50,
        )],
        vec![test_utils::create_order((1, 20, 0), "SKBO", 5, "0000001")],
    );

    let solution = Planner::new(&network, SolverParams::default())
        .plan()
        .unwrap();

    assert_eq!(solution.fulfilled(OrderIdx::new(0)), 5);
    assert!(solution.routes()[0].meets_deadline());
}

#[test]
fn test_transit_window_ending_off_the_hour_is_checked() {
    let network = test_utils::create_network(
        vec![
            test_utils::create_airport("EBCI", Continent::Europe, 1, 1000),
            test_utils::create_airport("LOWW", Continent::Europe, 1, 5),
            test_utils::create_airport("LATI", Continent::Europe, 1, 1000),
        ],
        &["EBCI"],
        vec![
            test_utils::create_flight("EBCI", "LOWW", (2, 10, 0), (2, 12, 45), 10),
            test_utils::create_flight("EBCI", "LOWW", (2, 8, 0), (2, 10, 30), 10),
            test_utils::create_flight("LOWW", "LATI", (2, 13, 10), (2, 15, 0), 10),
        ],
        vec![
            test_utils::create_order((2, 9, 0), "LOWW", 5, "0000001"),
            test_utils::create_order((1, 8, 0), "LATI", 5, "0000002"),
        ],
    );
    let loww = network.airport_id("LOWW").unwrap();

    let solution = Planner::new(&network, SolverParams::default())
        .plan()
        .unwrap();

    // The second order would stay in LOWW from 10:30 to 13:10, while the first one lands at
    // 12:45 and fills the warehouse.
    assert_eq!(solution.fulfilled(OrderIdx::new(0)), 5);
    assert_eq!(solution.fulfilled(OrderIdx::new(1)), 0);
    assert_eq!(
        solution.shortfalls()[0].reason,
        ShortfallReason::CapacityExhausted
    );

    let warehouse = solution.ledger().warehouse(loww);
    let peak = (0..24 * 60)
        .map(|minute| week_time((2, (minute / 60) as i8, (minute % 60) as i8)))
        .map(|moment| warehouse.occupancy_at(moment))
        .max()
        .unwrap();
    assert!(peak <= warehouse.capacity());
    assert_eq!(solution.metrics().warehouse_violations, 0);
}
