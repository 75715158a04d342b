use std::io::Write;

use skyfreight_optimizer::{
    parsers::{
        airports::AirportsParser, flights::FlightsParser, orders::OrdersParser,
        parser::DatasetParser,
    },
    problem::network::{FreightNetworkBuilder, NetworkError},
    solver::{planner::Planner, solver_params::SolverParams},
};

const AIRPORTS: &str = "\
code,name,country,capacity,current_load,utc_offset,continent
SPIM,Lima,Peru,440,0,-5,America del Sur
SKBO,Bogota,Colombia,430,0,-5,America del Sur
EBCI,Bruselas,Belgica,440,0,+2,Europa
";

const FLIGHTS: &str = "\
SPIM-SKBO-03:34-05:21-0300
SKBO-EBCI-09:00-23:10-0250
SKBO-XXXX-09:00-13:10-0250
";

const ORDERS: &str = "\
01-01-00-SKBO-012-0000001
01-02-00-EBCI-030-0000002
";

fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("skyfreight-{}-{name}", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_load_and_plan_from_files() {
    let airports = AirportsParser
        .parse(write_temp("airports.csv", AIRPORTS))
        .unwrap();
    let schedules = FlightsParser.parse(write_temp("flights.txt", FLIGHTS)).unwrap();
    let orders = OrdersParser.parse(write_temp("orders.txt", ORDERS)).unwrap();

    let mut builder = FreightNetworkBuilder::default();
    builder
        .set_airports(airports)
        .set_schedules(schedules)
        .set_orders(orders)
        .set_hubs(vec![String::from("SPIM")]);
    let network = builder.build().unwrap();

    // The line towards an unknown airport is dropped, the others fly every day.
    assert_eq!(network.flights().len(), 14);

    let solution = Planner::new(&network, SolverParams::default())
        .plan()
        .unwrap();

    assert_eq!(solution.metrics().total_orders, 2);
    assert_eq!(solution.metrics().on_time_orders, 2);

    let json = serde_json::to_value(&solution).unwrap();
    assert_eq!(json["metrics"]["on_time_orders"], 2);
    assert!(json["routes"].as_array().unwrap().len() >= 2);
}

#[test]
fn test_unknown_hub_is_an_error() {
    let airports = AirportsParser.parse_str(AIRPORTS).unwrap();

    let mut builder = FreightNetworkBuilder::default();
    builder
        .set_airports(airports)
        .set_hubs(vec![String::from("UBBB")]);

    assert!(matches!(
        builder.build(),
        Err(NetworkError::UnknownHub(code)) if code == "UBBB"
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let error = OrdersParser
        .parse(std::env::temp_dir().join("skyfreight-does-not-exist.txt"))
        .unwrap_err();

    assert!(matches!(
        error,
        skyfreight_optimizer::parsers::parser::ParseError::Io(_)
    ));
}
