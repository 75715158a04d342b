use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use skyfreight_optimizer::{
    parsers::{
        airports::AirportsParser, flights::FlightsParser, orders::OrdersParser,
        parser::DatasetParser,
    },
    problem::network::{FreightNetwork, FreightNetworkBuilder},
};
use tracing::info;

#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Airports file: one header line, then `code,name,country,capacity,load,utc_offset,continent`
    #[arg(long, env = "SKYFREIGHT_AIRPORTS")]
    pub airports: PathBuf,

    /// Weekly timetable, one `ORIG-DEST-HH:MM-HH:MM-capacity` per line
    #[arg(long, env = "SKYFREIGHT_FLIGHTS")]
    pub flights: PathBuf,

    /// Orders, one `dd-hh-mm-DEST-quantity-client` per line
    #[arg(long, env = "SKYFREIGHT_ORDERS")]
    pub orders: PathBuf,

    /// Airport codes allowed to originate shipments
    #[arg(long, env = "SKYFREIGHT_HUBS", value_delimiter = ',', required = true)]
    pub hubs: Vec<String>,
}

pub fn load_network(args: &DatasetArgs) -> Result<FreightNetwork, anyhow::Error> {
    let airports = AirportsParser
        .parse(&args.airports)
        .with_context(|| format!("Failed to read airports from {}", args.airports.display()))?;
    let schedules = FlightsParser
        .parse(&args.flights)
        .with_context(|| format!("Failed to read flights from {}", args.flights.display()))?;
    let orders = OrdersParser
        .parse(&args.orders)
        .with_context(|| format!("Failed to read orders from {}", args.orders.display()))?;

    info!(
        airports = airports.len(),
        schedules = schedules.len(),
        orders = orders.len(),
        "Dataset loaded"
    );

    let mut builder = FreightNetworkBuilder::default();
    builder
        .set_airports(airports)
        .set_schedules(schedules)
        .set_orders(orders)
        .set_hubs(
            args.hubs
                .iter()
                .map(|hub| hub.trim().to_string())
                .collect(),
        );

    builder.build().context("Invalid freight network")
}
