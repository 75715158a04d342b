use jiff::civil::{self, DateTime};

use crate::problem::{
    airport::{Airport, AirportBuilder, Continent},
    network::{DatedFlight, FreightNetwork, FreightNetworkBuilder},
    order::Order,
};

pub const DEFAULT_WAREHOUSE_CAPACITY: u32 = 1000;

/// (day, hour, minute) in the planning week.
pub type WeekTime = (i8, i8, i8);

pub fn week_time((day, hour, minute): WeekTime) -> DateTime {
    civil::datetime(2025, 1, day, hour, minute, 0, 0)
}

pub struct TestFlight {
    pub origin: &'static str,
    pub destination: &'static str,
    pub departure: WeekTime,
    pub arrival: WeekTime,
    pub max_payload: u32,
}

impl TestFlight {
    pub fn new(
        origin: &'static str,
        destination: &'static str,
        departure: WeekTime,
        arrival: WeekTime,
        max_payload: u32,
    ) -> Self {
        TestFlight {
            origin,
            destination,
            departure,
            arrival,
            max_payload,
        }
    }
}

pub struct TestOrder {
    pub registered_at: WeekTime,
    pub destination: &'static str,
    pub quantity: u32,
}

impl TestOrder {
    pub fn new(registered_at: WeekTime, destination: &'static str, quantity: u32) -> Self {
        TestOrder {
            registered_at,
            destination,
            quantity,
        }
    }
}

pub fn create_airport(code: &str, utc_offset_hours: i8, capacity: u32) -> Airport {
    let mut builder = AirportBuilder::default();
    builder
        .set_code(code.to_string())
        .set_continent(Continent::Europe)
        .set_utc_offset_hours(utc_offset_hours)
        .set_capacity(capacity);
    builder.build()
}

/// Network where every airport has a large warehouse and all of them share a continent.
/// Flights are dated, not expanded over the week, and keep the index they are given in.
pub fn create_test_network(
    airports: &[(&str, i8)],
    hubs: &[&str],
    flights: Vec<TestFlight>,
    orders: Vec<TestOrder>,
) -> FreightNetwork {
    let airports = airports
        .iter()
        .map(|&(code, offset)| (code, offset, DEFAULT_WAREHOUSE_CAPACITY))
        .collect::<Vec<_>>();

    create_test_network_with_capacities(&airports, hubs, flights, orders)
}

pub fn create_test_network_with_capacities(
    airports: &[(&str, i8, u32)],
    hubs: &[&str],
    flights: Vec<TestFlight>,
    orders: Vec<TestOrder>,
) -> FreightNetwork {
    let mut builder = FreightNetworkBuilder::default();

    for &(code, offset, capacity) in airports {
        builder.add_airport(create_airport(code, offset, capacity));
    }

    for flight in flights {
        builder.add_dated_flight(DatedFlight {
            origin: flight.origin.to_string(),
            destination: flight.destination.to_string(),
            departure: week_time(flight.departure),
            arrival: week_time(flight.arrival),
            max_payload: flight.max_payload,
        });
    }

    for (index, order) in orders.into_iter().enumerate() {
        builder.add_order(Order::new(
            week_time(order.registered_at),
            order.destination.to_string(),
            order.quantity,
            format!("client-{index}"),
        ));
    }

    builder.set_hubs(hubs.iter().map(|hub| hub.to_string()).collect());

    builder.build().unwrap()
}
