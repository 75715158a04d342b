use jiff::civil::{self, DateTime};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use skyfreight_optimizer::problem::{
    airport::{Airport, AirportBuilder, Continent},
    flight::FlightSchedule,
    network::{DatedFlight, FreightNetwork, FreightNetworkBuilder},
    order::Order,
};

/// (day, hour, minute) in the planning week.
pub type WeekTime = (i8, i8, i8);

pub fn week_time((day, hour, minute): WeekTime) -> DateTime {
    civil::datetime(2025, 1, day, hour, minute, 0, 0)
}

pub fn create_airport(
    code: &str,
    continent: Continent,
    utc_offset_hours: i8,
    capacity: u32,
) -> Airport {
    let mut builder = AirportBuilder::default();
    builder
        .set_code(code.to_string())
        .set_continent(continent)
        .set_utc_offset_hours(utc_offset_hours)
        .set_capacity(capacity);
    builder.build()
}

pub fn create_flight(
    origin: &str,
    destination: &str,
    departure: WeekTime,
    arrival: WeekTime,
    max_payload: u32,
) -> DatedFlight {
    DatedFlight {
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure: week_time(departure),
        arrival: week_time(arrival),
        max_payload,
    }
}

pub fn create_order(registered_at: WeekTime, destination: &str, quantity: u32, client: &str) -> Order {
    Order::new(
        week_time(registered_at),
        destination.to_string(),
        quantity,
        client.to_string(),
    )
}

pub fn create_network(
    airports: Vec<Airport>,
    hubs: &[&str],
    flights: Vec<DatedFlight>,
    orders: Vec<Order>,
) -> FreightNetwork {
    let mut builder = FreightNetworkBuilder::default();
    builder
        .set_airports(airports)
        .set_orders(orders)
        .set_hubs(hubs.iter().map(|hub| hub.to_string()).collect());
    for flight in flights {
        builder.add_dated_flight(flight);
    }

    builder.build().unwrap()
}

fn code(index: usize) -> String {
    format!("A{index:02}")
}

/// A random week over `airports` airports with the first three as hubs. Timetable and
/// registration times carry random minutes, as real timetables do.
pub fn create_random_network(seed: u64, airports: usize, orders: usize) -> FreightNetwork {
    let mut rng = SmallRng::seed_from_u64(seed);
    let continents = [Continent::America, Continent::Europe, Continent::Asia];
    let mut builder = FreightNetworkBuilder::default();

    for index in 0..airports {
        builder.add_airport(create_airport(
            &code(index),
            continents[index % continents.len()].clone(),
            rng.random_range(-5..=5),
            rng.random_range(20..=120),
        ));
    }

    let schedules = (0..airports * 8)
        .map(|_| {
            let origin = rng.random_range(0..airports);
            let destination = (origin + rng.random_range(1..airports)) % airports;
            FlightSchedule {
                origin: code(origin),
                destination: code(destination),
                departure: civil::time(rng.random_range(0..24), rng.random_range(0..60), 0, 0),
                arrival: civil::time(rng.random_range(0..24), rng.random_range(0..60), 0, 0),
                max_payload: rng.random_range(10..=60),
            }
        })
        .collect();
    builder.set_schedules(schedules);

    for index in 0..orders {
        builder.add_order(Order::new(
            civil::datetime(
                2025,
                1,
                rng.random_range(1..=5),
                rng.random_range(0..24),
                rng.random_range(0..60),
                0,
                0,
            ),
            code(rng.random_range(3..airports)),
            rng.random_range(1..=40),
            format!("{index:07}"),
        ));
    }

    builder.set_hubs(vec![code(0), code(1), code(2)]);
    builder.build().unwrap()
}
