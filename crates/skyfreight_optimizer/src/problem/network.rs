use fxhash::FxHashMap;
use jiff::civil::DateTime;
use thiserror::Error;
use tracing::warn;

use crate::{
    problem::{
        airport::{Airport, AirportIdx},
        flight::{Flight, FlightIdx, FlightSchedule},
        order::{Order, OrderIdx},
    },
    utils::enumerate_idx::EnumerateIdx,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NetworkError {
    #[error("airport {0} is declared more than once")]
    DuplicateAirport(String),
    #[error("hub {0} is not a known airport")]
    UnknownHub(String),
    #[error("at least one hub is required")]
    NoHubs,
    #[error("airport {code} has UTC offset {offset}, outside -12..=14")]
    InvalidUtcOffset { code: String, offset: i8 },
}

pub const UTC_OFFSET_RANGE: std::ops::RangeInclusive<i8> = -12..=14;

/// Immutable description of one planning week: airports, dated flights, orders and the hubs
/// allowed to originate shipments.
///
/// Every entity lives in an arena addressed by its index newtype. Mutable capacity state is kept
/// apart in [`crate::ledger::capacity_ledger::CapacityLedger`] so several runs can share one
/// network.
pub struct FreightNetwork {
    airports: Vec<Airport>,
    flights: Vec<Flight>,
    orders: Vec<Order>,
    hubs: Vec<AirportIdx>,
    airport_by_code: FxHashMap<String, AirportIdx>,

    /// Outgoing flights of each airport, sorted by local departure
    departures: Vec<Vec<FlightIdx>>,
}

impl FreightNetwork {
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn airport(&self, airport_id: AirportIdx) -> &Airport {
        &self.airports[airport_id]
    }

    pub fn airport_id(&self, code: &str) -> Option<AirportIdx> {
        self.airport_by_code.get(code).copied()
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn flight(&self, flight_id: FlightIdx) -> &Flight {
        &self.flights[flight_id]
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: OrderIdx) -> &Order {
        &self.orders[order_id]
    }

    pub fn hubs(&self) -> &[AirportIdx] {
        &self.hubs
    }

    /// Flights leaving `airport_id` at or after `not_before` (local time of that airport), in
    /// departure order.
    pub fn departures_from(&self, airport_id: AirportIdx, not_before: DateTime) -> &[FlightIdx] {
        let departures = &self.departures[airport_id.get()];
        let first = departures
            .partition_point(|&flight_id| self.flights[flight_id].departure() < not_before);
        &departures[first..]
    }
}

#[derive(Default)]
pub struct FreightNetworkBuilder {
    airports: Vec<Airport>,
    schedules: Vec<FlightSchedule>,
    dated_flights: Vec<DatedFlight>,
    orders: Vec<Order>,
    hubs: Vec<String>,
}

/// A single flight on a given date, for timetables that are not repeated daily.
#[derive(Debug, Clone)]
pub struct DatedFlight {
    pub origin: String,
    pub destination: String,
    pub departure: DateTime,
    pub arrival: DateTime,
    pub max_payload: u32,
}

impl FreightNetworkBuilder {
    pub fn set_airports(&mut self, airports: Vec<Airport>) -> &mut FreightNetworkBuilder {
        self.airports = airports;
        self
    }

    pub fn add_airport(&mut self, airport: Airport) -> &mut FreightNetworkBuilder {
        self.airports.push(airport);
        self
    }

    pub fn set_schedules(&mut self, schedules: Vec<FlightSchedule>) -> &mut FreightNetworkBuilder {
        self.schedules = schedules;
        self
    }

    pub fn add_dated_flight(&mut self, flight: DatedFlight) -> &mut FreightNetworkBuilder {
        self.dated_flights.push(flight);
        self
    }

    pub fn set_orders(&mut self, orders: Vec<Order>) -> &mut FreightNetworkBuilder {
        self.orders = orders;
        self
    }

    pub fn add_order(&mut self, order: Order) -> &mut FreightNetworkBuilder {
        self.orders.push(order);
        self
    }

    pub fn set_hubs(&mut self, hubs: Vec<String>) -> &mut FreightNetworkBuilder {
        self.hubs = hubs;
        self
    }

    pub fn build(self) -> Result<FreightNetwork, NetworkError> {
        let mut airport_by_code: FxHashMap<String, AirportIdx> = FxHashMap::default();
        for (airport_id, airport) in self.airports.iter().enumerate_idx() {
            if !UTC_OFFSET_RANGE.contains(&airport.utc_offset_hours()) {
                return Err(NetworkError::InvalidUtcOffset {
                    code: airport.code().to_string(),
                    offset: airport.utc_offset_hours(),
                });
            }
            if airport_by_code
                .insert(airport.code().to_string(), airport_id)
                .is_some()
            {
                return Err(NetworkError::DuplicateAirport(airport.code().to_string()));
            }
        }

        if self.hubs.is_empty() {
            return Err(NetworkError::NoHubs);
        }

        let hubs = self
            .hubs
            .iter()
            .map(|code| {
                airport_by_code
                    .get(code.as_str())
                    .copied()
                    .ok_or_else(|| NetworkError::UnknownHub(code.clone()))
            })
            .collect::<Result<Vec<AirportIdx>, NetworkError>>()?;

        let resolve = |origin: &str, destination: &str| -> Option<(AirportIdx, AirportIdx)> {
            match (airport_by_code.get(origin), airport_by_code.get(destination)) {
                (Some(&origin_id), Some(&destination_id)) => Some((origin_id, destination_id)),
                _ => {
                    warn!("Skipping flight {origin}-{destination}: unknown airport");
                    None
                }
            }
        };

        let mut flights = Vec::with_capacity(self.schedules.len() * 7 + self.dated_flights.len());
        for schedule in &self.schedules {
            let Some((origin_id, destination_id)) =
                resolve(&schedule.origin, &schedule.destination)
            else {
                continue;
            };
            for (departure, arrival) in schedule.dated_instances() {
                flights.push(Flight::new(
                    (origin_id, &self.airports[origin_id]),
                    (destination_id, &self.airports[destination_id]),
                    departure,
                    arrival,
                    schedule.max_payload,
                ));
            }
        }

        for dated in &self.dated_flights {
            let Some((origin_id, destination_id)) = resolve(&dated.origin, &dated.destination)
            else {
                continue;
            };
            flights.push(Flight::new(
                (origin_id, &self.airports[origin_id]),
                (destination_id, &self.airports[destination_id]),
                dated.departure,
                dated.arrival,
                dated.max_payload,
            ));
        }

        let mut departures: Vec<Vec<FlightIdx>> = vec![Vec::new(); self.airports.len()];
        for (flight_id, flight) in flights.iter().enumerate_idx() {
            departures[flight.origin().get()].push(flight_id);
        }
        for outgoing in &mut departures {
            outgoing.sort_by_key(|&flight_id| (flights[flight_id].departure(), flight_id));
        }

        Ok(FreightNetwork {
            airports: self.airports,
            flights,
            orders: self.orders,
            hubs,
            airport_by_code,
            departures,
        })
    }
}
