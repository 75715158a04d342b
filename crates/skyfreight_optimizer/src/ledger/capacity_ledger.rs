use jiff::civil::DateTime;

use crate::{
    ledger::warehouse::{self, BatchKind, StoredBatch, Warehouse},
    problem::{
        airport::AirportIdx,
        flight::FlightIdx,
        network::FreightNetwork,
        order::OrderIdx,
    },
};

/// Where a leg of an itinerary puts its payload down, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub airport: AirportIdx,
    pub arrival: DateTime,
    pub kind: BatchKind,
}

impl Landing {
    pub fn dwell_end(&self) -> DateTime {
        warehouse::dwell_end(self.arrival, self.kind)
    }
}

/// Landings of each leg of `legs`, in order. Every landing but the last is a transit stop waiting
/// for the next leg.
pub fn landings<'a>(
    network: &'a FreightNetwork,
    legs: &'a [FlightIdx],
) -> impl Iterator<Item = Landing> + 'a {
    legs.iter().enumerate().map(move |(position, &flight_id)| {
        let flight = network.flight(flight_id);
        let kind = match legs.get(position + 1) {
            Some(&onward) => BatchKind::Transit {
                onward,
                leaves_at: network.flight(onward).departure(),
            },
            None => BatchKind::FinalDestination,
        };
        Landing {
            airport: flight.destination(),
            arrival: flight.arrival(),
            kind,
        }
    })
}

/// Mutable capacity state of one planning run: the committed payload of every dated flight and
/// the warehouse of every airport.
///
/// The network itself never changes, so independent runs each clone a fresh ledger and share the
/// network.
#[derive(Debug, Clone)]
pub struct CapacityLedger {
    flight_loads: Vec<u32>,
    warehouses: Vec<Warehouse>,
}

impl CapacityLedger {
    pub fn new(network: &FreightNetwork) -> Self {
        CapacityLedger {
            flight_loads: vec![0; network.flights().len()],
            warehouses: network
                .airports()
                .iter()
                .map(|airport| Warehouse::new(airport.capacity()))
                .collect(),
        }
    }

    pub fn flight_load(&self, flight_id: FlightIdx) -> u32 {
        self.flight_loads[flight_id.get()]
    }

    pub fn free_payload(&self, network: &FreightNetwork, flight_id: FlightIdx) -> u32 {
        network
            .flight(flight_id)
            .max_payload()
            .saturating_sub(self.flight_load(flight_id))
    }

    pub fn is_flight_full(&self, network: &FreightNetwork, flight_id: FlightIdx) -> bool {
        self.free_payload(network, flight_id) == 0
    }

    /// Flights whose committed payload is above their maximum.
    pub fn overloaded_flights<'a>(
        &'a self,
        network: &'a FreightNetwork,
    ) -> impl Iterator<Item = FlightIdx> + 'a {
        self.flight_loads
            .iter()
            .enumerate()
            .filter(|&(index, &load)| load > network.flights()[index].max_payload())
            .map(|(index, _)| FlightIdx::new(index))
    }

    pub fn warehouse(&self, airport_id: AirportIdx) -> &Warehouse {
        &self.warehouses[airport_id.get()]
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    /// Largest quantity that fits on every leg and in every warehouse the itinerary lands in.
    pub fn max_shippable(&self, network: &FreightNetwork, legs: &[FlightIdx]) -> u32 {
        let payload = legs
            .iter()
            .map(|&flight_id| self.free_payload(network, flight_id))
            .min()
            .unwrap_or(0);

        landings(network, legs)
            .map(|landing| {
                self.warehouse(landing.airport)
                    .free_room_over(landing.arrival, landing.dwell_end())
            })
            .fold(payload, u32::min)
    }

    /// Books `quantity` of `order_id` on every leg and stores a batch at every landing.
    ///
    /// Never rejects: callers bound `quantity` with [`CapacityLedger::max_shippable`] first.
    pub fn commit_itinerary(
        &mut self,
        network: &FreightNetwork,
        order_id: OrderIdx,
        legs: &[FlightIdx],
        quantity: u32,
    ) {
        for &flight_id in legs {
            self.flight_loads[flight_id.get()] += quantity;
        }

        for landing in landings(network, legs) {
            let batch = match landing.kind {
                BatchKind::Transit { onward, leaves_at } => {
                    StoredBatch::transit(order_id, quantity, landing.arrival, onward, leaves_at)
                }
                BatchKind::FinalDestination => {
                    StoredBatch::final_destination(order_id, quantity, landing.arrival)
                }
            };
            self.warehouses[landing.airport.get()].store(batch);
        }
    }
}
