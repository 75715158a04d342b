use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use jiff::{SignedDuration, civil::DateTime};
use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    ledger::capacity_ledger::CapacityLedger,
    problem::{
        airport::AirportIdx, flight::FlightIdx, network::FreightNetwork, planning_week,
    },
};

/// Minimum layover between landing at an airport and taking the next leg from it.
pub const MIN_CONNECTION: SignedDuration = SignedDuration::from_hours(1);

/// Quantity a landing warehouse must still be able to take for a leg to be explored. The actual
/// shipped quantity is bounded later, when capacity is committed.
pub const SEARCH_PROBE_QUANTITY: u32 = 1;

pub type Legs = SmallVec<[FlightIdx; 4]>;

/// An ordered sequence of legs leaving `origin`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    origin: AirportIdx,
    legs: Legs,
}

impl Itinerary {
    pub fn new(origin: AirportIdx, legs: Legs) -> Self {
        Itinerary { origin, legs }
    }

    pub fn origin(&self) -> AirportIdx {
        self.origin
    }

    pub fn legs(&self) -> &[FlightIdx] {
        &self.legs
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Time from the first departure to the last arrival, time zones accounted for.
    pub fn duration(&self, network: &FreightNetwork) -> SignedDuration {
        match (self.legs.first(), self.legs.last()) {
            (Some(&first), Some(&last)) => network
                .flight(last)
                .arrival_utc()
                .duration_since(network.flight(first).departure_utc()),
            _ => SignedDuration::ZERO,
        }
    }
}

#[derive(Clone, Copy)]
struct Label {
    airport: AirportIdx,
    arrival: DateTime,
    elapsed: SignedDuration,
    via: Option<(FlightIdx, usize)>,
}

#[derive(PartialEq, Eq)]
struct QueueEntry {
    elapsed: SignedDuration,
    label: usize,
}

// Min-heap on elapsed time. Labels are numbered in push order, so equal times pop first-in
// first-out.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .elapsed
            .cmp(&self.elapsed)
            .then_with(|| other.label.cmp(&self.label))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Earliest-arrival search over the dated flights of a network, refusing legs that are full or
/// that land in a full warehouse.
///
/// The ledger is only read; nothing is reserved while searching.
pub struct RouteSearch<'a> {
    network: &'a FreightNetwork,
    ledger: &'a CapacityLedger,
}

impl<'a> RouteSearch<'a> {
    pub fn new(network: &'a FreightNetwork, ledger: &'a CapacityLedger) -> Self {
        RouteSearch { network, ledger }
    }

    /// Finds the itinerary from `origin` to `destination` with the smallest elapsed time since
    /// `start` (local to `origin`), provided it stays within `window`.
    pub fn find(
        &self,
        origin: AirportIdx,
        destination: AirportIdx,
        start: DateTime,
        window: SignedDuration,
    ) -> Option<Itinerary> {
        let network = self.network;
        let start_utc = network.airport(origin).to_utc(start);

        let mut visited = FixedBitSet::with_capacity(network.airports().len());
        let mut labels = vec![Label {
            airport: origin,
            arrival: start,
            elapsed: SignedDuration::ZERO,
            via: None,
        }];
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry {
            elapsed: SignedDuration::ZERO,
            label: 0,
        });

        while let Some(QueueEntry { label: current, .. }) = queue.pop() {
            let label = labels[current];
            let airport = label.airport;

            if airport == destination {
                debug!(
                    expanded = visited.count_ones(..),
                    labels = labels.len(),
                    "Route found"
                );
                return Some(Self::reconstruct(origin, &labels, current));
            }

            if visited.contains(airport.get()) {
                continue;
            }
            visited.insert(airport.get());

            if label.elapsed > window {
                continue;
            }

            let not_before = match label.via {
                None => label.arrival,
                Some(_) => label.arrival + MIN_CONNECTION,
            };

            for &flight_id in network.departures_from(airport, not_before) {
                let flight = network.flight(flight_id);
                let next_airport = flight.destination();

                if visited.contains(next_airport.get()) {
                    continue;
                }

                if self.ledger.is_flight_full(network, flight_id) {
                    continue;
                }

                let warehouse = self.ledger.warehouse(next_airport);
                if warehouse.occupancy_at(flight.arrival()) + SEARCH_PROBE_QUANTITY
                    > warehouse.capacity()
                {
                    continue;
                }

                let elapsed = flight.arrival_utc().duration_since(start_utc);
                if elapsed > window {
                    continue;
                }

                let next = labels.len();
                labels.push(Label {
                    airport: next_airport,
                    arrival: flight.arrival(),
                    elapsed,
                    via: Some((flight_id, current)),
                });
                queue.push(QueueEntry {
                    elapsed,
                    label: next,
                });
            }
        }

        debug!(
            origin = %network.airport(origin).code(),
            destination = %network.airport(destination).code(),
            "No route within {}h",
            planning_week::as_hours_f64(window)
        );

        None
    }

    fn reconstruct(origin: AirportIdx, labels: &[Label], mut current: usize) -> Itinerary {
        let mut legs = Legs::new();
        while let Some((flight_id, previous)) = labels[current].via {
            legs.push(flight_id);
            current = previous;
        }
        legs.reverse();

        Itinerary::new(origin, legs)
    }
}
