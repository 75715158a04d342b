use jiff::{SignedDuration, civil::DateTime};
use serde::Serialize;

use crate::problem::{flight::FlightIdx, order::OrderIdx, planning_week};

/// How long a batch stays at its final destination before it is picked up.
pub const FINAL_DESTINATION_DWELL: SignedDuration = SignedDuration::from_hours(2);

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    /// Waiting for `onward`, which leaves the airport at `leaves_at`.
    Transit {
        onward: FlightIdx,
        leaves_at: DateTime,
    },
    FinalDestination,
}

/// A quantity of one order sitting in an airport warehouse.
///
/// Times are local to the airport holding the batch. A batch never gets removed: whether it is
/// still there at some instant is derived from its dwell window.
#[derive(Serialize, Debug, Clone)]
pub struct StoredBatch {
    order: OrderIdx,
    quantity: u32,
    arrival: DateTime,
    kind: BatchKind,
}

impl StoredBatch {
    pub fn transit(
        order: OrderIdx,
        quantity: u32,
        arrival: DateTime,
        onward: FlightIdx,
        leaves_at: DateTime,
    ) -> Self {
        StoredBatch {
            order,
            quantity,
            arrival,
            kind: BatchKind::Transit { onward, leaves_at },
        }
    }

    pub fn final_destination(order: OrderIdx, quantity: u32, arrival: DateTime) -> Self {
        StoredBatch {
            order,
            quantity,
            arrival,
            kind: BatchKind::FinalDestination,
        }
    }

    pub fn order(&self) -> OrderIdx {
        self.order
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn arrival(&self) -> DateTime {
        self.arrival
    }

    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    pub fn is_final_destination(&self) -> bool {
        matches!(self.kind, BatchKind::FinalDestination)
    }

    /// Last instant the batch occupies the warehouse, included.
    pub fn dwell_end(&self) -> DateTime {
        dwell_end(self.arrival, self.kind)
    }

    pub fn is_present_at(&self, moment: DateTime) -> bool {
        self.arrival <= moment && moment <= self.dwell_end()
    }
}

/// End of the closed dwell window of something landing at `arrival`.
pub fn dwell_end(arrival: DateTime, kind: BatchKind) -> DateTime {
    match kind {
        BatchKind::Transit { leaves_at, .. } => leaves_at,
        BatchKind::FinalDestination => arrival + FINAL_DESTINATION_DWELL,
    }
}

/// Time-indexed storage of one airport.
#[derive(Debug, Clone)]
pub struct Warehouse {
    capacity: u32,
    batches: Vec<StoredBatch>,
}

impl Warehouse {
    pub fn new(capacity: u32) -> Self {
        Warehouse {
            capacity,
            batches: Vec::new(),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn batches(&self) -> &[StoredBatch] {
        &self.batches
    }

    pub fn occupancy_at(&self, moment: DateTime) -> u32 {
        self.batches_present_at(moment)
            .map(|batch| batch.quantity)
            .sum()
    }

    pub fn batches_present_at(&self, moment: DateTime) -> impl Iterator<Item = &StoredBatch> {
        self.batches
            .iter()
            .filter(move |batch| batch.is_present_at(moment))
    }

    /// Instants of `[start, end]` where occupancy is checked: the hourly samples and every stored
    /// arrival inside the interval. Occupancy only rises at an arrival, so its maximum over the
    /// interval is reached at one of them.
    fn check_points(&self, start: DateTime, end: DateTime) -> impl Iterator<Item = DateTime> + '_ {
        let arrivals = self
            .batches
            .iter()
            .map(|batch| batch.arrival)
            .filter(move |&arrival| start < arrival && arrival <= end);

        planning_week::hourly_samples(start, end).chain(arrivals)
    }

    /// Whether `quantity` more products fit at every check point of `[start, end]`.
    pub fn has_room_for_interval(&self, quantity: u32, start: DateTime, end: DateTime) -> bool {
        self.check_points(start, end)
            .all(|moment| self.occupancy_at(moment) + quantity <= self.capacity)
    }

    /// Smallest free room over the check points of `[start, end]`.
    pub fn free_room_over(&self, start: DateTime, end: DateTime) -> u32 {
        self.check_points(start, end)
            .map(|moment| self.capacity.saturating_sub(self.occupancy_at(moment)))
            .min()
            .unwrap_or(self.capacity)
    }

    /// Appends a batch. Capacity is the caller's responsibility.
    pub fn store(&mut self, batch: StoredBatch) {
        self.batches.push(batch);
    }
}
