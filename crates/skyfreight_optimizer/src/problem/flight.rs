use jiff::{
    SignedDuration,
    civil::{self, DateTime, Time},
};
use serde::Serialize;

use crate::{
    define_index_newtype,
    problem::{
        airport::{Airport, AirportIdx},
        planning_week::{DAYS_IN_WEEK, PLANNING_MONTH, PLANNING_YEAR},
    },
};

define_index_newtype!(FlightIdx, Flight);

/// One dated leg of the weekly timetable.
///
/// `departure` is local to the origin airport and `arrival` local to the destination. Their UTC
/// counterparts are resolved once when the network is built.
#[derive(Serialize, Debug, Clone)]
pub struct Flight {
    origin: AirportIdx,
    destination: AirportIdx,
    departure: DateTime,
    arrival: DateTime,
    departure_utc: DateTime,
    arrival_utc: DateTime,
    max_payload: u32,
}

impl Flight {
    pub fn new(
        (origin_id, origin): (AirportIdx, &Airport),
        (destination_id, destination): (AirportIdx, &Airport),
        departure: DateTime,
        arrival: DateTime,
        max_payload: u32,
    ) -> Self {
        Flight {
            origin: origin_id,
            destination: destination_id,
            departure,
            arrival,
            departure_utc: origin.to_utc(departure),
            arrival_utc: destination.to_utc(arrival),
            max_payload,
        }
    }

    pub fn origin(&self) -> AirportIdx {
        self.origin
    }

    pub fn destination(&self) -> AirportIdx {
        self.destination
    }

    pub fn departure(&self) -> DateTime {
        self.departure
    }

    pub fn arrival(&self) -> DateTime {
        self.arrival
    }

    pub fn departure_utc(&self) -> DateTime {
        self.departure_utc
    }

    pub fn arrival_utc(&self) -> DateTime {
        self.arrival_utc
    }

    pub fn max_payload(&self) -> u32 {
        self.max_payload
    }

    pub fn duration(&self) -> SignedDuration {
        self.arrival_utc.duration_since(self.departure_utc)
    }
}

/// A timetable line as it comes from ingestion: airport codes and local times of day, flown
/// every day of the planning week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightSchedule {
    pub origin: String,
    pub destination: String,
    pub departure: Time,
    pub arrival: Time,
    pub max_payload: u32,
}

impl FlightSchedule {
    /// Local (departure, arrival) pairs for each day of the week. An arrival time of day earlier
    /// than the departure lands on the next day.
    pub fn dated_instances(&self) -> impl Iterator<Item = (DateTime, DateTime)> + '_ {
        (1..=DAYS_IN_WEEK).map(|day| {
            let date = civil::date(PLANNING_YEAR, PLANNING_MONTH, day);
            let departure = date.to_datetime(self.departure);
            let mut arrival = date.to_datetime(self.arrival);
            if arrival < departure {
                arrival += SignedDuration::from_hours(24);
            }
            (departure, arrival)
        })
    }
}
