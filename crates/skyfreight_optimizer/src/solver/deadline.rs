use jiff::{SignedDuration, civil::DateTime};

use crate::problem::{airport::Airport, flight::FlightIdx, network::FreightNetwork, planning_week};

pub const SAME_CONTINENT_DEADLINE_DAYS: i64 = 2;
pub const OTHER_CONTINENT_DEADLINE_DAYS: i64 = 3;

pub fn deadline_days(hub: &Airport, destination: &Airport) -> i64 {
    if hub.shares_continent_with(destination) {
        SAME_CONTINENT_DEADLINE_DAYS
    } else {
        OTHER_CONTINENT_DEADLINE_DAYS
    }
}

/// Maximum transit duration allowed for shipping from `hub` to `destination`.
pub fn deadline_window(hub: &Airport, destination: &Airport) -> SignedDuration {
    SignedDuration::from_hours(deadline_days(hub, destination) * 24)
}

/// Whether the last leg of `legs` lands within `window` of the registration.
///
/// Both the registration and the arrival are read in the destination's time zone. An empty
/// itinerary never meets a deadline.
pub fn is_met(
    network: &FreightNetwork,
    legs: &[FlightIdx],
    registered_at: DateTime,
    destination: &Airport,
    window: SignedDuration,
) -> bool {
    let Some(&last_leg) = legs.last() else {
        return false;
    };

    let offset = destination.utc_offset_hours();
    let arrival = network.flight(last_leg).arrival();

    planning_week::elapsed(registered_at, offset, arrival, offset) <= window
}
