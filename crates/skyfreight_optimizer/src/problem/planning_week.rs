//! The fixed calendar week every plan is built against.
//!
//! Timestamps in the model are local wall-clock [`DateTime`]s of the airport they refer to.
//! Comparisons across airports go through [`to_utc`], which shifts a local timestamp by the
//! airport's whole-hour UTC offset.

use jiff::{
    SignedDuration,
    civil::{self, DateTime},
};

pub const PLANNING_YEAR: i16 = 2025;
pub const PLANNING_MONTH: i8 = 1;
pub const DAYS_IN_WEEK: i8 = 7;
pub const HOURS_IN_DAY: i8 = 24;

/// Local timestamp `day` (1-based) `hour:minute` inside the planning week's month.
pub fn local_datetime(day: i8, hour: i8, minute: i8) -> Result<DateTime, jiff::Error> {
    DateTime::new(PLANNING_YEAR, PLANNING_MONTH, day, hour, minute, 0, 0)
}

pub fn to_utc(local: DateTime, utc_offset_hours: i8) -> DateTime {
    local - SignedDuration::from_hours(i64::from(utc_offset_hours))
}

/// Wall-clock time between two local timestamps recorded in possibly different time zones.
pub fn elapsed(
    from: DateTime,
    from_offset_hours: i8,
    to: DateTime,
    to_offset_hours: i8,
) -> SignedDuration {
    to_utc(to, to_offset_hours).duration_since(to_utc(from, from_offset_hours))
}

pub fn as_hours_f64(duration: SignedDuration) -> f64 {
    duration.as_secs_f64() / 3600.0
}

/// Hourly sample points from `start` to `end`, both ends included. An `end` off the hourly grid
/// of `start` is yielded last.
pub fn hourly_samples(start: DateTime, end: DateTime) -> impl Iterator<Item = DateTime> {
    let grid = std::iter::successors(Some(start), |current| {
        Some(*current + SignedDuration::from_hours(1))
    })
    .take_while(move |moment| *moment <= end);

    let last_on_grid = start + SignedDuration::from_hours(end.duration_since(start).as_hours());
    let off_grid_end = (start <= end && last_on_grid != end).then_some(end);

    grid.chain(off_grid_end)
}

/// Every whole hour of the planning week, day 1 00:00 through day 7 23:00.
pub fn week_hours() -> impl Iterator<Item = DateTime> {
    (1..=DAYS_IN_WEEK).flat_map(|day| {
        (0..HOURS_IN_DAY)
            .map(move |hour| civil::datetime(PLANNING_YEAR, PLANNING_MONTH, day, hour, 0, 0, 0))
    })
}
