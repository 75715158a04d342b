use jiff::civil::{self, Time};

use crate::{
    parsers::parser::{DatasetParser, ParseError, parse_field},
    problem::flight::FlightSchedule,
};

/// One weekly timetable line per row: `ORIG-DEST-HH:MM-HH:MM-capacity`.
pub struct FlightsParser;

fn parse_time_of_day(line: usize, value: &str) -> Result<Time, ParseError> {
    let Some((hour, minute)) = value.split_once(':') else {
        return Err(ParseError::invalid_line(
            line,
            format!("expected HH:MM, found `{value}`"),
        ));
    };

    civil::Time::new(
        parse_field(line, "hour", hour)?,
        parse_field(line, "minute", minute)?,
        0,
        0,
    )
    .map_err(|error| ParseError::invalid_line(line, error))
}

impl DatasetParser for FlightsParser {
    type Record = FlightSchedule;

    fn parse_line(&self, line: usize, content: &str) -> Result<FlightSchedule, ParseError> {
        let parts: Vec<&str> = content.split('-').collect();
        let [origin, destination, departure, arrival, max_payload] = &parts[..] else {
            return Err(ParseError::invalid_line(
                line,
                format!("expected ORIG-DEST-HH:MM-HH:MM-capacity, found `{content}`"),
            ));
        };

        Ok(FlightSchedule {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            departure: parse_time_of_day(line, departure)?,
            arrival: parse_time_of_day(line, arrival)?,
            max_payload: parse_field(line, "capacity", max_payload)?,
        })
    }
}
