use crate::{
    parsers::parser::{DatasetParser, ParseError, parse_field},
    problem::airport::{Airport, AirportBuilder, Continent},
};

/// `code,name,country,capacity,current_load,utc_offset,continent` with one header line. The
/// current load column is ignored: warehouses always start empty.
pub struct AirportsParser;

const COLUMNS: usize = 7;

impl DatasetParser for AirportsParser {
    type Record = Airport;

    fn header_lines(&self) -> usize {
        1
    }

    fn parse_line(&self, line: usize, content: &str) -> Result<Airport, ParseError> {
        let fields: Vec<&str> = content.split(',').map(str::trim).collect();
        if fields.len() < COLUMNS {
            return Err(ParseError::invalid_line(
                line,
                format!("expected {COLUMNS} columns, found {}", fields.len()),
            ));
        }

        if fields[0].is_empty() {
            return Err(ParseError::invalid_line(line, "empty airport code"));
        }

        let Ok(continent) = fields[6].parse::<Continent>();

        let mut builder = AirportBuilder::default();
        builder
            .set_code(fields[0].to_string())
            .set_name(fields[1].to_string())
            .set_country(fields[2].to_string())
            .set_capacity(parse_field(line, "capacity", fields[3])?)
            .set_utc_offset_hours(parse_field(line, "UTC offset", fields[5])?)
            .set_continent(continent);

        Ok(builder.build())
    }
}
