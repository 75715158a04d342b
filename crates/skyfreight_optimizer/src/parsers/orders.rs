use crate::{
    parsers::parser::{DatasetParser, ParseError, parse_field},
    problem::{order::Order, planning_week},
};

/// One order per line: `dd-hh-mm-DEST-quantity-client`.
pub struct OrdersParser;

impl DatasetParser for OrdersParser {
    type Record = Order;

    fn parse_line(&self, line: usize, content: &str) -> Result<Order, ParseError> {
        let parts: Vec<&str> = content.split('-').collect();
        let [day, hour, minute, destination, quantity, client] = &parts[..] else {
            return Err(ParseError::invalid_line(
                line,
                format!("expected dd-hh-mm-DEST-quantity-client, found `{content}`"),
            ));
        };

        let registered_at = planning_week::local_datetime(
            parse_field(line, "day", day)?,
            parse_field(line, "hour", hour)?,
            parse_field(line, "minute", minute)?,
        )
        .map_err(|error| ParseError::invalid_line(line, error))?;

        Ok(Order::new(
            registered_at,
            destination.trim().to_string(),
            parse_field(line, "quantity", quantity)?,
            client.trim().to_string(),
        ))
    }
}
