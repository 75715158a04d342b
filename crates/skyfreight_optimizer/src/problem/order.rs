use jiff::civil::DateTime;
use serde::Serialize;

use crate::define_index_newtype;

define_index_newtype!(OrderIdx, Order);

/// A client's request to deliver `quantity` products to `destination`.
///
/// How much of it has been served is tracked per run in
/// [`crate::solver::solution::Solution`], never on the order itself.
#[derive(Serialize, Debug, Clone)]
pub struct Order {
    registered_at: DateTime,
    destination: String,
    quantity: u32,
    client_id: String,
}

impl Order {
    pub fn new(
        registered_at: DateTime,
        destination: String,
        quantity: u32,
        client_id: String,
    ) -> Self {
        Order {
            registered_at,
            destination,
            quantity,
            client_id,
        }
    }

    /// Registration instant, interpreted in the local time of whichever airport it is compared
    /// against.
    pub fn registered_at(&self) -> DateTime {
        self.registered_at
    }

    pub fn day(&self) -> i8 {
        self.registered_at.day()
    }

    pub fn hour(&self) -> i8 {
        self.registered_at.hour()
    }

    pub fn minute(&self) -> i8 {
        self.registered_at.minute()
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}
