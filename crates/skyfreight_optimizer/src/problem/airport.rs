use std::{convert::Infallible, fmt, str::FromStr};

use jiff::civil::DateTime;
use serde::Serialize;

use crate::{define_index_newtype, problem::planning_week};

define_index_newtype!(AirportIdx, Airport);

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Continent {
    America,
    Europe,
    Asia,
    Africa,
    Oceania,
    Other(String),
}

impl FromStr for Continent {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let continent = match normalized.as_str() {
            "america" | "américa" | "america del sur" | "south america" | "north america" => {
                Continent::America
            }
            "europe" | "europa" => Continent::Europe,
            "asia" => Continent::Asia,
            "africa" | "áfrica" => Continent::Africa,
            "oceania" | "oceanía" => Continent::Oceania,
            _ => Continent::Other(s.trim().to_string()),
        };
        Ok(continent)
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continent::America => write!(f, "America"),
            Continent::Europe => write!(f, "Europe"),
            Continent::Asia => write!(f, "Asia"),
            Continent::Africa => write!(f, "Africa"),
            Continent::Oceania => write!(f, "Oceania"),
            Continent::Other(name) => write!(f, "{name}"),
        }
    }
}

/// An airport and the warehouse attached to it.
///
/// The static description only; what is stored in the warehouse over time is tracked per run by
/// [`crate::ledger::warehouse::Warehouse`].
#[derive(Serialize, Debug, Clone)]
pub struct Airport {
    code: String,
    name: String,
    country: String,
    continent: Continent,
    utc_offset_hours: i8,
    capacity: u32,
}

impl Airport {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn continent(&self) -> &Continent {
        &self.continent
    }

    pub fn utc_offset_hours(&self) -> i8 {
        self.utc_offset_hours
    }

    /// Maximum number of products the warehouse can hold at any instant.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn to_utc(&self, local: DateTime) -> DateTime {
        planning_week::to_utc(local, self.utc_offset_hours)
    }

    pub fn shares_continent_with(&self, other: &Airport) -> bool {
        self.continent == other.continent
    }
}

#[derive(Default)]
pub struct AirportBuilder {
    code: Option<String>,
    name: Option<String>,
    country: Option<String>,
    continent: Option<Continent>,
    utc_offset_hours: Option<i8>,
    capacity: Option<u32>,
}

impl AirportBuilder {
    pub fn set_code(&mut self, code: String) -> &mut AirportBuilder {
        self.code = Some(code);
        self
    }

    pub fn set_name(&mut self, name: String) -> &mut AirportBuilder {
        self.name = Some(name);
        self
    }

    pub fn set_country(&mut self, country: String) -> &mut AirportBuilder {
        self.country = Some(country);
        self
    }

    pub fn set_continent(&mut self, continent: Continent) -> &mut AirportBuilder {
        self.continent = Some(continent);
        self
    }

    pub fn set_utc_offset_hours(&mut self, utc_offset_hours: i8) -> &mut AirportBuilder {
        self.utc_offset_hours = Some(utc_offset_hours);
        self
    }

    pub fn set_capacity(&mut self, capacity: u32) -> &mut AirportBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn build(self) -> Airport {
        let code = self.code.expect("Airport code is required");
        Airport {
            name: self.name.unwrap_or_else(|| code.clone()),
            code,
            country: self.country.unwrap_or_default(),
            continent: self.continent.expect("Airport continent is required"),
            utc_offset_hours: self.utc_offset_hours.unwrap_or(0),
            capacity: self.capacity.unwrap_or(0),
        }
    }
}
