//! Itinerary snapshot handed to submission and quoting

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::estimator::extract_iata_code;

/// Trip type chosen mid-flow; decides whether the return steps are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    Unset,
    OneWay,
    RoundTrip,
}

impl TripType {
    #[must_use]
    pub fn is_decided(self) -> bool {
        self != TripType::Unset
    }

    /// Parse user input such as `one-way`, `One Way`, `round trip` or `rt`
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let normalized: String = input
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "oneway" | "ow" | "1" => Some(TripType::OneWay),
            "roundtrip" | "return" | "rt" | "2" => Some(TripType::RoundTrip),
            _ => None,
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripType::Unset => write!(f, "unset"),
            TripType::OneWay => write!(f, "one-way"),
            TripType::RoundTrip => write!(f, "round-trip"),
        }
    }
}

/// Immutable trip snapshot assembled only at the review step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub from: String,
    pub to: String,
    pub depart_date: NaiveDate,
    pub depart_time: NaiveTime,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<NaiveTime>,
    pub passenger_count: u32,
    pub trip_type: TripType,
    pub contact_email: String,
    pub contact_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl Itinerary {
    #[must_use]
    pub fn departure(&self) -> NaiveDateTime {
        self.depart_date.and_time(self.depart_time)
    }

    #[must_use]
    pub fn return_departure(&self) -> Option<NaiveDateTime> {
        match (self.return_date, self.return_time) {
            (Some(date), Some(time)) => Some(date.and_time(time)),
            _ => None,
        }
    }

    /// IATA code embedded in the origin text, e.g. `Austin (AUS)`
    #[must_use]
    pub fn origin_code(&self) -> Option<&str> {
        extract_iata_code(&self.from)
    }

    #[must_use]
    pub fn destination_code(&self) -> Option<&str> {
        extract_iata_code(&self.to)
    }
}
