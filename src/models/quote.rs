//! Charter quote and aircraft class models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CharterError;

/// Aircraft size class offered to the lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftClass {
    Light,
    Midsize,
    Heavy,
    #[serde(rename = "Ultra Long Range")]
    UltraLongRange,
}

impl AircraftClass {
    pub const ALL: [AircraftClass; 4] = [
        AircraftClass::Light,
        AircraftClass::Midsize,
        AircraftClass::Heavy,
        AircraftClass::UltraLongRange,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AircraftClass::Light => "Light",
            AircraftClass::Midsize => "Midsize",
            AircraftClass::Heavy => "Heavy",
            AircraftClass::UltraLongRange => "Ultra Long Range",
        }
    }

    /// Typical passenger seats for the class
    #[must_use]
    pub fn seats(self) -> u32 {
        match self {
            AircraftClass::Light => 7,
            AircraftClass::Midsize => 9,
            AircraftClass::Heavy => 16,
            AircraftClass::UltraLongRange => 19,
        }
    }
}

impl fmt::Display for AircraftClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AircraftClass {
    type Err = CharterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "light" | "lightjet" => Ok(AircraftClass::Light),
            "midsize" | "mid" | "midsizejet" => Ok(AircraftClass::Midsize),
            "heavy" | "heavyjet" => Ok(AircraftClass::Heavy),
            "ultralongrange" | "ulr" => Ok(AircraftClass::UltraLongRange),
            _ => Err(CharterError::validation(format!(
                "Unknown aircraft class '{s}'"
            ))),
        }
    }
}

/// A charter offer shown on the results step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub aircraft_class: AircraftClass,
    pub aircraft_model: String,
    pub price_low: u64,
    #[serde(default)]
    pub price_high: Option<u64>,
    pub currency: String,
    pub departure_timestamp: NaiveDateTime,
    /// Formatted like `1h 45m`
    pub flight_duration: String,
    pub operator_name: String,
}

impl Quote {
    /// Price display, e.g. `USD 12,400 - 15,500`
    #[must_use]
    pub fn price_display(&self) -> String {
        match self.price_high {
            Some(high) if high > self.price_low => format!(
                "{} {} - {}",
                self.currency,
                group_thousands(self.price_low),
                group_thousands(high)
            ),
            _ => format!("{} {}", self.currency, group_thousands(self.price_low)),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
