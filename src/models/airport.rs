//! Canonical airport model shared by resolution, ranking and the wizard

use serde::{Deserialize, Serialize};

/// Unified representation of an airport regardless of which directory schema produced it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalAirport {
    /// Human readable airport or city name, may be empty when only a code is known
    pub display_name: String,
    /// Upper-case IATA code
    pub iata_code: Option<String>,
    pub city: Option<String>,
    /// Region or state
    pub region: Option<String>,
    pub country: Option<String>,
}

impl CanonicalAirport {
    /// Build a record, returning `None` when neither a name nor a code is present.
    #[must_use]
    pub fn new(display_name: impl Into<String>, iata_code: Option<String>) -> Option<Self> {
        let airport = Self {
            display_name: display_name.into().trim().to_string(),
            iata_code: iata_code
                .map(|code| code.trim().to_uppercase())
                .filter(|code| !code.is_empty()),
            ..Self::default()
        };
        airport.is_valid().then_some(airport)
    }

    #[must_use]
    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.city = non_blank(city);
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = non_blank(region);
        self
    }

    #[must_use]
    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = non_blank(country);
        self
    }

    /// At least one of display name and IATA code must be non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.display_name.trim().is_empty()
            || self.iata_code.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// Text written into a location field when the user picks this suggestion,
    /// e.g. `Austin-Bergstrom International (AUS)`.
    #[must_use]
    pub fn selection_label(&self) -> String {
        match (&self.iata_code, self.display_name.is_empty()) {
            (Some(code), false) => format!("{} ({code})", self.display_name),
            (Some(code), true) => format!("({code})"),
            (None, _) => self.display_name.clone(),
        }
    }

    /// One-line summary for suggestion lists
    #[must_use]
    pub fn summary(&self) -> String {
        let place = [&self.city, &self.region, &self.country]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if place.is_empty() {
            self.selection_label()
        } else {
            format!("{} - {place}", self.selection_label())
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A candidate with its relevance score, only alive during ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub airport: CanonicalAirport,
    pub score: i32,
}
