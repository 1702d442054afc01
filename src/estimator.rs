//! Flight-time estimation
//!
//! Durations come from a directed table of base minutes between IATA code
//! pairs, adjusted per aircraft class. When the codes are unknown the estimator
//! falls back to coarse city-pair heuristics and finally to a per-class default,
//! so it always produces a duration.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::models::AircraftClass;

/// Directed (origin, destination, base minutes) table
const ROUTE_MINUTES: &[(&str, &str, u32)] = &[
    ("AUS", "MSY", 105),
    ("MSY", "AUS", 110),
    ("AUS", "DAL", 50),
    ("DAL", "AUS", 50),
    ("AUS", "HOU", 50),
    ("HOU", "AUS", 45),
    ("DAL", "HOU", 55),
    ("HOU", "DAL", 55),
    ("TEB", "PBI", 155),
    ("PBI", "TEB", 165),
    ("TEB", "OPF", 165),
    ("OPF", "TEB", 175),
    ("TEB", "VNY", 330),
    ("VNY", "TEB", 290),
    ("VNY", "LAS", 60),
    ("LAS", "VNY", 65),
    ("VNY", "SJC", 70),
    ("SJC", "VNY", 70),
    ("VNY", "ASE", 130),
    ("ASE", "VNY", 145),
    ("TEB", "ASE", 270),
    ("ASE", "TEB", 235),
    ("MDW", "TEB", 120),
    ("TEB", "MDW", 135),
    ("TEB", "BOS", 55),
    ("BOS", "TEB", 60),
    ("TEB", "LBG", 405),
    ("LBG", "TEB", 470),
    ("LTN", "LBG", 60),
    ("LBG", "LTN", 60),
    ("LTN", "NCE", 120),
    ("NCE", "LTN", 125),
    ("MIA", "NAS", 55),
    ("NAS", "MIA", 55),
    ("SDL", "LAS", 65),
    ("LAS", "SDL", 60),
];

/// Undirected (city, city, base minutes) heuristics for free-text locations
const CITY_PAIR_MINUTES: &[(&str, &str, u32)] = &[
    ("new york", "miami", 165),
    ("new york", "los angeles", 330),
    ("los angeles", "las vegas", 60),
    ("los angeles", "san francisco", 75),
    ("dallas", "houston", 55),
    ("chicago", "new york", 125),
    ("london", "paris", 60),
    ("austin", "new orleans", 105),
];

/// Which tier of the estimator produced a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimateSource {
    RouteTable,
    CityHeuristic,
    ClassDefault,
}

/// Whole-minute flight duration, displayed as `1h 45m` or `45m`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FlightDuration {
    minutes: u32,
}

impl FlightDuration {
    #[must_use]
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub fn hours(self) -> f64 {
        f64::from(self.minutes) / 60.0
    }
}

impl fmt::Display for FlightDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.minutes / 60;
        let minutes = self.minutes % 60;
        if hours == 0 {
            write!(f, "{minutes}m")
        } else {
            write!(f, "{hours}h {minutes}m")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub duration: FlightDuration,
    pub source: EstimateSource,
}

/// Per-class multiplier applied to table and heuristic minutes
#[must_use]
pub fn class_factor(class: AircraftClass) -> f64 {
    match class {
        AircraftClass::Light => 1.00,
        AircraftClass::Midsize => 0.95,
        AircraftClass::Heavy => 0.90,
        AircraftClass::UltraLongRange => 0.85,
    }
}

/// Duration used when nothing is known about the route
#[must_use]
pub fn class_default_minutes(class: AircraftClass) -> u32 {
    match class {
        AircraftClass::Light => 150,
        AircraftClass::Midsize => 140,
        AircraftClass::Heavy => 130,
        AircraftClass::UltraLongRange => 120,
    }
}

/// Extract a parenthesized three-letter upper-case code, e.g. `AUS` from `Austin (AUS)`.
#[must_use]
pub fn extract_iata_code(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    bytes.windows(5).enumerate().find_map(|(i, w)| {
        let is_code = w[0] == b'('
            && w[4] == b')'
            && w[1..4].iter().all(u8::is_ascii_uppercase);
        is_code.then(|| &text[i + 1..i + 4])
    })
}

/// Base minutes for a directed code pair, if the route is known
#[must_use]
pub fn route_minutes(origin: &str, destination: &str) -> Option<u32> {
    ROUTE_MINUTES
        .iter()
        .find(|(from, to, _)| *from == origin && *to == destination)
        .map(|(_, _, minutes)| *minutes)
}

fn city_pair_minutes(origin: &str, destination: &str) -> Option<u32> {
    let origin = origin.to_lowercase();
    let destination = destination.to_lowercase();
    CITY_PAIR_MINUTES
        .iter()
        .find(|(a, b, _)| {
            (origin.contains(a) && destination.contains(b))
                || (origin.contains(b) && destination.contains(a))
        })
        .map(|(_, _, minutes)| *minutes)
}

fn adjust(base_minutes: u32, class: AircraftClass) -> FlightDuration {
    let adjusted = (f64::from(base_minutes) * class_factor(class)).round();
    FlightDuration::from_minutes(adjusted as u32)
}

/// Estimate the flight time between two free-text locations for an aircraft class.
///
/// Never fails: unknown or missing locations degrade to the class default.
#[must_use]
pub fn estimate_detailed(
    origin: Option<&str>,
    destination: Option<&str>,
    class: AircraftClass,
) -> Estimate {
    let codes = origin
        .and_then(extract_iata_code)
        .zip(destination.and_then(extract_iata_code));

    if let Some(base) = codes.and_then(|(from, to)| route_minutes(from, to)) {
        return Estimate {
            duration: adjust(base, class),
            source: EstimateSource::RouteTable,
        };
    }

    if let Some(base) = origin
        .zip(destination)
        .and_then(|(from, to)| city_pair_minutes(from, to))
    {
        return Estimate {
            duration: adjust(base, class),
            source: EstimateSource::CityHeuristic,
        };
    }

    debug!(?origin, ?destination, %class, "No route data, using class default");
    Estimate {
        duration: FlightDuration::from_minutes(class_default_minutes(class)),
        source: EstimateSource::ClassDefault,
    }
}

/// Convenience wrapper returning only the duration
#[must_use]
pub fn estimate(
    origin: Option<&str>,
    destination: Option<&str>,
    class: AircraftClass,
) -> FlightDuration {
    estimate_detailed(origin, destination, class).duration
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AircraftClass::Light, "1h 45m")]
    #[case(AircraftClass::Midsize, "1h 40m")]
    #[case(AircraftClass::Heavy, "1h 35m")]
    #[case(AircraftClass::UltraLongRange, "1h 29m")]
    fn test_route_table_with_class_factor(#[case] class: AircraftClass, #[case] expected: &str) {
        let duration = estimate(
            Some("Austin-Bergstrom International (AUS)"),
            Some("Louis Armstrong New Orleans (MSY)"),
            class,
        );
        assert_eq!(duration.to_string(), expected);
    }

    #[test]
    fn test_route_table_is_directed() {
        let there = estimate(Some("(AUS)"), Some("(MSY)"), AircraftClass::Light);
        let back = estimate(Some("(MSY)"), Some("(AUS)"), AircraftClass::Light);
        assert_eq!(there.minutes(), 105);
        assert_eq!(back.minutes(), 110);
    }

    #[test]
    fn test_city_heuristic_when_codes_unknown() {
        let result = estimate_detailed(
            Some("Manhattan, New York"),
            Some("Miami Beach"),
            AircraftClass::Light,
        );
        assert_eq!(result.source, EstimateSource::CityHeuristic);
        assert_eq!(result.duration.to_string(), "2h 45m");

        let reversed = estimate(Some("Miami"), Some("New York"), AircraftClass::Light);
        assert_eq!(reversed.minutes(), 165);
    }

    #[test]
    fn test_unknown_code_pair_falls_through_to_city_heuristic() {
        let result = estimate_detailed(
            Some("London Luton (LTN)"),
            Some("Paris Orly (ORY)"),
            AircraftClass::Heavy,
        );
        assert_eq!(result.source, EstimateSource::CityHeuristic);
        assert_eq!(result.duration.minutes(), 54);
    }

    #[rstest]
    #[case(AircraftClass::Light, "2h 30m")]
    #[case(AircraftClass::Midsize, "2h 20m")]
    #[case(AircraftClass::Heavy, "2h 10m")]
    #[case(AircraftClass::UltraLongRange, "2h 0m")]
    fn test_class_default(#[case] class: AircraftClass, #[case] expected: &str) {
        let result = estimate_detailed(Some("Somewhere"), None, class);
        assert_eq!(result.source, EstimateSource::ClassDefault);
        assert_eq!(result.duration.to_string(), expected);
    }

    #[rstest]
    #[case("Austin (AUS)", Some("AUS"))]
    #[case("(TEB) Teterboro", Some("TEB"))]
    #[case("Austin (aus)", None)]
    #[case("Austin (AUST)", None)]
    #[case("AUS", None)]
    #[case("", None)]
    fn test_extract_iata_code(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_iata_code(text), expected);
    }

    #[test]
    fn test_extract_handles_multibyte_text() {
        assert_eq!(extract_iata_code("Zürich (ZRH)"), Some("ZRH"));
        assert_eq!(extract_iata_code("Zürich"), None);
    }

    #[rstest]
    #[case(45, "45m")]
    #[case(60, "1h 0m")]
    #[case(89, "1h 29m")]
    #[case(330, "5h 30m")]
    fn test_duration_display(#[case] minutes: u32, #[case] expected: &str) {
        assert_eq!(FlightDuration::from_minutes(minutes).to_string(), expected);
    }
}
