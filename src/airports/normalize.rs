//! Normalization of airport directory payloads
//!
//! Directory responses come as a bare array, an object wrapping an array under
//! one of several names, or a single airport object. Each canonical attribute
//! is read through an ordered list of candidate keys, first non-blank wins.

use serde_json::{Map, Value};

use crate::models::CanonicalAirport;

/// Display name: airport name, city, alternate city, IATA name, generic name
const NAME_KEYS: &[&str] = &["nameAirport", "city", "nameCity", "cityName", "nameIata", "name"];
const CODE_KEYS: &[&str] = &["codeIataAirport", "codeIata", "iataCode", "iata", "code"];
const CITY_KEYS: &[&str] = &["nameCity", "city", "cityName"];
const REGION_KEYS: &[&str] = &["state", "region", "nameState", "codeState"];
const COUNTRY_KEYS: &[&str] = &["nameCountry", "country", "countryName", "codeIso2Country"];

/// Envelope fields known to carry the result array, in preference order
const ARRAY_KEYS: &[&str] = &["airportsByCities", "airports", "data", "results", "cities"];

fn first_text(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Normalize one raw record; `None` when it has neither a name nor a code.
#[must_use]
pub fn normalize_item(item: &Value) -> Option<CanonicalAirport> {
    let item = item.as_object()?;
    let name = first_text(item, NAME_KEYS).unwrap_or_default();
    let code = first_text(item, CODE_KEYS);

    CanonicalAirport::new(name, code).map(|airport| {
        airport
            .with_city(first_text(item, CITY_KEYS))
            .with_region(first_text(item, REGION_KEYS))
            .with_country(first_text(item, COUNTRY_KEYS))
    })
}

/// Locate the result array in a response body.
///
/// Tries the body itself, then the known envelope fields, then the first
/// array-valued field in the body's own key order.
#[must_use]
pub fn extract_items(body: &Value) -> Option<&Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(map) => ARRAY_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .or_else(|| map.values().find_map(Value::as_array)),
        _ => None,
    }
}

/// A response holding exactly one airport: a one-element array, or an object
/// that is itself an airport record.
#[must_use]
pub fn single_record(body: &Value) -> Option<&Value> {
    match extract_items(body) {
        Some(items) if items.len() == 1 => items.first(),
        Some(_) => None,
        None => body
            .as_object()
            .filter(|map| first_text(map, NAME_KEYS).is_some() || first_text(map, CODE_KEYS).is_some())
            .map(|_| body),
    }
}
