//! Charter quote generation
//!
//! `SyntheticQuotes` is the canonical source: one price range per aircraft
//! class that can seat the party, priced from the estimated flight time.
//! `ProxyQuotes` forwards the itinerary to an external quote proxy.

use async_trait::async_trait;
use rand::RngExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::{QuoteMode, QuotesConfig};
use crate::estimator;
use crate::models::{AircraftClass, Itinerary, Quote, TripType};
use crate::{CharterError, Result};

/// Source of quotes for an itinerary
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quotes(&self, itinerary: &Itinerary) -> Result<Vec<Quote>>;
}

/// Quotes shown on the results step, with the error that replaced them if any
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuoteOutcome {
    pub quotes: Vec<Quote>,
    pub error: Option<String>,
}

impl QuoteOutcome {
    #[must_use]
    pub fn from_result(result: Result<Vec<Quote>>) -> Self {
        match result {
            Ok(quotes) => Self {
                quotes,
                error: None,
            },
            Err(e) => {
                warn!("Quote retrieval failed: {}", e);
                Self {
                    quotes: Vec::new(),
                    error: Some(e.user_message()),
                }
            }
        }
    }
}

const OPERATORS: [&str; 5] = [
    "Summit Air Charter",
    "Blue Horizon Aviation",
    "Meridian Jet Partners",
    "Keystone Executive Air",
    "Crescent Aviation Group",
];

fn models(class: AircraftClass) -> &'static [&'static str] {
    match class {
        AircraftClass::Light => &["Citation CJ3", "Phenom 300", "Learjet 75", "HondaJet Elite"],
        AircraftClass::Midsize => &["Citation XLS+", "Hawker 900XP", "Learjet 60XR", "Citation Latitude"],
        AircraftClass::Heavy => &["Challenger 605", "Falcon 2000LX", "Gulfstream G450", "Legacy 600"],
        AircraftClass::UltraLongRange => &["Gulfstream G650", "Global 6000", "Falcon 7X", "Global 7500"],
    }
}

/// Hourly charter rate in the quote currency
#[must_use]
pub fn hourly_rate(class: AircraftClass) -> u64 {
    match class {
        AircraftClass::Light => 4_500,
        AircraftClass::Midsize => 6_500,
        AircraftClass::Heavy => 9_500,
        AircraftClass::UltraLongRange => 13_500,
    }
}

/// Classes able to seat the party; the largest class when none can
#[must_use]
pub fn eligible_classes(passengers: u32) -> Vec<AircraftClass> {
    let classes: Vec<AircraftClass> = AircraftClass::ALL
        .into_iter()
        .filter(|class| class.seats() >= passengers)
        .collect();
    if classes.is_empty() {
        vec![AircraftClass::UltraLongRange]
    } else {
        classes
    }
}

fn round_to_hundred(value: f64) -> u64 {
    ((value / 100.0).round() * 100.0).max(0.0) as u64
}

fn pick<'a, R: RngExt>(items: &[&'a str], rng: &mut R) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Client-side quote synthesis
pub struct SyntheticQuotes {
    currency: String,
}

impl SyntheticQuotes {
    #[must_use]
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Build one quote per eligible class using the given randomness
    pub fn synthesize<R: RngExt>(&self, itinerary: &Itinerary, rng: &mut R) -> Vec<Quote> {
        let legs = if itinerary.trip_type == TripType::RoundTrip { 2.0 } else { 1.0 };

        eligible_classes(itinerary.passenger_count)
            .into_iter()
            .map(|class| {
                let duration =
                    estimator::estimate(Some(&itinerary.from), Some(&itinerary.to), class);
                // one billable hour minimum per leg
                let hours = duration.hours().max(1.0);
                let jitter: f64 = rng.random_range(0.9..1.1);
                let low = round_to_hundred(hourly_rate(class) as f64 * hours * jitter * legs);
                let high = round_to_hundred(low as f64 * 1.25);

                Quote {
                    aircraft_class: class,
                    aircraft_model: pick(models(class), &mut *rng).to_string(),
                    price_low: low,
                    price_high: Some(high),
                    currency: self.currency.clone(),
                    departure_timestamp: itinerary.departure(),
                    flight_duration: duration.to_string(),
                    operator_name: pick(&OPERATORS, &mut *rng).to_string(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl QuoteSource for SyntheticQuotes {
    async fn quotes(&self, itinerary: &Itinerary) -> Result<Vec<Quote>> {
        let quotes = self.synthesize(itinerary, &mut rand::rng());
        info!("Synthesized {} quotes", quotes.len());
        Ok(quotes)
    }
}

/// Request body sent to the quote proxy
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub from_code: Option<&'a str>,
    pub to_code: Option<&'a str>,
    pub date: String,
    pub time: String,
    pub passengers: u32,
    pub trip_type: TripType,
}

impl<'a> From<&'a Itinerary> for QuoteRequest<'a> {
    fn from(itinerary: &'a Itinerary) -> Self {
        Self {
            from: &itinerary.from,
            to: &itinerary.to,
            from_code: itinerary.origin_code(),
            to_code: itinerary.destination_code(),
            date: itinerary.depart_date.format("%Y-%m-%d").to_string(),
            time: itinerary.depart_time.format("%H:%M").to_string(),
            passengers: itinerary.passenger_count,
            trip_type: itinerary.trip_type,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProxyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    error: Option<String>,
}

/// Decode `{success, data: {quotes: [...]}}` or `{success, data: [...]}`
pub fn parse_proxy_response(body: Value) -> Result<Vec<Quote>> {
    let response: ProxyResponse = serde_json::from_value(body)
        .map_err(|e| CharterError::quote(format!("Malformed quote response: {e}")))?;

    if !response.success {
        return Err(CharterError::quote(
            response
                .error
                .unwrap_or_else(|| "Quote provider reported failure".to_string()),
        ));
    }

    let quotes = match response.data {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove("quotes")
            .ok_or_else(|| CharterError::quote("Quote response has no quotes"))?,
        _ => return Err(CharterError::quote("Quote response has no data")),
    };

    serde_json::from_value(quotes)
        .map_err(|e| CharterError::quote(format!("Malformed quote list: {e}")))
}

/// Quotes from an external charter quote proxy
pub struct ProxyQuotes {
    client: Client,
    url: String,
}

impl ProxyQuotes {
    pub fn new(config: &QuotesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| CharterError::config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: config.proxy_url.clone(),
        })
    }
}

#[async_trait]
impl QuoteSource for ProxyQuotes {
    #[instrument(name = "proxy_quotes", skip_all, fields(url = %self.url))]
    async fn quotes(&self, itinerary: &Itinerary) -> Result<Vec<Quote>> {
        let response = self
            .client
            .post(&self.url)
            .json(&QuoteRequest::from(itinerary))
            .send()
            .await
            .map_err(|e| CharterError::quote(format!("Quote request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CharterError::quote(format!(
                "Quote proxy returned status {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CharterError::quote(format!("Invalid quote JSON: {e}")))?;
        let quotes = parse_proxy_response(body)?;
        info!("Received {} quotes from proxy", quotes.len());
        Ok(quotes)
    }
}

/// Build the quote source selected by configuration
pub fn quote_source_from_config(config: &QuotesConfig) -> Result<Arc<dyn QuoteSource>> {
    Ok(match config.mode {
        QuoteMode::Synthetic => Arc::new(SyntheticQuotes::new(config.currency.clone())),
        QuoteMode::Proxy => Arc::new(ProxyQuotes::new(config)?),
    })
}
