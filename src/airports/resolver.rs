//! Airport resolution: exact-code lookup, then the autocomplete fallback chain

use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::directory::{AirportDirectory, DirectoryRequest, Endpoint, QueryParam};
use super::normalize::{extract_items, normalize_item, single_record};
use crate::models::CanonicalAirport;
use crate::ranking;

/// Queries shorter than this never reach the directory
pub const MIN_QUERY_CHARS: usize = 2;

/// Queries up to this length are first tried as an IATA code
const MAX_CODE_CHARS: usize = 4;

/// Autocomplete parameters, tried in order until one yields an array
const FALLBACK_CHAIN: [QueryParam; 3] = [QueryParam::City, QueryParam::Q, QueryParam::Search];

/// Resolves free-text location input into canonical airports.
///
/// Failures never escape: an unreachable or misbehaving directory yields an
/// empty list.
#[derive(Clone)]
pub struct AirportResolver {
    directory: Arc<dyn AirportDirectory>,
}

impl AirportResolver {
    #[must_use]
    pub fn new(directory: Arc<dyn AirportDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve a query into canonical airports in provider order
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> Vec<CanonicalAirport> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        if query.chars().count() <= MAX_CODE_CHARS {
            if let Some(airport) = self.lookup_code(query).await {
                info!("Resolved '{}' by exact code lookup", query);
                return vec![airport];
            }
        }

        let airports = self.autocomplete(query).await;
        info!("Resolved '{}' to {} airports", query, airports.len());
        airports
    }

    /// Resolve and rank, keeping the top suggestions
    pub async fn suggest(&self, query: &str) -> Vec<CanonicalAirport> {
        let candidates = self.resolve(query).await;
        ranking::rank(candidates, query)
    }

    async fn lookup_code(&self, query: &str) -> Option<CanonicalAirport> {
        let request = DirectoryRequest::new(
            Endpoint::CodeSearch,
            QueryParam::CodeIataAirport,
            query.to_uppercase(),
        );

        match self.directory.fetch(&request).await {
            Ok(body) => single_record(&body).and_then(normalize_item),
            Err(e) => {
                debug!("Exact code lookup for '{}' failed: {}", query, e);
                None
            }
        }
    }

    async fn autocomplete(&self, query: &str) -> Vec<CanonicalAirport> {
        for param in FALLBACK_CHAIN {
            let request = DirectoryRequest::new(Endpoint::Autocomplete, param, query);
            let body = match self.directory.fetch(&request).await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Autocomplete by '{}' failed: {}", param, e);
                    continue;
                }
            };

            let Some(items) = extract_items(&body) else {
                debug!("Autocomplete by '{}' returned no array", param);
                continue;
            };

            let raw_count = items.len();
            let airports: Vec<CanonicalAirport> = items.iter().filter_map(normalize_item).collect();
            if airports.len() < raw_count {
                debug!(
                    "Dropped {} records without a name or code",
                    raw_count - airports.len()
                );
            }
            return airports;
        }

        debug!("Every autocomplete attempt failed for '{}'", query);
        Vec::new()
    }
}
