//! HTTP client for the external airport directory

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use crate::config::LookupConfig;
use crate::{CharterError, Result};

/// Which directory endpoint a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Exact lookup by IATA airport code
    CodeSearch,
    /// Free-text autocomplete
    Autocomplete,
}

/// Query parameter name carrying the user's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryParam {
    CodeIataAirport,
    City,
    Q,
    Search,
}

impl QueryParam {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QueryParam::CodeIataAirport => "codeIataAirport",
            QueryParam::City => "city",
            QueryParam::Q => "q",
            QueryParam::Search => "search",
        }
    }
}

impl fmt::Display for QueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attempt against the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRequest {
    pub endpoint: Endpoint,
    pub param: QueryParam,
    pub value: String,
}

impl DirectoryRequest {
    #[must_use]
    pub fn new(endpoint: Endpoint, param: QueryParam, value: impl Into<String>) -> Self {
        Self {
            endpoint,
            param,
            value: value.into(),
        }
    }
}

/// Source of raw airport JSON.
///
/// Implementations return `Err` for transport failures, non-2xx statuses and
/// undecodable bodies; the resolver treats every error as "try the next attempt".
#[async_trait]
pub trait AirportDirectory: Send + Sync {
    async fn fetch(&self, request: &DirectoryRequest) -> Result<Value>;
}

/// Directory backed by an Aviation-Edge style HTTP API
pub struct HttpAirportDirectory {
    client: Client,
    base_url: String,
    code_search_path: String,
    autocomplete_path: String,
    api_key: Option<String>,
}

impl HttpAirportDirectory {
    /// Create a new directory client with a bounded per-attempt timeout
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("CharterLead/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CharterError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            code_search_path: config.code_search_path.trim_matches('/').to_string(),
            autocomplete_path: config.autocomplete_path.trim_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url_for(&self, request: &DirectoryRequest) -> String {
        let path = match request.endpoint {
            Endpoint::CodeSearch => &self.code_search_path,
            Endpoint::Autocomplete => &self.autocomplete_path,
        };
        let key = self
            .api_key
            .as_deref()
            .map(|key| format!("key={}&", urlencoding::encode(key)))
            .unwrap_or_default();
        format!(
            "{}/{}?{}{}={}",
            self.base_url,
            path,
            key,
            request.param,
            urlencoding::encode(&request.value)
        )
    }
}

#[async_trait]
impl AirportDirectory for HttpAirportDirectory {
    #[instrument(name = "airport_directory_fetch", level = "debug", skip(self), fields(param = %request.param))]
    async fn fetch(&self, request: &DirectoryRequest) -> Result<Value> {
        let url = self.url_for(request);
        let start = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|e| {
            debug!("Airport directory request failed: {}", e);
            CharterError::lookup(format!("Request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Airport directory returned {}", status);
            return Err(CharterError::lookup(format!(
                "Directory returned status {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CharterError::lookup(format!("Invalid directory JSON: {e}")))?;

        let elapsed = start.elapsed();
        debug!("Airport directory answered in {:.3}s", elapsed.as_secs_f64());
        if elapsed.as_secs() > 2 {
            warn!("Slow airport directory response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(api_key: Option<&str>) -> HttpAirportDirectory {
        let config = LookupConfig {
            base_url: "https://directory.example.com/v2/public/".to_string(),
            api_key: api_key.map(str::to_string),
            ..LookupConfig::default()
        };
        HttpAirportDirectory::new(&config).unwrap()
    }

    #[test]
    fn test_code_search_url() {
        let request = DirectoryRequest::new(Endpoint::CodeSearch, QueryParam::CodeIataAirport, "AUS");
        assert_eq!(
            directory(Some("k3y")).url_for(&request),
            "https://directory.example.com/v2/public/airportDatabase?key=k3y&codeIataAirport=AUS"
        );
    }

    #[test]
    fn test_autocomplete_url_encodes_query() {
        let request = DirectoryRequest::new(Endpoint::Autocomplete, QueryParam::City, "New York");
        assert_eq!(
            directory(None).url_for(&request),
            "https://directory.example.com/v2/public/autocomplete?city=New%20York"
        );
    }
}
