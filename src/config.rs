//! Configuration management for the charter lead funnel
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::CharterError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::wizard::FlowVariant;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharterConfig {
    /// Airport directory settings
    pub lookup: LookupConfig,
    /// Lead hand-off settings
    pub submission: SubmissionConfig,
    /// Quote generation settings
    pub quotes: QuotesConfig,
    /// Booking wizard settings
    pub wizard: WizardConfig,
    /// HTTP API settings
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Airport directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Base URL shared by the code-search and autocomplete endpoints
    pub base_url: String,
    /// Path of the exact IATA code endpoint
    pub code_search_path: String,
    /// Path of the free-text autocomplete endpoint
    pub autocomplete_path: String,
    /// Directory API key, sent as `key=`
    pub api_key: Option<String>,
    /// Timeout per lookup attempt in seconds
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    #[default]
    Webhook,
    Email,
    /// Only log the lead; useful for local runs
    Log,
}

/// Lead hand-off configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub mode: SubmissionMode,
    /// Endpoint receiving the itinerary JSON
    pub webhook_url: String,
    pub timeout_seconds: u32,
    pub email: EmailConfig,
}

/// SMTP settings; credentials come from `CHARTERLEAD_SMTP_USER` and `CHARTERLEAD_SMTP_PASSWORD`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub smtp_relay: String,
    pub from_address: String,
    pub to_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    #[default]
    Synthetic,
    Proxy,
}

/// Quote generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotesConfig {
    pub mode: QuoteMode,
    /// Charter quote proxy, used in `proxy` mode
    pub proxy_url: String,
    pub currency: String,
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub variant: FlowVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Whole-request timeout for API handlers in seconds
    pub request_timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_lookup_base_url() -> String {
    "https://aviation-edge.com/v2/public".to_string()
}

fn default_code_search_path() -> String {
    "airportDatabase".to_string()
}

fn default_autocomplete_path() -> String {
    "autocomplete".to_string()
}

fn default_lookup_timeout() -> u32 {
    4
}

fn default_webhook_url() -> String {
    "http://localhost:3000/api/send-email".to_string()
}

fn default_submission_timeout() -> u32 {
    10
}

fn default_smtp_relay() -> String {
    "smtp.gmail.com".to_string()
}

fn default_quote_proxy_url() -> String {
    "http://localhost:3000/api/charter-quotes".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_quote_timeout() -> u32 {
    8
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_lookup_base_url(),
            code_search_path: default_code_search_path(),
            autocomplete_path: default_autocomplete_path(),
            api_key: None,
            timeout_seconds: default_lookup_timeout(),
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            mode: SubmissionMode::default(),
            webhook_url: default_webhook_url(),
            timeout_seconds: default_submission_timeout(),
            email: EmailConfig::default(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_relay: default_smtp_relay(),
            from_address: String::new(),
            to_address: String::new(),
        }
    }
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            mode: QuoteMode::default(),
            proxy_url: default_quote_proxy_url(),
            currency: default_currency(),
            timeout_seconds: default_quote_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl CharterConfig {
    /// Load configuration from the given file, or the default location, plus environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. CHARTERLEAD__LOOKUP__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("CHARTERLEAD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: CharterConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("charterlead").join("config.toml"))
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.lookup.base_url.is_empty() {
            self.lookup.base_url = default_lookup_base_url();
        }
        if self.lookup.code_search_path.is_empty() {
            self.lookup.code_search_path = default_code_search_path();
        }
        if self.lookup.autocomplete_path.is_empty() {
            self.lookup.autocomplete_path = default_autocomplete_path();
        }
        if self.lookup.timeout_seconds == 0 {
            self.lookup.timeout_seconds = default_lookup_timeout();
        }
        if self.lookup.api_key.as_deref().is_some_and(str::is_empty) {
            self.lookup.api_key = None;
        }
        if self.submission.webhook_url.is_empty() {
            self.submission.webhook_url = default_webhook_url();
        }
        if self.submission.timeout_seconds == 0 {
            self.submission.timeout_seconds = default_submission_timeout();
        }
        if self.submission.email.smtp_relay.is_empty() {
            self.submission.email.smtp_relay = default_smtp_relay();
        }
        if self.quotes.proxy_url.is_empty() {
            self.quotes.proxy_url = default_quote_proxy_url();
        }
        if self.quotes.currency.is_empty() {
            self.quotes.currency = default_currency();
        }
        if self.quotes.timeout_seconds == 0 {
            self.quotes.timeout_seconds = default_quote_timeout();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_submission()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.lookup.timeout_seconds > 30 {
            return Err(CharterError::config(
                "Airport lookup timeout cannot exceed 30 seconds"
            ).into());
        }

        if self.submission.timeout_seconds > 120 {
            return Err(CharterError::config(
                "Submission timeout cannot exceed 120 seconds"
            ).into());
        }

        if self.quotes.timeout_seconds > 120 {
            return Err(CharterError::config(
                "Quote timeout cannot exceed 120 seconds"
            ).into());
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(CharterError::config(
                "Request timeout cannot exceed 300 seconds"
            ).into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CharterError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CharterError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        for (name, url) in [
            ("Airport lookup base URL", &self.lookup.base_url),
            ("Submission webhook URL", &self.submission.webhook_url),
            ("Quote proxy URL", &self.quotes.proxy_url),
        ] {
            if !is_http_url(url) {
                return Err(CharterError::config(
                    format!("{name} must be a valid HTTP or HTTPS URL")
                ).into());
            }
        }

        if self.quotes.currency.len() != 3
            || !self.quotes.currency.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(CharterError::config(
                format!("Currency '{}' must be a three-letter ISO code", self.quotes.currency)
            ).into());
        }

        Ok(())
    }

    /// Email mode needs both addresses
    fn validate_submission(&self) -> Result<()> {
        if self.submission.mode == SubmissionMode::Email {
            let email = &self.submission.email;
            if !email.from_address.contains('@') || !email.to_address.contains('@') {
                return Err(CharterError::config(
                    "Email submission requires submission.email.from_address and to_address"
                ).into());
            }
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
