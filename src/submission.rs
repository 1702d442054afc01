//! Lead hand-off: forwarding a completed itinerary to the charter desk

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use crate::config::{SubmissionConfig, SubmissionMode};
use crate::email::EmailSubmitter;
use crate::models::Itinerary;
use crate::{CharterError, Result};

#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit(&self, itinerary: &Itinerary) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct WebhookResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// POSTs the itinerary as JSON and expects `{"success": true}` back
pub struct WebhookSubmitter {
    client: Client,
    url: String,
}

impl WebhookSubmitter {
    pub fn new(url: impl Into<String>, timeout_seconds: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.into()))
            .build()
            .map_err(|e| CharterError::config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl LeadSubmitter for WebhookSubmitter {
    #[instrument(name = "webhook_submit", skip_all, fields(url = %self.url))]
    async fn submit(&self, itinerary: &Itinerary) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(itinerary)
            .send()
            .await
            .map_err(|e| CharterError::submission(format!("Webhook request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CharterError::submission(format!(
                "Webhook returned status {status}"
            )));
        }

        let body: WebhookResponse = response
            .json()
            .await
            .map_err(|e| CharterError::submission(format!("Invalid webhook response: {e}")))?;
        if !body.success {
            return Err(CharterError::submission(
                body.error
                    .unwrap_or_else(|| "Webhook reported failure".to_string()),
            ));
        }

        info!(
            "Lead for {} -> {} delivered to webhook",
            itinerary.from, itinerary.to
        );
        Ok(())
    }
}

/// Logs the lead and reports success
pub struct LogSubmitter;

#[async_trait]
impl LeadSubmitter for LogSubmitter {
    async fn submit(&self, itinerary: &Itinerary) -> Result<()> {
        info!(
            from = %itinerary.from,
            to = %itinerary.to,
            depart = %itinerary.departure(),
            passengers = itinerary.passenger_count,
            trip_type = %itinerary.trip_type,
            contact = %itinerary.contact_email,
            "Charter lead received"
        );
        Ok(())
    }
}

/// Build the submitter selected by configuration
pub fn submitter_from_config(config: &SubmissionConfig) -> Result<Arc<dyn LeadSubmitter>> {
    Ok(match config.mode {
        SubmissionMode::Webhook => Arc::new(WebhookSubmitter::new(
            config.webhook_url.clone(),
            config.timeout_seconds,
        )?),
        SubmissionMode::Email => Arc::new(EmailSubmitter::from_env(&config.email)?),
        SubmissionMode::Log => Arc::new(LogSubmitter),
    })
}
