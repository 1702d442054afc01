use async_trait::async_trait;
use lettre::{
    Message, Transport, transport::smtp::SmtpTransport,
    transport::smtp::authentication::Credentials,
};
use std::env;

use crate::config::EmailConfig;
use crate::models::Itinerary;
use crate::submission::LeadSubmitter;
use crate::{CharterError, Result};

/// Sends each lead to the charter desk mailbox over SMTP
pub struct EmailSubmitter {
    mailer: SmtpTransport,
    from_address: String,
    to_address: String,
}

impl EmailSubmitter {
    /// Build from config, reading `CHARTERLEAD_SMTP_USER` and `CHARTERLEAD_SMTP_PASSWORD`
    pub fn from_env(config: &EmailConfig) -> Result<Self> {
        let user = env::var("CHARTERLEAD_SMTP_USER")
            .map_err(|_| CharterError::config("Missing CHARTERLEAD_SMTP_USER env var"))?;
        let password = env::var("CHARTERLEAD_SMTP_PASSWORD")
            .map_err(|_| CharterError::config("Missing CHARTERLEAD_SMTP_PASSWORD env var"))?;

        let mailer = SmtpTransport::relay(&config.smtp_relay)
            .map_err(|e| CharterError::config(format!("Invalid SMTP relay: {e}")))?
            .credentials(Credentials::new(user, password))
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            to_address: config.to_address.clone(),
        })
    }

    fn message(&self, itinerary: &Itinerary) -> Result<Message> {
        Message::builder()
            .from(
                format!("Charter Leads <{}>", self.from_address)
                    .parse()
                    .map_err(|e| CharterError::config(format!("Invalid from address: {e}")))?,
            )
            .to(self
                .to_address
                .parse()
                .map_err(|e| CharterError::config(format!("Invalid to address: {e}")))?)
            .subject(lead_email_subject(itinerary))
            .body(lead_email_body(itinerary))
            .map_err(|e| CharterError::submission(format!("Failed to build email: {e}")))
    }
}

#[must_use]
pub fn lead_email_subject(itinerary: &Itinerary) -> String {
    format!(
        "Charter request: {} to {} on {}",
        itinerary.origin_code().unwrap_or(&itinerary.from),
        itinerary.destination_code().unwrap_or(&itinerary.to),
        itinerary.depart_date.format("%Y-%m-%d")
    )
}

#[must_use]
pub fn lead_email_body(itinerary: &Itinerary) -> String {
    let mut body = format!(
        "New charter request\n\n\
From: {}\n\
To: {}\n\
Departure: {}\n\
Trip type: {}\n",
        itinerary.from,
        itinerary.to,
        itinerary.departure().format("%Y-%m-%d %H:%M"),
        itinerary.trip_type,
    );
    if let Some(ret) = itinerary.return_departure() {
        body.push_str(&format!("Return: {}\n", ret.format("%Y-%m-%d %H:%M")));
    }
    body.push_str(&format!(
        "Passengers: {}\n\nContact: {} <{}>\n",
        itinerary.passenger_count, itinerary.contact_name, itinerary.contact_email
    ));
    if let Some(phone) = &itinerary.contact_phone {
        body.push_str(&format!("Phone: {phone}\n"));
    }
    body
}

#[async_trait]
impl LeadSubmitter for EmailSubmitter {
    async fn submit(&self, itinerary: &Itinerary) -> Result<()> {
        let email = self.message(itinerary)?;
        let mailer = self.mailer.clone();

        // SmtpTransport is blocking
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| CharterError::general(format!("Email task failed: {e}")))?
            .map_err(|e| CharterError::submission(format!("Failed to send email: {e}")))?;

        tracing::info!("Sent charter lead email to {}", self.to_address);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripType;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_lead_email_body() {
        let itinerary = Itinerary {
            from: "Van Nuys (VNY)".to_string(),
            to: "Aspen-Pitkin County (ASE)".to_string(),
            depart_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            depart_time: NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2026, 12, 27),
            return_time: NaiveTime::from_hms_opt(16, 0, 0),
            passenger_count: 5,
            trip_type: TripType::RoundTrip,
            contact_email: "sam@example.com".to_string(),
            contact_name: "Sam Park".to_string(),
            contact_phone: Some("+1 310 555 0100".to_string()),
        };

        let body = lead_email_body(&itinerary);
        assert!(body.contains("From: Van Nuys (VNY)"));
        assert!(body.contains("Departure: 2026-12-20 10:15"));
        assert!(body.contains("Return: 2026-12-27 16:00"));
        assert!(body.contains("Trip type: round-trip"));
        assert!(body.contains("Phone: +1 310 555 0100"));
        assert_eq!(
            lead_email_subject(&itinerary),
            "Charter request: VNY to ASE on 2026-12-20"
        );
    }
}
