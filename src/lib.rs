//! `CharterLead` - private-jet charter lead funnel
//!
//! Resolves free-text airport input against a flaky third-party directory,
//! ranks the candidates, walks the traveller through a branching booking
//! wizard and turns the finished itinerary into a lead plus indicative quotes.

pub mod airports;
pub mod api;
pub mod config;
pub mod console;
pub mod email;
pub mod error;
pub mod estimator;
pub mod models;
pub mod quotes;
pub mod ranking;
pub mod submission;
pub mod web;
pub mod wizard;

// Re-export core types for public API
pub use airports::{AirportDirectory, AirportResolver, AirportSearch, HttpAirportDirectory};
pub use config::CharterConfig;
pub use error::CharterError;
pub use estimator::{Estimate, FlightDuration};
pub use models::{AircraftClass, CanonicalAirport, Itinerary, Quote, TripType};
pub use quotes::{QuoteOutcome, QuoteSource, SyntheticQuotes};
pub use submission::LeadSubmitter;
pub use wizard::{BookingWizard, FlowVariant, Step, WizardSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CharterError>;
