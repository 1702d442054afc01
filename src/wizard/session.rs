//! A booking session: the wizard plus the services its steps talk to.
//!
//! Location steps drive per-field airport searches. Continuing from the
//! review step assembles the itinerary, submits the lead and fetches quotes
//! concurrently, then lands on the results step whatever either call returned.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::gate::GateError;
use super::machine::BookingWizard;
use super::state::{Field, WizardState};
use super::steps::{FlowVariant, Step};
use crate::airports::{AirportResolver, AirportSearch};
use crate::models::{CanonicalAirport, Itinerary, TripType};
use crate::quotes::{QuoteOutcome, QuoteSource};
use crate::submission::LeadSubmitter;

pub struct WizardSession {
    wizard: BookingWizard,
    origin_search: AirportSearch,
    destination_search: AirportSearch,
    quote_source: Arc<dyn QuoteSource>,
    submitter: Arc<dyn LeadSubmitter>,
    outcome: Option<QuoteOutcome>,
    submitted: Option<Itinerary>,
}

impl WizardSession {
    #[must_use]
    pub fn new(
        variant: FlowVariant,
        resolver: AirportResolver,
        quote_source: Arc<dyn QuoteSource>,
        submitter: Arc<dyn LeadSubmitter>,
    ) -> Self {
        Self {
            wizard: BookingWizard::new(variant),
            origin_search: AirportSearch::new(resolver.clone()),
            destination_search: AirportSearch::new(resolver),
            quote_source,
            submitter,
            outcome: None,
            submitted: None,
        }
    }

    #[must_use]
    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    #[must_use]
    pub fn state(&self) -> &WizardState {
        self.wizard.state()
    }

    #[must_use]
    pub fn current_step(&self) -> Step {
        self.wizard.current_step()
    }

    /// Search backing a location field
    #[must_use]
    pub fn search_for(&self, field: Field) -> Option<&AirportSearch> {
        match field {
            Field::Origin => Some(&self.origin_search),
            Field::Destination => Some(&self.destination_search),
            _ => None,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.wizard.set_field(field, value);
    }

    pub fn set_trip_type(&mut self, trip_type: TripType) -> bool {
        self.wizard.set_trip_type(trip_type)
    }

    /// Store free text for a location field and look up suggestions for it.
    ///
    /// The typed text is kept as the field value, so an unresolved location
    /// still satisfies the gate. Returns the suggestions if they were applied.
    pub async fn type_location(
        &mut self,
        field: Field,
        text: &str,
    ) -> Option<Vec<CanonicalAirport>> {
        self.wizard.set_field(field, text);
        let search = self.search_for(field)?;
        search.search(text).await
    }

    /// Pick one of the displayed suggestions, writing `Name (CODE)` into the field
    pub fn select_suggestion(&mut self, field: Field, index: usize) -> Option<CanonicalAirport> {
        let search = self.search_for(field)?;
        let airport = search.suggestions().into_iter().nth(index)?;
        search.clear();
        self.wizard.set_field(field, airport.selection_label());
        Some(airport)
    }

    pub fn gate(&self) -> Result<(), GateError> {
        self.wizard.gate()
    }

    /// Move forward; from the review step this submits the lead and fetches quotes first
    pub async fn advance(&mut self) -> bool {
        if self.wizard.current_step() != Step::Review {
            return self.wizard.advance();
        }
        if self.wizard.gate().is_err() {
            return false;
        }
        let Some(itinerary) = self.wizard.itinerary() else {
            warn!("Review step reached without a complete itinerary");
            return false;
        };

        // coming back to review without edits must not send the lead twice
        let resend = self.submitted.as_ref() != Some(&itinerary);
        let submitter = Arc::clone(&self.submitter);
        let quote_source = Arc::clone(&self.quote_source);
        let submit = async {
            if resend {
                Some(submitter.submit(&itinerary).await)
            } else {
                None
            }
        };
        let (submitted, quotes) = futures::join!(submit, quote_source.quotes(&itinerary));

        // a failed hand-off is not shown to the user
        match submitted {
            Some(Err(e)) => warn!("Lead submission failed: {}", e),
            Some(Ok(())) => info!("Lead submitted for {} -> {}", itinerary.from, itinerary.to),
            None => debug!("Lead unchanged since last submission"),
        }

        self.outcome = Some(QuoteOutcome::from_result(quotes));
        self.submitted = Some(itinerary);
        self.wizard.advance()
    }

    pub fn retreat(&mut self) -> bool {
        self.wizard.retreat()
    }

    /// Start over with an empty wizard and no suggestions or quotes
    pub fn reset(&mut self) {
        self.wizard.reset();
        self.origin_search.clear();
        self.destination_search.clear();
        self.outcome = None;
        self.submitted = None;
    }

    /// Quotes gathered when leaving the review step
    #[must_use]
    pub fn quotes(&self) -> Option<&QuoteOutcome> {
        self.outcome.as_ref()
    }

    /// Itinerary handed off when leaving the review step
    #[must_use]
    pub fn itinerary(&self) -> Option<&Itinerary> {
        self.submitted.as_ref()
    }
}
