//! Booking wizard state machine
//!
//! `advance` and `retreat` are pure graph lookups over (current step, trip type).
//! The continue-gate is the caller's contract, but a failing gate is still
//! checked here and turns `advance` into a no-op.

use tracing::debug;

use super::gate::{self, GateError};
use super::state::{Field, WizardState};
use super::steps::{FlowVariant, Step, StepGraph, StepId};
use crate::models::{Itinerary, TripType};

#[derive(Debug, Clone)]
pub struct BookingWizard {
    graph: StepGraph,
    state: WizardState,
}

impl BookingWizard {
    #[must_use]
    pub fn new(variant: FlowVariant) -> Self {
        Self {
            graph: StepGraph::new(variant),
            state: WizardState::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub fn current_id(&self) -> StepId {
        self.state.current_step()
    }

    #[must_use]
    pub fn current_step(&self) -> Step {
        // current_step is always a graph member
        self.graph
            .step(self.state.current_step())
            .unwrap_or(Step::Origin)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.set_field(field, value);
    }

    /// Choose the trip type.
    ///
    /// Only accepted on the trip-type step. Changing it anywhere past the
    /// branch would leave return steps unvisited or the current step off the path.
    pub fn set_trip_type(&mut self, trip_type: TripType) -> bool {
        if self.current_step() != Step::TripType {
            debug!(step = ?self.current_step(), "Ignoring trip type {}", trip_type);
            return false;
        }
        self.state.set_trip_type(trip_type);
        true
    }

    /// Continue-gate for the current step
    pub fn gate(&self) -> Result<(), GateError> {
        gate::check(self.current_step(), &self.state)
    }

    /// Move forward; returns `false` (and stays put) when the gate fails or there is no next step
    pub fn advance(&mut self) -> bool {
        if let Err(reason) = self.gate() {
            debug!(step = ?self.current_step(), "Advance blocked: {}", reason);
            return false;
        }
        match self
            .graph
            .next(self.state.current_step(), self.state.trip_type())
        {
            Some(next) => {
                self.state.set_current_step(next);
                true
            }
            None => false,
        }
    }

    /// Move back along the branch taken; returns `false` on the first step
    pub fn retreat(&mut self) -> bool {
        match self
            .graph
            .prev(self.state.current_step(), self.state.trip_type())
        {
            Some(prev) => {
                self.state.set_current_step(prev);
                true
            }
            None => false,
        }
    }

    /// Back to step 1 with no trip type and no fields
    pub fn reset(&mut self) {
        self.state = WizardState::new();
    }

    #[must_use]
    pub fn itinerary(&self) -> Option<Itinerary> {
        self.state.itinerary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_trip_type(variant: FlowVariant) -> BookingWizard {
        let mut wizard = BookingWizard::new(variant);
        wizard.set_field(Field::Origin, "Austin (AUS)");
        wizard.set_field(Field::Destination, "New Orleans (MSY)");
        wizard.set_field(Field::DepartDate, "2026-11-02");
        wizard.set_field(Field::DepartTime, "09:30");
        wizard.set_field(Field::Passengers, "4");
        while wizard.current_step() != Step::TripType {
            assert!(wizard.advance(), "stuck at {:?}", wizard.current_step());
        }
        wizard
    }

    #[test]
    fn test_starts_at_origin() {
        let wizard = BookingWizard::new(FlowVariant::Standard);
        assert_eq!(wizard.current_id(), 1);
        assert_eq!(wizard.current_step(), Step::Origin);
        assert_eq!(wizard.state().trip_type(), TripType::Unset);
    }

    #[test]
    fn test_one_way_skips_return_step() {
        let mut wizard = at_trip_type(FlowVariant::Standard);
        assert!(wizard.set_trip_type(TripType::OneWay));
        assert!(wizard.advance());
        assert_eq!(wizard.current_step(), Step::ContactEmail);
    }

    #[test]
    fn test_round_trip_visits_return_step() {
        let mut wizard = at_trip_type(FlowVariant::Standard);
        assert!(wizard.set_trip_type(TripType::RoundTrip));
        assert!(wizard.advance());
        assert_eq!(wizard.current_step(), Step::ReturnDateTime);
    }

    #[test]
    fn test_unset_trip_type_blocks_advance() {
        let mut wizard = at_trip_type(FlowVariant::Standard);
        assert_eq!(wizard.gate(), Err(GateError::TripTypeUnset));
        assert!(!wizard.advance());
        assert_eq!(wizard.current_step(), Step::TripType);
    }

    #[test]
    fn test_one_way_retreat_from_email_returns_to_trip_type() {
        let mut wizard = at_trip_type(FlowVariant::Extended);
        wizard.set_trip_type(TripType::OneWay);
        wizard.advance();
        assert_eq!(wizard.current_step(), Step::ContactEmail);

        assert!(wizard.retreat());
        assert_eq!(wizard.current_step(), Step::TripType);
    }

    #[test]
    fn test_round_trip_retreat_from_email_returns_to_return_time() {
        let mut wizard = at_trip_type(FlowVariant::Extended);
        wizard.set_trip_type(TripType::RoundTrip);
        wizard.advance();
        wizard.set_field(Field::ReturnDate, "2026-11-05");
        wizard.advance();
        wizard.set_field(Field::ReturnTime, "18:00");
        wizard.advance();
        assert_eq!(wizard.current_step(), Step::ContactEmail);

        assert!(wizard.retreat());
        assert_eq!(wizard.current_step(), Step::ReturnTime);
    }

    #[test]
    fn test_gate_failure_is_a_no_op() {
        let mut wizard = BookingWizard::new(FlowVariant::Standard);
        assert!(!wizard.advance());
        assert_eq!(wizard.current_id(), 1);
        assert!(wizard.gate().is_err());
    }

    #[test]
    fn test_trip_type_change_rejected_on_return_step() {
        let mut wizard = at_trip_type(FlowVariant::Standard);
        wizard.set_trip_type(TripType::RoundTrip);
        wizard.advance();
        assert!(!wizard.set_trip_type(TripType::OneWay));
        assert_eq!(wizard.state().trip_type(), TripType::RoundTrip);

        wizard.retreat();
        assert!(wizard.set_trip_type(TripType::OneWay));
    }

    #[test]
    fn test_trip_type_change_rejected_after_branch() {
        let mut wizard = at_trip_type(FlowVariant::Standard);
        wizard.set_trip_type(TripType::OneWay);
        wizard.advance();
        assert_eq!(wizard.current_step(), Step::ContactEmail);

        assert!(!wizard.set_trip_type(TripType::RoundTrip));
        assert_eq!(wizard.state().trip_type(), TripType::OneWay);

        wizard.set_field(Field::ContactEmail, "jane@example.com");
        wizard.advance();
        wizard.set_field(Field::ContactName, "Jane Doe");
        wizard.advance();
        assert_eq!(wizard.current_step(), Step::Review);
        assert!(!wizard.set_trip_type(TripType::RoundTrip));
        assert!(wizard.itinerary().is_some());
    }

    #[test]
    fn test_trip_type_rejected_before_branch() {
        let mut wizard = BookingWizard::new(FlowVariant::Standard);
        assert!(!wizard.set_trip_type(TripType::OneWay));
        assert_eq!(wizard.state().trip_type(), TripType::Unset);
    }

    #[test]
    fn test_retreat_at_first_step() {
        let mut wizard = BookingWizard::new(FlowVariant::Standard);
        assert!(!wizard.retreat());
        assert_eq!(wizard.current_id(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut wizard = at_trip_type(FlowVariant::Standard);
        wizard.set_trip_type(TripType::RoundTrip);
        wizard.reset();
        assert_eq!(wizard.current_id(), 1);
        assert_eq!(wizard.state().trip_type(), TripType::Unset);
        assert_eq!(wizard.state().fields().count(), 0);
    }
}
