//! Continue-gates: per-step predicates that must hold before the wizard advances

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use super::state::{Field, WizardState};
use super::steps::Step;
use crate::models::{Itinerary, TripType};

/// Largest party the funnel accepts
pub const MAX_PASSENGERS: u32 = 30;

/// Why the current step cannot be continued yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Please enter a location")]
    MissingLocation,
    #[error("Please enter a date as YYYY-MM-DD")]
    InvalidDate,
    #[error("Please enter a time as HH:MM")]
    InvalidTime,
    #[error("The return must be after the departure")]
    ReturnBeforeDeparture,
    #[error("Passengers must be a number between 1 and {}", MAX_PASSENGERS)]
    InvalidPassengers,
    #[error("Please choose one-way or round-trip")]
    TripTypeUnset,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a phone number with at least 7 digits")]
    InvalidPhone,
    #[error("Please enter your name")]
    MissingName,
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Accepts `HH:MM` and `HH:MM:SS`
#[must_use]
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

#[must_use]
pub fn parse_passengers(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|count| (1..=MAX_PASSENGERS).contains(count))
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

fn require_date(state: &WizardState, field: Field) -> Result<NaiveDate, GateError> {
    state
        .filled(field)
        .and_then(parse_date)
        .ok_or(GateError::InvalidDate)
}

fn require_time(state: &WizardState, field: Field) -> Result<NaiveTime, GateError> {
    state
        .filled(field)
        .and_then(parse_time)
        .ok_or(GateError::InvalidTime)
}

fn departure_date(state: &WizardState) -> Option<NaiveDate> {
    state.filled(Field::DepartDate).and_then(parse_date)
}

fn check_return_after_departure(state: &WizardState) -> Result<(), GateError> {
    let departure = departure_date(state)
        .zip(state.filled(Field::DepartTime).and_then(parse_time))
        .map(|(date, time)| date.and_time(time));
    let ret = state
        .filled(Field::ReturnDate)
        .and_then(parse_date)
        .zip(state.filled(Field::ReturnTime).and_then(parse_time))
        .map(|(date, time)| date.and_time(time));

    match (departure, ret) {
        (Some(departure), Some(ret)) if ret <= departure => Err(GateError::ReturnBeforeDeparture),
        _ => Ok(()),
    }
}

/// Check whether `step` may be continued with the values in `state`
pub fn check(step: Step, state: &WizardState) -> Result<(), GateError> {
    match step {
        Step::Origin | Step::Destination => step
            .fields()
            .iter()
            .all(|field| state.filled(*field).is_some())
            .then_some(())
            .ok_or(GateError::MissingLocation),
        Step::DepartDateTime => {
            require_date(state, Field::DepartDate)?;
            require_time(state, Field::DepartTime).map(|_| ())
        }
        Step::DepartDate => require_date(state, Field::DepartDate).map(|_| ()),
        Step::DepartTime => require_time(state, Field::DepartTime).map(|_| ()),
        Step::Passengers => state
            .filled(Field::Passengers)
            .and_then(parse_passengers)
            .map(|_| ())
            .ok_or(GateError::InvalidPassengers),
        Step::TripType => state
            .trip_type()
            .is_decided()
            .then_some(())
            .ok_or(GateError::TripTypeUnset),
        Step::ReturnDateTime => {
            require_date(state, Field::ReturnDate)?;
            require_time(state, Field::ReturnTime)?;
            check_return_after_departure(state)
        }
        Step::ReturnDate => {
            let ret = require_date(state, Field::ReturnDate)?;
            match departure_date(state) {
                Some(departure) if ret < departure => Err(GateError::ReturnBeforeDeparture),
                _ => Ok(()),
            }
        }
        Step::ReturnTime => {
            require_time(state, Field::ReturnTime)?;
            check_return_after_departure(state)
        }
        Step::ContactEmail => state
            .filled(Field::ContactEmail)
            .is_some_and(is_valid_email)
            .then_some(())
            .ok_or(GateError::InvalidEmail),
        Step::ContactPhone => state
            .filled(Field::ContactPhone)
            .is_some_and(is_valid_phone)
            .then_some(())
            .ok_or(GateError::InvalidPhone),
        Step::ContactName => state
            .filled(Field::ContactName)
            .map(|_| ())
            .ok_or(GateError::MissingName),
        Step::Review | Step::Results | Step::Confirmation => Ok(()),
    }
}

/// Run the same checks over an itinerary that was not built by the wizard
pub fn check_itinerary(itinerary: &Itinerary) -> Result<(), GateError> {
    if itinerary.from.trim().is_empty() || itinerary.to.trim().is_empty() {
        return Err(GateError::MissingLocation);
    }
    if !(1..=MAX_PASSENGERS).contains(&itinerary.passenger_count) {
        return Err(GateError::InvalidPassengers);
    }
    match itinerary.trip_type {
        TripType::Unset => return Err(GateError::TripTypeUnset),
        TripType::OneWay => {}
        TripType::RoundTrip => {
            itinerary.return_date.ok_or(GateError::InvalidDate)?;
            let ret = itinerary.return_departure().ok_or(GateError::InvalidTime)?;
            if ret <= itinerary.departure() {
                return Err(GateError::ReturnBeforeDeparture);
            }
        }
    }
    if !is_valid_email(&itinerary.contact_email) {
        return Err(GateError::InvalidEmail);
    }
    if itinerary.contact_phone.as_deref().is_some_and(|phone| !is_valid_phone(phone)) {
        return Err(GateError::InvalidPhone);
    }
    if itinerary.contact_name.trim().is_empty() {
        return Err(GateError::MissingName);
    }
    Ok(())
}
