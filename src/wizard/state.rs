//! Wizard state: current step, trip type and collected field values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::gate::{parse_date, parse_passengers, parse_time};
use super::steps::StepId;
use crate::models::{Itinerary, TripType};

/// A value collected by one of the wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Origin,
    Destination,
    DepartDate,
    DepartTime,
    ReturnDate,
    ReturnTime,
    Passengers,
    ContactEmail,
    ContactPhone,
    ContactName,
}

impl Field {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Field::Origin => "From",
            Field::Destination => "To",
            Field::DepartDate => "Departure date (YYYY-MM-DD)",
            Field::DepartTime => "Departure time (HH:MM)",
            Field::ReturnDate => "Return date (YYYY-MM-DD)",
            Field::ReturnTime => "Return time (HH:MM)",
            Field::Passengers => "Passengers",
            Field::ContactEmail => "Email",
            Field::ContactPhone => "Phone",
            Field::ContactName => "Name",
        }
    }
}

/// Single source of truth for one wizard session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    current_step: StepId,
    trip_type: TripType,
    fields: BTreeMap<Field, String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: 1,
            trip_type: TripType::Unset,
            fields: BTreeMap::new(),
        }
    }
}

impl WizardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    pub(super) fn set_current_step(&mut self, step: StepId) {
        self.current_step = step;
    }

    #[must_use]
    pub fn trip_type(&self) -> TripType {
        self.trip_type
    }

    pub(super) fn set_trip_type(&mut self, trip_type: TripType) {
        self.trip_type = trip_type;
    }

    /// Raw value of a field, `None` when never set
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Trimmed, non-empty value of a field
    #[must_use]
    pub fn filled(&self, field: Field) -> Option<&str> {
        self.field(field).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Build the itinerary snapshot; `None` while any required value is missing or malformed.
    #[must_use]
    pub fn itinerary(&self) -> Option<Itinerary> {
        let trip_type = self.trip_type;
        if !trip_type.is_decided() {
            return None;
        }

        let (return_date, return_time) = if trip_type == TripType::RoundTrip {
            (
                Some(parse_date(self.filled(Field::ReturnDate)?)?),
                Some(parse_time(self.filled(Field::ReturnTime)?)?),
            )
        } else {
            (None, None)
        };

        Some(Itinerary {
            from: self.filled(Field::Origin)?.to_string(),
            to: self.filled(Field::Destination)?.to_string(),
            depart_date: parse_date(self.filled(Field::DepartDate)?)?,
            depart_time: parse_time(self.filled(Field::DepartTime)?)?,
            return_date,
            return_time,
            passenger_count: parse_passengers(self.filled(Field::Passengers)?)?,
            trip_type,
            contact_email: self.filled(Field::ContactEmail)?.to_string(),
            contact_name: self.filled(Field::ContactName)?.to_string(),
            contact_phone: self.filled(Field::ContactPhone).map(str::to_string),
        })
    }
}
