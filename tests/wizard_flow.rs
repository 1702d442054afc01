//! End-to-end booking sessions over the extended flow

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use charterlead::airports::{AirportDirectory, DirectoryRequest};
use charterlead::quotes::SyntheticQuotes;
use charterlead::submission::LeadSubmitter;
use charterlead::wizard::{Field, FlowVariant, GateError, Step, WizardSession};
use charterlead::{AircraftClass, AirportResolver, Itinerary, TripType};

struct WestCoastDirectory;

#[async_trait]
impl AirportDirectory for WestCoastDirectory {
    async fn fetch(&self, request: &DirectoryRequest) -> charterlead::Result<Value> {
        Ok(match request.value.to_lowercase().as_str() {
            "vny" => json!([{ "nameAirport": "Van Nuys", "codeIataAirport": "VNY", "nameCity": "Los Angeles" }]),
            _ => json!({ "airports": [
                { "nameAirport": "Aspen-Pitkin County", "codeIataAirport": "ASE", "nameCity": "Aspen", "nameState": "Colorado" },
                { "nameAirport": "Eagle County Regional", "codeIataAirport": "EGE", "nameCity": "Vail" }
            ]}),
        })
    }
}

#[derive(Default)]
struct Outbox(Mutex<Vec<Itinerary>>);

#[async_trait]
impl LeadSubmitter for Outbox {
    async fn submit(&self, itinerary: &Itinerary) -> charterlead::Result<()> {
        self.0.lock().unwrap().push(itinerary.clone());
        Ok(())
    }
}

fn extended_session(outbox: Arc<Outbox>) -> WizardSession {
    WizardSession::new(
        FlowVariant::Extended,
        AirportResolver::new(Arc::new(WestCoastDirectory)),
        Arc::new(SyntheticQuotes::new("USD")),
        outbox,
    )
}

async fn step(session: &mut WizardSession, expected: Step) {
    assert_eq!(session.current_step(), expected);
    assert!(session.advance().await, "could not leave {expected:?}");
}

#[tokio::test]
async fn test_extended_round_trip() {
    let outbox = Arc::new(Outbox::default());
    let mut session = extended_session(Arc::clone(&outbox));

    session.type_location(Field::Origin, "vny").await.unwrap();
    session.select_suggestion(Field::Origin, 0).unwrap();
    step(&mut session, Step::Origin).await;

    let found = session.type_location(Field::Destination, "aspen").await.unwrap();
    assert_eq!(found[0].iata_code.as_deref(), Some("ASE"));
    session.select_suggestion(Field::Destination, 0).unwrap();
    step(&mut session, Step::Destination).await;

    session.set_field(Field::DepartDate, "2026-12-20");
    step(&mut session, Step::DepartDate).await;
    session.set_field(Field::DepartTime, "10:15");
    step(&mut session, Step::DepartTime).await;
    session.set_field(Field::Passengers, "12");
    step(&mut session, Step::Passengers).await;

    assert!(!session.advance().await);
    assert_eq!(session.gate(), Err(GateError::TripTypeUnset));
    assert!(session.set_trip_type(TripType::RoundTrip));
    step(&mut session, Step::TripType).await;

    session.set_field(Field::ReturnDate, "2026-12-19");
    assert_eq!(session.gate(), Err(GateError::ReturnBeforeDeparture));

    // same-day return passes the date step but not an earlier time
    session.set_field(Field::ReturnDate, "2026-12-20");
    step(&mut session, Step::ReturnDate).await;
    session.set_field(Field::ReturnTime, "09:00");
    assert!(!session.advance().await);
    assert_eq!(session.gate(), Err(GateError::ReturnBeforeDeparture));

    assert!(session.retreat());
    session.set_field(Field::ReturnDate, "2026-12-27");
    step(&mut session, Step::ReturnDate).await;
    step(&mut session, Step::ReturnTime).await;

    session.set_field(Field::ContactEmail, "sam@example.com");
    step(&mut session, Step::ContactEmail).await;
    session.set_field(Field::ContactPhone, "+1 (310) 555-0100");
    step(&mut session, Step::ContactPhone).await;
    session.set_field(Field::ContactName, "Sam Park");
    step(&mut session, Step::ContactName).await;
    step(&mut session, Step::Review).await;

    assert_eq!(session.current_step(), Step::Results);
    let lead = outbox.0.lock().unwrap()[0].clone();
    assert_eq!(lead.origin_code(), Some("VNY"));
    assert_eq!(lead.destination_code(), Some("ASE"));
    assert_eq!(lead.trip_type, TripType::RoundTrip);
    assert!(lead.return_departure().is_some());
    assert_eq!(lead.contact_phone.as_deref(), Some("+1 (310) 555-0100"));

    // twelve passengers only fit the two largest classes
    let outcome = session.quotes().unwrap();
    let classes: Vec<_> = outcome.quotes.iter().map(|q| q.aircraft_class).collect();
    assert_eq!(classes, vec![AircraftClass::Heavy, AircraftClass::UltraLongRange]);
    assert_eq!(outcome.quotes[0].flight_duration, "1h 57m");

    step(&mut session, Step::Results).await;
    assert_eq!(session.current_step(), Step::Confirmation);
    assert!(!session.advance().await);
}

#[tokio::test]
async fn test_one_way_skips_return_steps_both_directions() {
    let mut session = extended_session(Arc::default());
    session.set_field(Field::Origin, "Van Nuys (VNY)");
    step(&mut session, Step::Origin).await;
    session.set_field(Field::Destination, "Aspen (ASE)");
    step(&mut session, Step::Destination).await;
    session.set_field(Field::DepartDate, "2026-12-20");
    step(&mut session, Step::DepartDate).await;
    session.set_field(Field::DepartTime, "10:15");
    step(&mut session, Step::DepartTime).await;
    session.set_field(Field::Passengers, "2");
    step(&mut session, Step::Passengers).await;
    session.set_trip_type(TripType::OneWay);
    step(&mut session, Step::TripType).await;

    assert_eq!(session.current_step(), Step::ContactEmail);
    assert!(session.retreat());
    assert_eq!(session.current_step(), Step::TripType);

    // switching to round-trip on the branch step reroutes forward
    session.set_trip_type(TripType::RoundTrip);
    step(&mut session, Step::TripType).await;
    assert_eq!(session.current_step(), Step::ReturnDate);
    assert!(!session.set_trip_type(TripType::OneWay));
}
