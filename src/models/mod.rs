//! Data models for the charter lead funnel
//!
//! This module contains the core domain models organized by concern:
//! - Airport: the canonical airport record every lookup normalizes into
//! - Itinerary: the immutable trip snapshot assembled at review time
//! - Quote: synthesized or proxied charter offers and aircraft classes

pub mod airport;
pub mod itinerary;
pub mod quote;

// Re-export all public types for convenient access
pub use airport::{CanonicalAirport, ScoredCandidate};
pub use itinerary::{Itinerary, TripType};
pub use quote::{AircraftClass, Quote};
