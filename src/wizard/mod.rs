//! Multi-step booking wizard

pub mod gate;
pub mod machine;
pub mod session;
pub mod state;
pub mod steps;

pub use gate::{GateError, MAX_PASSENGERS, check_itinerary};
pub use machine::BookingWizard;
pub use session::WizardSession;
pub use state::{Field, WizardState};
pub use steps::{FlowVariant, Step, StepGraph, StepId};

pub use crate::quotes::QuoteOutcome;
