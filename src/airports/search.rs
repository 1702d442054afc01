//! Per-field airport search with last-write-wins-by-freshness suppression.
//!
//! Every keystroke may start a lookup, and lookups can finish out of order.
//! Each request carries a sequence number and the query that spawned it; a
//! result is applied only if its query still equals the field's input and no
//! newer result has been applied yet.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::resolver::AirportResolver;
use crate::models::CanonicalAirport;

/// Identifies one in-flight search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Default)]
struct SearchState {
    input: String,
    issued: u64,
    applied: u64,
    suggestions: Vec<CanonicalAirport>,
}

pub struct AirportSearch {
    resolver: AirportResolver,
    state: Mutex<SearchState>,
}

impl AirportSearch {
    #[must_use]
    pub fn new(resolver: AirportResolver) -> Self {
        Self {
            resolver,
            state: Mutex::new(SearchState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record new input and issue a ticket for the lookup it triggers
    pub fn begin(&self, query: &str) -> SearchTicket {
        let mut state = self.state();
        state.issued += 1;
        state.input = query.trim().to_string();
        SearchTicket {
            seq: state.issued,
            query: state.input.clone(),
        }
    }

    /// Apply a finished lookup; returns `false` when the result is stale.
    pub fn complete(&self, ticket: &SearchTicket, results: Vec<CanonicalAirport>) -> bool {
        let mut state = self.state();
        if ticket.query != state.input || ticket.seq <= state.applied {
            debug!(
                "Discarding stale suggestions for '{}' (seq {}, current '{}', applied {})",
                ticket.query, ticket.seq, state.input, state.applied
            );
            return false;
        }
        state.applied = ticket.seq;
        state.suggestions = results;
        true
    }

    /// Run a ranked lookup for new input.
    ///
    /// Returns the suggestions when they were applied, `None` when a newer
    /// input or response superseded them while in flight.
    pub async fn search(&self, query: &str) -> Option<Vec<CanonicalAirport>> {
        let ticket = self.begin(query);
        let results = self.resolver.suggest(&ticket.query).await;
        self.complete(&ticket, results.clone()).then_some(results)
    }

    /// Currently displayed suggestions
    #[must_use]
    pub fn suggestions(&self) -> Vec<CanonicalAirport> {
        self.state().suggestions.clone()
    }

    #[must_use]
    pub fn input(&self) -> String {
        self.state().input.clone()
    }

    /// Forget input and suggestions; in-flight lookups become stale
    pub fn clear(&self) {
        let mut state = self.state();
        state.issued += 1;
        state.applied = state.issued;
        state.input.clear();
        state.suggestions.clear();
    }
}
