//! Airport resolution
//!
//! This module turns free-text location input into canonical airport records:
//! - `directory`: the HTTP airport directory client and its request types
//! - `normalize`: field-priority accessors that flatten heterogeneous records
//! - `resolver`: exact-code lookup followed by the autocomplete fallback chain
//! - `search`: per-field search handle that drops stale responses

pub mod directory;
pub mod normalize;
pub mod resolver;
pub mod search;

pub use directory::{AirportDirectory, DirectoryRequest, Endpoint, HttpAirportDirectory, QueryParam};
pub use normalize::{extract_items, normalize_item, single_record};
pub use resolver::{AirportResolver, MIN_QUERY_CHARS};
pub use search::{AirportSearch, SearchTicket};
