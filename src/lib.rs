//! Expansion of schema.org event schedules into upcoming occurrences,
//! plus the feed mapping and rendering used by the `event-occurrences` CLI.

pub mod agenda;
pub mod cli;
pub mod error;
pub mod feed;
pub mod logging;
pub mod occurrence;
pub mod query;
pub mod render;
pub mod types;

pub use error::{Error, Result};
pub use occurrence::{generate_event_occurrences, generate_event_occurrences_on};
pub use types::{ByDay, Event, EventOccurrence, Schedule};
