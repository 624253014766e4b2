//! Expansion of event schedules into concrete, upcoming occurrences.
//!
//! Every function in this module is total: malformed schedules produce
//! fewer occurrences and a log record, never an error.

pub mod frequency;
pub mod generator;
pub mod range;
pub mod weekday;

use chrono::{Local, NaiveDate};
use std::cmp::Ordering;
use tracing::debug;

use crate::types::{Event, EventOccurrence, Schedule};

pub use frequency::{parse_frequency, parse_repeat_frequency, FrequencyUnit, RepeatFrequency};
pub use generator::{generate_schedule_occurrences, select_strategy, Strategy, MAX_ITERATIONS};
pub use range::{add_days, is_date_in_range, parse_date};
pub use weekday::{matches_by_day, schema_org_weekday};

const MIDNIGHT: &str = "00:00:00";

/// A schedule has ended once its end date is reached.
///
/// The end date marks the start of that day, so a schedule ending today
/// is already over.
pub fn is_schedule_ended(schedule: &Schedule, today: NaiveDate) -> bool {
    schedule
        .end()
        .and_then(parse_date)
        .is_some_and(|end| end <= today)
}

/// All upcoming occurrences of an event, relative to the local calendar day
pub fn generate_event_occurrences(event: &Event) -> Vec<EventOccurrence> {
    generate_event_occurrences_on(event, Local::now().date_naive())
}

/// All occurrences of an event dated `today` or later, sorted
pub fn generate_event_occurrences_on(event: &Event, today: NaiveDate) -> Vec<EventOccurrence> {
    let mut occurrences = Vec::new();

    for schedule in &event.schedule {
        if is_schedule_ended(schedule, today) {
            debug!(event = %event.id, end_date = ?schedule.end(), "skipping ended schedule");
            continue;
        }
        occurrences.extend(generate_schedule_occurrences(schedule));
    }

    finalize_occurrences(occurrences, today)
}

/// Drop past occurrences and sort by date, then start time
pub fn finalize_occurrences(
    mut occurrences: Vec<EventOccurrence>,
    today: NaiveDate,
) -> Vec<EventOccurrence> {
    occurrences.retain(|o| parse_date(&o.date).is_some_and(|date| date >= today));
    occurrences.sort_by(compare_occurrences);
    occurrences
}

fn compare_occurrences(a: &EventOccurrence, b: &EventOccurrence) -> Ordering {
    a.date.cmp(&b.date).then_with(|| {
        let a_time = a.start_time.as_deref().unwrap_or(MIDNIGHT);
        let b_time = b.start_time.as_deref().unwrap_or(MIDNIGHT);
        a_time.cmp(b_time)
    })
}
