use chrono::Datelike;
use tracing::{debug, warn};

use super::frequency::parse_repeat_frequency;
use super::range::{add_days, format_date, is_date_in_range, one_year_after, parse_date};
use super::weekday::{matches_by_day, resolve_by_day};
use crate::types::{ByDay, EventOccurrence, Schedule};

/// Upper bound on loop iterations per schedule
pub const MAX_ITERATIONS: usize = 1000;

/// How a schedule is expanded into dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy<'a> {
    Single,
    SimpleRepeat { interval_days: i64 },
    /// Walks day by day; the repeat interval does not apply
    WeekdayRepeat { by_day: &'a ByDay },
}

pub fn select_strategy(schedule: &Schedule) -> Strategy<'_> {
    let Some(token) = schedule.frequency() else {
        return Strategy::Single;
    };

    let interval_days = parse_repeat_frequency(token);
    if interval_days == 0 {
        debug!(token, "unusable repeat frequency, treating as single occurrence");
        return Strategy::Single;
    }

    if schedule.end() == Some(schedule.start_date.as_str()) {
        return Strategy::Single;
    }

    match schedule.weekdays() {
        Some(by_day) => Strategy::WeekdayRepeat { by_day },
        None => Strategy::SimpleRepeat { interval_days },
    }
}

/// Expand one schedule into its raw, unfiltered occurrences
pub fn generate_schedule_occurrences(schedule: &Schedule) -> Vec<EventOccurrence> {
    match select_strategy(schedule) {
        Strategy::Single => generate_single(schedule),
        Strategy::SimpleRepeat { interval_days } => generate_simple_repeat(schedule, interval_days),
        Strategy::WeekdayRepeat { by_day } => generate_weekday_repeat(schedule, by_day),
    }
}

fn generate_single(schedule: &Schedule) -> Vec<EventOccurrence> {
    if let Some(by_day) = schedule.weekdays() {
        if !matches_by_day(&schedule.start_date, by_day) {
            return Vec::new();
        }
    }
    vec![EventOccurrence::from_schedule(schedule, schedule.start_date.clone())]
}

fn generate_simple_repeat(schedule: &Schedule, interval_days: i64) -> Vec<EventOccurrence> {
    let mut occurrences = Vec::new();
    let mut current = schedule.start_date.clone();
    let mut iterations = 0;

    while iterations < MAX_ITERATIONS
        && is_date_in_range(&current, &schedule.start_date, schedule.end())
    {
        occurrences.push(EventOccurrence::from_schedule(schedule, current.clone()));
        iterations += 1;
        match add_days(&current, interval_days) {
            Some(next) => current = next,
            None => {
                warn!(date = %current, interval_days, "cannot advance schedule date");
                break;
            }
        }
    }

    if iterations == MAX_ITERATIONS {
        debug!(start_date = %schedule.start_date, iterations, "iteration cap reached");
    }
    occurrences
}

// The feed sends weekly rules as a period (P1W, P1M) plus byDay, so the
// period is walked one day at a time and the parsed interval is not used.
fn generate_weekday_repeat(schedule: &Schedule, by_day: &ByDay) -> Vec<EventOccurrence> {
    let Some(start) = parse_date(&schedule.start_date) else {
        warn!(start_date = %schedule.start_date, "unparseable schedule start date");
        return Vec::new();
    };
    let end = match schedule.end() {
        Some(end) => parse_date(end),
        None => one_year_after(start),
    };
    let Some(end) = end else {
        warn!(end_date = ?schedule.end(), "unparseable schedule end date");
        return Vec::new();
    };

    let weekdays = resolve_by_day(by_day);
    let mut occurrences = Vec::new();
    let mut current = start;
    let mut iterations = 0;

    while current <= end && iterations < MAX_ITERATIONS {
        for weekday in &weekdays {
            if current.weekday() == *weekday {
                occurrences.push(EventOccurrence::from_schedule(schedule, format_date(current)));
            }
        }
        iterations += 1;
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    if iterations == MAX_ITERATIONS {
        debug!(start_date = %schedule.start_date, iterations, "iteration cap reached");
    }
    occurrences
}
