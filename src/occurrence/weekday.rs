use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{error, warn};

use super::range::parse_date;
use crate::types::ByDay;

static SCHEMA_ORG_DAYS: Lazy<HashMap<&'static str, Weekday>> = Lazy::new(|| {
    HashMap::from([
        ("https://schema.org/Monday", Weekday::Mon),
        ("https://schema.org/Tuesday", Weekday::Tue),
        ("https://schema.org/Wednesday", Weekday::Wed),
        ("https://schema.org/Thursday", Weekday::Thu),
        ("https://schema.org/Friday", Weekday::Fri),
        ("https://schema.org/Saturday", Weekday::Sat),
        ("https://schema.org/Sunday", Weekday::Sun),
    ])
});

/// Map a schema.org day URI to a weekday
pub fn schema_org_weekday(uri: &str) -> Option<Weekday> {
    SCHEMA_ORG_DAYS.get(uri).copied()
}

/// Resolve every entry of a byDay constraint.
///
/// Unknown entries are logged and dropped. Duplicates are kept in order.
pub fn resolve_by_day(by_day: &ByDay) -> Vec<Weekday> {
    by_day
        .entries()
        .iter()
        .filter_map(|entry| {
            let weekday = schema_org_weekday(entry);
            if weekday.is_none() {
                error!(constraint = %entry, "invalid day constraint");
            }
            weekday
        })
        .collect()
}

pub fn weekday_matches(date: NaiveDate, weekdays: &[Weekday]) -> bool {
    weekdays.contains(&date.weekday())
}

/// Check whether a date string falls on any of the byDay weekdays
pub fn matches_by_day(date: &str, by_day: &ByDay) -> bool {
    let weekdays = resolve_by_day(by_day);
    match parse_date(date) {
        Some(date) => weekday_matches(date, &weekdays),
        None => {
            warn!(date, "cannot match weekday of unparseable date");
            false
        }
    }
}
