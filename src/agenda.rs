use chrono::{Local, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};
use crate::occurrence::generate_event_occurrences_on;
use crate::types::{Event, EventAgenda};

/// Calendar day that counts as "today".
///
/// An explicit `date` wins. Otherwise the current day in `tz` is used, or in
/// the local zone when no timezone is given.
pub fn resolve_today(date: Option<&str>, tz: Option<&str>) -> Result<NaiveDate> {
    if let Some(date_str) = date {
        return NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| Error::Date(date_str.to_string()));
    }

    match tz {
        Some(name) => {
            let tz: Tz = name.parse().map_err(|_| Error::Timezone(name.to_string()))?;
            Ok(tz.from_utc_datetime(&Utc::now().naive_utc()).date_naive())
        }
        None => Ok(Local::now().date_naive()),
    }
}

/// Expand every event of a feed into its upcoming occurrences
pub fn build_agendas(events: &[Event], today: NaiveDate) -> Vec<EventAgenda> {
    events
        .iter()
        .map(|event| EventAgenda {
            id: event.id.clone(),
            name: event.name.clone(),
            slug: event.slug.clone(),
            location: event.location.clone(),
            occurrences: generate_event_occurrences_on(event, today),
        })
        .collect()
}
