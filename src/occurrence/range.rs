use chrono::{Datelike, Days, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Shift a date string by whole calendar days.
///
/// `NaiveDate` carries no offset, so the arithmetic is immune to daylight
/// saving transitions. Returns `None` for unparseable input or overflow.
pub fn add_days(date: &str, days: i64) -> Option<String> {
    let date = parse_date(date)?;
    let delta = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(delta)
    } else {
        date.checked_sub_days(delta)
    }?;
    Some(format_date(shifted))
}

/// Inclusive range check on zero-padded ISO dates.
///
/// Without an end date only the start date itself is in range.
pub fn is_date_in_range(date: &str, start: &str, end: Option<&str>) -> bool {
    match end.filter(|e| !e.is_empty()) {
        None => date == start,
        Some(end) => date >= start && date <= end,
    }
}

/// Same month and day one year later. Feb 29 rolls over to Mar 1.
pub fn one_year_after(date: NaiveDate) -> Option<NaiveDate> {
    let year = date.year().checked_add(1)?;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}
