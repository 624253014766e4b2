use once_cell::sync::Lazy;
use regex::Regex;

static FREQUENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^P([0-9]+)([DWMY])$").expect("Invalid FREQUENCY_RE regex"));

/// Repeat frequency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyUnit {
    Day,
    Week,
    Month,
    Year,
}

impl FrequencyUnit {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'D' => Some(FrequencyUnit::Day),
            'W' => Some(FrequencyUnit::Week),
            'M' => Some(FrequencyUnit::Month),
            'Y' => Some(FrequencyUnit::Year),
            _ => None,
        }
    }

    /// Days per unit. Months and years are fixed approximations.
    pub fn days(self) -> i64 {
        match self {
            FrequencyUnit::Day => 1,
            FrequencyUnit::Week => 7,
            FrequencyUnit::Month => 30,
            FrequencyUnit::Year => 365,
        }
    }
}

/// Parsed repeat frequency like `P2W`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatFrequency {
    pub value: u32,
    pub unit: FrequencyUnit,
}

impl RepeatFrequency {
    pub fn interval_days(&self) -> i64 {
        i64::from(self.value) * self.unit.days()
    }
}

/// Parse an ISO 8601 style repeat token (`P1D`, `P1W`, `P1M`, `P1Y`)
pub fn parse_frequency(token: &str) -> Option<RepeatFrequency> {
    let caps = FREQUENCY_RE.captures(token)?;
    let value: u32 = caps[1].parse().ok()?;
    let unit = FrequencyUnit::from_char(caps[2].chars().next()?)?;
    Some(RepeatFrequency { value, unit })
}

/// Number of days between repetitions, or 0 when the token is not usable
pub fn parse_repeat_frequency(token: &str) -> i64 {
    parse_frequency(token)
        .map(|frequency| frequency.interval_days())
        .unwrap_or(0)
}
