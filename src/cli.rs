use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::logging::LogFormat;
use crate::query::EventQuery;

/// CLI arguments for event-occurrences
#[derive(Parser)]
#[command(name = "event-occurrences")]
#[command(about = "Expand schema.org event schedules into upcoming occurrences")]
#[command(version)]
pub struct Cli {
    /// What to do: occurrences, feed, categories, query
    #[arg(long, default_value = "occurrences", value_parser = ["occurrences", "feed", "categories", "query"])]
    pub mode: String,

    /// JSON-LD payload to read (stdin if not specified)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output format: json, md, html
    #[arg(long, default_value = "json", value_parser = ["json", "md", "html"])]
    pub format: String,

    /// Day treated as today (YYYY-MM-DD format)
    #[arg(long, value_parser = validate_date)]
    pub today: Option<String>,

    /// Timezone whose calendar day is today (IANA timezone, e.g., "Europe/Vienna")
    #[arg(long)]
    pub tz: Option<String>,

    /// Request body to build in query mode: events, event, categories
    #[arg(long, default_value = "events", value_parser = ["events", "event", "categories"])]
    pub target: String,

    /// API token placed into request bodies
    #[arg(long, env = "EVENTS_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Earliest schedule date (YYYY-MM-DD format)
    #[arg(long, value_parser = validate_date)]
    pub from: Option<String>,

    /// Latest schedule date (YYYY-MM-DD format)
    #[arg(long, value_parser = validate_date)]
    pub to: Option<String>,

    /// Category id to filter by
    #[arg(long)]
    pub category: Option<String>,

    /// Result page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Event id for the 'event' target
    #[arg(long)]
    pub event_id: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Log format: compact, json
    #[arg(long, default_value = "compact")]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn event_query(&self) -> EventQuery {
        EventQuery {
            search_text: self.search.clone(),
            start_date: self.from.clone(),
            end_date: self.to.clone(),
            category: self.category.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Validate date format (YYYY-MM-DD)
fn validate_date(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|_| s.to_string())
        .map_err(|e| format!("Invalid date '{s}': {e}. Use YYYY-MM-DD format"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["event-occurrences"]).unwrap();
        assert_eq!(cli.mode, "occurrences");
        assert_eq!(cli.format, "json");
        assert_eq!(cli.target, "events");
        assert_eq!(cli.log_format, LogFormat::Compact);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-06-15").is_ok());
        assert!(validate_date("2024-13-01").is_err());
        assert!(validate_date("15.06.2024").is_err());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["event-occurrences", "--mode", "fetch"]).is_err());
    }

    #[test]
    fn test_log_format_flag() {
        let cli = Cli::try_parse_from(["event-occurrences", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(Cli::try_parse_from(["event-occurrences", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_event_query_from_flags() {
        let cli = Cli::try_parse_from([
            "event-occurrences",
            "--mode",
            "query",
            "--search",
            "jazz",
            "--from",
            "2024-06-01",
            "--page-size",
            "12",
        ])
        .unwrap();
        let query = cli.event_query();
        assert_eq!(query.search_text.as_deref(), Some("jazz"));
        assert_eq!(query.start_date.as_deref(), Some("2024-06-01"));
        assert_eq!(query.end_date, None);
        assert_eq!(query.page_size, Some(12));
    }
}
