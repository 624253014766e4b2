use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;

use event_occurrences::agenda::{build_agendas, resolve_today};
use event_occurrences::cli::Cli;
use event_occurrences::error::Error;
use event_occurrences::feed::{parse_categories, parse_feed};
use event_occurrences::logging::{init_logging, LoggingConfig};
use event_occurrences::query::{categories_request, event_detail_request, events_request};
use event_occurrences::render::{
    render_categories_html, render_categories_markdown, render_html, render_markdown,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(
        &LoggingConfig::default()
            .verbose(cli.verbose)
            .with_format(cli.log_format),
    )?;

    let output = match cli.mode.as_str() {
        "occurrences" => {
            let feed = parse_feed(&read_input(cli.input.as_deref())?)?;
            let today = resolve_today(cli.today.as_deref(), cli.tz.as_deref())?;
            debug!(%today, events = feed.events.len(), "expanding schedules");
            let agendas = build_agendas(&feed.events, today);
            match cli.format.as_str() {
                "md" => render_markdown(&agendas),
                "html" => render_html(&agendas),
                _ => serde_json::to_string_pretty(&agendas)?,
            }
        }
        "feed" => {
            let feed = parse_feed(&read_input(cli.input.as_deref())?)?;
            serde_json::to_string_pretty(&feed)?
        }
        "categories" => {
            let categories = parse_categories(&read_input(cli.input.as_deref())?)?;
            match cli.format.as_str() {
                "md" => render_categories_markdown(&categories),
                "html" => render_categories_html(&categories),
                _ => serde_json::to_string_pretty(&categories)?,
            }
        }
        "query" => {
            let token = cli.token.as_deref().ok_or(Error::MissingToken)?;
            let request = match cli.target.as_str() {
                "event" => {
                    let id = cli.event_id.as_deref().ok_or(Error::MissingEventId)?;
                    event_detail_request(id, token)
                }
                "categories" => categories_request(token),
                _ => events_request(&cli.event_query(), token),
            };
            serde_json::to_string_pretty(&request)?
        }
        _ => return Err("Invalid mode. Use: occurrences, feed, categories, query".into()),
    };

    if let Some(out_path) = cli.output {
        fs::write(out_path, output)?;
    } else {
        io::stdout().write_all(output.as_bytes())?;
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, Error> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
