use crate::types::{Category, EventAgenda, EventOccurrence};

const NO_DATES: &str = "No upcoming dates";

/// One-line summary like `2024-03-01 19:00:00-21:00:00 (PT2H)`
pub fn format_occurrence(occurrence: &EventOccurrence) -> String {
    let mut line = occurrence.date.clone();
    if let Some(ref start) = occurrence.start_time {
        line.push(' ');
        line.push_str(start);
        if let Some(ref end) = occurrence.end_time {
            line.push('-');
            line.push_str(end);
        }
    }
    if let Some(ref duration) = occurrence.duration {
        line.push_str(&format!(" ({duration})"));
    }
    line
}

/// Render event agendas as Markdown
pub fn render_markdown(agendas: &[EventAgenda]) -> String {
    let mut output = String::from("# Events\n\n");
    for agenda in agendas {
        output.push_str(&format!("## {}\n", agenda.name));
        if !agenda.slug.is_empty() {
            output.push_str(&format!("**Slug:** {}\n", agenda.slug));
        }
        if let Some(ref location) = agenda.location {
            output.push_str(&format!("**Location:** {location}\n"));
        }
        output.push('\n');

        if agenda.occurrences.is_empty() {
            output.push_str(&format!("_{NO_DATES}_\n\n"));
            continue;
        }
        for occurrence in &agenda.occurrences {
            output.push_str(&format!("- {}\n", format_occurrence(occurrence)));
        }
        output.push('\n');
    }
    output
}

/// Render event agendas as HTML
pub fn render_html(agendas: &[EventAgenda]) -> String {
    let mut output = String::from("<html><body><h1>Events</h1>\n");
    for agenda in agendas {
        output.push_str(&format!("<h2>{}</h2>\n", html_escape(&agenda.name)));
        if !agenda.slug.is_empty() {
            output.push_str(&format!(
                "<p><strong>Slug:</strong> {}</p>\n",
                html_escape(&agenda.slug)
            ));
        }
        if let Some(ref location) = agenda.location {
            output.push_str(&format!(
                "<p><strong>Location:</strong> {}</p>\n",
                html_escape(location)
            ));
        }

        if agenda.occurrences.is_empty() {
            output.push_str(&format!("<p><em>{NO_DATES}</em></p>\n"));
            continue;
        }
        output.push_str("<ul>\n");
        for occurrence in &agenda.occurrences {
            output.push_str(&format!(
                "<li>{}</li>\n",
                html_escape(&format_occurrence(occurrence))
            ));
        }
        output.push_str("</ul>\n");
    }
    output.push_str("</body></html>");
    output
}

/// Render categories as Markdown
pub fn render_categories_markdown(categories: &[Category]) -> String {
    let mut output = String::from("# Categories\n\n");
    for category in categories {
        output.push_str(&format!("- {} (`{}`)\n", category.name, category.id));
    }
    output
}

/// Render categories as HTML
pub fn render_categories_html(categories: &[Category]) -> String {
    let mut output = String::from("<html><body><h1>Categories</h1>\n<ul>\n");
    for category in categories {
        output.push_str(&format!(
            "<li>{} <code>{}</code></li>\n",
            html_escape(&category.name),
            html_escape(&category.id)
        ));
    }
    output.push_str("</ul>\n</body></html>");
    output
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
