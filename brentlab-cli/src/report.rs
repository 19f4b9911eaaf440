//! Plain-text, CSV and JSON renderings of the dashboard's derived data.

use anyhow::{Context, Result};
use clap::ValueEnum;

use brentlab_core::{Correlation, Event, EventTypeFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorrelationFormat {
    Table,
    Json,
}

pub fn events(events: &[Event], format: EventFormat) -> Result<String> {
    match format {
        EventFormat::Table => Ok(events_table(events)),
        EventFormat::Csv => events_csv(events),
        EventFormat::Json => serde_json::to_string_pretty(events).context("serializing events"),
    }
}

fn events_table(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events match the filters.\n".to_string();
    }
    let kind_width = events.iter().map(|e| e.kind.chars().count()).max().unwrap_or(0).max(4);
    let mut out = format!("{:<10}  {:<kind_width$}  DESCRIPTION\n", "DATE", "TYPE");
    for e in events {
        out.push_str(&format!("{:<10}  {:<kind_width$}  {}\n", e.date, e.kind, e.description));
    }
    out.push_str(&format!("\n{} event(s)\n", events.len()));
    out
}

fn events_csv(events: &[Event]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for e in events {
        writer.serialize(e).context("writing CSV row")?;
    }
    let bytes = writer.into_inner().context("flushing CSV")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

pub fn correlations(rows: &[Correlation], format: CorrelationFormat) -> Result<String> {
    match format {
        CorrelationFormat::Table => Ok(correlation_table(rows)),
        CorrelationFormat::Json => serde_json::to_string_pretty(rows).context("serializing correlations"),
    }
}

fn correlation_table(rows: &[Correlation]) -> String {
    if rows.is_empty() {
        return "No change points.\n".to_string();
    }
    let impact_width = rows.iter().map(|r| r.impact.chars().count()).max().unwrap_or(0).max(6);
    let mut out = format!("{:<4}  {:<10}  {:<impact_width$}  EVENT\n", "#", "DATE", "IMPACT");
    for row in rows {
        let date = if row.date.is_empty() { "-" } else { row.date.as_str() };
        let event = match &row.event {
            Some(e) => format!("{} ({})", e.description, e.kind),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "{:<4}  {:<10}  {:<impact_width$}  {}\n",
            row.id.to_string(),
            date,
            row.impact,
            event
        ));
    }
    out
}

pub fn types(options: &[EventTypeFilter]) -> String {
    options.iter().map(|o| format!("{o}\n")).collect()
}
