//! BrentLab CLI: headless reports over the dashboard's data.
//!
//! Commands:
//! - `events`: the filtered historical event list
//! - `correlate`: every change point with its date, impact and event
//! - `types`: the event type selector options
//! - `snapshot`: save all three datasets as a fixture directory

mod report;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use brentlab_core::domain::DATE_FORMAT;
use brentlab_core::source::write_fixtures;
use brentlab_core::{
    correlate_all, event_type_options, filter_events, ClientConfig, DashboardSource, DateRange,
    EventTypeFilter, FixtureSource, HttpSource,
};

use crate::report::{CorrelationFormat, EventFormat};

#[derive(Parser)]
#[command(
    name = "brentlab",
    about = "BrentLab CLI: Brent oil change points and historical events"
)]
struct Cli {
    /// Backend base URL (overrides config file and BRENTLAB_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Read datasets from a fixture directory instead of the backend.
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Config file. Defaults to <config dir>/brentlab/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events inside a date range, optionally of one type.
    Events {
        /// First date to include (YYYY-MM-DD). Open when omitted.
        #[arg(long)]
        start: Option<String>,

        /// Last date to include (YYYY-MM-DD). Open when omitted.
        #[arg(long)]
        end: Option<String>,

        /// Event type, or "All".
        #[arg(long = "type", default_value = "All")]
        kind: String,

        #[arg(long, value_enum, default_value_t = EventFormat::Table)]
        format: EventFormat,
    },
    /// Match every change point with the event recorded on its date.
    Correlate {
        #[arg(long, value_enum, default_value_t = CorrelationFormat::Table)]
        format: CorrelationFormat,
    },
    /// Print the event type selector options.
    Types,
    /// Fetch all three datasets and write them as a fixture directory.
    Snapshot {
        /// Output directory.
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let source = open_source(&cli)?;
    tracing::debug!(source = source.name(), "source ready");

    let output = match cli.command {
        Commands::Events {
            start,
            end,
            kind,
            format,
        } => run_events(source.as_ref(), start, end, &kind, format)?,
        Commands::Correlate { format } => run_correlate(source.as_ref(), format)?,
        Commands::Types => report::types(&event_type_options(&source.fetch_events()?)),
        Commands::Snapshot { out } => run_snapshot(source.as_ref(), &out)?,
    };
    print!("{output}");
    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // A second init only happens in tests; ignore it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_source(cli: &Cli) -> Result<Box<dyn DashboardSource>> {
    if let Some(dir) = &cli.fixtures {
        if !dir.is_dir() {
            bail!("fixture directory {} does not exist", dir.display());
        }
        return Ok(Box::new(FixtureSource::from_dir(dir)));
    }

    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => match dirs::config_dir() {
            Some(dir) => ClientConfig::load_or_default(&dir.join("brentlab").join("config.toml"))?,
            None => ClientConfig::default(),
        },
    }
    .with_env_overrides()
    .with_base_url(cli.base_url.clone());

    Ok(Box::new(HttpSource::new(&config)?))
}

/// Reject a bound that is not a calendar date. Blank stays open.
fn parse_bound(label: &str, value: Option<String>) -> Result<Option<String>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => {
            NaiveDate::parse_from_str(v, DATE_FORMAT)
                .with_context(|| format!("--{label} {v:?} is not a YYYY-MM-DD date"))?;
            Ok(Some(v.to_string()))
        }
    }
}

fn run_events(
    source: &dyn DashboardSource,
    start: Option<String>,
    end: Option<String>,
    kind: &str,
    format: EventFormat,
) -> Result<String> {
    let range = DateRange::new(parse_bound("start", start)?, parse_bound("end", end)?);
    let kind = EventTypeFilter::from_label(kind);
    let events = source.fetch_events()?;
    let filtered = filter_events(&events, &range, &kind);
    tracing::info!(total = events.len(), shown = filtered.len(), "events filtered");
    report::events(&filtered, format)
}

fn run_correlate(source: &dyn DashboardSource, format: CorrelationFormat) -> Result<String> {
    let prices = source.fetch_prices()?;
    let change_points = source.fetch_change_points()?;
    let events = source.fetch_events()?;
    let rows = correlate_all(&change_points, &prices.dates, &events);
    report::correlations(&rows, format)
}

fn run_snapshot(source: &dyn DashboardSource, out: &Path) -> Result<String> {
    let prices = source.fetch_prices()?;
    let change_points = source.fetch_change_points()?;
    let events = source.fetch_events()?;
    write_fixtures(out, &prices, &change_points, &events)?;
    Ok(format!(
        "Wrote {} prices, {} change points, {} events to {}\n",
        prices.len(),
        change_points.len(),
        events.len(),
        out.display()
    ))
}
