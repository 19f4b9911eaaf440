//! BrentLab TUI: Brent oil price dashboard with change-point markers.
//!
//! Layout:
//! 1. Filter bar: start date, end date, event type
//! 2. Chart: price line, change-point markers, tooltip
//! 3. Timeline: events matching the filters
//! 4. Detail overlay for the selected change point

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use brentlab_core::{ClientConfig, DashboardSource, FixtureSource, HttpSource};
use brentlab_tui::{AppState, input, logging, ui, worker};

#[derive(Parser)]
#[command(name = "brentlab-tui", about = "Brent oil price change-point dashboard")]
struct Args {
    /// Backend base URL (overrides config file and BRENTLAB_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Read datasets from a fixture directory instead of the backend
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Config file (default: <config dir>/brentlab/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_dir = logging::init()?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);
        default_hook(info);
    }));

    let source = open_source(&args)?;
    tracing::info!(source = source.name(), "starting dashboard");

    // Fetch channel; the three requests start before the first frame.
    let (fetch_tx, fetch_rx) = mpsc::channel();
    let mut app = AppState::new(fetch_rx, source.name());
    worker::spawn_fetches(source, fetch_tx).context("spawning fetch threads")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "dashboard exited with error");
        eprintln!("logs: {}", log_dir.display());
    }
    result
}

fn open_source(args: &Args) -> Result<Arc<dyn DashboardSource>> {
    if let Some(dir) = &args.fixtures {
        return Ok(Arc::new(FixtureSource::from_dir(dir)));
    }

    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => match dirs::config_dir() {
            Some(dir) => ClientConfig::load_or_default(&dir.join("brentlab").join("config.toml"))?,
            None => ClientConfig::default(),
        },
    }
    .with_env_overrides()
    .with_base_url(args.base_url.clone());

    tracing::debug!(base_url = %config.base_url, timeout = config.timeout_secs, "client config");
    Ok(Arc::new(HttpSource::new(&config)?))
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Record the chart region for mouse mapping, then render.
        let size = terminal.size()?;
        app.chart_area = ui::layout(ratatui::layout::Rect::new(0, 0, size.width, size.height)).chart;
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain fetch results (non-blocking)
        app.drain_fetches();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
