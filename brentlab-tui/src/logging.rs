//! File logging. The terminal belongs to the UI, so logs go to a
//! daily-rolling file under the user data directory.
//!
//! ```bash
//! tail -f ~/.local/share/brentlab/logs/brentlab-tui.log.*
//! RUST_LOG=brentlab_core=debug brentlab-tui
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "brentlab=info";

pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("brentlab")
        .join("logs")
}

pub fn init() -> Result<PathBuf> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, "brentlab-tui.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_names(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!(dir = %dir.display(), "logging initialised");
    Ok(dir)
}
