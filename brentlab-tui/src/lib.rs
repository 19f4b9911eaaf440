//! BrentLab TUI - terminal dashboard for Brent price change points
//!
//! Shows:
//! - Brent price line with one marker per detected change point
//! - Tooltips and a detail view correlating each change point with events
//! - Date range and event type filters over the historical events timeline

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::{AppState, Focus, Overlay};
pub use worker::{spawn_fetches, FetchResponse};
