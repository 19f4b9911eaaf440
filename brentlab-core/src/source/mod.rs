//! Data access capability and structured error types.
//!
//! The [`DashboardSource`] trait abstracts over where the three datasets
//! come from (the HTTP backend, fixture files on disk, in-memory test data)
//! so the dashboard never depends on a concrete network call.

pub mod fixture;
pub mod http;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{ChangePoint, Event, PriceSeries};

pub use fixture::{write_fixtures, FixtureSource};
pub use http::HttpSource;

/// The three datasets the dashboard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Prices,
    ChangePoints,
    Events,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::Prices, Endpoint::ChangePoints, Endpoint::Events];

    /// Backend path, relative to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Prices => "/api/brent-oil-data",
            Endpoint::ChangePoints => "/api/change-points",
            Endpoint::Events => "/api/events",
        }
    }

    /// File name of this dataset inside a fixture directory.
    pub fn fixture_file(self) -> &'static str {
        match self {
            Endpoint::Prices => "brent-oil-data.json",
            Endpoint::ChangePoints => "change-points.json",
            Endpoint::Events => "events.json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endpoint::Prices => "prices",
            Endpoint::ChangePoints => "change points",
            Endpoint::Events => "events",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Structured error types for data retrieval.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network unreachable for {endpoint}: {message}")]
    Network { endpoint: Endpoint, message: String },

    #[error("HTTP {status} from {endpoint}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("unexpected payload from {endpoint}: {message}")]
    Decode { endpoint: Endpoint, message: String },

    #[error("fixture {}: {message}", path.display())]
    Fixture { path: PathBuf, message: String },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Injectable access to the three datasets.
///
/// Calls are independent: none depends on another having completed, and
/// callers may issue them concurrently.
pub trait DashboardSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    fn fetch_prices(&self) -> Result<PriceSeries, SourceError>;

    fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, SourceError>;

    fn fetch_events(&self) -> Result<Vec<Event>, SourceError>;
}
