//! Fixture source: datasets held in memory or read from a directory.
//!
//! A fixture directory mirrors the backend, one JSON file per endpoint
//! (`brent-oil-data.json`, `change-points.json`, `events.json`). Files are
//! read on each fetch, so a missing or broken file fails only its own
//! dataset, the same way one failing endpoint would.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::http::decode;
use super::{DashboardSource, Endpoint, SourceError};
use crate::domain::{ChangePoint, Event, PriceSeries};

#[derive(Debug, Clone)]
enum Fixtures {
    Memory {
        prices: PriceSeries,
        change_points: Vec<ChangePoint>,
        events: Vec<Event>,
    },
    Dir(PathBuf),
}

#[derive(Debug, Clone)]
pub struct FixtureSource {
    fixtures: Fixtures,
}

impl FixtureSource {
    pub fn new(prices: PriceSeries, change_points: Vec<ChangePoint>, events: Vec<Event>) -> Self {
        Self {
            fixtures: Fixtures::Memory {
                prices,
                change_points,
                events,
            },
        }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            fixtures: Fixtures::Dir(dir.into()),
        }
    }

    fn read<T: DeserializeOwned>(dir: &Path, endpoint: Endpoint) -> Result<T, SourceError> {
        let path = dir.join(endpoint.fixture_file());
        tracing::debug!(path = %path.display(), "reading {} fixture", endpoint.label());
        let body = fs::read_to_string(&path).map_err(|e| SourceError::Fixture {
            path: path.clone(),
            message: e.to_string(),
        })?;
        decode(endpoint, &body)
    }
}

impl DashboardSource for FixtureSource {
    fn name(&self) -> &str {
        match self.fixtures {
            Fixtures::Memory { .. } => "memory",
            Fixtures::Dir(_) => "fixtures",
        }
    }

    fn fetch_prices(&self) -> Result<PriceSeries, SourceError> {
        match &self.fixtures {
            Fixtures::Memory { prices, .. } => Ok(prices.clone()),
            Fixtures::Dir(dir) => Self::read(dir, Endpoint::Prices),
        }
    }

    fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, SourceError> {
        match &self.fixtures {
            Fixtures::Memory { change_points, .. } => Ok(change_points.clone()),
            Fixtures::Dir(dir) => Self::read(dir, Endpoint::ChangePoints),
        }
    }

    fn fetch_events(&self) -> Result<Vec<Event>, SourceError> {
        match &self.fixtures {
            Fixtures::Memory { events, .. } => Ok(events.clone()),
            Fixtures::Dir(dir) => Self::read(dir, Endpoint::Events),
        }
    }
}

/// Write a snapshot of all three datasets as a fixture directory.
/// Creates the directory if needed.
pub fn write_fixtures(
    dir: &Path,
    prices: &PriceSeries,
    change_points: &[ChangePoint],
    events: &[Event],
) -> Result<(), SourceError> {
    fs::create_dir_all(dir).map_err(|e| SourceError::Fixture {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;
    write_json(dir, Endpoint::Prices, prices)?;
    write_json(dir, Endpoint::ChangePoints, &change_points)?;
    write_json(dir, Endpoint::Events, &events)?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(dir: &Path, endpoint: Endpoint, value: &T) -> Result<(), SourceError> {
    let path = dir.join(endpoint.fixture_file());
    let fail = |message: String| SourceError::Fixture {
        path: path.clone(),
        message,
    };
    let json = serde_json::to_string_pretty(value).map_err(|e| fail(e.to_string()))?;
    fs::write(&path, json).map_err(|e| fail(e.to_string()))
}
