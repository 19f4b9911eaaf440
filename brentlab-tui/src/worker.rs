//! Background fetches, one thread per dataset.
//!
//! The three requests are issued at once and never wait on each other.
//! Each thread posts its result to the shared channel and exits. If the
//! UI has already gone away, the send fails and the result is dropped.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use brentlab_core::source::Endpoint;
use brentlab_core::{ChangePoint, DashboardSource, Event, PriceSeries, SourceError};

/// Results sent from the fetch threads back to the UI thread.
#[derive(Debug)]
pub enum FetchResponse {
    Prices(Result<PriceSeries, SourceError>),
    ChangePoints(Result<Vec<ChangePoint>, SourceError>),
    Events(Result<Vec<Event>, SourceError>),
}

impl FetchResponse {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchResponse::Prices(_) => Endpoint::Prices,
            FetchResponse::ChangePoints(_) => Endpoint::ChangePoints,
            FetchResponse::Events(_) => Endpoint::Events,
        }
    }
}

/// Start all three fetches. Handles are returned for tests; the UI does
/// not join them.
pub fn spawn_fetches(
    source: Arc<dyn DashboardSource>,
    tx: Sender<FetchResponse>,
) -> std::io::Result<Vec<JoinHandle<()>>> {
    Endpoint::ALL
        .into_iter()
        .map(|endpoint| {
            let source = Arc::clone(&source);
            let tx = tx.clone();
            thread::Builder::new()
                .name(format!("brentlab-fetch-{}", endpoint.fixture_file().trim_end_matches(".json")))
                .spawn(move || {
                    tracing::debug!(source = source.name(), "fetch {} started", endpoint.label());
                    let response = fetch(source.as_ref(), endpoint);
                    if tx.send(response).is_err() {
                        tracing::debug!("{} arrived after shutdown, dropped", endpoint.label());
                    }
                })
        })
        .collect()
}

fn fetch(source: &dyn DashboardSource, endpoint: Endpoint) -> FetchResponse {
    match endpoint {
        Endpoint::Prices => FetchResponse::Prices(source.fetch_prices()),
        Endpoint::ChangePoints => FetchResponse::ChangePoints(source.fetch_change_points()),
        Endpoint::Events => FetchResponse::Events(source.fetch_events()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use brentlab_core::FixtureSource;

    #[test]
    fn all_three_datasets_arrive() {
        let source: Arc<dyn DashboardSource> = Arc::new(FixtureSource::new(
            PriceSeries::new(vec!["2020-01-01".into()], vec![40.0]),
            vec![ChangePoint::new(0, "+1%")],
            vec![Event::new("2020-01-01", "x", "Policy")],
        ));
        let (tx, rx) = mpsc::channel();
        let handles = spawn_fetches(source, tx).unwrap();
        for h in handles {
            h.join().expect("fetch thread should join cleanly");
        }

        let mut endpoints: Vec<Endpoint> = rx.try_iter().map(|r| r.endpoint()).collect();
        endpoints.sort_by_key(|e| e.path());
        assert_eq!(endpoints.len(), 3);
        assert!(endpoints.contains(&Endpoint::Prices));
        assert!(endpoints.contains(&Endpoint::ChangePoints));
        assert!(endpoints.contains(&Endpoint::Events));
    }

    #[test]
    fn dropped_receiver_does_not_panic_threads() {
        let source: Arc<dyn DashboardSource> = Arc::new(FixtureSource::new(
            PriceSeries::default(),
            Vec::new(),
            Vec::new(),
        ));
        let (tx, rx) = mpsc::channel();
        drop(rx);
        for h in spawn_fetches(source, tx).unwrap() {
            h.join().expect("fetch thread should not panic");
        }
    }
}
