//! BrentLab Core: domain types and pure derivations for the change-point dashboard.
//!
//! This crate contains everything the dashboard computes, independent of
//! any rendering surface:
//! - Domain types (price series, change points, events, date ranges)
//! - Filter engine (date range + event type)
//! - Correlation resolver (change point → date → event)
//! - Chart projection (price line plus one tagged marker series per change point)
//! - Interaction controller (snapshots, filters, selection)
//! - Data sources (HTTP backend, on-disk fixtures) behind one trait
//! - Client configuration

pub mod config;
pub mod controller;
pub mod correlate;
pub mod domain;
pub mod filter;
pub mod projection;
pub mod source;

pub use config::{ClientConfig, ConfigError};
pub use controller::{Dashboard, DetailView, Selection};
pub use correlate::{change_point_date, correlate_all, resolve_event, Correlation};
pub use domain::{ChangePoint, ChangePointId, DateRange, Event, EventTypeFilter, PriceSeries};
pub use filter::{event_type_options, event_types, filter_events};
pub use projection::{project, tooltip, ChartModel, ChartSeries, SeriesTag};
pub use source::{DashboardSource, FixtureSource, HttpSource, SourceError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the fetch threads hand across a
    /// channel is Send, and the source can be shared between them.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<PriceSeries>();
        require_sync::<PriceSeries>();
        require_send::<ChangePoint>();
        require_sync::<ChangePoint>();
        require_send::<Event>();
        require_sync::<Event>();
        require_send::<SourceError>();
        require_sync::<SourceError>();

        require_send::<HttpSource>();
        require_sync::<HttpSource>();
        require_send::<FixtureSource>();
        require_sync::<FixtureSource>();

        require_send::<Dashboard>();
    }

    /// Architecture contract: the data access capability is object safe,
    /// so the dashboard can depend on `dyn DashboardSource` alone.
    #[test]
    fn dashboard_source_is_object_safe() {
        fn _check(source: &dyn DashboardSource) -> Result<PriceSeries, SourceError> {
            source.fetch_prices()
        }
    }
}
