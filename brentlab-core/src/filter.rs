//! Filter engine: date range and event type narrowing of the event list.

use std::collections::HashSet;

use crate::domain::{DateRange, Event, EventTypeFilter};

/// Events inside `range` (inclusive, lexicographic) whose type passes
/// `event_type`. Input order is preserved.
pub fn filter_events(events: &[Event], range: &DateRange, event_type: &EventTypeFilter) -> Vec<Event> {
    events
        .iter()
        .filter(|e| range.contains(&e.date) && event_type.matches(&e.kind))
        .cloned()
        .collect()
}

/// Distinct event types in first-seen order.
///
/// Computed from the full event list so the selector keeps every option
/// no matter how narrow the current filters are.
pub fn event_types(events: &[Event]) -> Vec<String> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter(|e| seen.insert(e.kind.as_str()))
        .map(|e| e.kind.clone())
        .collect()
}

/// Selector options: `All`, then every distinct type.
pub fn event_type_options(events: &[Event]) -> Vec<EventTypeFilter> {
    let mut options = vec![EventTypeFilter::All];
    options.extend(
        event_types(events)
            .iter()
            .map(|kind| EventTypeFilter::from_label(kind))
            .filter(|opt| *opt != EventTypeFilter::All),
    );
    options
}
