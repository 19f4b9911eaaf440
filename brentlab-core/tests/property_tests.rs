//! Property tests for the pure derivations.
//!
//! Uses proptest to verify:
//! 1. Filter inclusion law: an event is kept iff it passes every clause
//! 2. Filter idempotence: re-filtering a filtered list changes nothing
//! 3. Projection invariant: each marker has one value, at its index
//! 4. Resolver determinism: same inputs, same answer
//! 5. Selection round trip: select then clear leaves nothing selected

use proptest::prelude::*;
use brentlab_core::{
    filter_events, project, resolve_event, ChangePoint, ChangePointId, Dashboard, DateRange, Event,
    EventTypeFilter, PriceSeries, SeriesTag,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_date() -> impl Strategy<Value = String> {
    (2000u32..2003, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

fn arb_kind() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Policy".to_string()),
        Just("Conflict".to_string()),
        Just("Economic".to_string()),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    (arb_date(), "[a-z ]{0,12}", arb_kind()).prop_map(|(date, description, kind)| Event {
        date,
        description,
        kind,
    })
}

fn arb_bound() -> impl Strategy<Value = Option<String>> {
    prop::option::of(arb_date())
}

fn arb_filter() -> impl Strategy<Value = EventTypeFilter> {
    prop_oneof![
        Just(EventTypeFilter::All),
        arb_kind().prop_map(EventTypeFilter::Only),
    ]
}

fn arb_series() -> impl Strategy<Value = PriceSeries> {
    prop::collection::vec((arb_date(), 10.0..150.0_f64), 0..40).prop_map(|rows| {
        let (dates, prices) = rows.into_iter().unzip();
        PriceSeries::new(dates, prices)
    })
}

// ── 1–2. Filter engine ───────────────────────────────────────────────

proptest! {
    #[test]
    fn filter_inclusion_law(
        events in prop::collection::vec(arb_event(), 0..30),
        start in arb_bound(),
        end in arb_bound(),
        kind in arb_filter(),
    ) {
        let range = DateRange::new(start.clone(), end.clone());
        let kept = filter_events(&events, &range, &kind);

        let expected: Vec<Event> = events
            .iter()
            .filter(|e| {
                start.as_ref().map_or(true, |s| e.date >= *s)
                    && end.as_ref().map_or(true, |t| e.date <= *t)
                    && (kind == EventTypeFilter::All || kind == EventTypeFilter::Only(e.kind.clone()))
            })
            .cloned()
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn filter_is_idempotent(
        events in prop::collection::vec(arb_event(), 0..30),
        start in arb_bound(),
        end in arb_bound(),
        kind in arb_filter(),
    ) {
        let range = DateRange::new(start, end);
        let once = filter_events(&events, &range, &kind);
        let twice = filter_events(&once, &range, &kind);
        prop_assert_eq!(once, twice);
    }
}

// ── 3. Chart projection ──────────────────────────────────────────────

proptest! {
    #[test]
    fn each_marker_has_exactly_one_value_at_its_index(
        series in arb_series(),
        indices in prop::collection::vec(-5i64..50, 0..10),
    ) {
        let cps: Vec<ChangePoint> = indices.iter().map(|&i| ChangePoint::new(i, "")).collect();
        let model = project(&series, &cps);

        prop_assert_eq!(model.series.len(), cps.len() + 1);
        prop_assert_eq!(model.price().tag, SeriesTag::Price);

        for (k, cp) in cps.iter().enumerate() {
            let marker = &model.series[k + 1];
            prop_assert_eq!(marker.tag, SeriesTag::ChangePoint(ChangePointId(k)));
            prop_assert_eq!(marker.values.len(), series.len());

            let non_null: Vec<usize> = marker
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_some())
                .map(|(i, _)| i)
                .collect();
            match cp.offset().filter(|&i| i < series.len()) {
                Some(i) => {
                    prop_assert_eq!(non_null, vec![i]);
                    prop_assert_eq!(marker.values[i], series.prices[i]);
                }
                None => prop_assert!(non_null.is_empty()),
            }
        }
    }
}

// ── 4–5. Resolver and selection ──────────────────────────────────────

proptest! {
    #[test]
    fn resolver_is_deterministic(
        series in arb_series(),
        index in -5i64..50,
        events in prop::collection::vec(arb_event(), 0..30),
    ) {
        let cp = ChangePoint::new(index, "x");
        let first = resolve_event(&cp, &series.dates, &events).cloned();
        let second = resolve_event(&cp, &series.dates, &events).cloned();
        prop_assert_eq!(&first, &second);

        if let Some(event) = first {
            let date = &series.dates[cp.offset().unwrap()];
            prop_assert_eq!(&event.date, date);
            // It is the first such event in received order.
            let earliest = events.iter().find(|e| &e.date == date).unwrap();
            prop_assert_eq!(&event, earliest);
        }
    }

    #[test]
    fn select_then_clear_returns_to_nothing(
        indices in prop::collection::vec(0i64..20, 1..10),
        pick in 0usize..10,
    ) {
        let mut d = Dashboard::new();
        let n = indices.len();
        d.apply_change_points(indices.into_iter().map(|i| ChangePoint::new(i, "")).collect());
        let selected = d.select(ChangePointId(pick % n));
        prop_assert!(selected);
        d.clear_selection();
        prop_assert!(!d.selection().is_active());
        prop_assert!(d.detail().is_none());
    }
}
