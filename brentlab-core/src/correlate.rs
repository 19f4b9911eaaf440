//! Correlation resolver: change point → calendar date → matching event.
//!
//! Matching is exact string equality on the date. There is no tolerance
//! window; an event one day off does not correlate.

use serde::Serialize;

use crate::domain::{ChangePoint, ChangePointId, Event};

/// Date of the change point on the price axis, if its index is in bounds.
pub fn change_point_date<'a>(change_point: &ChangePoint, dates: &'a [String]) -> Option<&'a str> {
    change_point
        .offset()
        .and_then(|i| dates.get(i))
        .map(String::as_str)
}

/// First event (in received order) dated exactly on the change point.
pub fn resolve_event<'a>(
    change_point: &ChangePoint,
    dates: &[String],
    events: &'a [Event],
) -> Option<&'a Event> {
    let date = change_point_date(change_point, dates)?;
    events.iter().find(|e| e.date == date)
}

/// One row of the change point / event report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub id: ChangePointId,
    pub index: i64,
    /// Blank when the index does not land on the price axis.
    pub date: String,
    pub impact: String,
    pub event: Option<Event>,
}

pub fn correlate_all(change_points: &[ChangePoint], dates: &[String], events: &[Event]) -> Vec<Correlation> {
    change_points
        .iter()
        .enumerate()
        .map(|(k, cp)| Correlation {
            id: ChangePointId(k),
            index: cp.index,
            date: change_point_date(cp, dates).unwrap_or_default().to_string(),
            impact: cp.impact.clone(),
            event: resolve_event(cp, dates, events).cloned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> Vec<String> {
        vec!["2020-01-01".into(), "2020-01-02".into(), "2020-01-03".into()]
    }

    #[test]
    fn resolves_exact_date_match() {
        let events = vec![Event::new("2020-01-02", "OPEC cut", "Policy")];
        let cp = ChangePoint::new(1, "+5%");
        assert_eq!(resolve_event(&cp, &dates(), &events).map(|e| e.description.as_str()), Some("OPEC cut"));
    }

    #[test]
    fn first_of_several_same_day_events_wins() {
        let events = vec![
            Event::new("2020-01-03", "first", "Policy"),
            Event::new("2020-01-03", "second", "Conflict"),
        ];
        let cp = ChangePoint::new(2, "");
        assert_eq!(resolve_event(&cp, &dates(), &events).unwrap().description, "first");
    }

    #[test]
    fn neighbouring_day_does_not_match() {
        let events = vec![Event::new("2020-01-03", "late", "Policy")];
        assert!(resolve_event(&ChangePoint::new(1, ""), &dates(), &events).is_none());
    }

    #[test]
    fn out_of_bounds_and_negative_indices_resolve_to_nothing() {
        let events = vec![Event::new("2020-01-02", "OPEC cut", "Policy")];
        assert!(resolve_event(&ChangePoint::new(99, ""), &dates(), &events).is_none());
        assert!(resolve_event(&ChangePoint::new(-1, ""), &dates(), &events).is_none());
        assert_eq!(change_point_date(&ChangePoint::new(99, ""), &dates()), None);
    }

    #[test]
    fn correlate_all_reports_every_change_point() {
        let events = vec![Event::new("2020-01-02", "OPEC cut", "Policy")];
        let cps = vec![ChangePoint::new(1, "+5%"), ChangePoint::new(99, "-2%")];
        let rows = correlate_all(&cps, &dates(), &events);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, ChangePointId(0));
        assert_eq!(rows[0].date, "2020-01-02");
        assert!(rows[0].event.is_some());
        assert_eq!(rows[1].date, "");
        assert_eq!(rows[1].impact, "-2%");
        assert!(rows[1].event.is_none());
    }
}
