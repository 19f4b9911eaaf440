//! Domain types shared by every layer of the dashboard.
//!
//! All three datasets are joined through a single key: the position `i`
//! into the price series. `dates[i]` and `prices[i]` describe the same
//! trading day, and a change point refers to that day by `index`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Date format every dataset is expected to use. Filtering compares dates
/// as strings, which is only chronological for this encoding.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Selector label of the "no type restriction" option.
pub const ALL_LABEL: &str = "All";

/// Parallel date/price arrays as served by the backend.
///
/// A `null` price is a missing quote. It keeps its slot so indices stay
/// aligned with `dates`, and the chart leaves a gap there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub prices: Vec<Option<f64>>,
}

impl PriceSeries {
    pub fn new(dates: Vec<String>, prices: Vec<f64>) -> Self {
        Self {
            dates,
            prices: prices.into_iter().map(Some).collect(),
        }
    }

    /// Number of plotted points. Follows the price array, like the chart.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn price_at(&self, index: usize) -> Option<f64> {
        self.prices.get(index).copied().flatten()
    }

    /// Range covering the whole series: `[first date, last date]`.
    /// Both bounds are open when the series has no dates.
    pub fn full_span(&self) -> DateRange {
        DateRange::new(self.dates.first().cloned(), self.dates.last().cloned())
    }
}

/// A detected shift in price behaviour, flagged by the backend model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePoint {
    /// Offset into the price series. Negative or past-the-end values are
    /// kept as received and simply never resolve.
    #[serde(default = "missing_index")]
    pub index: i64,
    #[serde(default, deserialize_with = "impact_text")]
    pub impact: String,
}

impl ChangePoint {
    pub fn new(index: i64, impact: impl Into<String>) -> Self {
        Self {
            index,
            impact: impact.into(),
        }
    }

    /// The index as a usable offset, if it is one.
    pub fn offset(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }
}

fn missing_index() -> i64 {
    -1
}

/// Impact is documented as a string, but numeric values are rendered as
/// written instead of rejecting the whole payload.
fn impact_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// A historical event that may explain a change point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Event {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            kind: kind.into(),
        }
    }
}

/// Position of a change point in the list as received.
///
/// Marker series carry this id so a clicked marker maps back to its change
/// point without any arithmetic on series positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChangePointId(pub usize);

impl ChangePointId {
    pub fn label(self) -> String {
        format!("Change Point {}", self.0 + 1)
    }
}

impl fmt::Display for ChangePointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// Inclusive date bounds. `None` leaves that side open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    /// Empty strings are treated as open bounds.
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self {
            start: normalize(start),
            end: normalize(end),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn set_start(&mut self, start: Option<String>) {
        self.start = normalize(start);
    }

    pub fn set_end(&mut self, end: Option<String>) {
        self.end = normalize(end);
    }

    /// Lexicographic comparison against both bounds. No ordering between
    /// `start` and `end` is enforced; an inverted range contains nothing.
    pub fn contains(&self, date: &str) -> bool {
        let after_start = self.start.as_deref().map_or(true, |s| date >= s);
        let before_end = self.end.as_deref().map_or(true, |e| date <= e);
        after_start && before_end
    }
}

fn normalize(bound: Option<String>) -> Option<String> {
    bound.filter(|b| !b.is_empty())
}

/// Event-type selection: the `All` sentinel or one observed type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTypeFilter {
    #[default]
    All,
    Only(String),
}

impl EventTypeFilter {
    pub fn from_label(label: &str) -> Self {
        if label == ALL_LABEL {
            EventTypeFilter::All
        } else {
            EventTypeFilter::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EventTypeFilter::All => ALL_LABEL,
            EventTypeFilter::Only(kind) => kind,
        }
    }

    pub fn matches(&self, kind: &str) -> bool {
        match self {
            EventTypeFilter::All => true,
            EventTypeFilter::Only(wanted) => wanted == kind,
        }
    }
}

impl fmt::Display for EventTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Move a `YYYY-MM-DD` date by `days` calendar days.
///
/// Returns `None` when the input does not parse, so callers can leave a
/// half-typed value untouched.
pub fn shift_date(date: &str, days: i64) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    let shifted = parsed.checked_add_signed(chrono::Duration::days(days))?;
    Some(shifted.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_span_uses_first_and_last_dates() {
        let series = PriceSeries::new(
            vec!["2020-01-01".into(), "2020-01-02".into(), "2020-01-03".into()],
            vec![40.0, 42.0, 41.0],
        );
        let span = series.full_span();
        assert_eq!(span.start.as_deref(), Some("2020-01-01"));
        assert_eq!(span.end.as_deref(), Some("2020-01-03"));
    }

    #[test]
    fn null_price_keeps_its_slot() {
        let series: PriceSeries = serde_json::from_str(
            r#"{"dates":["2020-01-01","2020-01-02","2020-01-03"],"prices":[40.0,null,41.5]}"#,
        )
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.price_at(1), None);
        assert_eq!(series.price_at(2), Some(41.5));
    }

    #[test]
    fn full_span_of_empty_series_is_unbounded() {
        assert_eq!(PriceSeries::default().full_span(), DateRange::unbounded());
    }

    #[test]
    fn empty_bounds_are_open() {
        let range = DateRange::new(Some(String::new()), Some("2020-01-02".into()));
        assert!(range.start.is_none());
        assert!(range.contains("1999-12-31"));
        assert!(!range.contains("2020-01-03"));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = DateRange::new(Some("2020-02-01".into()), Some("2020-01-01".into()));
        assert!(!range.contains("2020-01-15"));
        assert!(!range.contains("2020-02-01"));
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::new(Some("2020-01-02".into()), Some("2020-01-02".into()));
        assert!(range.contains("2020-01-02"));
        assert!(!range.contains("2020-01-01"));
    }

    #[test]
    fn negative_index_has_no_offset() {
        assert_eq!(ChangePoint::new(-3, "x").offset(), None);
        assert_eq!(ChangePoint::new(4, "x").offset(), Some(4));
    }

    #[test]
    fn change_point_decodes_extra_fields_and_numeric_impact() {
        let cp: ChangePoint =
            serde_json::from_str(r#"{"index": 7, "impact": 0.125, "date": "2008-07-11"}"#).unwrap();
        assert_eq!(cp.index, 7);
        assert_eq!(cp.impact, "0.125");
    }

    #[test]
    fn change_point_missing_fields_degrade() {
        let cp: ChangePoint = serde_json::from_str("{}").unwrap();
        assert_eq!(cp.offset(), None);
        assert_eq!(cp.impact, "");
    }

    #[test]
    fn event_type_field_is_named_type() {
        let e: Event =
            serde_json::from_str(r#"{"date":"2020-01-02","description":"OPEC cut","type":"Policy"}"#)
                .unwrap();
        assert_eq!(e.kind, "Policy");
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains(r#""type":"Policy""#));
    }

    #[test]
    fn event_type_filter_labels() {
        assert_eq!(EventTypeFilter::from_label("All"), EventTypeFilter::All);
        assert_eq!(
            EventTypeFilter::from_label("Conflict"),
            EventTypeFilter::Only("Conflict".into())
        );
        assert_eq!(EventTypeFilter::Only("Policy".into()).to_string(), "Policy");
        assert!(EventTypeFilter::All.matches("anything"));
        assert!(!EventTypeFilter::Only("Policy".into()).matches("Conflict"));
    }

    #[test]
    fn change_point_id_labels_are_one_based() {
        assert_eq!(ChangePointId(0).label(), "Change Point 1");
        assert_eq!(ChangePointId(4).to_string(), "#5");
    }

    #[test]
    fn shift_date_crosses_month_boundaries() {
        assert_eq!(shift_date("2020-01-31", 1).as_deref(), Some("2020-02-01"));
        assert_eq!(shift_date("2020-03-01", -1).as_deref(), Some("2020-02-29"));
        assert_eq!(shift_date("2020-13", 1), None);
    }
}
