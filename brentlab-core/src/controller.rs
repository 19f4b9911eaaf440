//! Interaction controller: raw snapshots, filter state and selection.
//!
//! The three datasets arrive independently and in any order. Each one is
//! stored as an immutable snapshot when it lands; everything the view
//! shows is derived from the snapshots plus the UI state held here.

use crate::correlate::{change_point_date, resolve_event};
use crate::domain::{ChangePoint, ChangePointId, DateRange, Event, EventTypeFilter, PriceSeries};
use crate::filter::{event_type_options, filter_events};
use crate::projection::{project, tooltip, ChartModel};

/// Which change point, if any, has its detail view open.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    Active {
        id: ChangePointId,
        change_point: ChangePoint,
    },
}

impl Selection {
    pub fn select(&mut self, id: ChangePointId, change_point: ChangePoint) {
        *self = Selection::Active { id, change_point };
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }

    pub fn id(&self) -> Option<ChangePointId> {
        match self {
            Selection::Active { id, .. } => Some(*id),
            Selection::None => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Active { .. })
    }
}

/// Everything the detail overlay displays for the selected change point.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: ChangePointId,
    /// Blank when the index does not land on the price axis.
    pub date: String,
    pub impact: String,
    pub event: Option<Event>,
}

/// Dashboard state: snapshots (absent until fetched), filters, selection.
#[derive(Debug, Clone)]
pub struct Dashboard {
    prices: Option<PriceSeries>,
    change_points: Option<Vec<ChangePoint>>,
    events: Option<Vec<Event>>,
    range: DateRange,
    event_type: EventTypeFilter,
    selection: Selection,
    chart: ChartModel,
    type_options: Vec<EventTypeFilter>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            prices: None,
            change_points: None,
            events: None,
            range: DateRange::unbounded(),
            event_type: EventTypeFilter::All,
            selection: Selection::None,
            chart: project(&PriceSeries::default(), &[]),
            type_options: vec![EventTypeFilter::All],
        }
    }

    // ── Snapshots ────────────────────────────────────────────────────

    /// Store the price series and seed the date range to its full span.
    pub fn apply_prices(&mut self, prices: PriceSeries) {
        self.range = prices.full_span();
        self.prices = Some(prices);
        self.rebuild_chart();
    }

    pub fn apply_change_points(&mut self, change_points: Vec<ChangePoint>) {
        self.change_points = Some(change_points);
        self.rebuild_chart();
    }

    pub fn apply_events(&mut self, events: Vec<Event>) {
        self.type_options = event_type_options(&events);
        self.events = Some(events);
    }

    fn rebuild_chart(&mut self) {
        let empty = PriceSeries::default();
        self.chart = project(
            self.prices.as_ref().unwrap_or(&empty),
            self.change_points.as_deref().unwrap_or(&[]),
        );
    }

    pub fn prices(&self) -> Option<&PriceSeries> {
        self.prices.as_ref()
    }

    pub fn dates(&self) -> &[String] {
        self.prices.as_ref().map(|p| p.dates.as_slice()).unwrap_or(&[])
    }

    pub fn change_points(&self) -> &[ChangePoint] {
        self.change_points.as_deref().unwrap_or(&[])
    }

    pub fn events(&self) -> &[Event] {
        self.events.as_deref().unwrap_or(&[])
    }

    // ── Filters ──────────────────────────────────────────────────────

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn set_range_start(&mut self, start: Option<String>) {
        self.range.set_start(start);
    }

    pub fn set_range_end(&mut self, end: Option<String>) {
        self.range.set_end(end);
    }

    pub fn event_type(&self) -> &EventTypeFilter {
        &self.event_type
    }

    pub fn set_event_type(&mut self, event_type: EventTypeFilter) {
        self.event_type = event_type;
    }

    /// Selector options, derived once from the full event list.
    pub fn event_type_options(&self) -> &[EventTypeFilter] {
        &self.type_options
    }

    pub fn filtered_events(&self) -> Vec<Event> {
        filter_events(self.events(), &self.range, &self.event_type)
    }

    // ── Chart and selection ──────────────────────────────────────────

    pub fn chart(&self) -> &ChartModel {
        &self.chart
    }

    pub fn tooltip(&self, series_index: usize, point_index: usize) -> Option<String> {
        tooltip(&self.chart, series_index, point_index, self.change_points(), self.events())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Open the detail view for a change point. Unknown ids are ignored.
    pub fn select(&mut self, id: ChangePointId) -> bool {
        match self.change_points().get(id.0).cloned() {
            Some(cp) => {
                self.selection.select(id, cp);
                true
            }
            None => false,
        }
    }

    /// Chart click callback. Only marker series select anything; the
    /// point index is not needed because each marker series plots one
    /// change point.
    pub fn activate(&mut self, series_index: usize, _point_index: usize) -> bool {
        match self.chart.change_point_at(series_index) {
            Some(id) => self.select(id),
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn detail(&self) -> Option<DetailView> {
        let Selection::Active { id, change_point } = &self.selection else {
            return None;
        };
        let dates = self.dates();
        Some(DetailView {
            id: *id,
            date: change_point_date(change_point, dates).unwrap_or_default().to_string(),
            impact: change_point.impact.clone(),
            event: resolve_event(change_point, dates, self.events()).cloned(),
        })
    }
}
