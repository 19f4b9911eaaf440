//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The fetch threads communicate via a channel.

use std::sync::mpsc::Receiver;

use ratatui::layout::Rect;

use brentlab_core::{ChangePointId, Dashboard, EventTypeFilter};

use crate::worker::FetchResponse;

/// Which widget receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    StartDate,
    EndDate,
    EventType,
    Chart,
    Timeline,
}

impl Focus {
    const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            Focus::StartDate => 0,
            Focus::EndDate => 1,
            Focus::EventType => 2,
            Focus::Chart => 3,
            Focus::Timeline => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Focus::StartDate),
            1 => Some(Focus::EndDate),
            2 => Some(Focus::EventType),
            3 => Some(Focus::Chart),
            4 => Some(Focus::Timeline),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::StartDate => "Start Date",
            Focus::EndDate => "End Date",
            Focus::EventType => "Event Type",
            Focus::Chart => "Chart",
            Focus::Timeline => "Timeline",
        }
    }

    pub fn next(self) -> Focus {
        Focus::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Focus::StartDate)
    }

    pub fn prev(self) -> Focus {
        Focus::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Focus::StartDate)
    }

    pub fn is_date_field(self) -> bool {
        matches!(self, Focus::StartDate | Focus::EndDate)
    }
}

/// Overlays drawn on top of the dashboard. The change point detail is
/// not listed here: it is open exactly when the dashboard has a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Which datasets have landed, for the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loaded {
    pub prices: bool,
    pub change_points: bool,
    pub events: bool,
}

/// Top-level application state.
pub struct AppState {
    pub dashboard: Dashboard,
    pub focus: Focus,
    pub overlay: Overlay,
    pub running: bool,

    /// Text typed into the date inputs. Kept separately from the range so
    /// a half-typed date stays visible while editing.
    pub start_input: String,
    pub end_input: String,

    /// Change point the keyboard cursor sits on. `None` until the cursor
    /// first lands, which then starts at the first marker.
    pub chart_cursor: Option<ChangePointId>,
    /// Hovered `(series, point)` pair, set by the keyboard cursor or mouse.
    pub hover: Option<(usize, usize)>,
    pub timeline_scroll: usize,

    /// Chart area from the last frame, used to map mouse columns.
    pub chart_area: Rect,

    pub loaded: Loaded,
    pub source_name: String,
    pub fetch_rx: Receiver<FetchResponse>,
}

impl AppState {
    pub fn new(fetch_rx: Receiver<FetchResponse>, source_name: impl Into<String>) -> Self {
        Self {
            dashboard: Dashboard::new(),
            focus: Focus::Chart,
            overlay: Overlay::None,
            running: true,
            start_input: String::new(),
            end_input: String::new(),
            chart_cursor: None,
            hover: None,
            timeline_scroll: 0,
            chart_area: Rect::default(),
            loaded: Loaded::default(),
            source_name: source_name.into(),
            fetch_rx,
        }
    }

    /// Drain every fetch result that has arrived, without blocking.
    pub fn drain_fetches(&mut self) {
        while let Ok(response) = self.fetch_rx.try_recv() {
            self.apply_response(response);
        }
    }

    /// Apply one fetch result. A failed fetch is logged and leaves the
    /// previous state untouched.
    pub fn apply_response(&mut self, response: FetchResponse) {
        match response {
            FetchResponse::Prices(Ok(prices)) => {
                tracing::info!(points = prices.len(), "prices loaded");
                self.dashboard.apply_prices(prices);
                self.sync_idle_date_inputs();
                self.loaded.prices = true;
                self.hover = None;
            }
            FetchResponse::ChangePoints(Ok(change_points)) => {
                tracing::info!(count = change_points.len(), "change points loaded");
                self.dashboard.apply_change_points(change_points);
                self.chart_cursor = None;
                self.loaded.change_points = true;
                self.hover = None;
            }
            FetchResponse::Events(Ok(events)) => {
                tracing::info!(count = events.len(), "events loaded");
                self.dashboard.apply_events(events);
                self.timeline_scroll = 0;
                self.loaded.events = true;
            }
            FetchResponse::Prices(Err(e))
            | FetchResponse::ChangePoints(Err(e))
            | FetchResponse::Events(Err(e)) => {
                tracing::warn!(error = %e, "fetch failed");
            }
        }
    }

    /// Copy the current range bounds into the date inputs.
    pub fn sync_date_inputs(&mut self) {
        let range = self.dashboard.range();
        self.start_input = range.start.clone().unwrap_or_default();
        self.end_input = range.end.clone().unwrap_or_default();
    }

    /// Like [`sync_date_inputs`](Self::sync_date_inputs), but leaves the
    /// field being edited alone.
    fn sync_idle_date_inputs(&mut self) {
        let range = self.dashboard.range();
        let (start, end) = (range.start.clone(), range.end.clone());
        if self.focus != Focus::StartDate {
            self.start_input = start.unwrap_or_default();
        }
        if self.focus != Focus::EndDate {
            self.end_input = end.unwrap_or_default();
        }
    }

    /// Push the date input text into the filter range. Blank means
    /// unbounded.
    pub fn commit_date_inputs(&mut self) {
        let start = Some(self.start_input.trim().to_string());
        let end = Some(self.end_input.trim().to_string());
        self.dashboard.set_range_start(start);
        self.dashboard.set_range_end(end);
        self.timeline_scroll = 0;
    }

    /// Cycle the event type selector by `step` options.
    pub fn cycle_event_type(&mut self, step: isize) {
        let options = self.dashboard.event_type_options();
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|o| o == self.dashboard.event_type())
            .unwrap_or(0);
        let len = options.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;
        let choice: EventTypeFilter = options[next].clone();
        self.dashboard.set_event_type(choice);
        self.timeline_scroll = 0;
    }

    pub fn marker_count(&self) -> usize {
        self.dashboard.chart().markers().len()
    }

    /// Move the keyboard cursor across markers and hover the new one.
    pub fn move_chart_cursor(&mut self, step: isize) {
        let ids: Vec<ChangePointId> = self.dashboard.chart().marker_ids().collect();
        if ids.is_empty() {
            self.hover = None;
            return;
        }
        let current = self
            .chart_cursor
            .and_then(|id| ids.iter().position(|&m| m == id))
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(ids.len() as isize) as usize;
        self.chart_cursor = Some(ids[next]);
        self.hover_cursor();
    }

    /// Hover the marker under the keyboard cursor.
    pub fn hover_cursor(&mut self) {
        let chart = self.dashboard.chart();
        let target = self
            .chart_cursor
            .and_then(|id| chart.series_of(id).map(|series| (id, series)))
            .or_else(|| {
                let id = chart.marker_ids().next()?;
                Some((id, chart.series_of(id)?))
            });
        let Some((id, series)) = target else {
            self.hover = None;
            return;
        };
        let point = chart.series[series].marker_index().unwrap_or(0);
        self.chart_cursor = Some(id);
        self.hover = Some((series, point));
    }

    /// Open the detail view for the hovered marker, if any.
    pub fn activate_hover(&mut self) -> bool {
        match self.hover {
            Some((series, point)) => self.dashboard.activate(series, point),
            None => false,
        }
    }

    /// Tooltip text for whatever is hovered.
    pub fn tooltip(&self) -> Option<String> {
        let (series, point) = self.hover?;
        self.dashboard.tooltip(series, point)
    }

    pub fn detail_open(&self) -> bool {
        self.dashboard.selection().is_active()
    }
}
