//! Top-level UI layout: title, filter bar, chart beside the event
//! timeline, status bar, overlays on top.

pub mod chart_panel;
pub mod filter_bar;
pub mod overlays;
pub mod status_bar;
pub mod timeline;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Overlay};
use crate::theme;

pub const TITLE: &str = "Brent Oil Price Analysis Dashboard";

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub title: Rect,
    pub filters: Rect,
    pub chart: Rect,
    pub timeline: Rect,
    pub status: Rect,
}

/// Split the terminal area. Pure, so the run loop can record the chart
/// region for mouse hit-testing before drawing.
pub fn layout(area: Rect) -> DashboardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(rows[2]);

    DashboardLayout {
        title: rows[0],
        filters: rows[1],
        chart: body[0],
        timeline: body[1],
        status: rows[3],
    }
}

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let regions = layout(f.area());

    let title = Paragraph::new(Line::from(Span::styled(TITLE, theme::accent_bold())))
        .alignment(Alignment::Center);
    f.render_widget(title, regions.title);

    filter_bar::render(f, regions.filters, app);
    chart_panel::render(f, regions.chart, app);
    timeline::render(f, regions.timeline, app);
    status_bar::render(f, regions.status, app);

    // Overlays on top. The detail view wins over help.
    if let Some(detail) = app.dashboard.detail() {
        overlays::render_detail(f, f.area(), &detail);
    } else if app.overlay == Overlay::Help {
        overlays::render_help(f, f.area());
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
