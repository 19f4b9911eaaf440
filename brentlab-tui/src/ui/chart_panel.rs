//! Price chart: Brent price line, one marker per change point, tooltip
//! line underneath.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use brentlab_core::{ChartModel, SeriesTag};

use crate::app::{AppState, Focus};
use crate::theme;

/// Rows reserved under the plot for the tooltip.
const TOOLTIP_HEIGHT: u16 = 2;

/// Rows the x axis takes at the bottom of the chart widget (labels plus
/// the axis line).
const X_AXIS_HEIGHT: u16 = 2;

/// Columns either side of the pointer within which a marker is hit.
const HIT_COLUMNS: f64 = 2.0;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Chart;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {} ", brentlab_core::projection::PRICE_LABEL))
        .title_style(theme::panel_title(focused));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let model = app.dashboard.chart();
    if model.is_empty() {
        render_empty(f, inner, app.loaded.prices);
        return;
    }

    let parts = split(inner);
    render_chart(f, parts[0], app, model);
    render_tooltip(f, parts[1], app);
}

fn split(inner: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(TOOLTIP_HEIGHT)])
        .split(inner)
}

fn render_empty(f: &mut Frame, area: Rect, loaded: bool) {
    let message = if loaded {
        "No price data."
    } else {
        "Loading price data..."
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn y_labels(model: &ChartModel) -> [String; 2] {
    let (lo, hi) = model.price_bounds().unwrap_or((0.0, 1.0));
    [format!("{lo:.2}"), format!("{hi:.2}")]
}

/// Columns left of the plot: the wider of the y labels and the
/// overhang of the first (left-aligned) date label, capped at a third of
/// the chart width the way ratatui caps it, plus one for the axis line.
fn y_axis_width(model: &ChartModel, chart_width: u16) -> u16 {
    let y_width = y_labels(model).iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let first_x = (model.label_at(0).chars().count() as u16).saturating_sub(1);
    y_width.max(first_x).min(chart_width / 3) + 1
}

/// The region the data is actually plotted in, for a chart drawn into
/// `area` (the full panel including its border).
pub fn plot_area(area: Rect, model: &ChartModel) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let chart = split(inner)[0];
    let left = y_axis_width(model, chart.width).min(chart.width);
    Rect {
        x: chart.x + left,
        y: chart.y,
        width: chart.width - left,
        height: chart.height.saturating_sub(X_AXIS_HEIGHT),
    }
}

/// Map a terminal column inside the plot to the nearest point index.
pub fn point_at_column(plot: Rect, column: u16, len: usize) -> Option<usize> {
    if len == 0 || plot.width == 0 || column < plot.x || column >= plot.right() {
        return None;
    }
    if len == 1 || plot.width == 1 {
        return Some(0);
    }
    let fraction = f64::from(column - plot.x) / f64::from(plot.width - 1);
    Some(((fraction * (len - 1) as f64).round() as usize).min(len - 1))
}

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHit {
    pub point: usize,
    /// Series index of a marker within reach, if any.
    pub marker: Option<usize>,
}

pub fn hit_test(area: Rect, model: &ChartModel, column: u16, row: u16) -> Option<ChartHit> {
    let plot = plot_area(area, model);
    if row < plot.y || row >= plot.bottom() {
        return None;
    }
    let point = point_at_column(plot, column, model.len())?;
    let per_column = model.len() as f64 / f64::from(plot.width.max(1));
    let radius = (per_column * HIT_COLUMNS).ceil().max(1.0) as usize;
    Some(ChartHit {
        point,
        marker: model.nearest_marker(point, radius),
    })
}

fn render_chart(f: &mut Frame, area: Rect, app: &AppState, model: &ChartModel) {
    let hovered = app.hover.map(|(series, _)| series);

    let price = model.price().segments();
    let markers: Vec<(usize, Vec<(f64, f64)>)> = model
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| matches!(s.tag, SeriesTag::ChangePoint(_)))
        .map(|(i, s)| (i, s.points()))
        .collect();

    // Unnamed datasets: a named one would make ratatui draw a legend box
    // over the top-right corner of the plot.
    let mut datasets: Vec<Dataset> = price
        .iter()
        .map(|run| {
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .style(theme::accent())
                .graph_type(GraphType::Line)
                .data(run)
        })
        .collect();
    for (series_index, points) in &markers {
        let style = if hovered == Some(*series_index) {
            theme::warning().add_modifier(Modifier::BOLD)
        } else {
            theme::marker()
        };
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .style(style)
                .graph_type(GraphType::Scatter)
                .data(points),
        );
    }

    let (y_min, y_max) = model.price_bounds().unwrap_or((0.0, 1.0));
    let [y_lo, y_hi] = y_labels(model);
    let x_max = model.len().saturating_sub(1) as f64;
    let first = model.label_at(0).to_string();
    let middle = model.label_at(model.len() / 2).to_string();
    let last = model.label_at(model.len().saturating_sub(1)).to_string();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(middle, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(y_lo, theme::muted()),
                    Span::styled(y_hi, theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_tooltip(f: &mut Frame, area: Rect, app: &AppState) {
    let lines: Vec<Line> = match app.tooltip() {
        Some(text) => text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme::accent())))
            .collect(),
        None => {
            let hint = if app.dashboard.chart().markers().is_empty() {
                "Hover the chart to read prices."
            } else {
                "←/→ or hover a marker for details, Enter/click to open."
            };
            vec![Line::from(Span::styled(hint, theme::muted()))]
        }
    };
    f.render_widget(Paragraph::new(lines), area);
}
