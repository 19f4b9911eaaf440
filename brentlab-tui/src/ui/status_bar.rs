//! Bottom status bar: focus, key hints, dataset counts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(format!(" [{}]", app.focus.label()), theme::accent()));
    spans.push(Span::styled(" Tab:focus ?:help q:quit", theme::muted()));
    spans.push(Span::raw(" | "));

    let d = &app.dashboard;
    spans.push(count_span("prices", app.loaded.prices, d.dates().len()));
    spans.push(Span::raw(" "));
    spans.push(count_span("change points", app.loaded.change_points, d.change_points().len()));
    spans.push(Span::raw(" "));
    spans.push(count_span("events", app.loaded.events, d.events().len()));

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(app.source_name.as_str(), theme::secondary()));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn count_span(label: &str, loaded: bool, count: usize) -> Span<'static> {
    if loaded {
        Span::styled(format!("{label}: {count}"), theme::positive())
    } else {
        Span::styled(format!("{label}: -"), theme::muted())
    }
}
