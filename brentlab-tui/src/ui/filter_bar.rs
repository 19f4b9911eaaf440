//! Filter bar: start date, end date, event type selector.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    render_date(f, cells[0], Focus::StartDate, &app.start_input, app.focus);
    render_date(f, cells[1], Focus::EndDate, &app.end_input, app.focus);
    render_event_type(f, cells[2], app);
}

fn field_block(field: Focus, focus: Focus) -> Block<'static> {
    let focused = field == focus;
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {}: ", field.label()))
        .title_style(theme::panel_title(focused))
}

fn render_date(f: &mut Frame, area: Rect, field: Focus, input: &str, focus: Focus) {
    let focused = field == focus;
    let mut spans = Vec::new();
    if input.is_empty() {
        spans.push(Span::styled(if focused { "" } else { "any" }, theme::muted()));
    } else {
        spans.push(Span::styled(input.to_string(), theme::accent()));
    }
    if focused {
        spans.push(Span::styled("_", theme::warning()));
    }
    let para = Paragraph::new(Line::from(spans)).block(field_block(field, focus));
    f.render_widget(para, area);
}

fn render_event_type(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::EventType;
    let current = app.dashboard.event_type();
    let options = app.dashboard.event_type_options();
    let position = options.iter().position(|o| o == current).unwrap_or(0);

    let arrow = if focused { theme::accent_bold() } else { theme::muted() };
    let line = Line::from(vec![
        Span::styled("< ", arrow),
        Span::styled(current.label().to_string(), theme::accent()),
        Span::styled(" >", arrow),
        Span::styled(
            format!("  {}/{}", position + 1, options.len()),
            theme::muted(),
        ),
    ]);
    let para = Paragraph::new(line).block(field_block(Focus::EventType, app.focus));
    f.render_widget(para, area);
}
