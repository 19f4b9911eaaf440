//! Historical events timeline: the filtered event list, scrollable.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use brentlab_core::Event;

use crate::app::{AppState, Focus};
use crate::theme;

pub const TITLE: &str = "Historical Events Timeline";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Timeline;
    let events = app.dashboard.filtered_events();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {TITLE} ({}) ", events.len()))
        .title_style(theme::panel_title(focused));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if events.is_empty() {
        let message = if app.loaded.events {
            "No events match the current filters."
        } else {
            "Loading events..."
        };
        f.render_widget(Paragraph::new(Span::styled(message, theme::muted())), inner);
        return;
    }

    let start = app.timeline_scroll.min(events.len() - 1);
    let lines: Vec<Line> = events[start..]
        .iter()
        .enumerate()
        .map(|(offset, e)| event_line(e, focused && offset == 0))
        .collect();

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(para, inner);
}

fn event_line(event: &Event, highlighted: bool) -> Line<'_> {
    let description = if highlighted {
        theme::accent_bold()
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", event.date), theme::secondary()),
        Span::styled(event.description.as_str(), description),
        Span::raw(" "),
        Span::styled(
            format!("({})", event.kind),
            Style::default().fg(theme::event_kind_color(&event.kind)),
        ),
    ])
}
