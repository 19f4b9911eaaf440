//! Overlay widgets: change point detail, help.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use brentlab_core::DetailView;

use crate::theme;
use crate::ui::centered_rect;

pub const NO_EVENT_MESSAGE: &str = "No specific event recorded on this exact date.";

/// Modal shown while a change point is selected.
pub fn render_detail(f: &mut Frame, area: Rect, detail: &DetailView) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::marker())
        .title(format!(" Change Point Detected {} ", detail.id))
        .title_style(theme::accent_bold())
        .title_bottom(Line::from(Span::styled(" [Esc/Enter] Close ", theme::muted())).right_aligned());

    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(detail.date.clone(), theme::accent_bold())).alignment(Alignment::Center),
        Line::from(""),
        Line::from(vec![
            Span::styled("Quantitative Impact: ", theme::accent_bold()),
            Span::raw(detail.impact.clone()),
        ]),
        Line::from(Span::styled("─".repeat(popup.width.saturating_sub(2) as usize), theme::muted())),
        Line::from(Span::styled("Correlated Key Event:", theme::accent_bold())),
    ];

    match &detail.event {
        Some(event) => {
            text.push(Line::from(Span::styled(event.description.clone(), theme::warning())));
            text.push(Line::from(vec![
                Span::styled("Type: ", theme::muted()),
                Span::styled(event.kind.clone(), theme::secondary()),
            ]));
        }
        None => text.push(Line::from(Span::styled(NO_EVENT_MESSAGE, theme::muted()))),
    }

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Keyboard and mouse reference.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let section = |title: &'static str| Line::from(Span::styled(title, theme::accent_bold()));
    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<14}"), theme::neutral()),
            Span::styled(what, theme::muted()),
        ])
    };

    let text = vec![
        section("Global"),
        entry("Tab/Shift-Tab", "Move focus"),
        entry("?", "Toggle this help"),
        entry("q", "Quit (closes an open overlay first)"),
        Line::from(""),
        section("Date fields"),
        entry("0-9 -", "Type a YYYY-MM-DD date"),
        entry("Backspace/Del", "Edit / clear (empty = no bound)"),
        entry("Up/Down +/-", "Step one day"),
        entry("Enter", "Apply"),
        Line::from(""),
        section("Event type"),
        entry("Left/Right", "Cycle types"),
        Line::from(""),
        section("Chart"),
        entry("Left/Right", "Move between change points"),
        entry("Enter/Space", "Open change point details"),
        entry("Mouse", "Hover for tooltip, click a marker"),
        Line::from(""),
        section("Timeline"),
        entry("j/k PgUp/PgDn", "Scroll"),
    ];

    let para = Paragraph::new(text).block(block);
    f.render_widget(para, popup);
}
