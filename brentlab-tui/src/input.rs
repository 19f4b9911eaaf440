//! Input dispatch: overlays → global keys → focus-specific handlers.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use brentlab_core::domain::shift_date;

use crate::app::{AppState, Focus, Overlay};
use crate::ui::chart_panel;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::Help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.overlay = Overlay::None;
        }
        return;
    }
    if app.detail_open() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.dashboard.clear_selection();
        }
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                set_focus(app, app.focus.prev());
            } else {
                set_focus(app, app.focus.next());
            }
            return;
        }
        KeyCode::BackTab => {
            set_focus(app, app.focus.prev());
            return;
        }
        _ => {}
    }

    // 3. Focus-specific keys.
    match app.focus {
        Focus::StartDate | Focus::EndDate => handle_date_key(app, key),
        Focus::EventType => handle_event_type_key(app, key),
        Focus::Chart => handle_chart_key(app, key),
        Focus::Timeline => handle_timeline_key(app, key),
    }
}

fn set_focus(app: &mut AppState, focus: Focus) {
    // Leaving a date field commits whatever was typed.
    if app.focus.is_date_field() {
        app.commit_date_inputs();
    }
    app.focus = focus;
    if focus == Focus::Chart && app.marker_count() > 0 {
        app.hover_cursor();
    }
}

fn date_input(app: &mut AppState) -> &mut String {
    if app.focus == Focus::StartDate {
        &mut app.start_input
    } else {
        &mut app.end_input
    }
}

fn handle_date_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let input = date_input(app);
            if input.len() < 10 {
                input.push(c);
            }
        }
        KeyCode::Char('+') | KeyCode::Up => step_date(app, 1),
        KeyCode::Down => step_date(app, -1),
        KeyCode::Char('-') => {
            let input = date_input(app);
            if shift_date(input, 0).is_some() {
                step_date(app, -1);
            } else if input.len() < 10 {
                input.push('-');
            }
        }
        KeyCode::Backspace => {
            date_input(app).pop();
        }
        KeyCode::Delete => date_input(app).clear(),
        KeyCode::Enter => app.commit_date_inputs(),
        KeyCode::Esc => app.sync_date_inputs(),
        _ => {}
    }
}

fn step_date(app: &mut AppState, days: i64) {
    let input = date_input(app);
    if let Some(shifted) = shift_date(input, days) {
        *input = shifted;
        app.commit_date_inputs();
    }
}

fn handle_event_type_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
            app.cycle_event_type(1)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
            app.cycle_event_type(-1)
        }
        _ => {}
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') => app.move_chart_cursor(1),
        KeyCode::Left | KeyCode::Char('h') => app.move_chart_cursor(-1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.hover.is_none() && app.marker_count() > 0 {
                app.hover_cursor();
            }
            app.activate_hover();
        }
        KeyCode::Esc => app.hover = None,
        _ => {}
    }
}

fn handle_timeline_key(app: &mut AppState, key: KeyEvent) {
    let total = app.dashboard.filtered_events().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.timeline_scroll + 1 < total {
                app.timeline_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.timeline_scroll = app.timeline_scroll.saturating_sub(1);
        }
        KeyCode::PageDown => {
            app.timeline_scroll = (app.timeline_scroll + 10).min(total.saturating_sub(1));
        }
        KeyCode::PageUp => {
            app.timeline_scroll = app.timeline_scroll.saturating_sub(10);
        }
        KeyCode::Home | KeyCode::Char('g') => app.timeline_scroll = 0,
        KeyCode::End | KeyCode::Char('G') => app.timeline_scroll = total.saturating_sub(1),
        _ => {}
    }
}

/// Handle a mouse event. Only the chart reacts: movement hovers the
/// nearest point, a left click opens the nearest marker.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if app.overlay != Overlay::None || app.detail_open() {
        return;
    }
    let chart = app.dashboard.chart();
    let Some(hit) = chart_panel::hit_test(app.chart_area, chart, mouse.column, mouse.row) else {
        if matches!(mouse.kind, MouseEventKind::Moved) {
            app.hover = None;
        }
        return;
    };

    match mouse.kind {
        MouseEventKind::Moved => {
            app.hover = Some(match hit.marker {
                Some(series) => (series, hit.point),
                None => (0, hit.point),
            });
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.focus = Focus::Chart;
            if let Some(series) = hit.marker {
                app.chart_cursor = app.dashboard.chart().change_point_at(series);
                app.hover = Some((series, hit.point));
                app.dashboard.activate(series, hit.point);
            }
        }
        _ => {}
    }
}
