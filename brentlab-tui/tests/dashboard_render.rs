//! Render the whole dashboard into a TestBackend buffer.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

use brentlab_core::{ChangePointId, DashboardSource, FixtureSource};
use brentlab_tui::ui::chart_panel;
use brentlab_tui::{AppState, input, spawn_fetches, ui};

const WIDTH: u16 = 140;
const HEIGHT: u16 = 40;

fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../brentlab-core/tests/fixtures/sample")
}

fn loaded_app() -> AppState {
    let source: Arc<dyn DashboardSource> = Arc::new(FixtureSource::from_dir(sample_dir()));
    let (tx, rx) = mpsc::channel();
    let mut app = AppState::new(rx, source.name());
    for handle in spawn_fetches(source, tx).unwrap() {
        handle.join().unwrap();
    }
    app.drain_fetches();
    app.chart_area = ui::layout(ratatui::layout::Rect::new(0, 0, WIDTH, HEIGHT)).chart;
    app
}

fn render(app: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn press(app: &mut AppState, code: KeyCode) {
    input::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

#[test]
fn empty_dashboard_shows_loading_placeholders() {
    let (_tx, rx) = mpsc::channel();
    let app = AppState::new(rx, "memory");
    let text = render(&app);
    assert!(text.contains("Brent Oil Price Analysis Dashboard"));
    assert!(text.contains("Loading price data..."));
    assert!(text.contains("Loading events..."));
}

#[test]
fn loaded_dashboard_shows_chart_filters_and_timeline() {
    let app = loaded_app();
    let text = render(&app);
    assert!(text.contains("Brent Oil Price"));
    assert!(text.contains("2008-07-01"));
    assert!(text.contains("Historical Events Timeline (5)"));
    assert!(text.contains("Event Type"));
    assert!(text.contains("< All >"));
    assert!(text.contains("prices: 12"));
    assert!(text.contains("change points: 3"));
}

#[test]
fn chart_draws_no_legend_over_the_plot() {
    let app = loaded_app();
    let text = render(&app);
    // Window title and chart panel title only.
    assert_eq!(text.matches("Brent Oil Price").count(), 2);
}

#[test]
fn event_type_filter_narrows_timeline() {
    let mut app = loaded_app();
    app.focus = brentlab_tui::Focus::EventType;
    let conflict = app
        .dashboard
        .event_type_options()
        .iter()
        .position(|o| o.label() == "Conflict")
        .unwrap();
    for _ in 0..conflict {
        press(&mut app, KeyCode::Right);
    }
    let text = render(&app);
    assert!(text.contains("< Conflict >"));
    assert!(text.contains("Historical Events Timeline (2)"));
}

#[test]
fn keyboard_activation_opens_detail_overlay() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Enter);
    let text = render(&app);
    assert!(text.contains("Change Point Detected #1"));
    assert!(text.contains("2008-07-07"));
    assert!(text.contains("Quantitative Impact:"));
    assert!(text.contains("Correlated Key Event:"));

    press(&mut app, KeyCode::Esc);
    let text = render(&app);
    assert!(!text.contains("Change Point Detected"));
}

#[test]
fn change_point_without_event_shows_fallback_message() {
    let mut app = loaded_app();
    // Every sample change point has an event; drop the events to force
    // the fallback.
    app.dashboard.apply_events(Vec::new());
    press(&mut app, KeyCode::Enter);
    let text = render(&app);
    assert!(text.contains("No specific event recorded on this exact date."));
}

#[test]
fn mouse_click_on_marker_opens_its_detail() {
    let mut app = loaded_app();
    let model = app.dashboard.chart().clone();
    let plot = chart_panel::plot_area(app.chart_area, &model);

    // Scan the plot row for the column that hits the second marker.
    let row = plot.y + plot.height / 2;
    let column = (plot.x..plot.right())
        .find(|&c| {
            chart_panel::hit_test(app.chart_area, &model, c, row).and_then(|h| h.marker) == Some(2)
        })
        .expect("some column should hit the second marker");

    input::handle_mouse(
        &mut app,
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        },
    );
    let detail = app.dashboard.detail().expect("click should select");
    assert_eq!(detail.id.0, 1);
    assert_eq!(detail.date, "2008-07-11");
}

#[test]
fn click_and_arrow_keys_share_the_cursor() {
    let mut app = loaded_app();
    let model = app.dashboard.chart().clone();
    let plot = chart_panel::plot_area(app.chart_area, &model);
    let row = plot.y + plot.height / 2;
    let column = (plot.x..plot.right())
        .find(|&c| {
            chart_panel::hit_test(app.chart_area, &model, c, row).and_then(|h| h.marker) == Some(3)
        })
        .expect("some column should hit the third marker");

    input::handle_mouse(
        &mut app,
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        },
    );
    let clicked = app.dashboard.detail().expect("click should select").id;
    assert_eq!(clicked, ChangePointId(2));
    assert_eq!(app.chart_cursor, Some(clicked));
    press(&mut app, KeyCode::Esc);

    // Left then Right comes back to the clicked marker.
    press(&mut app, KeyCode::Left);
    assert_eq!(app.chart_cursor, Some(ChangePointId(1)));
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.dashboard.detail().map(|d| d.id), Some(clicked));
}

#[test]
fn hovering_a_marker_shows_its_tooltip() {
    let mut app = loaded_app();
    press(&mut app, KeyCode::Right);
    let text = render(&app);
    assert!(text.contains("Change Point: 2008-07-11"));
    assert!(text.contains("Event: Iran missile tests raise supply fears"));
}
