//! Parrot/neon theme tokens for the BrentLab dashboard
//!
//! # Color Palette
//! - **Accent**: Electric cyan (price line, focus, highlights)
//! - **Marker**: Hot pink (change points)
//! - **Positive**: Neon green (resolved events)
//! - **Warning**: Neon orange (selected marker, attention)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (labels, hints, disabled)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const MARKER: Color = Color::Rgb(255, 20, 147);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn marker() -> Style {
    Style::default().fg(MARKER)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        muted()
    }
}

/// Badge color for an event type. Known types get fixed colors, anything
/// else falls back to secondary text.
pub fn event_kind_color(kind: &str) -> Color {
    match kind {
        "Policy" | "OPEC" => POSITIVE,
        "Conflict" | "War" | "Geopolitical" => MARKER,
        "Economic" | "Financial" | "Market" => WARNING,
        "Pandemic" | "Health" | "Disaster" => NEUTRAL,
        _ => TEXT_SECONDARY,
    }
}
