//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── wheel ──────────────────────────────────────────────────
    pub fn pointer_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Rows fade out with their distance from the pointer.
    pub fn row_style(distance: usize) -> Style {
        match distance {
            0 => Self::pointer_style(),
            1 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::DarkGray),
        }
    }

    pub fn pointer_marker_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // ── winners ────────────────────────────────────────────────
    pub fn winner_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn timestamp_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── controls ───────────────────────────────────────────────
    pub fn key_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn active_toggle_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn disabled_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focused_border_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
