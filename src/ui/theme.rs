//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── records ────────────────────────────────────────────────
    pub fn primary_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn badge_style() -> Style {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    }

    pub fn meta_label_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn meta_value_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn placeholder_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn image_area_style() -> Style {
        Style::default().bg(Color::Rgb(0x1f, 0x29, 0x37))
    }

    /// Caption strip drawn over the bottom of a gallery tile.
    pub fn overlay_style() -> Style {
        Style::default().bg(Color::Rgb(0x11, 0x18, 0x27))
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_border_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    // ── table header ───────────────────────────────────────────
    pub fn header_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn sort_active_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    // ── switcher ───────────────────────────────────────────────
    pub fn tab_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn tab_active_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn command_input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
