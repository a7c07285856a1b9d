//! Popup overlays — settings menu, key help and the record detail card.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use multiview::{ColumnDef, JsonRecord, Row};

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::AppState;
use crate::config::{Action, AppConfig};

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn hint(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

// ───────────────────────────────────────── settings popup ────

pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = SETTINGS_ITEMS.len() as u16 + 6;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = popup_block("Settings");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let selected = i == self.state.settings_selected;
            let (prefix, style) = if selected {
                (
                    " ▸ ",
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("   ", Style::default().fg(Color::White))
            };

            let (value, value_style) = match item {
                SettingsItem::Submenu { .. } => ("›".to_string(), Style::default().fg(Color::DarkGray)),
                SettingsItem::Toggle { get, .. } => {
                    if get(self.state) {
                        ("[ON]".to_string(), Style::default().fg(Color::Green))
                    } else {
                        ("[OFF]".to_string(), Style::default().fg(Color::DarkGray))
                    }
                }
                SettingsItem::Cycle { value, .. } => (value(self.state), Style::default().fg(Color::Yellow)),
            };

            let label = format!("{prefix}{}", item.label());
            let pad = (inner.width as usize)
                .saturating_sub(label.chars().count() + value.chars().count() + 1);
            lines.push(Line::from(vec![
                Span::styled(label, style),
                Span::raw(" ".repeat(pad)),
                Span::styled(value, value_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(hint("  Enter/Space: change  Esc: close"));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── help popup ────────

/// Keybinding reference built from the live config.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

const MOUSE_HELP: &[(&str, &str)] = &[
    ("Switch view", "click tab"),
    ("Sort column", "click header"),
    ("Select / detail", "click / double-click"),
    ("Move selection", "scroll"),
];

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (Action::ALL.len() + MOUSE_HELP.len()) as u16 + 7;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block("Controls");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let width = inner.width as usize;
        let row = |label: &str, keys: String| {
            let label_col = format!("   {label:<20}");
            let keys_width = width.saturating_sub(label_col.chars().count() + 1).max(1);
            Line::from(vec![
                Span::styled(label_col, Style::default().fg(Color::White)),
                Span::styled(format!("{keys:>keys_width$}"), Style::default().fg(Color::Yellow)),
            ])
        };

        let mut lines = vec![Line::raw("")];
        for &action in Action::ALL {
            lines.push(row(action.label(), self.config.display_bindings(action)));
        }
        lines.push(Line::raw(""));
        for &(label, how) in MOUSE_HELP {
            lines.push(row(label, how.to_string()));
        }
        lines.push(Line::raw(""));
        lines.push(hint("  Keys are set in config.toml  Esc: close"));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── detail popup ──────

/// Every column of one record, label over value.
pub struct DetailPopup<'a> {
    pub title: String,
    pub row: Row<'a, JsonRecord>,
    pub columns: &'a [ColumnDef<JsonRecord>],
}

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (self.columns.len() as u16).saturating_mul(2) + 4;
        let popup = centered_fixed(area.width.saturating_sub(8).clamp(30, 72), height, area);
        Clear.render(popup, buf);

        let block = popup_block(&self.title);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        for column in self.columns {
            let value = self.row.display(column);
            lines.push(Line::from(Span::styled(
                column.label.clone(),
                Style::default().fg(Color::DarkGray),
            )));
            let value = if value.is_empty() { "—".to_string() } else { value };
            lines.push(Line::from(Span::styled(
                format!("  {value}"),
                Style::default().fg(Color::White),
            )));
        }
        lines.push(hint("Esc: close"));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_fixed(50, 50, area), area);
    }
}
