//! Card view — a responsive grid of bordered cards.
//!
//! Card anatomy, top to bottom: cover image reference, badge chips,
//! primary headline, secondary subtitle, then a footer of label/value
//! pairs.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::{hit, render_empty_state, truncate, ViewComponent, ViewProps};
use crate::core::{record::Record, roles::CardLayout, row::Row};
use crate::ui::theme::Theme;

/// Narrowest a card may get before the grid drops a column.
const CARD_MIN_WIDTH: u16 = 30;
const GAP: u16 = 1;

#[derive(Debug, Default, Clone, Copy)]
pub struct CardView;

impl CardView {
    /// Height of every card, including borders.
    fn card_height<T>(layout: &CardLayout<'_, T>) -> u16 {
        let mut h = 2; // borders
        if layout.image.is_some() {
            h += 1;
        }
        if !layout.badges.is_empty() {
            h += 1;
        }
        if layout.primary.is_some() {
            h += 1;
        }
        if layout.secondary.is_some() {
            h += 1;
        }
        if !layout.meta.is_empty() {
            h += 1 + layout.meta.len() as u16;
        }
        h.max(3)
    }

    /// Place every card; rows of the grid scroll so the selection is shown.
    fn slots<T: Record>(props: &ViewProps<'_, T>, area: Rect) -> Vec<(usize, Rect)> {
        let layout = CardLayout::resolve(props.columns);
        let per_row = (area.width / CARD_MIN_WIDTH).max(1) as usize;
        let card_w = (area.width.saturating_sub(GAP * (per_row as u16 - 1))) / per_row as u16;
        let card_h = Self::card_height(&layout);
        let grid_rows_visible = ((area.height + GAP) / (card_h + GAP)).max(1) as usize;

        let first_grid_row = match props.selected {
            Some(sel) if sel / per_row >= grid_rows_visible => sel / per_row + 1 - grid_rows_visible,
            _ => 0,
        };

        let mut out = Vec::new();
        for i in (first_grid_row * per_row)..props.rows.len() {
            let grid_row = i / per_row - first_grid_row;
            let y = area.y as usize + grid_row * (card_h + GAP) as usize;
            if y >= (area.y + area.height) as usize {
                break;
            }
            let x = area.x + (i % per_row) as u16 * (card_w + GAP);
            let h = card_h.min(area.y + area.height - y as u16);
            out.push((i, Rect::new(x, y as u16, card_w, h)));
        }
        out
    }

    fn render_card<T: Record>(
        layout: &CardLayout<'_, T>,
        row: &Row<'_, T>,
        selected: bool,
        rect: Rect,
        buf: &mut Buffer,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if selected {
                Theme::selected_border_style()
            } else {
                Theme::border_style()
            });
        let inner = block.inner(rect);
        block.render(rect, buf);

        let width = inner.width as usize;
        let mut lines: Vec<Line> = Vec::new();

        if let Some(col) = layout.image {
            let url = row.text(&col.key);
            let text = if url.is_empty() {
                "▢ no image".to_string()
            } else {
                format!("▣ {url}")
            };
            lines.push(Line::from(Span::styled(truncate(&text, width), Theme::placeholder_style())));
        }

        if !layout.badges.is_empty() {
            let mut spans = Vec::new();
            for col in &layout.badges {
                let value = row.text(&col.key);
                if value.is_empty() {
                    continue;
                }
                spans.push(Span::styled(format!(" {value} "), Theme::badge_style()));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        if let Some(col) = layout.primary {
            lines.push(Line::from(Span::styled(
                truncate(&row.text(&col.key), width),
                Theme::primary_style(),
            )));
        }
        if let Some(col) = layout.secondary {
            lines.push(Line::from(Span::styled(
                truncate(&row.text(&col.key), width),
                Theme::secondary_style(),
            )));
        }

        if !layout.meta.is_empty() {
            lines.push(Line::from(Span::styled("─".repeat(width), Theme::border_style())));
            for col in &layout.meta {
                let value = row.text(&col.key);
                let label = truncate(&col.label, width / 2);
                let value_room = width.saturating_sub(label.chars().count() + 1);
                let value = truncate(&value, value_room);
                let pad = width.saturating_sub(label.chars().count() + value.chars().count());
                lines.push(Line::from(vec![
                    Span::styled(label, Theme::meta_label_style()),
                    Span::raw(" ".repeat(pad)),
                    Span::styled(value, Theme::meta_value_style()),
                ]));
            }
        }

        for (i, line) in lines.iter().take(inner.height as usize).enumerate() {
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }
    }
}

impl<T: Record> ViewComponent<T> for CardView {
    fn render(&self, props: &ViewProps<'_, T>, area: Rect, buf: &mut Buffer) {
        if props.rows.is_empty() {
            render_empty_state(area, buf);
            return;
        }
        if area.width == 0 || area.height == 0 {
            return;
        }
        let layout = CardLayout::resolve(props.columns);
        for (i, rect) in Self::slots(props, area) {
            Self::render_card(&layout, &props.rows[i], props.selected == Some(i), rect, buf);
        }
    }

    fn row_at(&self, props: &ViewProps<'_, T>, area: Rect, x: u16, y: u16) -> Option<usize> {
        hit(&Self::slots(props, area), x, y)
    }
}
