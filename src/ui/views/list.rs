//! List view — one compact item per record.
//!
//! Primary text on the first line, secondary under it, meta values
//! right-aligned with their labels beneath.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
};

use super::{hit, render_empty_state, truncate, ViewComponent, ViewProps};
use crate::core::{record::Record, roles::ListLayout};
use crate::ui::theme::Theme;

const META_GAP: usize = 3;

#[derive(Debug, Default, Clone, Copy)]
pub struct ListView;

impl ListView {
    fn item_height<T>(layout: &ListLayout<'_, T>) -> u16 {
        if layout.secondary.is_some() || !layout.meta.is_empty() {
            2
        } else {
            1
        }
    }

    fn slots<T: Record>(props: &ViewProps<'_, T>, area: Rect) -> Vec<(usize, Rect)> {
        let layout = ListLayout::resolve(props.columns);
        let h = Self::item_height(&layout);
        // One separator line between items.
        let stride = h + 1;
        let visible = ((area.height + 1) / stride).max(1) as usize;
        let offset = match props.selected {
            Some(sel) if sel >= visible => sel + 1 - visible,
            _ => 0,
        };
        (offset..props.rows.len())
            .take(visible)
            .map(|i| {
                let y = area.y + (i - offset) as u16 * stride;
                (i, Rect::new(area.x, y, area.width, h.min(area.y + area.height - y)))
            })
            .filter(|(_, r)| r.height > 0)
            .collect()
    }
}

impl<T: Record> ViewComponent<T> for ListView {
    fn render(&self, props: &ViewProps<'_, T>, area: Rect, buf: &mut Buffer) {
        if props.rows.is_empty() {
            render_empty_state(area, buf);
            return;
        }
        if area.width == 0 || area.height == 0 {
            return;
        }
        let layout = ListLayout::resolve(props.columns);
        let width = area.width as usize;

        for (i, rect) in Self::slots(props, area) {
            let row = &props.rows[i];
            let selected = props.selected == Some(i);
            if selected {
                buf.set_style(rect, Theme::selected_style());
            }

            // Right column: meta values over their labels.
            let metas: Vec<(String, String)> = layout
                .meta
                .iter()
                .map(|c| (row.text(&c.key), c.label.clone()))
                .collect();
            let cell_w = |(v, l): &(String, String)| v.chars().count().max(l.chars().count());
            let right_w: usize = metas.iter().map(cell_w).sum::<usize>()
                + META_GAP * metas.len().saturating_sub(1);
            let right_w = right_w.min(width / 2);
            let left_w = width.saturating_sub(right_w + if right_w > 0 { META_GAP } else { 0 });

            if let Some(col) = layout.primary {
                let text = truncate(&row.text(&col.key), left_w);
                buf.set_stringn(rect.x, rect.y, text, left_w, Theme::primary_style());
            }
            if let (Some(col), true) = (layout.secondary, rect.height > 1) {
                let text = truncate(&row.text(&col.key), left_w);
                buf.set_stringn(rect.x, rect.y + 1, text, left_w, Theme::secondary_style());
            }

            if right_w > 0 {
                let mut values = Vec::new();
                let mut labels = Vec::new();
                for (n, meta) in metas.iter().enumerate() {
                    let w = cell_w(meta);
                    if n > 0 {
                        values.push(Span::raw(" ".repeat(META_GAP)));
                        labels.push(Span::raw(" ".repeat(META_GAP)));
                    }
                    values.push(Span::styled(format!("{:>w$}", meta.0), Theme::meta_value_style()));
                    labels.push(Span::styled(format!("{:>w$}", meta.1), Theme::meta_label_style()));
                }
                let x = rect.x + (width - right_w) as u16;
                buf.set_line(x, rect.y, &Line::from(values), right_w as u16);
                if rect.height > 1 {
                    buf.set_line(x, rect.y + 1, &Line::from(labels), right_w as u16);
                }
            }
        }
    }

    fn row_at(&self, props: &ViewProps<'_, T>, area: Rect, x: u16, y: u16) -> Option<usize> {
        hit(&Self::slots(props, area), x, y)
    }
}
