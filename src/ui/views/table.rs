//! Table view — a header row with sort indicators and one line per record.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use super::{render_empty_state, truncate, ViewComponent, ViewProps};
use crate::core::{column::ColumnDef, record::Record, roles};
use crate::ui::theme::Theme;

/// Auto-sized columns never grow past this.
const MAX_AUTO_WIDTH: u16 = 32;
const COLUMN_GAP: u16 = 2;

#[derive(Debug, Default, Clone, Copy)]
pub struct TableView;

/// One laid-out column: the definition and its horizontal span.
struct ColumnSlot<'c, T> {
    column: &'c ColumnDef<T>,
    x: u16,
    width: u16,
}

impl TableView {
    fn layout<'c, T: Record>(props: &ViewProps<'c, T>, area: Rect) -> Vec<ColumnSlot<'c, T>> {
        let mut slots = Vec::new();
        let mut x = area.x;
        let right = area.x + area.width;

        for column in roles::table_columns(props.columns) {
            if x >= right {
                break;
            }
            let wanted = column.table_width().unwrap_or_else(|| {
                // Sort indicator takes two extra cells.
                let header = column.label.chars().count() as u16 + 2;
                let widest = props
                    .rows
                    .iter()
                    .map(|r| r.display(column).chars().count() as u16)
                    .max()
                    .unwrap_or(0);
                header.max(widest).min(MAX_AUTO_WIDTH)
            });
            let width = wanted.min(right - x);
            slots.push(ColumnSlot { column, x, width });
            x = x.saturating_add(width + COLUMN_GAP);
        }
        slots
    }

    /// First visible row when `selected` has to stay on screen.
    fn scroll_offset(selected: Option<usize>, visible: usize) -> usize {
        match selected {
            Some(sel) if visible > 0 && sel >= visible => sel + 1 - visible,
            _ => 0,
        }
    }

    /// Key of the column whose header sits at `(x, y)`.  Used to turn a
    /// header click into a sort toggle.
    pub fn column_at<'c, T: Record>(
        props: &ViewProps<'c, T>,
        area: Rect,
        x: u16,
        y: u16,
    ) -> Option<&'c str> {
        if y != area.y {
            return None;
        }
        Self::layout(props, area)
            .into_iter()
            .find(|slot| x >= slot.x && x < slot.x + slot.width)
            .map(|slot| slot.column.key.as_str())
    }
}

impl<T: Record> ViewComponent<T> for TableView {
    fn render(&self, props: &ViewProps<'_, T>, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let slots = Self::layout(props, area);

        // ── header ─────────────────────────────────────────────
        for slot in &slots {
            let can_sort = props.table.can_sort(slot.column);
            let mut spans = vec![Span::styled(
                slot.column.label.to_uppercase(),
                Theme::header_style(),
            )];
            if can_sort {
                let (arrow, style) = match props.table.sort_direction(&slot.column.key) {
                    Some(dir) => (dir.arrow(), Theme::sort_active_style()),
                    None => ("↕", Theme::placeholder_style()),
                };
                spans.push(Span::raw(" "));
                spans.push(Span::styled(arrow, style));
            }
            buf.set_line(slot.x, area.y, &Line::from(spans), slot.width);
        }
        if area.height < 2 {
            return;
        }
        let rule = "─".repeat(area.width as usize);
        buf.set_stringn(area.x, area.y + 1, rule, area.width as usize, Theme::border_style());

        let body = Rect::new(area.x, area.y + 2, area.width, area.height.saturating_sub(2));
        if props.rows.is_empty() {
            render_empty_state(body, buf);
            return;
        }

        // ── rows ───────────────────────────────────────────────
        let visible = body.height as usize;
        let offset = Self::scroll_offset(props.selected, visible);
        for (i, row) in props.rows.iter().enumerate().skip(offset).take(visible) {
            let y = body.y + (i - offset) as u16;
            let selected = props.selected == Some(i);
            if selected {
                buf.set_style(Rect::new(body.x, y, body.width, 1), Theme::selected_style());
            }
            for slot in &slots {
                let text = truncate(&row.display(slot.column), slot.width as usize);
                let style = if selected {
                    Theme::selected_style()
                } else {
                    Style::default()
                };
                buf.set_stringn(slot.x, y, text, slot.width as usize, style);
            }
        }
    }

    fn row_at(&self, props: &ViewProps<'_, T>, area: Rect, x: u16, y: u16) -> Option<usize> {
        let body_top = area.y + 2;
        if x < area.x || x >= area.x + area.width || y < body_top || y >= area.y + area.height {
            return None;
        }
        let visible = area.height.saturating_sub(2) as usize;
        let idx = Self::scroll_offset(props.selected, visible) + (y - body_top) as usize;
        (idx < props.rows.len()).then_some(idx)
    }
}
