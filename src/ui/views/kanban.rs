//! Kanban view — rows partitioned into board columns by their `groupBy`
//! value, each column headed by a status dot and a row count.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::{hit, render_empty_state, truncate, ViewComponent, ViewProps};
use crate::core::{
    grouping::{self, KanbanGroup},
    record::Record,
    roles::KanbanLayout,
    row::Row,
};
use crate::ui::theme::Theme;

const COLUMN_WIDTH: u16 = 28;
const GAP: u16 = 1;

#[derive(Debug, Default, Clone, Copy)]
pub struct KanbanView;

/// A board column and the cards placed inside it.
struct BoardColumn<'g, 'a, T> {
    group: &'g KanbanGroup<'a, T>,
    rect: Rect,
    cards: Vec<(usize, Rect)>,
}

impl KanbanView {
    fn card_height<T>(layout: &KanbanLayout<'_, T>) -> u16 {
        // borders + title + optional rule and metas
        let meta = if layout.meta.is_empty() {
            0
        } else {
            1 + layout.meta.len() as u16
        };
        3 + meta
    }

    /// Position of a row (index into the page) inside `groups`.
    fn group_of<T>(groups: &[KanbanGroup<'_, T>], rows: &[Row<'_, T>], index: usize) -> Option<usize> {
        let id = rows.get(index)?.id;
        groups
            .iter()
            .position(|g| g.rows.iter().any(|r| r.id == id))
    }

    fn board<'g, 'a, T: Record>(
        props: &ViewProps<'a, T>,
        groups: &'g [KanbanGroup<'a, T>],
        area: Rect,
    ) -> Vec<BoardColumn<'g, 'a, T>> {
        let layout = KanbanLayout::resolve(props.columns);
        let card_h = Self::card_height(&layout);
        let fits = ((area.width + GAP) / (COLUMN_WIDTH + GAP)).max(1) as usize;

        // Scroll horizontally so the selected card's column is on screen.
        let selected_group = props
            .selected
            .and_then(|sel| Self::group_of(groups, props.rows, sel));
        let first = match selected_group {
            Some(g) if g >= fits => g + 1 - fits,
            _ => 0,
        };

        let mut out = Vec::new();
        for (n, group) in groups.iter().enumerate().skip(first).take(fits) {
            let x = area.x + (n - first) as u16 * (COLUMN_WIDTH + GAP);
            let width = COLUMN_WIDTH.min(area.x + area.width - x);
            let rect = Rect::new(x, area.y, width, area.height);

            // The header sits on the top border.
            let inner_top = rect.y + 1;
            let inner_bottom = rect.y + rect.height.saturating_sub(1);
            // Scroll vertically so the selected card stays inside its column.
            let visible = (inner_bottom.saturating_sub(inner_top) / card_h).max(1) as usize;
            let selected_pos = props
                .selected
                .and_then(|sel| props.rows.get(sel))
                .and_then(|sel| group.rows.iter().position(|r| r.id == sel.id));
            let offset = match selected_pos {
                Some(pos) if pos >= visible => pos + 1 - visible,
                _ => 0,
            };

            let mut cards = Vec::new();
            let mut y = inner_top;
            for row in group.rows.iter().skip(offset) {
                if y >= inner_bottom {
                    break;
                }
                let h = card_h.min(inner_bottom - y);
                let idx = props.rows.iter().position(|r| r.id == row.id);
                if let Some(idx) = idx {
                    cards.push((idx, Rect::new(x + 1, y, width.saturating_sub(2), h)));
                }
                y += card_h;
            }
            out.push(BoardColumn { group, rect, cards });
        }
        out
    }
}

impl<T: Record> ViewComponent<T> for KanbanView {
    fn render(&self, props: &ViewProps<'_, T>, area: Rect, buf: &mut Buffer) {
        if props.rows.is_empty() {
            render_empty_state(area, buf);
            return;
        }
        if area.width < 4 || area.height < 3 {
            return;
        }
        let layout = KanbanLayout::resolve(props.columns);
        let groups = grouping::group_rows(props.rows, layout.group_by);

        for column in Self::board(props, &groups, area) {
            let (r, g, b) = grouping::group_dot_color(&column.group.key);
            let title = Line::from(vec![
                Span::raw(" "),
                Span::styled("●", Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(" "),
                Span::styled(column.group.key.clone(), Theme::header_style()),
                Span::raw(" "),
                Span::styled(format!("({})", column.group.rows.len()), Theme::placeholder_style()),
                Span::raw(" "),
            ]);
            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border_style());
            block.render(column.rect, buf);

            for (idx, rect) in column.cards {
                let row = &props.rows[idx];
                let selected = props.selected == Some(idx);
                let card = Block::default()
                    .borders(Borders::ALL)
                    .border_style(if selected {
                        Theme::selected_border_style()
                    } else {
                        Theme::border_style()
                    });
                let inner = card.inner(rect);
                card.render(rect, buf);
                let width = inner.width as usize;

                let mut lines = Vec::new();
                if let Some(col) = layout.title {
                    lines.push(Line::from(Span::styled(
                        truncate(&row.text(&col.key), width),
                        Theme::primary_style(),
                    )));
                }
                if !layout.meta.is_empty() {
                    lines.push(Line::from(Span::styled("─".repeat(width), Theme::border_style())));
                    for col in &layout.meta {
                        let label = truncate(&col.label, width / 2);
                        let room = width.saturating_sub(label.chars().count() + 1);
                        let value = truncate(&row.text(&col.key), room);
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
    }

    fn row_at(&self, props: &ViewProps<'_, T>, area: Rect, x: u16, y: u16) -> Option<usize> {
        let layout = KanbanLayout::resolve(props.columns);
        let groups = grouping::group_rows(props.rows, layout.group_by);
        let slots: Vec<(usize, Rect)> = Self::board(props, &groups, area)
            .into_iter()
            .flat_map(|c| c.cards)
            .collect();
        hit(&slots, x, y)
    }
}
