//! The five default view widgets and the contract they share.
//!
//! A view receives the rows of the current page plus the column definitions
//! and decides, from the column roles, what goes where.  Views are
//! stateless; anything they need to highlight arrives in [`ViewProps`].

pub mod card;
pub mod gallery;
pub mod kanban;
pub mod list;
pub mod table;

pub use card::CardView;
pub use gallery::GalleryView;
pub use kanban::KanbanView;
pub use list::ListView;
pub use table::TableView;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::{column::ColumnDef, engine::TableHandle, row::Row};
use crate::ui::theme::Theme;

/// Message shown by every view when there are no rows.
pub const EMPTY_MESSAGE: &str = "No data to display.";

/// Everything a view component gets to work with.
pub struct ViewProps<'a, T> {
    /// Engine handle: sort state and totals.
    pub table: TableHandle<'a>,
    /// Rows for the current page after sorting and filtering.
    pub rows: &'a [Row<'a, T>],
    pub columns: &'a [ColumnDef<T>],
    /// Index into `rows` of the highlighted row.
    pub selected: Option<usize>,
}

/// Render contract for a view.  Implement it to replace a built-in view
/// through [`ViewComponents`](crate::ui::renderer::ViewComponents).
pub trait ViewComponent<T> {
    fn render(&self, props: &ViewProps<'_, T>, area: Rect, buf: &mut Buffer);

    /// Index into `props.rows` of the row drawn at `(x, y)`, if any.
    fn row_at(&self, _props: &ViewProps<'_, T>, _area: Rect, _x: u16, _y: u16) -> Option<usize> {
        None
    }
}

/// Centered empty-state message.
pub fn render_empty_state(area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    Paragraph::new(Line::from(Span::styled(EMPTY_MESSAGE, Theme::placeholder_style())))
        .centered()
        .render(Rect::new(area.x, y, area.width, 1), buf);
}

/// Cut `s` to at most `max` chars, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Find the rect containing `(x, y)` among laid-out `(row index, rect)` pairs.
pub(crate) fn hit(slots: &[(usize, Rect)], x: u16, y: u16) -> Option<usize> {
    slots
        .iter()
        .find(|(_, r)| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
        .map(|(i, _)| *i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn hit_finds_the_enclosing_slot() {
        let slots = [(0, Rect::new(0, 0, 4, 2)), (1, Rect::new(5, 0, 4, 2))];
        assert_eq!(hit(&slots, 6, 1), Some(1));
        assert_eq!(hit(&slots, 4, 0), None);
    }
}
