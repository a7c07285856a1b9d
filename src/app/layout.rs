//! Screen layout — switcher bar, filter line, view pane, status bar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, BorderType, Borders},
};

use multiview::ui::theme::Theme;

pub struct AppLayout {
    pub switcher_area: Rect,
    pub filter_area: Rect,
    pub view_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // view switcher
                Constraint::Length(1), // search / filters
                Constraint::Min(3),    // current view
                Constraint::Length(1), // status + pagination
            ])
            .split(area);

        Self {
            switcher_area: chunks[0],
            filter_area: chunks[1],
            view_area: chunks[2],
            status_area: chunks[3],
        }
    }
}

/// Frame drawn around the current view.  Shared by drawing and mouse
/// hit-testing so both agree on the inner area.
pub fn view_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style())
}

pub fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}
