//! View switcher — a row of tabs, one per available view mode.
//!
//! The switcher holds no state.  It draws the tabs and answers "which tab
//! is under this point?"; applying the change is the caller's job.

use std::collections::HashMap;

use ratatui::{buffer::Buffer, layout::Rect, text::Span};
use unicode_width::UnicodeWidthStr;

use crate::core::column::ViewMode;
use crate::ui::theme::Theme;

/// Icon drawn in front of each tab label.
pub fn view_icon(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Table => "▦",
        ViewMode::Card => "▣",
        ViewMode::List => "☰",
        ViewMode::Kanban => "▥",
        ViewMode::Gallery => "▨",
    }
}

/// Inputs for a switcher render.
#[derive(Debug, Clone, Copy)]
pub struct SwitcherProps<'a> {
    pub view_mode: ViewMode,
    pub available_views: &'a [ViewMode],
    /// Per-mode label overrides; missing entries use the mode's own label.
    pub labels: Option<&'a HashMap<ViewMode, String>>,
    /// Icons are always drawn; labels only when this is set.
    pub show_labels: bool,
}

impl SwitcherProps<'_> {
    pub fn label(&self, mode: ViewMode) -> &str {
        self.labels
            .and_then(|l| l.get(&mode))
            .map(String::as_str)
            .unwrap_or_else(|| mode.label())
    }
}

/// Render contract for a switcher replacement.
pub trait SwitcherComponent {
    fn render(&self, props: &SwitcherProps<'_>, area: Rect, buf: &mut Buffer);

    /// Mode whose tab covers `(x, y)`.
    fn hit_test(&self, props: &SwitcherProps<'_>, area: Rect, x: u16, y: u16) -> Option<ViewMode>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultViewSwitcher;

const TAB_GAP: u16 = 1;

impl DefaultViewSwitcher {
    fn tab_text(props: &SwitcherProps<'_>, mode: ViewMode) -> String {
        if props.show_labels {
            format!(" {} {} ", view_icon(mode), props.label(mode))
        } else {
            format!(" {} ", view_icon(mode))
        }
    }

    fn tabs(props: &SwitcherProps<'_>, area: Rect) -> Vec<(ViewMode, Rect, String)> {
        let mut out = Vec::new();
        let mut x = area.x;
        let right = area.x + area.width;
        for &mode in props.available_views {
            if x >= right {
                break;
            }
            let text = Self::tab_text(props, mode);
            let w = (text.width() as u16).min(right - x);
            out.push((mode, Rect::new(x, area.y, w, 1), text));
            x = x.saturating_add(w + TAB_GAP);
        }
        out
    }
}

impl SwitcherComponent for DefaultViewSwitcher {
    fn render(&self, props: &SwitcherProps<'_>, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        for (mode, rect, text) in Self::tabs(props, area) {
            let style = if mode == props.view_mode {
                Theme::tab_active_style()
            } else {
                Theme::tab_style()
            };
            buf.set_span(rect.x, rect.y, &Span::styled(text, style), rect.width);
        }
    }

    fn hit_test(&self, props: &SwitcherProps<'_>, area: Rect, x: u16, y: u16) -> Option<ViewMode> {
        Self::tabs(props, area)
            .into_iter()
            .find(|(_, r, _)| y == r.y && x >= r.x && x < r.x + r.width)
            .map(|(mode, _, _)| mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(labels: Option<&HashMap<ViewMode, String>>, show_labels: bool) -> SwitcherProps<'_> {
        SwitcherProps {
            view_mode: ViewMode::Table,
            available_views: ViewMode::DEFAULT_VIEWS,
            labels,
            show_labels,
        }
    }

    #[test]
    fn label_overrides_fall_back_per_mode() {
        let mut labels = HashMap::new();
        labels.insert(ViewMode::Card, "Tiles".to_string());
        let p = props(Some(&labels), true);
        assert_eq!(p.label(ViewMode::Card), "Tiles");
        assert_eq!(p.label(ViewMode::List), "List");
    }

    #[test]
    fn icons_only_tabs_are_narrow() {
        let area = Rect::new(0, 0, 40, 1);
        let tabs = DefaultViewSwitcher::tabs(&props(None, false), area);
        assert!(tabs.iter().all(|(_, r, _)| r.width == 3));
        assert_eq!(tabs[1].1.x, 4);
    }

    #[test]
    fn hit_test_maps_points_to_modes() {
        let area = Rect::new(0, 0, 60, 1);
        let p = props(None, true);
        // " ▦ Table " is 9 cells wide, then one gap cell.
        assert_eq!(DefaultViewSwitcher.hit_test(&p, area, 0, 0), Some(ViewMode::Table));
        assert_eq!(DefaultViewSwitcher.hit_test(&p, area, 9, 0), None);
        assert_eq!(DefaultViewSwitcher.hit_test(&p, area, 10, 0), Some(ViewMode::Card));
        assert_eq!(DefaultViewSwitcher.hit_test(&p, area, 10, 1), None);
    }

    #[test]
    fn wide_labels_take_two_cells_per_glyph() {
        let mut labels = HashMap::new();
        labels.insert(ViewMode::Table, "表格".to_string());
        let p = props(Some(&labels), true);
        let area = Rect::new(0, 0, 60, 1);
        // " ▦ 表格 " is 1 + 1 + 1 + 4 + 1 = 8 cells wide.
        let tabs = DefaultViewSwitcher::tabs(&p, area);
        assert_eq!(tabs[0].1.width, 8);
        assert_eq!(DefaultViewSwitcher.hit_test(&p, area, 7, 0), Some(ViewMode::Table));
        assert_eq!(DefaultViewSwitcher.hit_test(&p, area, 9, 0), Some(ViewMode::Card));
    }
}
