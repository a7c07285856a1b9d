//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use multiview::{DataView, JsonRecord, TableHandle};
use ratatui::layout::Rect;

use crate::config::AppConfig;

/// Which screen / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Browse,
    /// Typing into the search line.
    Filter,
    Detail,
    Settings,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub view: DataView<JsonRecord>,
    pub config: AppConfig,
    /// Title of the view frame (file name or demo name).
    pub title: String,
    pub active_view: ActiveView,
    /// Highlighted row, as an index into the current page.
    pub selected: Option<usize>,
    /// Column the sort keys act on, as an index into [`Self::sortable_columns`].
    pub sort_cursor: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Last left-clicked row (by record id) and click time, for double-click.
    pub last_left_click: Option<(usize, Instant)>,
    /// Full terminal area from the last draw, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Write settings changes back to the config file.
    pub persist_config: bool,
}

impl AppState {
    pub fn new(view: DataView<JsonRecord>, config: AppConfig, title: String) -> Self {
        let mut state = Self {
            view,
            config,
            title,
            active_view: ActiveView::default(),
            selected: None,
            sort_cursor: 0,
            status_message: None,
            should_quit: false,
            settings_selected: 0,
            last_left_click: None,
            terminal_area: Rect::default(),
            persist_config: true,
        };
        state.clamp_selection();
        state
    }

    pub fn page_len(&self) -> usize {
        self.view.rows().len()
    }

    /// Keep the selection on a row of the current page (or clear it when
    /// the page is empty).
    pub fn clamp_selection(&mut self) {
        let len = self.page_len();
        self.selected = match (len, self.selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(i)) => Some(i.min(n - 1)),
        };
    }

    pub fn selected_record(&self) -> Option<&JsonRecord> {
        let rows = self.view.rows();
        let row = rows.get(self.selected?)?;
        Some(row.original)
    }

    /// Keys of the table columns that can be sorted, in display order.
    pub fn sortable_columns(&self) -> Vec<String> {
        let table: TableHandle<'_> = self.view.table();
        self.view
            .columns()
            .iter()
            .filter(|c| !c.table.hidden && table.can_sort(*c))
            .map(|c| c.key.clone())
            .collect()
    }

    pub fn sort_target(&self) -> Option<String> {
        let cols = self.sortable_columns();
        cols.get(self.sort_cursor.min(cols.len().saturating_sub(1))).cloned()
    }

    pub fn column_label(&self, key: &str) -> String {
        self.view
            .columns()
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Demo;
    use multiview::DataViewOptions;

    fn state(page_size: usize) -> AppState {
        let (data, columns) = Demo::Users.dataset();
        let view = DataView::new(DataViewOptions::new(data, columns).page_size(page_size)).unwrap();
        let mut s = AppState::new(view, AppConfig::default(), "users".into());
        s.persist_config = false;
        s
    }

    #[test]
    fn selection_starts_on_first_row_and_clamps() {
        let mut s = state(4);
        assert_eq!(s.selected, Some(0));
        s.selected = Some(99);
        s.clamp_selection();
        assert_eq!(s.selected, Some(3));
    }

    #[test]
    fn sortable_columns_skip_hidden_table_columns() {
        let s = state(10);
        let cols = s.sortable_columns();
        assert_eq!(cols.first().map(String::as_str), Some("id"));
        assert!(!cols.iter().any(|c| c == "avatar"));
        assert_eq!(s.column_label("joinedAt"), "Joined");
    }
}
