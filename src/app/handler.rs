//! Input handling — maps key/mouse events to state mutations.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use multiview::{TableView, ViewMode, ViewProps};
use ratatui::layout::Rect;

use crate::config::Action;

use super::layout::{contains, view_block, AppLayout};
use super::settings::{apply_page_size, step_page_size, SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Browse => handle_browse_key(state, key),
        ActiveView::Filter => handle_filter_key(state, key),
        ActiveView::Settings => handle_settings_key(state, key),
        ActiveView::Detail | ActiveView::Help => handle_overlay_key(state, key),
    }
}

// ── Browse (configurable bindings) ──────────────────────────────

fn handle_browse_key(state: &mut AppState, key: KeyEvent) {
    state.status_message = None;

    match key.code {
        KeyCode::Esc if !state.view.global_filter().is_empty() => {
            set_filter(state, String::new());
            state.status_message = Some("Search cleared".into());
            return;
        }
        KeyCode::Home => {
            state.selected = (state.page_len() > 0).then_some(0);
            return;
        }
        KeyCode::End => {
            state.selected = state.page_len().checked_sub(1);
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::Settings;
            state.settings_selected = 0;
        }
        Action::ShowHelp => state.active_view = ActiveView::Help,
        Action::MoveUp => move_selection(state, false),
        Action::MoveDown => move_selection(state, true),
        Action::NextView | Action::PrevView => {
            state.view.cycle_view_mode(action == Action::NextView);
            on_view_changed(state);
        }
        Action::NextPage => change_page(state, true),
        Action::PrevPage => change_page(state, false),
        Action::GrowPage | Action::ShrinkPage => {
            match step_page_size(state.view.page_size(), action == Action::GrowPage) {
                Some(size) => apply_page_size(state, size),
                None => state.status_message = Some("No other page size".into()),
            }
        }
        Action::StartFilter => {
            if state.view.features().enable_global_filter {
                state.active_view = ActiveView::Filter;
            } else {
                state.status_message = Some("Search is disabled".into());
            }
        }
        Action::ToggleSort => match state.sort_target() {
            Some(key) => toggle_sort(state, &key),
            None => state.status_message = Some("No sortable columns".into()),
        },
        Action::SortColumnLeft | Action::SortColumnRight => {
            let n = state.sortable_columns().len();
            if n == 0 {
                state.status_message = Some("No sortable columns".into());
                return;
            }
            let cur = state.sort_cursor.min(n - 1);
            state.sort_cursor = if action == Action::SortColumnRight {
                (cur + 1) % n
            } else {
                (cur + n - 1) % n
            };
            if let Some(key) = state.sort_target() {
                state.status_message = Some(format!("Sort column: {}", state.column_label(&key)));
            }
        }
        Action::OpenDetail => {
            if state.selected_record().is_some() {
                state.active_view = ActiveView::Detail;
            }
        }
    }
}

// ── Search line (free text) ─────────────────────────────────────

fn handle_filter_key(state: &mut AppState, key: KeyEvent) {
    let mut text = state.view.global_filter().to_string();
    match key.code {
        KeyCode::Enter => {
            state.active_view = ActiveView::Browse;
            return;
        }
        KeyCode::Esc => {
            state.active_view = ActiveView::Browse;
            text.clear();
        }
        KeyCode::Backspace => {
            text.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => text.push(c),
        _ => return,
    }
    set_filter(state, text);
}

fn set_filter(state: &mut AppState, text: String) {
    state.view.set_global_filter(text);
    state.selected = None;
    state.clamp_selection();
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char(',') => {
            state.active_view = ActiveView::Browse;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            match SETTINGS_ITEMS.get(state.settings_selected) {
                Some(SettingsItem::Submenu { view, .. }) => state.active_view = *view,
                Some(SettingsItem::Toggle { get, set, .. }) => {
                    let current = get(state);
                    set(state, !current);
                }
                Some(SettingsItem::Cycle { cycle, .. }) => cycle(state),
                None => {}
            }
        }
        _ => {}
    }
}

// ── Detail / help overlays ──────────────────────────────────────

fn handle_overlay_key(state: &mut AppState, key: KeyEvent) {
    let closes = matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q'))
        || state.config.match_key(key) == Some(Action::ShowHelp);
    if closes {
        state.active_view = ActiveView::Browse;
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match state.active_view {
        ActiveView::Browse => {}
        ActiveView::Detail | ActiveView::Help => {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                state.active_view = ActiveView::Browse;
            }
            return;
        }
        ActiveView::Filter | ActiveView::Settings => return,
    }

    let layout = AppLayout::from_area(state.terminal_area);
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if contains(layout.switcher_area, col, row) {
                let hit = state
                    .view
                    .view_switcher()
                    .show_labels(state.config.show_labels)
                    .hit_test(layout.switcher_area, col, row);
                if let Some(mode) = hit {
                    if state.view.set_view_mode(mode) {
                        on_view_changed(state);
                    }
                }
                return;
            }
            if !contains(layout.view_area, col, row) {
                return;
            }
            if let Some(key) = header_column_at(state, layout.view_area, col, row) {
                toggle_sort(state, &key);
                return;
            }
            click_row(state, layout.view_area, col, row);
        }
        MouseEventKind::ScrollUp if contains(layout.view_area, col, row) => {
            move_selection(state, false);
        }
        MouseEventKind::ScrollDown if contains(layout.view_area, col, row) => {
            move_selection(state, true);
        }
        _ => {}
    }
}

fn click_row(state: &mut AppState, area: Rect, col: u16, row: u16) {
    let hit = {
        let renderer = state
            .view
            .view_renderer()
            .block(view_block(&state.title))
            .selected(state.selected);
        renderer
            .row_at(area, col, row)
            .and_then(|i| renderer.rows().get(i).map(|r| (i, r.id)))
    };
    let Some((index, id)) = hit else {
        state.last_left_click = None;
        return;
    };

    state.selected = Some(index);
    let now = Instant::now();
    let window = Duration::from_millis(state.config.double_click_ms);
    let repeat = matches!(
        state.last_left_click,
        Some((last, at)) if last == id && now.duration_since(at) <= window
    );
    if repeat {
        state.active_view = ActiveView::Detail;
        state.last_left_click = None;
    } else {
        state.last_left_click = Some((id, now));
    }
}

/// Key of the table header under the pointer, when the built-in table is
/// showing.
fn header_column_at(state: &AppState, area: Rect, col: u16, row: u16) -> Option<String> {
    if state.view.view_mode() != ViewMode::Table || state.view.components().table.is_some() {
        return None;
    }
    let rows = state.view.rows();
    let props = ViewProps {
        table: state.view.table(),
        rows: &rows,
        columns: state.view.columns(),
        selected: state.selected,
    };
    let inner = view_block(&state.title).inner(area);
    TableView::column_at(&props, inner, col, row).map(str::to_string)
}

// ── helpers ─────────────────────────────────────────────────────

/// Move the highlight one row, crossing into the neighbouring page at
/// either end of the current one.
fn move_selection(state: &mut AppState, forward: bool) {
    let len = state.page_len();
    if len == 0 {
        return;
    }
    let sel = state.selected.unwrap_or(0).min(len - 1);
    if forward {
        if sel + 1 < len {
            state.selected = Some(sel + 1);
        } else if state.view.can_next_page() {
            state.view.next_page();
            state.selected = Some(0);
        }
    } else if sel > 0 {
        state.selected = Some(sel - 1);
    } else if state.view.can_previous_page() {
        state.view.previous_page();
        state.selected = state.page_len().checked_sub(1);
    }
}

fn change_page(state: &mut AppState, forward: bool) {
    let before = state.view.page_index();
    if forward {
        state.view.next_page();
    } else {
        state.view.previous_page();
    }
    if state.view.page_index() == before {
        return;
    }
    state.selected = Some(0);
    state.clamp_selection();
}

fn toggle_sort(state: &mut AppState, key: &str) {
    if !state.view.toggle_sorting(key) {
        return;
    }
    let label = state.column_label(key);
    let direction = state
        .view
        .table()
        .sort_direction(key)
        .map(|d| d.arrow())
        .unwrap_or("off");
    state.status_message = Some(format!("Sort {label}: {direction}"));
    state.clamp_selection();
}

fn on_view_changed(state: &mut AppState) {
    state.last_left_click = None;
    state.clamp_selection();
    tracing::debug!(mode = %state.view.view_mode(), "view changed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::dataset::Demo;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use multiview::{DataView, DataViewOptions, JsonRecord};

    type Options = DataViewOptions<JsonRecord>;

    fn state(options: impl FnOnce(Options) -> Options) -> AppState {
        let (data, columns) = Demo::Users.dataset();
        let view = DataView::new(options(DataViewOptions::new(data, columns))).unwrap();
        let mut s = AppState::new(view, AppConfig::default(), "users".into());
        s.persist_config = false;
        s.terminal_area = Rect::new(0, 0, 100, 30);
        s
    }

    fn press(s: &mut AppState, code: KeyCode) {
        handle_key(
            s,
            KeyEvent {
                code,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            },
        );
    }

    fn click(s: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            s,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    #[test]
    fn moving_past_the_page_end_turns_the_page() {
        let mut s = state(|o| o.page_size(3));
        for _ in 0..3 {
            press(&mut s, KeyCode::Down);
        }
        assert_eq!(s.view.page_index(), 1);
        assert_eq!(s.selected, Some(0));
        press(&mut s, KeyCode::Up);
        assert_eq!(s.view.page_index(), 0);
        assert_eq!(s.selected, Some(2));
    }

    #[test]
    fn typing_in_the_search_line_filters_live() {
        let mut s = state(|o| o.enable_global_filter(true));
        press(&mut s, KeyCode::Char('/'));
        assert_eq!(s.active_view, ActiveView::Filter);
        for c in "grace".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        assert_eq!(s.view.total_rows(), 1);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.active_view, ActiveView::Browse);
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.view.global_filter(), "");
        assert_eq!(s.view.total_rows(), 10);
    }

    #[test]
    fn search_key_reports_when_disabled() {
        let mut s = state(|o| o);
        press(&mut s, KeyCode::Char('/'));
        assert_eq!(s.active_view, ActiveView::Browse);
        assert!(s.status_message.is_some());
    }

    #[test]
    fn sort_key_cycles_the_cursor_column() {
        let mut s = state(|o| o);
        press(&mut s, KeyCode::Char('>'));
        assert_eq!(s.sort_target().as_deref(), Some("name"));
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::Char('s'));
        let first = s.view.rows()[0].text("name");
        assert_eq!(first, "James Wilson");
    }

    #[test]
    fn clicking_a_switcher_tab_changes_view() {
        let mut s = state(|o| o);
        // " ▦ Table " spans 0..9, then " ▣ Cards ".
        click(&mut s, 12, 0);
        assert_eq!(s.view.view_mode(), ViewMode::Card);
    }

    #[test]
    fn clicking_a_table_header_sorts() {
        let mut s = state(|o| o);
        // View frame starts at row 2; the header is the first inner row.
        click(&mut s, 1, 3);
        assert_eq!(s.view.sorting().len(), 1);
        assert_eq!(s.view.sorting()[0].id, "id");
    }

    #[test]
    fn double_click_opens_detail() {
        let mut s = state(|o| o);
        // Header, rule, then the second record.
        click(&mut s, 10, 6);
        assert_eq!(s.selected, Some(1));
        assert_eq!(s.active_view, ActiveView::Browse);
        click(&mut s, 10, 6);
        assert_eq!(s.active_view, ActiveView::Detail);
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.active_view, ActiveView::Browse);
    }

    /// Table replacement whose hit-test points past the page.
    struct StrayHits;

    impl multiview::ViewComponent<JsonRecord> for StrayHits {
        fn render(&self, _: &ViewProps<'_, JsonRecord>, _: Rect, _: &mut ratatui::buffer::Buffer) {}

        fn row_at(&self, _: &ViewProps<'_, JsonRecord>, _: Rect, _: u16, _: u16) -> Option<usize> {
            Some(99)
        }
    }

    #[test]
    fn clicks_ignore_rows_outside_the_page() {
        let mut s = state(|o| {
            o.components(multiview::ViewComponents::default().with_view(ViewMode::Table, StrayHits))
        });
        click(&mut s, 10, 6);
        assert_eq!(s.selected, Some(0));
        assert!(s.last_left_click.is_none());
        assert_eq!(s.active_view, ActiveView::Browse);
    }

    #[test]
    fn view_keys_cycle_through_available_views() {
        let mut s = state(|o| o.views([ViewMode::Table, ViewMode::Kanban]));
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.view.view_mode(), ViewMode::Kanban);
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.view.view_mode(), ViewMode::Table);
    }

    #[test]
    fn settings_cycle_page_size() {
        let mut s = state(|o| o);
        press(&mut s, KeyCode::Char(','));
        assert_eq!(s.active_view, ActiveView::Settings);
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.view.page_size(), 20);
        assert_eq!(s.config.page_size, 20);
    }
}
