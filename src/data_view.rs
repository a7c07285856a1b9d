//! [`DataView`] — the orchestration object that ties data, columns, the
//! row engine and the current view mode together.
//!
//! ```no_run
//! use multiview::{ColumnDef, DataView, DataViewOptions, JsonRecord, ViewMode};
//!
//! let data: Vec<JsonRecord> = serde_json::from_str(r#"[{"name":"Ada"}]"#).unwrap();
//! let mut view = DataView::new(
//!     DataViewOptions::new(data, vec![ColumnDef::new("name", "Name")])
//!         .views([ViewMode::Table, ViewMode::List])
//!         .page_size(25),
//! )
//! .unwrap();
//! view.set_view_mode(ViewMode::List);
//! ```

use std::collections::{HashMap, HashSet};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use crate::core::{
    column::{ColumnDef, ViewMode},
    engine::{
        self, ColumnFilter, ColumnSort, EngineFeatures, PaginationState, TableHandle, TableState,
    },
    record::Record,
    row::Row,
};
use crate::error::DataViewError;
use crate::ui::{
    renderer::{ViewComponents, ViewRenderer},
    switcher::{SwitcherComponent, SwitcherProps},
    views::ViewProps,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

// ───────────────────────────────────────── options ───────────

/// Everything needed to build a [`DataView`].
pub struct DataViewOptions<T> {
    pub data: Vec<T>,
    pub columns: Vec<ColumnDef<T>>,
    pub default_view: ViewMode,
    pub views: Vec<ViewMode>,
    pub enable_sorting: bool,
    pub enable_filtering: bool,
    pub enable_global_filter: bool,
    pub page_size: usize,
    pub components: ViewComponents<T>,
}

impl<T> DataViewOptions<T> {
    pub fn new(data: Vec<T>, columns: Vec<ColumnDef<T>>) -> Self {
        Self {
            data,
            columns,
            default_view: ViewMode::Table,
            views: ViewMode::DEFAULT_VIEWS.to_vec(),
            enable_sorting: true,
            enable_filtering: false,
            enable_global_filter: false,
            page_size: DEFAULT_PAGE_SIZE,
            components: ViewComponents::default(),
        }
    }

    pub fn default_view(mut self, mode: ViewMode) -> Self {
        self.default_view = mode;
        self
    }

    pub fn views(mut self, views: impl IntoIterator<Item = ViewMode>) -> Self {
        self.views = views.into_iter().collect();
        self
    }

    pub fn enable_sorting(mut self, on: bool) -> Self {
        self.enable_sorting = on;
        self
    }

    pub fn enable_filtering(mut self, on: bool) -> Self {
        self.enable_filtering = on;
        self
    }

    pub fn enable_global_filter(mut self, on: bool) -> Self {
        self.enable_global_filter = on;
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    pub fn components(mut self, components: ViewComponents<T>) -> Self {
        self.components = components;
        self
    }
}

/// Snapshot of everything a [`DataView`] tracks, for persistence or
/// debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataViewState {
    pub view_mode: ViewMode,
    pub sorting: Vec<ColumnSort>,
    pub column_filters: Vec<ColumnFilter>,
    pub global_filter: String,
    pub pagination: PaginationState,
    /// Rows left after filtering.
    pub total_rows: usize,
    pub page_count: usize,
}

// ───────────────────────────────────────── data view ─────────

pub struct DataView<T> {
    data: Vec<T>,
    columns: Vec<ColumnDef<T>>,
    view_mode: ViewMode,
    views: Vec<ViewMode>,
    features: EngineFeatures,
    state: TableState,
    components: ViewComponents<T>,
}

impl<T: Record> DataView<T> {
    pub fn new(options: DataViewOptions<T>) -> Result<Self, DataViewError> {
        let DataViewOptions {
            data,
            columns,
            default_view,
            views,
            enable_sorting,
            enable_filtering,
            enable_global_filter,
            page_size,
            components,
        } = options;

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(DataViewError::DuplicateColumn(column.key.clone()));
            }
        }
        if page_size == 0 {
            return Err(DataViewError::ZeroPageSize);
        }

        let mut unique = HashSet::new();
        let views: Vec<ViewMode> = views.into_iter().filter(|v| unique.insert(*v)).collect();
        let Some(&first) = views.first() else {
            return Err(DataViewError::NoViews);
        };
        let view_mode = if views.contains(&default_view) {
            default_view
        } else {
            tracing::warn!(%default_view, fallback = %first, "default view is not available");
            first
        };

        tracing::debug!(
            rows = data.len(),
            columns = columns.len(),
            %view_mode,
            page_size,
            "data view created"
        );

        Ok(Self {
            data,
            columns,
            view_mode,
            views,
            features: EngineFeatures {
                enable_sorting,
                enable_filtering,
                enable_global_filter,
            },
            state: TableState::new(page_size),
            components,
        })
    }

    // ── view mode ──────────────────────────────────────────────

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn available_views(&self) -> &[ViewMode] {
        &self.views
    }

    /// Switch to `mode`.  Modes outside [`available_views`](Self::available_views)
    /// are refused; returns whether the mode changed.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if !self.views.contains(&mode) {
            tracing::warn!(%mode, "view mode is not available, ignoring");
            return false;
        }
        let changed = self.view_mode != mode;
        self.view_mode = mode;
        changed
    }

    /// Step through the available views, wrapping at either end.
    pub fn cycle_view_mode(&mut self, forward: bool) {
        let n = self.views.len();
        let pos = self.views.iter().position(|&v| v == self.view_mode).unwrap_or(0);
        let next = if forward { (pos + 1) % n } else { (pos + n - 1) % n };
        self.view_mode = self.views[next];
    }

    // ── data ───────────────────────────────────────────────────

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    pub fn features(&self) -> EngineFeatures {
        self.features
    }

    pub fn components(&self) -> &ViewComponents<T> {
        &self.components
    }

    /// Rows of the current page, sorted and filtered.
    pub fn rows(&self) -> Vec<Row<'_, T>> {
        self.row_model().page
    }

    /// Rows left after filtering, across all pages.
    pub fn total_rows(&self) -> usize {
        self.row_model().filtered.len()
    }

    pub fn table(&self) -> TableHandle<'_> {
        self.handle(self.total_rows())
    }

    pub fn state(&self) -> DataViewState {
        let total_rows = self.total_rows();
        DataViewState {
            view_mode: self.view_mode,
            sorting: self.state.sorting.clone(),
            column_filters: self.state.column_filters.clone(),
            global_filter: self.state.global_filter.clone(),
            pagination: self.state.pagination,
            total_rows,
            page_count: engine::page_count(total_rows, self.state.pagination.page_size),
        }
    }

    fn row_model(&self) -> engine::RowModel<'_, T> {
        engine::compute_row_model(&self.data, &self.columns, &self.state, self.features)
    }

    fn handle(&self, total_rows: usize) -> TableHandle<'_> {
        TableHandle {
            state: &self.state,
            features: self.features,
            total_rows,
        }
    }

    // ── filtering ──────────────────────────────────────────────

    pub fn global_filter(&self) -> &str {
        &self.state.global_filter
    }

    pub fn set_global_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !self.features.enable_global_filter {
            tracing::debug!("global filter is disabled, ignoring");
            return;
        }
        if self.state.global_filter != value {
            self.state.global_filter = value;
            self.state.pagination.page_index = 0;
        }
    }

    pub fn column_filters(&self) -> &[ColumnFilter] {
        &self.state.column_filters
    }

    /// Filter one column by substring; an empty `value` clears it.
    pub fn set_column_filter(&mut self, id: &str, value: &str) {
        if !self.features.enable_filtering {
            tracing::debug!(column = id, "column filtering is disabled, ignoring");
            return;
        }
        match self.columns.iter().find(|c| c.key == id) {
            Some(c) if c.filterable => {}
            _ => {
                tracing::warn!(column = id, "column is not filterable, ignoring");
                return;
            }
        }
        self.state.set_column_filter(id, value);
        self.state.pagination.page_index = 0;
    }

    // ── sorting ────────────────────────────────────────────────

    pub fn sorting(&self) -> &[ColumnSort] {
        &self.state.sorting
    }

    /// Advance column `id` through none → ascending → descending → none.
    /// Returns false when the column cannot be sorted.
    pub fn toggle_sorting(&mut self, id: &str) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key == id && self.features.enable_sorting && c.sortable);
        if !sortable {
            tracing::debug!(column = id, "column is not sortable");
            return false;
        }
        self.state.toggle_sorting(id);
        self.state.pagination.page_index = 0;
        true
    }

    // ── pagination ─────────────────────────────────────────────

    pub fn page_index(&self) -> usize {
        self.state.pagination.page_index
    }

    pub fn page_size(&self) -> usize {
        self.state.pagination.page_size
    }

    pub fn page_count(&self) -> usize {
        engine::page_count(self.total_rows(), self.page_size())
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index() > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index() + 1 < self.page_count()
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.state.pagination.page_index -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.state.pagination.page_index += 1;
        }
    }

    /// Change the page size, keeping the first row of the current page
    /// visible.  Zero is treated as one.
    pub fn set_page_size(&mut self, size: usize) {
        let size = size.max(1);
        let first_row = self.page_index() * self.page_size();
        self.state.pagination = PaginationState {
            page_index: first_row / size,
            page_size: size,
        };
    }

    // ── bound widgets ──────────────────────────────────────────

    /// Switcher widget bound to the current mode and available views.
    pub fn view_switcher(&self) -> BoundViewSwitcher<'_> {
        BoundViewSwitcher {
            view_mode: self.view_mode,
            available_views: &self.views,
            labels: None,
            show_labels: true,
            component: self.components.switcher(),
        }
    }

    /// Renderer widget bound to the current mode and page.
    pub fn view_renderer(&self) -> BoundViewRenderer<'_, T> {
        let model = self.row_model();
        BoundViewRenderer {
            view: self,
            total_rows: model.filtered.len(),
            rows: model.page,
            block: None,
            selected: None,
        }
    }
}

// ───────────────────────────────────────── bound widgets ─────

pub struct BoundViewSwitcher<'a> {
    view_mode: ViewMode,
    available_views: &'a [ViewMode],
    labels: Option<&'a HashMap<ViewMode, String>>,
    show_labels: bool,
    component: &'a dyn SwitcherComponent,
}

impl<'a> BoundViewSwitcher<'a> {
    pub fn labels(mut self, labels: &'a HashMap<ViewMode, String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn show_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn props(&self) -> SwitcherProps<'a> {
        SwitcherProps {
            view_mode: self.view_mode,
            available_views: self.available_views,
            labels: self.labels,
            show_labels: self.show_labels,
        }
    }

    /// Mode whose tab sits at `(x, y)`; feed it to [`DataView::set_view_mode`].
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<ViewMode> {
        self.component.hit_test(&self.props(), area, x, y)
    }
}

impl Widget for BoundViewSwitcher<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.component.render(&self.props(), area, buf);
    }
}

pub struct BoundViewRenderer<'a, T> {
    view: &'a DataView<T>,
    rows: Vec<Row<'a, T>>,
    total_rows: usize,
    block: Option<Block<'a>>,
    selected: Option<usize>,
}

impl<'a, T: Record> BoundViewRenderer<'a, T> {
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Highlight the row at this index of the current page.
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn rows(&self) -> &[Row<'a, T>] {
        &self.rows
    }

    fn renderer(&self) -> ViewRenderer<'_, T> {
        let props = ViewProps {
            table: self.view.handle(self.total_rows),
            rows: &self.rows,
            columns: &self.view.columns,
            selected: self.selected,
        };
        let mut renderer =
            ViewRenderer::new(self.view.view_mode, props).components(&self.view.components);
        if let Some(block) = &self.block {
            renderer = renderer.block(block.clone());
        }
        renderer
    }

    /// Index into [`rows`](Self::rows) of the row drawn at `(x, y)`.
    pub fn row_at(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        self.renderer().row_at(area, x, y)
    }
}

impl<T: Record> Widget for BoundViewRenderer<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.renderer().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::JsonRecord;
    use serde_json::json;

    fn users(n: usize) -> Vec<JsonRecord> {
        (1..=n)
            .map(|i| {
                serde_json::from_value(json!({
                    "id": i,
                    "name": format!("User {i}"),
                    "role": if i % 2 == 0 { "admin" } else { "member" },
                }))
                .unwrap()
            })
            .collect()
    }

    fn columns() -> Vec<ColumnDef<JsonRecord>> {
        vec![
            ColumnDef::new("id", "ID"),
            ColumnDef::new("name", "Name"),
            ColumnDef::new("role", "Role").filterable(true),
        ]
    }

    fn ids(view: &DataView<JsonRecord>) -> Vec<String> {
        view.rows().iter().map(|r| r.text("id")).collect()
    }

    #[test]
    fn defaults() {
        let view = DataView::new(DataViewOptions::new(users(3), columns())).unwrap();
        assert_eq!(view.view_mode(), ViewMode::Table);
        assert_eq!(view.available_views(), ViewMode::DEFAULT_VIEWS);
        assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
        assert!(view.features().enable_sorting);
        assert!(!view.features().enable_filtering);
        assert!(!view.features().enable_global_filter);
    }

    #[test]
    fn ten_users_in_pages_of_five() {
        let mut view = DataView::new(DataViewOptions::new(users(10), columns()).page_size(5)).unwrap();
        assert_eq!(ids(&view), ["1", "2", "3", "4", "5"]);
        assert_eq!(view.page_count(), 2);
        assert!(!view.can_previous_page());
        assert!(view.can_next_page());

        view.next_page();
        assert_eq!(ids(&view), ["6", "7", "8", "9", "10"]);
        assert!(view.can_previous_page());
        assert!(!view.can_next_page());

        // Already on the last page.
        view.next_page();
        assert_eq!(view.page_index(), 1);
    }

    #[test]
    fn global_filter_with_no_match_empties_the_page() {
        let mut view = DataView::new(
            DataViewOptions::new(users(10), columns()).enable_global_filter(true),
        )
        .unwrap();
        view.set_global_filter("nobody-matches-this");
        assert!(view.rows().is_empty());
        assert_eq!(view.total_rows(), 0);
        assert_eq!(view.page_count(), 1);
        assert!(!view.can_next_page());
    }

    #[test]
    fn switching_views_keeps_the_rows() {
        let mut view = DataView::new(
            DataViewOptions::new(users(4), columns()).views(ViewMode::ALL.iter().copied()),
        )
        .unwrap();
        let before = ids(&view);
        for &mode in ViewMode::ALL {
            assert!(view.set_view_mode(mode) || mode == ViewMode::Table);
            assert_eq!(ids(&view), before);
        }
    }

    #[test]
    fn unavailable_modes_are_refused() {
        let mut view = DataView::new(DataViewOptions::new(users(2), columns())).unwrap();
        assert!(!view.set_view_mode(ViewMode::Kanban));
        assert_eq!(view.view_mode(), ViewMode::Table);
    }

    #[test]
    fn default_view_outside_views_falls_back_to_first() {
        let view = DataView::new(
            DataViewOptions::new(users(1), columns())
                .views([ViewMode::List, ViewMode::Card])
                .default_view(ViewMode::Gallery),
        )
        .unwrap();
        assert_eq!(view.view_mode(), ViewMode::List);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let err = DataView::new(DataViewOptions::new(users(1), columns()).views(Vec::new())).err();
        assert_eq!(err, Some(DataViewError::NoViews));

        let err = DataView::new(DataViewOptions::new(users(1), columns()).page_size(0)).err();
        assert_eq!(err, Some(DataViewError::ZeroPageSize));

        let mut cols = columns();
        cols.push(ColumnDef::new("name", "Again"));
        let err = DataView::new(DataViewOptions::new(users(1), cols)).err();
        assert_eq!(err, Some(DataViewError::DuplicateColumn("name".into())));
    }

    #[test]
    fn filter_changes_reset_the_page() {
        let mut view = DataView::new(
            DataViewOptions::new(users(10), columns())
                .page_size(3)
                .enable_filtering(true)
                .enable_global_filter(true),
        )
        .unwrap();
        view.next_page();
        view.set_column_filter("role", "admin");
        assert_eq!(view.page_index(), 0);
        assert_eq!(ids(&view), ["2", "4", "6"]);

        // Not filterable.
        view.set_column_filter("name", "User 1");
        assert_eq!(view.column_filters().len(), 1);
    }

    #[test]
    fn page_size_change_keeps_first_row() {
        let mut view = DataView::new(DataViewOptions::new(users(10), columns()).page_size(2)).unwrap();
        view.next_page();
        view.next_page();
        assert_eq!(ids(&view)[0], "5");
        view.set_page_size(3);
        assert_eq!(view.page_index(), 1);
        assert!(ids(&view).contains(&"5".to_string()));
    }

    #[test]
    fn sorting_respects_column_flags() {
        let mut cols = columns();
        cols[1] = ColumnDef::new("name", "Name").sortable(false);
        let mut view = DataView::new(DataViewOptions::new(users(3), cols)).unwrap();
        assert!(!view.toggle_sorting("name"));
        assert!(view.toggle_sorting("id"));
        assert!(view.toggle_sorting("id"));
        assert_eq!(ids(&view), ["3", "2", "1"]);
        assert_eq!(view.state().sorting.len(), 1);
    }

    #[test]
    fn cycling_wraps_both_ways() {
        let mut view = DataView::new(DataViewOptions::new(users(1), columns())).unwrap();
        view.cycle_view_mode(false);
        assert_eq!(view.view_mode(), ViewMode::List);
        view.cycle_view_mode(true);
        assert_eq!(view.view_mode(), ViewMode::Table);
    }
}
