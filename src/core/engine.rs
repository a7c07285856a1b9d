//! Row engine — filtering, sorting and pagination over an immutable slice.
//!
//! The engine holds no data of its own.  [`compute_row_model`] is a pure
//! function of `(data, columns, state, features)` and is re-run whenever a
//! view needs rows.

use std::cmp::Ordering;

use super::column::ColumnDef;
use super::record::Record;
use super::row::Row;
use super::value::CellValue;

// ───────────────────────────────────────── state ─────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Header indicator glyph.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// One entry of the sorting state; earlier entries take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub id: String,
    pub desc: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

/// Which row-model stages are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineFeatures {
    pub enable_sorting: bool,
    pub enable_filtering: bool,
    pub enable_global_filter: bool,
}

impl Default for EngineFeatures {
    fn default() -> Self {
        Self {
            enable_sorting: true,
            enable_filtering: false,
            enable_global_filter: false,
        }
    }
}

/// Mutable engine state owned by a `DataView`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub sorting: Vec<ColumnSort>,
    pub column_filters: Vec<ColumnFilter>,
    pub global_filter: String,
    pub pagination: PaginationState,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sorting: Vec::new(),
            column_filters: Vec::new(),
            global_filter: String::new(),
            pagination: PaginationState {
                page_index: 0,
                page_size: page_size.max(1),
            },
        }
    }

    pub fn sort_direction(&self, id: &str) -> Option<SortDirection> {
        self.sorting.iter().find(|s| s.id == id).map(|s| {
            if s.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            }
        })
    }

    /// Cycle a column through none → asc → desc → none.  Sorting by one
    /// column replaces any other sort.
    pub fn toggle_sorting(&mut self, id: &str) {
        let next = match self.sort_direction(id) {
            None => Some(false),
            Some(SortDirection::Asc) => Some(true),
            Some(SortDirection::Desc) => None,
        };
        self.sorting.clear();
        if let Some(desc) = next {
            self.sorting.push(ColumnSort {
                id: id.to_string(),
                desc,
            });
        }
    }

    /// Set (or clear, with an empty value) the filter for one column.
    pub fn set_column_filter(&mut self, id: &str, value: &str) {
        self.column_filters.retain(|f| f.id != id);
        if !value.is_empty() {
            self.column_filters.push(ColumnFilter {
                id: id.to_string(),
                value: value.to_string(),
            });
        }
    }
}

// ───────────────────────────────────────── handle ────────────

/// Read-only engine view handed to view components (sort indicators,
/// page position).
#[derive(Debug, Clone, Copy)]
pub struct TableHandle<'a> {
    pub state: &'a TableState,
    pub features: EngineFeatures,
    /// Rows left after filtering, across all pages.
    pub total_rows: usize,
}

impl TableHandle<'_> {
    pub fn can_sort<T>(&self, column: &ColumnDef<T>) -> bool {
        self.features.enable_sorting && column.sortable
    }

    pub fn sort_direction(&self, id: &str) -> Option<SortDirection> {
        if !self.features.enable_sorting {
            return None;
        }
        self.state.sort_direction(id)
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total_rows, self.state.pagination.page_size)
    }
}

// ───────────────────────────────────────── row model ─────────

/// Output of one engine pass.
#[derive(Debug)]
pub struct RowModel<'a, T> {
    /// Every row that survived filtering, in sorted order.
    pub filtered: Vec<Row<'a, T>>,
    /// Rows on the current page (a window into `filtered`).
    pub page: Vec<Row<'a, T>>,
}

/// Number of pages for `total` rows; never less than one.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Run filter → sort → paginate.
pub fn compute_row_model<'a, T: Record>(
    data: &'a [T],
    columns: &[ColumnDef<T>],
    state: &TableState,
    features: EngineFeatures,
) -> RowModel<'a, T> {
    let mut rows: Vec<Row<'a, T>> = data
        .iter()
        .enumerate()
        .map(|(id, original)| Row::new(id, original))
        .collect();

    if features.enable_filtering {
        for filter in &state.column_filters {
            let Some(column) = columns.iter().find(|c| c.key == filter.id) else {
                continue;
            };
            if !column.filterable {
                continue;
            }
            let needle = filter.value.to_lowercase();
            rows.retain(|row| row.text(&column.key).to_lowercase().contains(&needle));
        }
    }

    if features.enable_global_filter {
        let needle = state.global_filter.trim().to_lowercase();
        if !needle.is_empty() {
            rows.retain(|row| {
                columns
                    .iter()
                    .any(|c| row.text(&c.key).to_lowercase().contains(&needle))
            });
        }
    }

    if features.enable_sorting && !state.sorting.is_empty() {
        let sorts: Vec<&ColumnSort> = state
            .sorting
            .iter()
            .filter(|s| columns.iter().any(|c| c.key == s.id && c.sortable))
            .collect();
        // Stable: ties keep source order.
        rows.sort_by(|a, b| {
            sorts.iter().fold(Ordering::Equal, |acc, sort| {
                acc.then_with(|| compare_for_sort(&a.value(&sort.id), &b.value(&sort.id), sort.desc))
            })
        });
    }

    let PaginationState {
        page_index,
        page_size,
    } = state.pagination;
    let page_size = page_size.max(1);
    let start = page_index.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    let page = rows[start..end].to_vec();

    tracing::trace!(
        total = data.len(),
        filtered = rows.len(),
        page_index,
        page_rows = page.len(),
        "row model computed"
    );

    RowModel {
        filtered: rows,
        page,
    }
}

/// Nulls / empty values always sort last, whatever the direction.
fn compare_for_sort(a: &CellValue, b: &CellValue, desc: bool) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.compare(b);
            if desc {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::JsonRecord;
    use serde_json::json;

    fn records(values: serde_json::Value) -> Vec<JsonRecord> {
        serde_json::from_value(values).unwrap()
    }

    fn columns() -> Vec<ColumnDef<JsonRecord>> {
        vec![
            ColumnDef::new("name", "Name"),
            ColumnDef::new("age", "Age").filterable(true),
            ColumnDef::new("note", "Note").sortable(false),
        ]
    }

    fn names(model: &RowModel<'_, JsonRecord>) -> Vec<String> {
        model.page.iter().map(|r| r.text("name")).collect()
    }

    #[test]
    fn page_count_has_floor_of_one() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 5), 2);
        assert_eq!(page_count(11, 5), 3);
    }

    #[test]
    fn sort_cycles_and_keeps_nulls_last() {
        let data = records(json!([
            { "name": "b", "age": 30 },
            { "name": "a" },
            { "name": "c", "age": 20 },
        ]));
        let cols = columns();
        let mut state = TableState::new(10);
        let features = EngineFeatures::default();

        state.toggle_sorting("age");
        let m = compute_row_model(&data, &cols, &state, features);
        assert_eq!(names(&m), ["c", "b", "a"]);

        state.toggle_sorting("age");
        let m = compute_row_model(&data, &cols, &state, features);
        assert_eq!(names(&m), ["b", "c", "a"]);

        state.toggle_sorting("age");
        assert!(state.sorting.is_empty());
        let m = compute_row_model(&data, &cols, &state, features);
        assert_eq!(names(&m), ["b", "a", "c"]);
    }

    #[test]
    fn unsortable_columns_and_disabled_sorting_are_ignored() {
        let data = records(json!([{ "name": "b", "note": "z" }, { "name": "a", "note": "y" }]));
        let cols = columns();
        let mut state = TableState::new(10);
        state.toggle_sorting("note");
        let m = compute_row_model(&data, &cols, &state, EngineFeatures::default());
        assert_eq!(names(&m), ["b", "a"]);

        state.toggle_sorting("name");
        let off = EngineFeatures {
            enable_sorting: false,
            ..EngineFeatures::default()
        };
        let m = compute_row_model(&data, &cols, &state, off);
        assert_eq!(names(&m), ["b", "a"]);
    }

    #[test]
    fn global_filter_is_case_insensitive_substring() {
        let data = records(json!([{ "name": "Alice" }, { "name": "Bob" }, { "name": "alina" }]));
        let cols = columns();
        let mut state = TableState::new(10);
        state.global_filter = "ALI".into();
        let features = EngineFeatures {
            enable_global_filter: true,
            ..EngineFeatures::default()
        };
        let m = compute_row_model(&data, &cols, &state, features);
        assert_eq!(names(&m), ["Alice", "alina"]);
    }

    #[test]
    fn column_filters_need_the_feature_and_a_filterable_column() {
        let data = records(json!([{ "name": "x", "age": 31 }, { "name": "y", "age": 42 }]));
        let cols = columns();
        let mut state = TableState::new(10);
        state.set_column_filter("age", "4");
        state.set_column_filter("name", "x");

        let m = compute_row_model(&data, &cols, &state, EngineFeatures::default());
        assert_eq!(m.filtered.len(), 2);

        let on = EngineFeatures {
            enable_filtering: true,
            ..EngineFeatures::default()
        };
        let m = compute_row_model(&data, &cols, &state, on);
        assert_eq!(names(&m), ["y"]);

        state.set_column_filter("age", "");
        assert!(state.column_filters.iter().all(|f| f.id != "age"));
    }

    #[test]
    fn pagination_windows_filtered_rows() {
        let data: Vec<JsonRecord> = (1..=7)
            .map(|i| records(json!([{ "name": format!("r{i}") }])).remove(0))
            .collect();
        let cols = columns();
        let mut state = TableState::new(3);
        state.pagination.page_index = 2;
        let m = compute_row_model(&data, &cols, &state, EngineFeatures::default());
        assert_eq!(names(&m), ["r7"]);
        assert_eq!(m.filtered.len(), 7);

        state.pagination.page_index = 9;
        let m = compute_row_model(&data, &cols, &state, EngineFeatures::default());
        assert!(m.page.is_empty());
    }
}
