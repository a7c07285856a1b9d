//! Grouping algorithm — partition a page of rows into kanban buckets.
//!
//! The grouping layer reads the value of the resolved `groupBy` column for
//! each row and produces [`KanbanGroup`] values that the board renders as
//! columns.  Groups are rebuilt on every pass and carry no identity.

use super::column::ColumnDef;
use super::record::Record;
use super::row::Row;

/// Bucket used for rows whose group value is empty.
pub const UNCATEGORIZED: &str = "Uncategorized";

// ───────────────────────────────────────── types ─────────────

/// One board column.
#[derive(Debug, Clone)]
pub struct KanbanGroup<'a, T> {
    /// Raw (case-sensitive) group value, or [`UNCATEGORIZED`].
    pub key: String,
    pub rows: Vec<Row<'a, T>>,
}

// ───────────────────────────────────────── algorithm ─────────

/// Split `rows` into groups keyed by `group_by`'s value.
///
/// Strategy:
/// 1. A single pass appends each row to the bucket matching its value.
/// 2. Empty values land in [`UNCATEGORIZED`].
/// 3. Buckets come out in first-seen order.
/// 4. Without a `group_by` column every row lands in [`UNCATEGORIZED`].
pub fn group_rows<'a, T: Record>(
    rows: &[Row<'a, T>],
    group_by: Option<&ColumnDef<T>>,
) -> Vec<KanbanGroup<'a, T>> {
    let mut groups: Vec<KanbanGroup<'a, T>> = Vec::new();

    for row in rows {
        let raw = group_by.map(|c| row.text(&c.key)).unwrap_or_default();
        let key = if raw.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            raw
        };

        // Board columns are few, a linear scan beats hashing here.
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.rows.push(*row),
            None => groups.push(KanbanGroup {
                key,
                rows: vec![*row],
            }),
        }
    }

    groups
}

/// Status colour for well-known group names (case-insensitive), as RGB.
pub fn group_dot_color(key: &str) -> (u8, u8, u8) {
    match key.to_lowercase().as_str() {
        "todo" => (0x93, 0xc5, 0xfd),
        "in progress" => (0xfc, 0xd3, 0x4d),
        "done" => (0x6e, 0xe7, 0xb7),
        "blocked" => (0xfc, 0xa5, 0xa5),
        "review" => (0xc4, 0xb5, 0xfd),
        // backlog, cancelled and everything else share the neutral grey.
        _ => (0x9c, 0xa3, 0xaf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::JsonRecord;
    use serde_json::json;

    fn data(values: serde_json::Value) -> Vec<JsonRecord> {
        serde_json::from_value(values).unwrap()
    }

    fn rows(data: &[JsonRecord]) -> Vec<Row<'_, JsonRecord>> {
        data.iter().enumerate().map(|(i, r)| Row::new(i, r)).collect()
    }

    fn summary(groups: &[KanbanGroup<'_, JsonRecord>]) -> Vec<(String, usize)> {
        groups.iter().map(|g| (g.key.clone(), g.rows.len())).collect()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let data = data(json!([
            { "status": "Todo" },
            { "status": "Done" },
            { "status": "Todo" },
        ]));
        let col = ColumnDef::new("status", "Status");
        let groups = group_rows(&rows(&data), Some(&col));
        assert_eq!(
            summary(&groups),
            [("Todo".to_string(), 2), ("Done".to_string(), 1)]
        );
        assert_eq!(groups[0].rows[1].id, 2);
    }

    #[test]
    fn empty_values_are_uncategorized_and_keys_are_case_sensitive() {
        let data = data(json!([
            { "status": "" },
            { "status": "todo" },
            { "status": null },
            { "other": 1 },
            { "status": "Todo" },
        ]));
        let col = ColumnDef::new("status", "Status");
        let groups = group_rows(&rows(&data), Some(&col));
        assert_eq!(
            summary(&groups),
            [
                (UNCATEGORIZED.to_string(), 3),
                ("todo".to_string(), 1),
                ("Todo".to_string(), 1),
            ]
        );
    }

    #[test]
    fn every_row_lands_in_exactly_one_group() {
        let data = data(json!([{ "s": "a" }, { "s": "b" }, { "s": "a" }, { "s": "" }, { "s": 0 }]));
        let col = ColumnDef::new("s", "S");
        let groups = group_rows(&rows(&data), Some(&col));
        let mut ids: Vec<usize> = groups.iter().flat_map(|g| g.rows.iter().map(|r| r.id)).collect();
        ids.sort_unstable();
        assert_eq!(ids, [0, 1, 2, 3, 4]);
        // Zero is a real value, not an empty one.
        assert!(groups.iter().any(|g| g.key == "0"));
    }

    #[test]
    fn known_statuses_get_colours() {
        assert_eq!(group_dot_color("In Progress"), (0xfc, 0xd3, 0x4d));
        assert_eq!(group_dot_color("whatever"), group_dot_color("backlog"));
    }
}
