//! Dataset loading — JSON records and column schemas from disk, column
//! inference, and the built-in demo datasets.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use multiview::{
    CardRole, CellValue, ColumnDef, ColumnSpec, GalleryRole, JsonRecord, KanbanRole, ListRole,
    TableOptions,
};
use serde_json::json;

/// Read a JSON array of objects.
pub fn load_records(path: &Path) -> Result<Vec<JsonRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing dataset {}", path.display()))?;
    let serde_json::Value::Array(items) = value else {
        bail!("{}: expected a JSON array of objects", path.display());
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match item {
            serde_json::Value::Object(map) => records.push(map),
            other => bail!("{}: item {i} is not an object ({other})", path.display()),
        }
    }
    tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

/// Read a JSON array of column specs.
pub fn load_columns(path: &Path) -> Result<Vec<ColumnDef<JsonRecord>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading columns {}", path.display()))?;
    let specs: Vec<ColumnSpec> = serde_json::from_str(&text)
        .with_context(|| format!("parsing columns {}", path.display()))?;
    tracing::info!(path = %path.display(), columns = specs.len(), "column schema loaded");
    Ok(specs.into_iter().map(ColumnSpec::into_column).collect())
}

/// One untagged column per key of the first record, in document order.
pub fn infer_columns(records: &[JsonRecord]) -> Vec<ColumnDef<JsonRecord>> {
    let Some(first) = records.first() else {
        return Vec::new();
    };
    first
        .keys()
        .map(|key| ColumnDef::new(key.clone(), title_case(key)))
        .collect()
}

/// `joinedAt` → `Joined At`, `first_name` → `First Name`.
fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    let mut start = true;
    for c in key.chars() {
        if c == '_' || c == '-' {
            out.push(' ');
            start = true;
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            out.push(' ');
            start = true;
        }
        if start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        start = false;
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    out
}

// ───────────────────────────────────────── demos ─────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    Users,
    Tasks,
}

impl Demo {
    pub fn dataset(self) -> (Vec<JsonRecord>, Vec<ColumnDef<JsonRecord>>) {
        match self {
            Demo::Users => (demo_records(users_json()), user_columns()),
            Demo::Tasks => (demo_records(tasks_json()), task_columns()),
        }
    }
}

fn demo_records(value: serde_json::Value) -> Vec<JsonRecord> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn users_json() -> serde_json::Value {
    let people = [
        (1, "Alice Johnson", "Admin", "active", "Engineering", "2022-01-15"),
        (2, "Bob Smith", "Editor", "active", "Design", "2022-03-22"),
        (3, "Carol White", "Viewer", "inactive", "Marketing", "2022-06-01"),
        (4, "David Lee", "Editor", "active", "Engineering", "2022-08-10"),
        (5, "Eva Martinez", "Admin", "active", "Product", "2022-09-05"),
        (6, "Frank Chen", "Viewer", "inactive", "Sales", "2023-01-20"),
        (7, "Grace Kim", "Editor", "active", "Design", "2023-02-14"),
        (8, "Henry Brown", "Viewer", "active", "Marketing", "2023-04-03"),
        (9, "Iris Turner", "Editor", "active", "Engineering", "2023-05-18"),
        (10, "James Wilson", "Viewer", "inactive", "Sales", "2023-07-07"),
    ];
    let users: Vec<serde_json::Value> = people
        .iter()
        .map(|&(id, name, role, status, department, joined)| {
            let first = name.split(' ').next().unwrap_or(name).to_lowercase();
            // Every third user has no avatar, to show the placeholder.
            let avatar = if id % 3 == 0 {
                String::new()
            } else {
                format!("avatars/{first}.png")
            };
            json!({
                "id": id,
                "name": name,
                "email": format!("{first}@example.com"),
                "role": role,
                "status": status,
                "department": department,
                "joinedAt": joined,
                "avatar": avatar,
            })
        })
        .collect();
    serde_json::Value::Array(users)
}

fn user_columns() -> Vec<ColumnDef<JsonRecord>> {
    vec![
        ColumnDef::new("id", "ID")
            .width(4)
            .card(CardRole::Hidden)
            .list(ListRole::Hidden)
            .kanban(KanbanRole::Hidden)
            .gallery(GalleryRole::Hidden),
        ColumnDef::new("name", "Name")
            .card(CardRole::Primary)
            .list(ListRole::Primary)
            .kanban(KanbanRole::Title)
            .gallery(GalleryRole::Title),
        ColumnDef::new("email", "Email")
            .card(CardRole::Secondary)
            .list(ListRole::Secondary),
        ColumnDef::new("role", "Role")
            .filterable(true)
            .card(CardRole::Badge)
            .list(ListRole::Meta)
            .kanban(KanbanRole::Meta),
        ColumnDef::new("status", "Status")
            .filterable(true)
            .cell(|value: &CellValue, _: &JsonRecord| match value.to_string().as_str() {
                "active" => "● active".to_string(),
                "inactive" => "○ inactive".to_string(),
                other => other.to_string(),
            })
            .card(CardRole::Badge)
            .list(ListRole::Meta)
            .kanban(KanbanRole::GroupBy),
        ColumnDef::new("department", "Department")
            .filterable(true)
            .kanban(KanbanRole::Meta)
            .gallery(GalleryRole::Meta),
        ColumnDef::new("joinedAt", "Joined"),
        ColumnDef::new("avatar", "Avatar")
            .table(TableOptions {
                hidden: true,
                width: None,
            })
            .card(CardRole::Image)
            .gallery(GalleryRole::Image),
    ]
}

fn tasks_json() -> serde_json::Value {
    json!([
        { "id": 1, "title": "Design homepage hero", "status": "Done", "assignee": "Alice", "priority": "High" },
        { "id": 2, "title": "Implement auth flow", "status": "In Progress", "assignee": "Bob", "priority": "High" },
        { "id": 3, "title": "Write API documentation", "status": "Todo", "assignee": "Carol", "priority": "Medium" },
        { "id": 4, "title": "Set up CI/CD pipeline", "status": "Done", "assignee": "David", "priority": "High" },
        { "id": 5, "title": "Add dark mode support", "status": "In Progress", "assignee": "Eva", "priority": "Medium" },
        { "id": 6, "title": "Fix mobile nav bug", "status": "Review", "assignee": "Frank", "priority": "Low" },
        { "id": 7, "title": "Performance audit", "status": "Todo", "assignee": "Grace", "priority": "Medium" },
        { "id": 8, "title": "Update dependencies", "status": "Review", "assignee": "Henry", "priority": "Low" },
        { "id": 9, "title": "Triage support inbox", "status": "", "assignee": "Iris", "priority": "Low" },
    ])
}

fn task_columns() -> Vec<ColumnDef<JsonRecord>> {
    vec![
        ColumnDef::new("id", "#")
            .width(3)
            .card(CardRole::Hidden)
            .list(ListRole::Hidden)
            .kanban(KanbanRole::Hidden)
            .gallery(GalleryRole::Hidden),
        ColumnDef::new("title", "Title")
            .card(CardRole::Primary)
            .list(ListRole::Primary)
            .kanban(KanbanRole::Title)
            .gallery(GalleryRole::Title),
        ColumnDef::new("status", "Status")
            .filterable(true)
            .card(CardRole::Badge)
            .list(ListRole::Meta)
            .kanban(KanbanRole::GroupBy)
            .gallery(GalleryRole::Meta),
        ColumnDef::new("assignee", "Assignee")
            .filterable(true)
            .card(CardRole::Secondary)
            .list(ListRole::Secondary)
            .kanban(KanbanRole::Meta),
        ColumnDef::new("priority", "Priority")
            .filterable(true)
            .card(CardRole::Badge)
            .list(ListRole::Meta)
            .kanban(KanbanRole::Meta),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn title_case_splits_words() {
        assert_eq!(title_case("joinedAt"), "Joined At");
        assert_eq!(title_case("first_name"), "First Name");
        assert_eq!(title_case("id"), "Id");
    }

    #[test]
    fn inferred_columns_follow_document_order() {
        let records = demo_records(json!([{ "zeta": 1, "alpha": 2 }]));
        let keys: Vec<String> = infer_columns(&records).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert!(infer_columns(&[]).is_empty());
    }

    #[test]
    fn demos_have_unique_keys_and_rows() {
        for demo in [Demo::Users, Demo::Tasks] {
            let (records, columns) = demo.dataset();
            assert!(!records.is_empty());
            let mut keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), columns.len());
        }
    }

    #[test]
    fn load_records_rejects_non_objects() {
        let dir = std::env::temp_dir().join(format!("multiview-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"[{\"a\": 1}, 2]").unwrap();
        let err = load_records(&path).unwrap_err().to_string();
        assert!(err.contains("item 1"), "{err}");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
