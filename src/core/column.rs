//! Column definitions and the per-view role schema.
//!
//! Every column carries an independent, optional role block for each view.
//! Roles are closed enums so role resolution stays exhaustive; an absent
//! role means "let the view decide" (see [`super::roles`]).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::value::CellValue;

// ───────────────────────────────────────── view mode ─────────

/// The closed set of layouts a dataset can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Card,
    List,
    Kanban,
    Gallery,
}

impl ViewMode {
    pub const ALL: &[ViewMode] = &[
        ViewMode::Table,
        ViewMode::Card,
        ViewMode::List,
        ViewMode::Kanban,
        ViewMode::Gallery,
    ];

    /// Views offered when the caller does not restrict them.
    pub const DEFAULT_VIEWS: &[ViewMode] = &[ViewMode::Table, ViewMode::Card, ViewMode::List];

    /// Default switcher label.
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Card => "Cards",
            ViewMode::List => "List",
            ViewMode::Kanban => "Kanban",
            ViewMode::Gallery => "Gallery",
        }
    }

    /// Key used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Table => "table",
            ViewMode::Card => "card",
            ViewMode::List => "list",
            ViewMode::Kanban => "kanban",
            ViewMode::Gallery => "gallery",
        }
    }

    /// Parse a mode name, falling back to [`ViewMode::Table`] for anything
    /// unrecognised.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!("unknown view mode {s:?}, falling back to table");
            ViewMode::Table
        })
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view mode `{0}`")]
pub struct UnknownViewMode(pub String);

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(ViewMode::Table),
            "card" | "cards" => Ok(ViewMode::Card),
            "list" => Ok(ViewMode::List),
            "kanban" => Ok(ViewMode::Kanban),
            "gallery" => Ok(ViewMode::Gallery),
            _ => Err(UnknownViewMode(s.to_string())),
        }
    }
}

// ───────────────────────────────────────── roles ─────────────

/// Table view options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Hide this column in table view.
    pub hidden: bool,
    /// Override width (in terminal cells) for table view.
    pub width: Option<u16>,
}

/// How a field is rendered on each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardRole {
    /// Headline text.
    Primary,
    /// Subtitle under the headline.
    Secondary,
    /// Pill / tag chip.
    Badge,
    /// Cover image URL.
    Image,
    /// Label/value pair in the card footer.
    Meta,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListRole {
    Primary,
    Secondary,
    /// Right-aligned metadata.
    Meta,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KanbanRole {
    /// The field's value decides which board column a card falls into.
    GroupBy,
    Title,
    Meta,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GalleryRole {
    Image,
    Title,
    Meta,
    Hidden,
}

/// `{ "role": ... }` wrapper used by the JSON column schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBlock<R> {
    pub role: Option<R>,
}

// ───────────────────────────────────────── column def ────────

/// Custom cell renderer: raw value + whole record → display text.
/// Only the table view uses it; the other views show the raw value.
pub type CellFn<T> = Arc<dyn Fn(&CellValue, &T) -> String + Send + Sync>;

/// Describes one field and how it appears in every view.
pub struct ColumnDef<T> {
    /// Unique key addressing a field on each record.
    pub key: String,
    /// Header / field label.
    pub label: String,
    pub sortable: bool,
    pub filterable: bool,
    /// Preferred width in terminal cells.
    pub width: Option<u16>,
    pub cell: Option<CellFn<T>>,
    pub table: TableOptions,
    pub card: Option<CardRole>,
    pub list: Option<ListRole>,
    pub kanban: Option<KanbanRole>,
    pub gallery: Option<GalleryRole>,
}

impl<T> ColumnDef<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            filterable: false,
            width: None,
            cell: None,
            table: TableOptions::default(),
            card: None,
            list: None,
            kanban: None,
            gallery: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn cell(mut self, f: impl Fn(&CellValue, &T) -> String + Send + Sync + 'static) -> Self {
        self.cell = Some(Arc::new(f));
        self
    }

    pub fn table(mut self, options: TableOptions) -> Self {
        self.table = options;
        self
    }

    pub fn card(mut self, role: CardRole) -> Self {
        self.card = Some(role);
        self
    }

    pub fn list(mut self, role: ListRole) -> Self {
        self.list = Some(role);
        self
    }

    pub fn kanban(mut self, role: KanbanRole) -> Self {
        self.kanban = Some(role);
        self
    }

    pub fn gallery(mut self, role: GalleryRole) -> Self {
        self.gallery = Some(role);
        self
    }

    /// Width used by the table view: `table.width`, then `width`.
    pub fn table_width(&self) -> Option<u16> {
        self.table.width.or(self.width)
    }
}

// Manual impls: `T` itself need not be Clone/Debug.
impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            width: self.width,
            cell: self.cell.clone(),
            table: self.table,
            card: self.card,
            list: self.list,
            kanban: self.kanban,
            gallery: self.gallery,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("width", &self.width)
            .field("cell", &self.cell.as_ref().map(|_| "<fn>"))
            .field("table", &self.table)
            .field("card", &self.card)
            .field("list", &self.list)
            .field("kanban", &self.kanban)
            .field("gallery", &self.gallery)
            .finish()
    }
}

// ───────────────────────────────────────── json schema ───────

fn default_true() -> bool {
    true
}

/// Serialisable column schema, as read from a `--columns` JSON file.
///
/// ```json
/// { "key": "status", "label": "Status",
///   "card": { "role": "badge" }, "kanban": { "role": "groupBy" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub width: Option<u16>,
    #[serde(default)]
    pub table: TableOptions,
    #[serde(default)]
    pub card: Option<RoleBlock<CardRole>>,
    #[serde(default)]
    pub list: Option<RoleBlock<ListRole>>,
    #[serde(default)]
    pub kanban: Option<RoleBlock<KanbanRole>>,
    #[serde(default)]
    pub gallery: Option<RoleBlock<GalleryRole>>,
}

impl ColumnSpec {
    /// Convert into a column definition.  A missing label falls back to the key.
    pub fn into_column<T>(self) -> ColumnDef<T> {
        let label = self.label.unwrap_or_else(|| self.key.clone());
        ColumnDef {
            key: self.key,
            label,
            sortable: self.sortable,
            filterable: self.filterable,
            width: self.width,
            cell: None,
            table: self.table,
            card: self.card.and_then(|b| b.role),
            list: self.list.and_then(|b| b.role),
            kanban: self.kanban.and_then(|b| b.role),
            gallery: self.gallery.and_then(|b| b.role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_parsing_is_lenient() {
        assert_eq!("Kanban".parse::<ViewMode>(), Ok(ViewMode::Kanban));
        assert_eq!("cards".parse::<ViewMode>(), Ok(ViewMode::Card));
        assert!("grid".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::parse_lossy("grid"), ViewMode::Table);
    }

    #[test]
    fn column_spec_reads_role_blocks() {
        let spec: ColumnSpec = serde_json::from_str(
            r#"{ "key": "status", "label": "Status", "width": 12,
                 "table": { "hidden": true },
                 "card": { "role": "badge" },
                 "kanban": { "role": "groupBy" } }"#,
        )
        .unwrap();
        let col: ColumnDef<()> = spec.into_column();
        assert_eq!(col.key, "status");
        assert!(col.sortable);
        assert!(col.table.hidden);
        assert_eq!(col.table_width(), Some(12));
        assert_eq!(col.card, Some(CardRole::Badge));
        assert_eq!(col.kanban, Some(KanbanRole::GroupBy));
        assert_eq!(col.list, None);
    }

    #[test]
    fn missing_label_falls_back_to_key() {
        let spec: ColumnSpec = serde_json::from_str(r#"{ "key": "email" }"#).unwrap();
        let col: ColumnDef<()> = spec.into_column();
        assert_eq!(col.label, "email");
    }
}
