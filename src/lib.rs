//! multiview — show one dataset as a table, cards, a list, a kanban board
//! or a gallery, driven by per-column role tags.
//!
//! * [`core`] — data model, role resolution and the row engine; no UI.
//! * [`ui`] — Ratatui widgets for the five views and the view switcher.
//! * [`DataView`] — owns data + state and hands out bound widgets.

pub mod core;
pub mod data_view;
pub mod error;
pub mod ui;

pub use crate::core::column::{
    CardRole, ColumnDef, ColumnSpec, GalleryRole, KanbanRole, ListRole, TableOptions, ViewMode,
};
pub use crate::core::engine::{ColumnFilter, ColumnSort, SortDirection, TableHandle};
pub use crate::core::record::{JsonRecord, Record};
pub use crate::core::row::Row;
pub use crate::core::value::CellValue;
pub use crate::data_view::{
    BoundViewRenderer, BoundViewSwitcher, DataView, DataViewOptions, DataViewState,
};
pub use crate::error::DataViewError;
pub use crate::ui::renderer::{ViewComponents, ViewRenderer};
pub use crate::ui::switcher::{DefaultViewSwitcher, SwitcherComponent, SwitcherProps};
pub use crate::ui::views::{
    CardView, GalleryView, KanbanView, ListView, TableView, ViewComponent, ViewProps,
};
