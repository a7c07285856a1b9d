//! Role resolution — map column role tags onto each view's layout slots.
//!
//! Every view follows the same rule: a slot takes the first column whose
//! role block for *that* view names the slot; if none does, it takes a
//! positional default from the columns not hidden in that view.  Resolution
//! never fails; a slot with no candidate is simply `None`.

use super::column::{CardRole, ColumnDef, GalleryRole, KanbanRole, ListRole};

/// Most footer entries a card shows.
pub const MAX_CARD_META: usize = 5;

fn find_tagged<'a, T, R: PartialEq + Copy>(
    columns: &'a [ColumnDef<T>],
    role_of: impl Fn(&ColumnDef<T>) -> Option<R>,
    wanted: R,
) -> Option<&'a ColumnDef<T>> {
    columns.iter().find(|c| role_of(c) == Some(wanted))
}

fn all_tagged<'a, T, R: PartialEq + Copy>(
    columns: &'a [ColumnDef<T>],
    role_of: impl Fn(&ColumnDef<T>) -> Option<R>,
    wanted: R,
) -> Vec<&'a ColumnDef<T>> {
    columns.iter().filter(|c| role_of(c) == Some(wanted)).collect()
}

/// The `n`th column not hidden in the current view.
fn positional<'a, T>(
    columns: &'a [ColumnDef<T>],
    is_hidden: impl Fn(&ColumnDef<T>) -> bool,
    n: usize,
) -> Option<&'a ColumnDef<T>> {
    columns.iter().filter(|c| !is_hidden(c)).nth(n)
}

fn same<T>(a: Option<&ColumnDef<T>>, b: Option<&ColumnDef<T>>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a.key == b.key)
}

// ───────────────────────────────────────── table ─────────────

/// Columns shown as table columns, in definition order.
pub fn table_columns<T>(columns: &[ColumnDef<T>]) -> Vec<&ColumnDef<T>> {
    columns.iter().filter(|c| !c.table.hidden).collect()
}

// ───────────────────────────────────────── card ──────────────

#[derive(Debug)]
pub struct CardLayout<'a, T> {
    pub image: Option<&'a ColumnDef<T>>,
    pub primary: Option<&'a ColumnDef<T>>,
    pub secondary: Option<&'a ColumnDef<T>>,
    pub badges: Vec<&'a ColumnDef<T>>,
    /// Footer label/value rows (at most [`MAX_CARD_META`]).
    pub meta: Vec<&'a ColumnDef<T>>,
}

impl<'a, T> CardLayout<'a, T> {
    pub fn resolve(columns: &'a [ColumnDef<T>]) -> Self {
        let role = |c: &ColumnDef<T>| c.card;
        let hidden = |c: &ColumnDef<T>| c.card == Some(CardRole::Hidden);

        let image = find_tagged(columns, role, CardRole::Image);
        let primary =
            find_tagged(columns, role, CardRole::Primary).or_else(|| positional(columns, hidden, 0));
        let mut secondary = find_tagged(columns, role, CardRole::Secondary)
            .or_else(|| positional(columns, hidden, 1));
        if same(primary, secondary) {
            secondary = None;
        }
        let badges = all_tagged(columns, role, CardRole::Badge);

        // Everything not already placed ends up in the footer.
        let meta = columns
            .iter()
            .filter(|c| {
                !matches!(
                    c.card,
                    Some(CardRole::Hidden | CardRole::Image | CardRole::Badge)
                ) && !same(Some(*c), primary)
                    && !same(Some(*c), secondary)
            })
            .take(MAX_CARD_META)
            .collect();

        Self {
            image,
            primary,
            secondary,
            badges,
            meta,
        }
    }
}

// ───────────────────────────────────────── list ──────────────

#[derive(Debug)]
pub struct ListLayout<'a, T> {
    pub primary: Option<&'a ColumnDef<T>>,
    pub secondary: Option<&'a ColumnDef<T>>,
    pub meta: Vec<&'a ColumnDef<T>>,
}

impl<'a, T> ListLayout<'a, T> {
    pub fn resolve(columns: &'a [ColumnDef<T>]) -> Self {
        let role = |c: &ColumnDef<T>| c.list;
        let hidden = |c: &ColumnDef<T>| c.list == Some(ListRole::Hidden);

        let primary =
            find_tagged(columns, role, ListRole::Primary).or_else(|| positional(columns, hidden, 0));
        let mut secondary = find_tagged(columns, role, ListRole::Secondary)
            .or_else(|| positional(columns, hidden, 1));
        if same(primary, secondary) {
            secondary = None;
        }

        Self {
            primary,
            secondary,
            meta: all_tagged(columns, role, ListRole::Meta),
        }
    }
}

// ───────────────────────────────────────── kanban ────────────

#[derive(Debug)]
pub struct KanbanLayout<'a, T> {
    pub group_by: Option<&'a ColumnDef<T>>,
    pub title: Option<&'a ColumnDef<T>>,
    pub meta: Vec<&'a ColumnDef<T>>,
}

impl<'a, T> KanbanLayout<'a, T> {
    pub fn resolve(columns: &'a [ColumnDef<T>]) -> Self {
        let role = |c: &ColumnDef<T>| c.kanban;
        let hidden = |c: &ColumnDef<T>| c.kanban == Some(KanbanRole::Hidden);

        Self {
            group_by: find_tagged(columns, role, KanbanRole::GroupBy)
                .or_else(|| positional(columns, hidden, 0)),
            title: find_tagged(columns, role, KanbanRole::Title)
                .or_else(|| positional(columns, hidden, 0)),
            meta: all_tagged(columns, role, KanbanRole::Meta),
        }
    }
}

// ───────────────────────────────────────── gallery ───────────

#[derive(Debug)]
pub struct GalleryLayout<'a, T> {
    pub image: Option<&'a ColumnDef<T>>,
    pub title: Option<&'a ColumnDef<T>>,
    pub meta: Vec<&'a ColumnDef<T>>,
}

impl<'a, T> GalleryLayout<'a, T> {
    pub fn resolve(columns: &'a [ColumnDef<T>]) -> Self {
        let role = |c: &ColumnDef<T>| c.gallery;
        let hidden = |c: &ColumnDef<T>| c.gallery == Some(GalleryRole::Hidden);

        Self {
            image: find_tagged(columns, role, GalleryRole::Image),
            title: find_tagged(columns, role, GalleryRole::Title)
                .or_else(|| positional(columns, hidden, 0)),
            meta: all_tagged(columns, role, GalleryRole::Meta),
        }
    }
}
