//! Row handles — one source record as seen by the views.

use super::column::ColumnDef;
use super::record::Record;
use super::value::CellValue;

/// A borrowed view over one record.  Rows are rebuilt on every pass and
/// never own or mutate the data they point at.
#[derive(Debug)]
pub struct Row<'a, T> {
    /// Index of the record in the caller's data.
    pub id: usize,
    pub original: &'a T,
}

impl<T> Clone for Row<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Row<'_, T> {}

impl<'a, T: Record> Row<'a, T> {
    pub fn new(id: usize, original: &'a T) -> Self {
        Self { id, original }
    }

    /// Raw value for `key`; unknown keys read as [`CellValue::Null`].
    pub fn value(&self, key: &str) -> CellValue {
        self.original.field(key).unwrap_or_else(|| {
            tracing::trace!(row = self.id, key, "field missing on record");
            CellValue::Null
        })
    }

    /// Plain string form of the raw value (no custom renderer).
    pub fn text(&self, key: &str) -> String {
        self.value(key).to_string()
    }

    /// Display text for `column`, running its custom renderer when present.
    pub fn display(&self, column: &ColumnDef<T>) -> String {
        let value = self.value(&column.key);
        match &column.cell {
            Some(render) => render(&value, self.original),
            None => value.to_string(),
        }
    }
}
