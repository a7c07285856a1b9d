//! Keyed field access over caller data.

use super::value::CellValue;

/// Anything that can be displayed by a view: a bag of named fields.
///
/// Returning `None` for an unknown key is expected; the views render an
/// empty cell instead of failing.
pub trait Record {
    fn field(&self, key: &str) -> Option<CellValue>;
}

/// A JSON object loaded from a dataset file.
pub type JsonRecord = serde_json::Map<String, serde_json::Value>;

impl Record for JsonRecord {
    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).map(CellValue::from)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<CellValue> {
        (**self).field(key)
    }
}
