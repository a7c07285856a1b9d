//! Cell values — the dynamically-typed contents of one field of one record.
//!
//! Views only ever need three things from a value: a display string, a
//! "is this empty?" check, and an ordering for sorting.

use std::cmp::Ordering;
use std::fmt;

/// A single field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// `true` for values that display as an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Kind order for mixed columns: numbers, text, booleans, then nulls.
    fn rank(&self) -> u8 {
        match self {
            CellValue::Int(_) | CellValue::Float(_) => 0,
            CellValue::Text(_) => 1,
            CellValue::Bool(_) => 2,
            CellValue::Null => 3,
        }
    }

    /// Ascending comparison used by the row engine.
    ///
    /// Values of different kinds order by kind first, so the result is a
    /// total order even for mixed columns.  Numbers compare numerically and
    /// text case-insensitively.  The engine keeps nulls last regardless of
    /// direction.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            },
        })
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            // Nested structures are shown as compact JSON.
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<u32> for CellValue {
    fn from(i: u32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_matches_plain_stringification() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Float(2.0).to_string(), "2");
        assert_eq!(CellValue::Float(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Bool(false).to_string(), "false");
        assert_eq!(CellValue::from(&json!([1, 2])).to_string(), "[1,2]");
    }

    #[test]
    fn only_null_and_empty_text_are_empty() {
        assert!(CellValue::Null.is_empty());
        assert!(CellValue::from("").is_empty());
        assert!(!CellValue::Int(0).is_empty());
        assert!(!CellValue::Bool(false).is_empty());
    }

    #[test]
    fn mixed_kinds_order_by_kind_first() {
        let ten = CellValue::Int(10);
        let nine_text = CellValue::from("9");
        assert_eq!(ten.compare(&nine_text), Ordering::Less);
        assert_eq!(nine_text.compare(&CellValue::Int(9)), Ordering::Greater);
        assert_eq!(nine_text.compare(&CellValue::Bool(true)), Ordering::Less);

        let mut values = vec![
            CellValue::from("9"),
            CellValue::Bool(false),
            CellValue::Int(10),
            CellValue::from("10"),
            CellValue::Float(9.5),
            CellValue::Int(9),
        ];
        values.sort_by(CellValue::compare);
        assert_eq!(
            values,
            [
                CellValue::Int(9),
                CellValue::Float(9.5),
                CellValue::Int(10),
                CellValue::from("10"),
                CellValue::from("9"),
                CellValue::Bool(false),
            ]
        );
        for a in &values {
            for b in &values {
                assert_eq!(a.compare(b), b.compare(a).reverse());
            }
        }
    }

    #[test]
    fn numbers_compare_numerically_and_text_ignores_case() {
        assert_eq!(CellValue::Int(9).compare(&CellValue::Float(10.5)), Ordering::Less);
        assert_eq!(
            CellValue::from("apple").compare(&CellValue::from("Banana")),
            Ordering::Less
        );
    }
}
