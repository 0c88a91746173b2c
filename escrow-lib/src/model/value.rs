//! Value enum for dynamic field values

use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by one field of a [`Record`](super::Record).
///
/// List endpoints return loosely typed JSON, so rows carry values of any of
/// these shapes and the grid never relies on a field having a particular one.
///
/// # JSON Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integer | `Long` |
/// | other number | `Float` |
/// | string | `String` |
/// | array | `List` |
/// | object | `Record` |
///
/// Strings stay strings: ids, amounts and timestamps arrive pre-formatted
/// and are shown as the server sent them.
///
/// # Example
///
/// ```
/// use escrow_lib::model::Value;
///
/// let name = Value::from("Acme Holdings");
/// let amount = Value::from(125_000i64);
/// let missing = Value::Null;
/// assert_eq!(amount.search_text(), "125000");
/// assert_eq!(missing.search_text(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Array of values (multi-select fields, tags).
    List(Vec<Value>),
    /// Nested object (comments, embedded references).
    Record(Box<super::Record>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a nested object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Coerces the value to the text used for searching, sorting and display.
    ///
    /// `Null` becomes the empty string. Integral floats print without a
    /// fractional part, lists join their items with `,` and nested records
    /// print as compact JSON.
    pub fn search_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::String(s) => Cow::Borrowed(s.as_str()),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Long(n) => Cow::Owned(n.to_string()),
            Value::Float(n) => Cow::Owned(n.to_string()),
            Value::List(items) => Cow::Owned(
                items
                    .iter()
                    .map(|item| item.search_text())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Value::Record(record) => {
                Cow::Owned(serde_json::to_string(record.as_ref()).unwrap_or_default())
            }
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Long(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<super::Record> for Value {
    fn from(v: super::Record) -> Self {
        Value::Record(Box::new(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_float_prints_without_fraction() {
        assert_eq!(Value::Float(5.0).search_text(), "5");
        assert_eq!(Value::Float(2.5).search_text(), "2.5");
    }

    #[test]
    fn test_list_joins_items() {
        let value = Value::from(vec!["gold", "silver"]);
        assert_eq!(value.search_text(), "gold,silver");
    }

    #[test]
    fn test_deserialize_keeps_strings_as_strings() {
        let value: Value =
            serde_json::from_str(r#""12345678-1234-1234-1234-123456789012""#).unwrap();
        assert_eq!(value.type_name(), "string");

        let value: Value = serde_json::from_str("42").unwrap();
        assert_eq!(value, Value::Long(42));

        let value: Value = serde_json::from_str("4.25").unwrap();
        assert_eq!(value, Value::Float(4.25));
    }
}
