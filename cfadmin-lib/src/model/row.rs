//! Dynamic table row

use std::collections::HashMap;

use chrono::DateTime;
use chrono::FixedOffset;

use super::Value;
use crate::error::FieldError;

/// One record displayed as a table line.
///
/// Rows hold field values as a `HashMap<String, Value>` with no fixed
/// schema, so stores, OSCs, partnerships and campaigns all flow through the
/// same engine. Typed getter methods provide checked access.
///
/// # Example
///
/// ```
/// use cfadmin_lib::model::Row;
///
/// let row = Row::new()
///     .set("name", "Mercado Central")
///     .set("uf", "SP")
///     .set("active", true);
///
/// assert_eq!(row.get_string("name").unwrap(), Some("Mercado Central"));
/// assert_eq!(row.get_bool("active").unwrap(), Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub(crate) fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Looks up a dotted path such as `store.name`.
    ///
    /// An exact field match wins over path traversal. Otherwise the first
    /// segment must name a `Json` field and the remaining segments walk its
    /// objects (numeric segments index arrays).
    pub fn get_path(&self, path: &str) -> Option<Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value.clone());
        }

        let mut segments = path.split('.');
        let head = segments.next()?;
        let Some(Value::Json(root)) = self.fields.get(head) else {
            return None;
        };

        let mut current = root;
        for segment in segments {
            current = match current {
                serde_json::Value::Object(map) => map.get(segment)?,
                serde_json::Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(Value::from_json(current.clone()))
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a DateTime field value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<FixedOffset>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "datetime",
                other.type_name(),
            )),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let row = Row::new()
            .set("name", "Acme")
            .set("families", 12)
            .set("note", Value::Null);

        assert_eq!(row.get_string("name").unwrap(), Some("Acme"));
        assert_eq!(row.get_int("families").unwrap(), Some(12));
        assert_eq!(row.get_float("families").unwrap(), Some(12.0));
        assert_eq!(row.get_string("note").unwrap(), None);
        assert!(matches!(
            row.get_string("missing"),
            Err(FieldError::Missing { .. })
        ));
        assert!(matches!(
            row.get_bool("name"),
            Err(FieldError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_get_path_walks_nested_json() {
        let row = Row::new().set(
            "store",
            Value::Json(serde_json::json!({"name": "Mercado Central", "tags": ["a", "b"]})),
        );

        assert_eq!(row.get_path("store.name"), Some(Value::from("Mercado Central")));
        assert_eq!(row.get_path("store.tags.1"), Some(Value::from("b")));
        assert_eq!(row.get_path("store.missing"), None);
        assert_eq!(row.get_path("osc.name"), None);
    }

    #[test]
    fn test_get_path_prefers_exact_key() {
        let row = Row::new().set("store.name", "flat");
        assert_eq!(row.get_path("store.name"), Some(Value::from("flat")));
    }

    #[test]
    fn test_from_iter() {
        let row: Row = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("b"), Some(&Value::Int(2)));
    }
}
