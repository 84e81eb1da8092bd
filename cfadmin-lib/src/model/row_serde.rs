//! Serialization for Row and backend payload translation.
//!
//! The REST API and the Supabase tables return snake_case objects
//! (`created_at`, `store_id`) while the dashboard's view models are camelCase
//! (`createdAt`, `storeId`). [`KeyCase`] selects whether keys are kept as
//! they arrive or translated on the way in; nested objects are translated
//! recursively so dotted column paths see the same casing.
//!
//! ## Read Format (Deserialization)
//!
//! - Each JSON member becomes one field via [`Value::from_json`]
//! - UUID and ISO-8601 strings are promoted to `Guid` / `DateTime`
//! - Objects and arrays stay as `Value::Json`
//!
//! ## Write Format (Serialization)
//!
//! - Fields serialize as a flat map, keys in ascending order
//! - `Null` fields are written as `null` so a round trip keeps them

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Row;
use super::Value;
use crate::error::RowError;

/// How payload keys are mapped onto row field names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyCase {
    /// Keep keys exactly as received.
    #[default]
    Preserve,
    /// Translate `snake_case` keys to `camelCase`.
    Camel,
}

impl KeyCase {
    /// Applies this casing to one key.
    pub fn apply(self, key: &str) -> String {
        match self {
            KeyCase::Preserve => key.to_string(),
            KeyCase::Camel => snake_to_camel(key),
        }
    }
}

/// Converts `snake_case` to `camelCase`.
///
/// Leading underscores are kept (`_id` stays `_id`); repeated and trailing
/// underscores collapse.
///
/// ```
/// use cfadmin_lib::model::snake_to_camel;
///
/// assert_eq!(snake_to_camel("created_at"), "createdAt");
/// assert_eq!(snake_to_camel("osc_cnpj_number"), "oscCnpjNumber");
/// assert_eq!(snake_to_camel("name"), "name");
/// ```
pub fn snake_to_camel(key: &str) -> String {
    let leading = key.len() - key.trim_start_matches('_').len();
    let mut out = String::with_capacity(key.len());
    out.push_str(&key[..leading]);

    let mut upper_next = false;
    for ch in key[leading..].chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn translate_keys(json: serde_json::Value, case: KeyCase) -> serde_json::Value {
    if case == KeyCase::Preserve {
        return json;
    }
    match json {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (case.apply(&k), translate_keys(v, case)))
                .collect(),
        ),
        serde_json::Value::Array(items) => serde_json::Value::Array(
            items.into_iter().map(|v| translate_keys(v, case)).collect(),
        ),
        other => other,
    }
}

impl Row {
    /// Builds a row from a JSON object.
    pub fn from_json_object(
        object: serde_json::Map<String, serde_json::Value>,
        case: KeyCase,
    ) -> Row {
        object
            .into_iter()
            .map(|(key, value)| (case.apply(&key), Value::from_json(translate_keys(value, case))))
            .collect()
    }

    /// Builds a row from any JSON value, which must be an object.
    pub fn from_json_value(json: serde_json::Value, case: KeyCase) -> Result<Row, RowError> {
        match json {
            serde_json::Value::Object(object) => Ok(Row::from_json_object(object, case)),
            other => Err(RowError::shape("an object", &other)),
        }
    }

    /// Builds the row list from a payload holding an array of objects.
    ///
    /// This is the shape of both the REST list endpoints and Supabase
    /// `select` responses.
    pub fn list_from_json(json: serde_json::Value, case: KeyCase) -> Result<Vec<Row>, RowError> {
        match json {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| Row::from_json_value(item, case))
                .collect(),
            other => Err(RowError::shape("an array of objects", &other)),
        }
    }

    /// Parses a JSON document holding an array of objects.
    pub fn list_from_json_str(input: &str, case: KeyCase) -> Result<Vec<Row>, RowError> {
        let json: serde_json::Value = serde_json::from_str(input)?;
        Row::list_from_json(json, case)
    }
}

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();

        let mut map = serializer.serialize_map(Some(keys.len()))?;
        for key in keys {
            map.serialize_entry(key, &self.fields[key])?;
        }
        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RowVisitor)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map representing a table row")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Row, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut row = Row::new();
        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;
            row.fields.insert(key, Value::from_json(value));
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_infers_types() {
        let json = r#"{
            "id": "12345678-1234-1234-1234-123456789012",
            "name": "Mercado Central",
            "families": 40,
            "active": true,
            "created_at": "2024-05-10T08:30:00Z",
            "address": {"city": "Campinas"}
        }"#;
        let row: Row = serde_json::from_str(json).unwrap();

        assert_eq!(row.get("id").unwrap().type_name(), "guid");
        assert_eq!(row.get_string("name").unwrap(), Some("Mercado Central"));
        assert_eq!(row.get_int("families").unwrap(), Some(40));
        assert_eq!(row.get_bool("active").unwrap(), Some(true));
        assert!(row.get_datetime("created_at").unwrap().is_some());
        assert_eq!(row.get_path("address.city"), Some(Value::from("Campinas")));
    }

    #[test]
    fn test_serialize_sorted_keys() {
        let row = Row::new().set("uf", "SP").set("name", "Acme").set("note", Value::Null);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"name":"Acme","note":null,"uf":"SP"}"#);
    }

    #[test]
    fn test_camel_case_translation_is_recursive() {
        let json = serde_json::json!({
            "store_name": "Acme",
            "osc": {"legal_name": "Instituto Esperança"}
        });
        let row = Row::from_json_value(json, KeyCase::Camel).unwrap();

        assert!(row.contains("storeName"));
        assert_eq!(
            row.get_path("osc.legalName"),
            Some(Value::from("Instituto Esperança"))
        );
    }

    #[test]
    fn test_snake_to_camel_edge_cases() {
        assert_eq!(snake_to_camel("_id"), "_id");
        assert_eq!(snake_to_camel("store__id"), "storeId");
        assert_eq!(snake_to_camel("trailing_"), "trailing");
        assert_eq!(snake_to_camel(""), "");
    }

    #[test]
    fn test_list_rejects_non_array() {
        let err = Row::list_from_json(serde_json::json!({"a": 1}), KeyCase::Preserve).unwrap_err();
        assert!(matches!(err, RowError::Shape { found: "an object", .. }));

        let err = Row::list_from_json(serde_json::json!([1]), KeyCase::Preserve).unwrap_err();
        assert!(matches!(err, RowError::Shape { found: "a number", .. }));
    }
}
