//! Errors raised while reading rows and their fields

/// Error type for typed field access on [`Row`](crate::model::Row).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The requested field does not exist in the row.
    #[error("field '{field}' is not present in the row")]
    Missing { field: String },

    /// The field exists but holds another kind of value.
    #[error("field '{field}' holds {actual}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

/// Errors produced when turning a backend payload into rows.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    /// The payload is valid JSON but not shaped like a row (or a list of rows).
    #[error("expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },

    /// The payload is not valid JSON.
    #[error("invalid row payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl RowError {
    pub(crate) fn shape(expected: &'static str, found: &serde_json::Value) -> Self {
        let found = match found {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
            serde_json::Value::Object(_) => "an object",
        };
        Self::Shape { expected, found }
    }
}
