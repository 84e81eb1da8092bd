//! Filter descriptors and the active filter set.

use std::collections::BTreeMap;

use crate::model::Row;
use crate::model::Value;

use super::Column;

/// One selectable entry of a `select` filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    /// Raw value compared against the row.
    pub value: Value,
    /// Text shown to the user.
    pub label: String,
}

impl FilterOption {
    /// Creates a new option.
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The control a filter is presented with.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    /// Drop-down of fixed options; compares the selected option's raw value.
    Select(Vec<FilterOption>),
    /// On/off toggle; compares booleans.
    Switch,
}

/// Declares one user-adjustable predicate axis.
///
/// # Example
///
/// ```
/// use cfadmin_lib::table::{FilterDescriptor, FilterOption};
///
/// let status = FilterDescriptor::select(
///     "status",
///     "Status",
///     [
///         FilterOption::new("active", "Ativo"),
///         FilterOption::new("inactive", "Inativo"),
///     ],
/// );
/// let featured = FilterDescriptor::switch("featured", "Destaque");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDescriptor {
    /// Row key the filter constrains.
    pub key: String,
    /// Label shown next to the control.
    pub label: String,
    /// Control kind.
    pub kind: FilterKind,
}

impl FilterDescriptor {
    /// Creates a `select` filter.
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = FilterOption>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FilterKind::Select(options.into_iter().collect()),
        }
    }

    /// Creates a `switch` filter.
    pub fn switch(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FilterKind::Switch,
        }
    }

    /// Options of a `select` filter; empty for switches.
    pub fn options(&self) -> &[FilterOption] {
        match &self.kind {
            FilterKind::Select(options) => options,
            FilterKind::Switch => &[],
        }
    }

    /// Label of the option holding `value`, if any.
    pub fn label_for(&self, value: &Value) -> Option<&str> {
        self.options()
            .iter()
            .find(|option| option.value.strict_eq(value))
            .map(|option| option.label.as_str())
    }
}

/// The filter entries currently in force, keyed by row key.
///
/// Entries compose with logical AND. Selecting an empty value removes the
/// entry instead of storing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveFilters {
    entries: BTreeMap<String, Value>,
}

impl ActiveFilters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears one axis. Returns `true` if the set changed.
    pub fn set(&mut self, key: &str, value: Option<Value>) -> bool {
        match value {
            Some(value) if !value.is_empty_selection() => {
                let previous = self.entries.insert(key.to_string(), value.clone());
                previous.as_ref() != Some(&value)
            }
            _ => self.entries.remove(key).is_some(),
        }
    }

    /// Removes every entry. Returns `true` if any was active.
    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    /// The selected value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Iterates over active entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of active entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `row` satisfies every active entry.
    ///
    /// A key that names a declared column is read through that column, so
    /// accessor-backed columns filter on the same value they display.
    pub fn matches(&self, row: &Row, columns: &[Column]) -> bool {
        self.entries.iter().all(|(key, expected)| {
            let actual = match columns.iter().find(|c| &c.key == key) {
                Some(column) => column.value(row),
                None => row.get_path(key).unwrap_or_default(),
            };
            actual.strict_eq(expected)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_clears() {
        let mut filters = ActiveFilters::new();
        assert!(filters.set("uf", Some(Value::from("SP"))));
        assert!(filters.set("uf", Some(Value::from(""))));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_setting_same_value_is_not_a_change() {
        let mut filters = ActiveFilters::new();
        assert!(filters.set("uf", Some(Value::from("SP"))));
        assert!(!filters.set("uf", Some(Value::from("SP"))));
        assert!(!filters.set("status", None));
    }

    #[test]
    fn test_literal_default_is_a_real_value() {
        let mut filters = ActiveFilters::new();
        filters.set("status", Some(Value::from("default")));

        let row = Row::new().set("status", "default");
        assert!(filters.matches(&row, &[]));
        assert!(!filters.matches(&Row::new().set("status", "active"), &[]));
    }

    #[test]
    fn test_label_for() {
        let filter = FilterDescriptor::select(
            "families",
            "Famílias",
            [FilterOption::new(10, "Até 10")],
        );
        assert_eq!(filter.label_for(&Value::Float(10.0)), Some("Até 10"));
        assert!(FilterDescriptor::switch("a", "A").options().is_empty());
    }
}
