//! Declarative table configuration.

use super::Column;
use super::FilterDescriptor;
use super::SortState;

/// Everything that distinguishes one entity's table from another: its
/// columns, its filters and the sort it opens with.
///
/// See [`presets`](crate::presets) for the dashboard's tables.
#[derive(Debug, Clone)]
pub struct TableSpec {
    /// Identifier of the table (`stores`, `oscs`, ...).
    pub name: &'static str,
    /// Column declarations, in display order.
    pub columns: Vec<Column>,
    /// Filter declarations, in display order.
    pub filters: Vec<FilterDescriptor>,
    /// Sort applied when the table mounts.
    pub default_sort: Option<SortState>,
}

impl TableSpec {
    /// Creates a spec with columns only.
    pub fn new(name: &'static str, columns: Vec<Column>) -> Self {
        Self {
            name,
            columns,
            filters: Vec::new(),
            default_sort: None,
        }
    }

    /// Adds the filter declarations.
    pub fn with_filters(mut self, filters: Vec<FilterDescriptor>) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the initial sort.
    pub fn with_default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = Some(sort);
        self
    }
}
