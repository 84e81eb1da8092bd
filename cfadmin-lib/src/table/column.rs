//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use crate::model::Row;
use crate::model::Value;

/// Projects a row onto the value of one column.
pub type Accessor = Arc<dyn Fn(&Row) -> Value + Send + Sync>;

/// Renders a column value as display text. Must be side-effect free.
pub type Renderer = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Declares how a row maps to one cell.
///
/// Without an accessor the column reads `row[key]`, falling back to a dotted
/// path lookup (`store.name`) when no field has that exact name. Without a
/// renderer the cell shows the value's `Display` form.
///
/// # Example
///
/// ```
/// use cfadmin_lib::model::{Row, Value};
/// use cfadmin_lib::table::Column;
///
/// let status = Column::new("active", "Status")
///     .with_render(|value, _| match value {
///         Value::Bool(true) => "Ativo".to_string(),
///         _ => "Inativo".to_string(),
///     });
///
/// let row = Row::new().set("active", true);
/// assert_eq!(status.render(&row), "Ativo");
/// ```
#[derive(Clone)]
pub struct Column {
    /// Key identifying the column; also the default field it reads.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether `set_sort` may target this column.
    pub sortable: bool,
    accessor: Option<Accessor>,
    render: Option<Renderer>,
}

impl Column {
    /// Creates a sortable column reading `row[key]`.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            accessor: None,
            render: None,
        }
    }

    /// Marks the column as not sortable.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Sets whether the column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Reads the column value through a custom projection.
    pub fn with_accessor(mut self, accessor: impl Fn(&Row) -> Value + Send + Sync + 'static) -> Self {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    /// Renders the cell through a custom projection.
    pub fn with_render(
        mut self,
        render: impl Fn(&Value, &Row) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// The value this column shows for `row`; `Null` when absent.
    pub fn value(&self, row: &Row) -> Value {
        if let Some(accessor) = &self.accessor {
            return accessor(row);
        }
        match row.get(&self.key) {
            Some(value) => value.clone(),
            None if self.key.contains('.') => row.get_path(&self.key).unwrap_or_default(),
            None => Value::Null,
        }
    }

    /// The display text of this column's cell for `row`.
    pub fn render(&self, row: &Row) -> String {
        let value = self.value(row);
        match &self.render {
            Some(render) => render(&value, row),
            None => value.to_string(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("accessor", &self.accessor.is_some())
            .field("render", &self.render.is_some())
            .finish()
    }
}
