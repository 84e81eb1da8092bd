//! Caller-supplied row action callbacks.

use std::fmt;

use crate::model::Row;
use crate::model::Value;

/// Called with the row the user asked to edit.
pub type EditHook = Box<dyn Fn(&Row) + Send + Sync>;

/// Called with the identifier of the row the user asked to delete.
pub type DeleteHook = Box<dyn Fn(&Value) + Send + Sync>;

/// Called with `(row id, field, new value)` when a boolean cell is toggled.
pub type ToggleHook = Box<dyn Fn(&Value, &str, bool) + Send + Sync>;

/// Extension points for the edit/delete/toggle actions of a table.
///
/// The engine forwards to these and ignores what they do; persisting the
/// change and handing back a new row list is the caller's job.
///
/// # Example
///
/// ```
/// use cfadmin_lib::table::RowHooks;
///
/// let hooks = RowHooks::new()
///     .on_delete(|id| println!("delete {id}"))
///     .on_toggle(|id, field, value| println!("{id}: {field} = {value}"));
/// ```
#[derive(Default)]
pub struct RowHooks {
    edit: Option<EditHook>,
    delete: Option<DeleteHook>,
    toggle: Option<ToggleHook>,
}

impl RowHooks {
    /// Creates a hook set with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the edit callback.
    pub fn on_edit(mut self, hook: impl Fn(&Row) + Send + Sync + 'static) -> Self {
        self.edit = Some(Box::new(hook));
        self
    }

    /// Sets the delete callback.
    pub fn on_delete(mut self, hook: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.delete = Some(Box::new(hook));
        self
    }

    /// Sets the toggle callback.
    pub fn on_toggle(mut self, hook: impl Fn(&Value, &str, bool) + Send + Sync + 'static) -> Self {
        self.toggle = Some(Box::new(hook));
        self
    }

    pub(crate) fn edit(&self, row: &Row) -> bool {
        match &self.edit {
            Some(hook) => {
                hook(row);
                true
            }
            None => false,
        }
    }

    pub(crate) fn delete(&self, id: &Value) -> bool {
        match &self.delete {
            Some(hook) => {
                hook(id);
                true
            }
            None => false,
        }
    }

    pub(crate) fn toggle(&self, id: &Value, field: &str, value: bool) -> bool {
        match &self.toggle {
            Some(hook) => {
                hook(id, field, value);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for RowHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowHooks")
            .field("edit", &self.edit.is_some())
            .field("delete", &self.delete.is_some())
            .field("toggle", &self.toggle.is_some())
            .finish()
    }
}
