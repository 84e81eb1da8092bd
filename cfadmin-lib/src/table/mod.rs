//! Client-side table engine.
//!
//! A table is declared once as columns and filters ([`TableSpec`]) and fed a
//! fully materialized row list. [`TableEngine`] owns the query, filter, sort
//! and page state and derives a [`View`] from them on demand.
//!
//! - [`Column`] - how a row maps to one cell
//! - [`FilterDescriptor`] - one user-adjustable predicate axis
//! - [`SortState`] / [`Direction`] - the active sort
//! - [`RowHooks`] - edit/delete/toggle extension points
//! - [`RowSource`] - keeps the latest fetch result, drops stale ones

mod column;
mod engine;
mod filter;
mod hooks;
mod order;
mod source;
mod spec;
mod view;

pub use column::Accessor;
pub use column::Column;
pub use column::Renderer;
pub use engine::EngineState;
pub use engine::TableEngine;
pub use filter::ActiveFilters;
pub use filter::FilterDescriptor;
pub use filter::FilterKind;
pub use filter::FilterOption;
pub use hooks::DeleteHook;
pub use hooks::EditHook;
pub use hooks::RowHooks;
pub use hooks::ToggleHook;
pub use order::Direction;
pub use order::SortState;
pub use source::FetchToken;
pub use source::RowSource;
pub use spec::TableSpec;
pub use view::PageRange;
pub use view::View;
