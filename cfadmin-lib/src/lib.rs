//! Connecting Food Admin table library
//!
//! The client-side data-table engine behind the admin dashboard's store, OSC,
//! partnership and campaign listings: free-text search, per-column filters,
//! stable sorting and pagination over a fully materialized row list, plus the
//! command layer that turns edit/delete/toggle actions into mutations the
//! caller persists and reconciles.

pub mod config;
pub mod error;
pub mod model;
pub mod mutation;
pub mod presets;
pub mod table;
