//! Error types

mod config;
mod mutation;
mod row;

pub use config::*;
pub use mutation::*;
pub use row::*;
