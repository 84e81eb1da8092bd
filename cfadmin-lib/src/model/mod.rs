//! Dynamic row model

mod row;
mod row_serde;
mod value;

pub use row::*;
pub use row_serde::*;
pub use value::*;
