//! Custom Axum extractors.

mod list_query;
mod validated;

pub use list_query::*;
pub use validated::*;
