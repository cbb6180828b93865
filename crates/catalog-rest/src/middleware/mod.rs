//! HTTP middleware.

mod logging;
mod rate_limit;

pub use logging::*;
pub use rate_limit::*;
