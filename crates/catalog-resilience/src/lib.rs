//! # Catalog Resilience
//!
//! Resilience patterns for the catalog service.
//! Provides per-client rate limiting and timeouts.

pub mod rate_limiter;
pub mod timeout;

pub use rate_limiter::*;
pub use timeout::*;
