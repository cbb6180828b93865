//! # Catalog Server Library
//!
//! Dependency injection wiring, logging setup, and startup utilities for
//! the catalog server binary.

pub mod di;
pub mod logging;
pub mod startup;
