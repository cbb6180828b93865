//! # Catalog Core
//!
//! Core types, error definitions, and pagination for the catalog service.
//! This crate provides the foundational abstractions shared by the store,
//! cache, service, and delivery layers.

pub mod error;
pub mod id;
pub mod pagination;
pub mod product;
pub mod result;
pub mod validation;

pub use error::*;
pub use id::*;
pub use pagination::*;
pub use product::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
