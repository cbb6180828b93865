//! # Catalog Service
//!
//! Product use cases for the catalog service.
//! Reads go through the cache first and fall back to the store; writes go
//! to the store and then invalidate cached listings.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod product_service;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::ProductServiceImpl;
