//! # Catalog Repository
//!
//! Persistent store gateway for products.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>     (store interface)
//! PostgresProductRepository           (SQLx implementation)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
