//! Infrastructure Database Layer
//!
//! This crate provides PostgreSQL storage for the SWIFT code registry using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `repositories` holds the SQL for
//! each table, and `adapters` implements the domain's `BankStore` port on top
//! of them. Schema migrations are embedded from `migrations/`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresBankStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/swift_codes")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresBankStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use error::DatabaseError;
pub use adapters::PostgresBankStore;
