//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! SWIFT codes registry test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built banks and seed data
//! - `builders`: Builder for bank submissions
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Assertion helpers for registry views
//! - `generators`: Property-based generators for codes and names

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
