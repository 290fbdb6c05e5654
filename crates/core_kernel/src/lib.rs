//! Core Kernel - Foundational types for the SWIFT code registry
//!
//! This crate provides the building blocks shared by every other crate:
//! - Shape-validated code value objects (`SwiftCode`, `CountryCode`)
//! - Port infrastructure for swappable storage adapters

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{SwiftCode, CountryCode, HEADQUARTERS_LOCATOR};
pub use error::{CodeError, CodeKind};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
