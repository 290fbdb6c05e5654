//! Repository implementations for the registry tables
//!
//! Each repository encapsulates the SQL for one table and maps between
//! database rows and plain row structs. Conversion into domain records
//! happens in the adapter layer.

pub mod headquarters;
pub mod branch;

pub use headquarters::{HeadquartersRepository, HeadquartersRow};
pub use branch::{BranchRepository, BranchRow};
