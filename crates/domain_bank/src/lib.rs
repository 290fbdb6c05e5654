//! Bank Registry Domain
//!
//! This crate owns the rules of the SWIFT code registry: which codes denote a
//! headquarters and which a branch, how a submitted country is checked, and
//! how the headquarters/branch hierarchy is kept consistent.
//!
//! # Hierarchy Model
//!
//! - **Headquarters**: a code whose last three characters are `XXX`
//! - **Branch**: any other code; it belongs to the headquarters obtained by
//!   replacing its last three characters with `XXX`
//!
//! A branch can only be registered while its headquarters exists, and a
//! headquarters can only be deleted once it has no branches. The list of
//! branches shown under a headquarters is derived at read time.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use core_kernel::{CountryCode, SwiftCode};
//! use domain_bank::{BankRegistry, BankSubmission, InMemoryBankStore};
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! rt.block_on(async {
//!     let registry = BankRegistry::new(Arc::new(InMemoryBankStore::new()));
//!
//!     registry.register(BankSubmission {
//!         swift_code: SwiftCode::parse("BPKOPLPWXXX").unwrap(),
//!         bank_name: "PKO BANK POLSKI S.A.".to_string(),
//!         country_code: CountryCode::parse("PL").unwrap(),
//!         country_name: "POLAND".to_string(),
//!         address: None,
//!         is_headquarter: true,
//!     }).await.unwrap();
//!
//!     let details = registry
//!         .get_by_code(&SwiftCode::parse("BPKOPLPWXXX").unwrap())
//!         .await
//!         .unwrap();
//!     assert_eq!(details.country_name, "Poland");
//!     assert_eq!(details.branches, Some(vec![]));
//! });
//! ```

pub mod classifier;
pub mod country;
pub mod bank;
pub mod error;
pub mod ports;
pub mod registry;
pub mod import;

pub use classifier::{BankKind, derive_headquarters_code, is_headquarters};
pub use country::{CountryDirectory, ISO_3166_COUNTRIES};
pub use bank::{
    BankDetails, BankSubmission, BankSummary, BranchRecord, CountryBanks, HeadquartersRecord,
};
pub use error::{MismatchDirection, RegistryError};
pub use ports::{BankStore, BankTransaction, InMemoryBankStore};
pub use registry::BankRegistry;
pub use import::{ImportError, ImportOutcome, ImportSummary, ParsedSeed, SeedImporter};
