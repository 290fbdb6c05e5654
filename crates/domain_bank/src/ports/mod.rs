//! Bank Domain Ports
//!
//! This module defines the storage boundary of the registry, enabling
//! swappable implementations (PostgreSQL, in-memory).
//!
//! # Architecture
//!
//! Reads go straight through `BankStore`. Every write goes through a
//! `BankTransaction` obtained from `BankStore::begin`, so the existence checks
//! that guard a write and the write itself see one consistent state and
//! commit together.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_bank::ports::BankStore;
//!
//! let mut tx = store.begin(&[code.clone()]).await?;
//! if !tx.headquarters_exists(&code).await? {
//!     tx.insert_headquarters(&record).await?;
//! }
//! tx.commit().await?;
//! ```

pub mod memory;

use async_trait::async_trait;

use core_kernel::{CountryCode, DomainPort, HealthCheckable, PortError, SwiftCode};

use crate::bank::{BranchRecord, HeadquartersRecord};

pub use memory::InMemoryBankStore;

/// The main port trait for registry storage
///
/// Two logical tables keyed by SWIFT code: headquarters and branches.
#[async_trait]
pub trait BankStore: DomainPort + HealthCheckable {
    /// Retrieves a headquarters by code
    async fn get_headquarters(
        &self,
        code: &SwiftCode,
    ) -> Result<Option<HeadquartersRecord>, PortError>;

    /// Retrieves a branch by code
    async fn get_branch(&self, code: &SwiftCode) -> Result<Option<BranchRecord>, PortError>;

    /// Lists every headquarters in a country
    async fn list_headquarters_by_country(
        &self,
        country: &CountryCode,
    ) -> Result<Vec<HeadquartersRecord>, PortError>;

    /// Lists every branch in a country
    async fn list_branches_by_country(
        &self,
        country: &CountryCode,
    ) -> Result<Vec<BranchRecord>, PortError>;

    /// Lists the branches that reference a headquarters
    async fn list_branches_by_headquarters(
        &self,
        headquarters: &SwiftCode,
    ) -> Result<Vec<BranchRecord>, PortError>;

    /// True when neither table holds any record
    async fn is_empty(&self) -> Result<bool, PortError>;

    /// Opens a write transaction.
    ///
    /// Transactions whose `lock_keys` overlap are serialized: the second
    /// caller waits until the first commits or is dropped.
    async fn begin(&self, lock_keys: &[SwiftCode]) -> Result<Box<dyn BankTransaction>, PortError>;
}

/// A unit of work against the store
///
/// Dropping a transaction without calling `commit` discards its writes.
#[async_trait]
pub trait BankTransaction: Send {
    async fn headquarters_exists(&mut self, code: &SwiftCode) -> Result<bool, PortError>;

    async fn branch_exists(&mut self, code: &SwiftCode) -> Result<bool, PortError>;

    /// True when neither table holds a record.
    ///
    /// Once this returns, other writers wait until the transaction ends, so
    /// the answer stays valid for its writes.
    async fn claim_if_empty(&mut self) -> Result<bool, PortError>;

    /// Number of branches currently referencing `headquarters`
    async fn count_branches_of(&mut self, headquarters: &SwiftCode) -> Result<u64, PortError>;

    /// Inserts a headquarters; `PortError::Conflict` if the code is taken
    async fn insert_headquarters(&mut self, record: &HeadquartersRecord) -> Result<(), PortError>;

    /// Inserts a branch; `PortError::Conflict` if the code is taken,
    /// `PortError::ReferenceViolation` if its headquarters is absent
    async fn insert_branch(&mut self, record: &BranchRecord) -> Result<(), PortError>;

    /// Deletes a headquarters, returning whether it existed;
    /// `PortError::ReferenceViolation` while branches reference it
    async fn delete_headquarters(&mut self, code: &SwiftCode) -> Result<bool, PortError>;

    /// Deletes a branch, returning whether it existed
    async fn delete_branch(&mut self, code: &SwiftCode) -> Result<bool, PortError>;

    /// Makes every write of this transaction visible atomically
    async fn commit(self: Box<Self>) -> Result<(), PortError>;
}
