//! In-memory implementation of `BankStore`
//!
//! A single async mutex guards both tables. A transaction holds that mutex for
//! its whole lifetime and works on a staged copy, which replaces the shared
//! state on commit; all transactions are therefore fully serialized.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use core_kernel::{
    AdapterHealth, CountryCode, DomainPort, HealthCheckResult, HealthCheckable, PortError,
    SwiftCode,
};

use super::{BankStore, BankTransaction};
use crate::bank::{BranchRecord, HeadquartersRecord};

#[derive(Debug, Clone, Default)]
struct StoreState {
    headquarters: BTreeMap<SwiftCode, HeadquartersRecord>,
    branches: BTreeMap<SwiftCode, BranchRecord>,
}

impl StoreState {
    fn contains(&self, code: &SwiftCode) -> bool {
        self.headquarters.contains_key(code) || self.branches.contains_key(code)
    }

    fn branches_of<'a>(
        &'a self,
        headquarters: &'a SwiftCode,
    ) -> impl Iterator<Item = &'a BranchRecord> + 'a {
        self.branches
            .values()
            .filter(move |branch| &branch.headquarters_code == headquarters)
    }
}

/// In-memory storage adapter
#[derive(Debug, Clone, Default)]
pub struct InMemoryBankStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryBankStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store, bypassing registry validation
    pub async fn with_records(
        headquarters: Vec<HeadquartersRecord>,
        branches: Vec<BranchRecord>,
    ) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().await;
            for record in headquarters {
                state.headquarters.insert(record.swift_code.clone(), record);
            }
            for record in branches {
                state.branches.insert(record.swift_code.clone(), record);
            }
        }
        store
    }

    /// Total number of stored records
    pub async fn len(&self) -> usize {
        let state = self.state.lock().await;
        state.headquarters.len() + state.branches.len()
    }
}

impl DomainPort for InMemoryBankStore {}

#[async_trait]
impl HealthCheckable for InMemoryBankStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "in-memory-bank-store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some("In-memory adapter always healthy".to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl BankStore for InMemoryBankStore {
    async fn get_headquarters(
        &self,
        code: &SwiftCode,
    ) -> Result<Option<HeadquartersRecord>, PortError> {
        Ok(self.state.lock().await.headquarters.get(code).cloned())
    }

    async fn get_branch(&self, code: &SwiftCode) -> Result<Option<BranchRecord>, PortError> {
        Ok(self.state.lock().await.branches.get(code).cloned())
    }

    async fn list_headquarters_by_country(
        &self,
        country: &CountryCode,
    ) -> Result<Vec<HeadquartersRecord>, PortError> {
        let state = self.state.lock().await;
        Ok(state
            .headquarters
            .values()
            .filter(|record| &record.country_code == country)
            .cloned()
            .collect())
    }

    async fn list_branches_by_country(
        &self,
        country: &CountryCode,
    ) -> Result<Vec<BranchRecord>, PortError> {
        let state = self.state.lock().await;
        Ok(state
            .branches
            .values()
            .filter(|record| &record.country_code == country)
            .cloned()
            .collect())
    }

    async fn list_branches_by_headquarters(
        &self,
        headquarters: &SwiftCode,
    ) -> Result<Vec<BranchRecord>, PortError> {
        let state = self.state.lock().await;
        Ok(state.branches_of(headquarters).cloned().collect())
    }

    async fn is_empty(&self) -> Result<bool, PortError> {
        let state = self.state.lock().await;
        Ok(state.headquarters.is_empty() && state.branches.is_empty())
    }

    async fn begin(
        &self,
        _lock_keys: &[SwiftCode],
    ) -> Result<Box<dyn BankTransaction>, PortError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, staged }))
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    staged: StoreState,
}

#[async_trait]
impl BankTransaction for InMemoryTransaction {
    async fn headquarters_exists(&mut self, code: &SwiftCode) -> Result<bool, PortError> {
        Ok(self.staged.headquarters.contains_key(code))
    }

    async fn branch_exists(&mut self, code: &SwiftCode) -> Result<bool, PortError> {
        Ok(self.staged.branches.contains_key(code))
    }

    async fn claim_if_empty(&mut self) -> Result<bool, PortError> {
        Ok(self.staged.headquarters.is_empty() && self.staged.branches.is_empty())
    }

    async fn count_branches_of(&mut self, headquarters: &SwiftCode) -> Result<u64, PortError> {
        Ok(self.staged.branches_of(headquarters).count() as u64)
    }

    async fn insert_headquarters(&mut self, record: &HeadquartersRecord) -> Result<(), PortError> {
        if self.staged.contains(&record.swift_code) {
            return Err(PortError::conflict(format!(
                "SWIFT code {} already exists",
                record.swift_code
            )));
        }
        self.staged
            .headquarters
            .insert(record.swift_code.clone(), record.clone());
        Ok(())
    }

    async fn insert_branch(&mut self, record: &BranchRecord) -> Result<(), PortError> {
        if self.staged.contains(&record.swift_code) {
            return Err(PortError::conflict(format!(
                "SWIFT code {} already exists",
                record.swift_code
            )));
        }
        if !self.staged.headquarters.contains_key(&record.headquarters_code) {
            return Err(PortError::reference_violation(format!(
                "headquarters {} does not exist",
                record.headquarters_code
            )));
        }
        self.staged
            .branches
            .insert(record.swift_code.clone(), record.clone());
        Ok(())
    }

    async fn delete_headquarters(&mut self, code: &SwiftCode) -> Result<bool, PortError> {
        if self.staged.branches_of(code).next().is_some() {
            return Err(PortError::reference_violation(format!(
                "headquarters {} is still referenced by branches",
                code
            )));
        }
        Ok(self.staged.headquarters.remove(code).is_some())
    }

    async fn delete_branch(&mut self, code: &SwiftCode) -> Result<bool, PortError> {
        Ok(self.staged.branches.remove(code).is_some())
    }

    async fn commit(self: Box<Self>) -> Result<(), PortError> {
        let InMemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
