//! PostgreSQL Bank Store Adapter
//!
//! Implements the registry's `BankStore` port on PostgreSQL through the
//! `headquarters` and `branches` repositories.
//!
//! # Write Isolation
//!
//! `begin` opens a READ COMMITTED transaction and takes one transaction-scoped
//! advisory lock per key, in sorted order. Two writers that name the same code
//! therefore run one after the other, and the second sees the first's commit.
//! The primary keys, shape checks and the `ON DELETE RESTRICT` foreign key
//! catch anything that slips past the locks.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_bank::{BankRegistry, BankStore};
//! use infra_db::adapters::PostgresBankStore;
//!
//! let store: Arc<dyn BankStore> = Arc::new(PostgresBankStore::new(pool));
//! let registry = BankRegistry::new(store);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, CountryCode, DomainPort, HealthCheckResult, HealthCheckable, PortError,
    SwiftCode,
};
use domain_bank::{BankStore, BankTransaction, BranchRecord, HeadquartersRecord};

use crate::error::DatabaseError;
use crate::repositories::{BranchRepository, BranchRow, HeadquartersRepository, HeadquartersRow};

const ADAPTER_ID: &str = "postgres-bank-store";

/// Self-conflicting, so it also excludes a second seeding transaction
const LOCK_TABLES_FOR_SEED: &str = "LOCK TABLE headquarters, branches IN SHARE ROW EXCLUSIVE MODE";

/// PostgreSQL-backed implementation of `BankStore`
#[derive(Debug, Clone)]
pub struct PostgresBankStore {
    headquarters: HeadquartersRepository,
    branches: BranchRepository,
    pool: PgPool,
}

impl PostgresBankStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            headquarters: HeadquartersRepository::new(pool.clone()),
            branches: BranchRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl DomainPort for PostgresBankStore {}

#[async_trait]
impl HealthCheckable for PostgresBankStore {
    /// Performs a `SELECT 1` round trip through the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl BankStore for PostgresBankStore {
    #[instrument(skip(self), fields(swift_code = %code))]
    async fn get_headquarters(
        &self,
        code: &SwiftCode,
    ) -> Result<Option<HeadquartersRecord>, PortError> {
        self.headquarters
            .find(code.as_str())
            .await?
            .map(headquarters_from_row)
            .transpose()
    }

    #[instrument(skip(self), fields(swift_code = %code))]
    async fn get_branch(&self, code: &SwiftCode) -> Result<Option<BranchRecord>, PortError> {
        self.branches
            .find(code.as_str())
            .await?
            .map(branch_from_row)
            .transpose()
    }

    #[instrument(skip(self), fields(country = %country))]
    async fn list_headquarters_by_country(
        &self,
        country: &CountryCode,
    ) -> Result<Vec<HeadquartersRecord>, PortError> {
        let rows = self.headquarters.list_by_country(country.as_str()).await?;
        debug!(count = rows.len(), "Fetched headquarters");
        rows.into_iter().map(headquarters_from_row).collect()
    }

    #[instrument(skip(self), fields(country = %country))]
    async fn list_branches_by_country(
        &self,
        country: &CountryCode,
    ) -> Result<Vec<BranchRecord>, PortError> {
        let rows = self.branches.list_by_country(country.as_str()).await?;
        debug!(count = rows.len(), "Fetched branches");
        rows.into_iter().map(branch_from_row).collect()
    }

    #[instrument(skip(self), fields(headquarters = %headquarters))]
    async fn list_branches_by_headquarters(
        &self,
        headquarters: &SwiftCode,
    ) -> Result<Vec<BranchRecord>, PortError> {
        let rows = self.branches.list_by_headquarters(headquarters.as_str()).await?;
        rows.into_iter().map(branch_from_row).collect()
    }

    async fn is_empty(&self) -> Result<bool, PortError> {
        let headquarters = self.headquarters.count().await?;
        let branches = self.branches.count().await?;
        Ok(headquarters == 0 && branches == 0)
    }

    #[instrument(skip(self, lock_keys), fields(keys = lock_keys.len()))]
    async fn begin(&self, lock_keys: &[SwiftCode]) -> Result<Box<dyn BankTransaction>, PortError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let mut keys: Vec<&str> = lock_keys.iter().map(SwiftCode::as_str).collect();
        keys.sort_unstable();
        keys.dedup();

        for key in keys {
            sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
                .bind(key)
                .execute(&mut *tx)
                .await
                .map_err(DatabaseError::from)?;
        }

        Ok(Box::new(PostgresBankTransaction { tx }))
    }
}

/// An open PostgreSQL transaction; rolled back by sqlx when dropped uncommitted
struct PostgresBankTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl BankTransaction for PostgresBankTransaction {
    async fn headquarters_exists(&mut self, code: &SwiftCode) -> Result<bool, PortError> {
        Ok(HeadquartersRepository::exists(&mut *self.tx, code.as_str()).await?)
    }

    async fn branch_exists(&mut self, code: &SwiftCode) -> Result<bool, PortError> {
        Ok(BranchRepository::exists(&mut *self.tx, code.as_str()).await?)
    }

    async fn claim_if_empty(&mut self) -> Result<bool, PortError> {
        sqlx::query(LOCK_TABLES_FOR_SEED)
            .execute(&mut *self.tx)
            .await
            .map_err(DatabaseError::from)?;

        let headquarters = HeadquartersRepository::count_in(&mut *self.tx).await?;
        let branches = BranchRepository::count_in(&mut *self.tx).await?;
        Ok(headquarters == 0 && branches == 0)
    }

    async fn count_branches_of(&mut self, headquarters: &SwiftCode) -> Result<u64, PortError> {
        let count =
            BranchRepository::count_by_headquarters(&mut *self.tx, headquarters.as_str()).await?;
        Ok(count.max(0) as u64)
    }

    async fn insert_headquarters(&mut self, record: &HeadquartersRecord) -> Result<(), PortError> {
        Ok(HeadquartersRepository::insert(&mut *self.tx, &headquarters_to_row(record)).await?)
    }

    async fn insert_branch(&mut self, record: &BranchRecord) -> Result<(), PortError> {
        Ok(BranchRepository::insert(&mut *self.tx, &branch_to_row(record)).await?)
    }

    async fn delete_headquarters(&mut self, code: &SwiftCode) -> Result<bool, PortError> {
        Ok(HeadquartersRepository::delete(&mut *self.tx, code.as_str()).await?)
    }

    async fn delete_branch(&mut self, code: &SwiftCode) -> Result<bool, PortError> {
        Ok(BranchRepository::delete(&mut *self.tx, code.as_str()).await?)
    }

    async fn commit(self: Box<Self>) -> Result<(), PortError> {
        self.tx.commit().await.map_err(DatabaseError::from)?;
        Ok(())
    }
}

// ============================================================================
// Row <-> record conversion
// ============================================================================

fn parse_code(value: &str) -> Result<SwiftCode, PortError> {
    SwiftCode::parse(value).map_err(|e| DatabaseError::InvalidRow(e.to_string()).into())
}

fn parse_country(value: &str) -> Result<CountryCode, PortError> {
    CountryCode::parse(value).map_err(|e| DatabaseError::InvalidRow(e.to_string()).into())
}

fn headquarters_from_row(row: HeadquartersRow) -> Result<HeadquartersRecord, PortError> {
    Ok(HeadquartersRecord {
        swift_code: parse_code(&row.swift_code)?,
        bank_name: row.bank_name,
        country_code: parse_country(&row.country_iso2)?,
        country_name: row.country_name,
        address: row.address,
    })
}

fn branch_from_row(row: BranchRow) -> Result<BranchRecord, PortError> {
    Ok(BranchRecord {
        swift_code: parse_code(&row.swift_code)?,
        bank_name: row.bank_name,
        country_code: parse_country(&row.country_iso2)?,
        country_name: row.country_name,
        address: row.address,
        headquarters_code: parse_code(&row.headquarters_swift_code)?,
    })
}

fn headquarters_to_row(record: &HeadquartersRecord) -> HeadquartersRow {
    HeadquartersRow {
        swift_code: record.swift_code.to_string(),
        bank_name: record.bank_name.clone(),
        country_iso2: record.country_code.to_string(),
        country_name: record.country_name.clone(),
        address: record.address.clone(),
    }
}

fn branch_to_row(record: &BranchRecord) -> BranchRow {
    BranchRow {
        swift_code: record.swift_code.to_string(),
        bank_name: record.bank_name.clone(),
        country_iso2: record.country_code.to_string(),
        country_name: record.country_name.clone(),
        address: record.address.clone(),
        headquarters_swift_code: record.headquarters_code.to_string(),
    }
}
