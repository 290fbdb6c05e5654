//! Branch repository implementation
//!
//! Database access for the `branches` table. Every branch row carries the code
//! of its headquarters; the foreign key keeps that reference valid.

use sqlx::{FromRow, PgExecutor, PgPool};

use crate::error::DatabaseError;

/// Database row for a branch
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BranchRow {
    pub swift_code: String,
    pub bank_name: String,
    pub country_iso2: String,
    pub country_name: String,
    pub address: Option<String>,
    pub headquarters_swift_code: String,
}

/// Repository for the `branches` table
#[derive(Debug, Clone)]
pub struct BranchRepository {
    pool: PgPool,
}

impl BranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, swift_code: &str) -> Result<Option<BranchRow>, DatabaseError> {
        let row = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT swift_code, bank_name, country_iso2, country_name, address,
                   headquarters_swift_code
            FROM branches
            WHERE swift_code = $1
            "#,
        )
        .bind(swift_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists the branches of a country in code order
    pub async fn list_by_country(&self, country_iso2: &str) -> Result<Vec<BranchRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT swift_code, bank_name, country_iso2, country_name, address,
                   headquarters_swift_code
            FROM branches
            WHERE country_iso2 = $1
            ORDER BY swift_code
            "#,
        )
        .bind(country_iso2)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists the branches referencing a headquarters in code order
    pub async fn list_by_headquarters(
        &self,
        headquarters_swift_code: &str,
    ) -> Result<Vec<BranchRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT swift_code, bank_name, country_iso2, country_name, address,
                   headquarters_swift_code
            FROM branches
            WHERE headquarters_swift_code = $1
            ORDER BY swift_code
            "#,
        )
        .bind(headquarters_swift_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        Self::count_in(&self.pool).await
    }

    pub async fn count_in<'e, E>(executor: E) -> Result<i64, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM branches")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    pub async fn exists<'e, E>(executor: E, swift_code: &str) -> Result<bool, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM branches WHERE swift_code = $1)",
        )
        .bind(swift_code)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Number of branches referencing a headquarters
    pub async fn count_by_headquarters<'e, E>(
        executor: E,
        headquarters_swift_code: &str,
    ) -> Result<i64, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM branches WHERE headquarters_swift_code = $1",
        )
        .bind(headquarters_swift_code)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Inserts a branch
    ///
    /// # Errors
    ///
    /// - `DatabaseError::DuplicateEntry` if the code is already stored
    /// - `DatabaseError::ForeignKeyViolation` if the headquarters is absent
    pub async fn insert<'e, E>(executor: E, row: &BranchRow) -> Result<(), DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO branches
                (swift_code, bank_name, country_iso2, country_name, address, headquarters_swift_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&row.swift_code)
        .bind(&row.bank_name)
        .bind(&row.country_iso2)
        .bind(&row.country_name)
        .bind(&row.address)
        .bind(&row.headquarters_swift_code)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(executor: E, swift_code: &str) -> Result<bool, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM branches WHERE swift_code = $1")
            .bind(swift_code)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
