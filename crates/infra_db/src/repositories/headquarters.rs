//! Headquarters repository implementation
//!
//! Database access for the `headquarters` table. Reads go through the pool;
//! the write-side functions accept any executor so they can run inside a
//! transaction.

use sqlx::{FromRow, PgExecutor, PgPool};

use crate::error::DatabaseError;

/// Database row for a headquarters
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct HeadquartersRow {
    pub swift_code: String,
    pub bank_name: String,
    pub country_iso2: String,
    pub country_name: String,
    pub address: Option<String>,
}

/// Repository for the `headquarters` table
#[derive(Debug, Clone)]
pub struct HeadquartersRepository {
    pool: PgPool,
}

impl HeadquartersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a headquarters by code, if present
    pub async fn find(&self, swift_code: &str) -> Result<Option<HeadquartersRow>, DatabaseError> {
        let row = sqlx::query_as::<_, HeadquartersRow>(
            r#"
            SELECT swift_code, bank_name, country_iso2, country_name, address
            FROM headquarters
            WHERE swift_code = $1
            "#,
        )
        .bind(swift_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists the headquarters of a country in code order
    pub async fn list_by_country(
        &self,
        country_iso2: &str,
    ) -> Result<Vec<HeadquartersRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, HeadquartersRow>(
            r#"
            SELECT swift_code, bank_name, country_iso2, country_name, address
            FROM headquarters
            WHERE country_iso2 = $1
            ORDER BY swift_code
            "#,
        )
        .bind(country_iso2)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Number of stored headquarters
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        Self::count_in(&self.pool).await
    }

    pub async fn count_in<'e, E>(executor: E) -> Result<i64, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM headquarters")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    pub async fn exists<'e, E>(executor: E, swift_code: &str) -> Result<bool, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM headquarters WHERE swift_code = $1)",
        )
        .bind(swift_code)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Inserts a headquarters
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` if the code is already stored.
    pub async fn insert<'e, E>(executor: E, row: &HeadquartersRow) -> Result<(), DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO headquarters (swift_code, bank_name, country_iso2, country_name, address)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&row.swift_code)
        .bind(&row.bank_name)
        .bind(&row.country_iso2)
        .bind(&row.country_name)
        .bind(&row.address)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Deletes a headquarters, returning whether a row was removed
    ///
    /// # Errors
    ///
    /// `DatabaseError::ForeignKeyViolation` while branches reference it.
    pub async fn delete<'e, E>(executor: E, swift_code: &str) -> Result<bool, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM headquarters WHERE swift_code = $1")
            .bind(swift_code)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
