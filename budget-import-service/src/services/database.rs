//! Persistence layer for budget-import-service.

use crate::models::{BudgetCategory, BudgetRecord, NewBudgetRecord, OrganizationalUnit, Province};
use crate::services::metrics::DB_QUERY_DURATION;
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Store surface the import pipeline and handlers run against. The
/// production implementation is Postgres; tests substitute an in-memory
/// store.
#[async_trait]
pub trait BudgetImportStore: Send + Sync {
    async fn health_check(&self) -> Result<(), AppError>;

    /// Match targets, in a stable order. Treated as an immutable snapshot
    /// for the duration of one import run.
    async fn list_units(&self) -> Result<Vec<OrganizationalUnit>, AppError>;

    async fn list_provinces(&self) -> Result<Vec<Province>, AppError>;

    async fn list_budget_categories(&self) -> Result<Vec<BudgetCategory>, AppError>;

    /// Replace all budget records for one unit and fiscal year: delete the
    /// existing records, then insert the staged ones. Runs as a single
    /// transaction so the pair is the unit of atomicity.
    async fn replace_budgets(
        &self,
        unit_id: Uuid,
        fiscal_year: i32,
        records: &[NewBudgetRecord],
    ) -> Result<(), AppError>;

    async fn list_budgets(
        &self,
        unit_id: Uuid,
        fiscal_year: i32,
    ) -> Result<Vec<BudgetRecord>, AppError>;
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "budget-import-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl BudgetImportStore for Database {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;

        timer.observe_duration();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_units(&self) -> Result<Vec<OrganizationalUnit>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_units"])
            .start_timer();

        let units = sqlx::query_as::<_, OrganizationalUnit>(
            r#"
            SELECT unit_id, name, unit_type, province_id, health_region_id
            FROM organizational_units
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list units: {}", e)))?;

        timer.observe_duration();
        Ok(units)
    }

    #[instrument(skip(self))]
    async fn list_provinces(&self) -> Result<Vec<Province>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_provinces"])
            .start_timer();

        let provinces = sqlx::query_as::<_, Province>(
            r#"
            SELECT province_id, name
            FROM provinces
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list provinces: {}", e)))?;

        timer.observe_duration();
        Ok(provinces)
    }

    #[instrument(skip(self))]
    async fn list_budget_categories(&self) -> Result<Vec<BudgetCategory>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_budget_categories"])
            .start_timer();

        let categories = sqlx::query_as::<_, BudgetCategory>(
            r#"
            SELECT category_id, ordinal, name
            FROM budget_categories
            ORDER BY ordinal
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list budget categories: {}", e))
        })?;

        timer.observe_duration();
        Ok(categories)
    }

    #[instrument(skip(self, records), fields(unit_id = %unit_id, fiscal_year = fiscal_year, count = records.len()))]
    async fn replace_budgets(
        &self,
        unit_id: Uuid,
        fiscal_year: i32,
        records: &[NewBudgetRecord],
    ) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["replace_budgets"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        sqlx::query(
            r#"
            DELETE FROM budget_records
            WHERE unit_id = $1 AND fiscal_year = $2
            "#,
        )
        .bind(unit_id)
        .bind(fiscal_year)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to delete budget records: {}", e))
        })?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO budget_records (record_id, unit_id, fiscal_year, category_id, amount)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(unit_id)
            .bind(fiscal_year)
            .bind(record.category_id)
            .bind(record.amount)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to insert budget record: {}", e))
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit budget records: {}", e))
        })?;

        timer.observe_duration();
        Ok(())
    }

    #[instrument(skip(self), fields(unit_id = %unit_id, fiscal_year = fiscal_year))]
    async fn list_budgets(
        &self,
        unit_id: Uuid,
        fiscal_year: i32,
    ) -> Result<Vec<BudgetRecord>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_budgets"])
            .start_timer();

        let records = sqlx::query_as::<_, BudgetRecord>(
            r#"
            SELECT r.record_id, r.unit_id, r.fiscal_year, r.category_id, r.amount, r.created_utc
            FROM budget_records r
            INNER JOIN budget_categories c ON c.category_id = r.category_id
            WHERE r.unit_id = $1 AND r.fiscal_year = $2
            ORDER BY c.ordinal
            "#,
        )
        .bind(unit_id)
        .bind(fiscal_year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list budget records: {}", e))
        })?;

        timer.observe_duration();
        Ok(records)
    }
}
