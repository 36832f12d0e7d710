//! Common test utilities for budget-import-service integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use budget_import_service::config::{BudgetImportConfig, DatabaseConfig};
use budget_import_service::models::{
    BudgetCategory, BudgetRecord, NewBudgetRecord, OrganizationalUnit, Province,
    BUDGET_CATEGORY_COUNT,
};
use budget_import_service::services::BudgetImportStore;
use budget_import_service::startup::Application;
use chrono::Utc;
use service_core::config::{Config as CommonConfig, Environment};
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,budget_import_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn test_config() -> BudgetImportConfig {
    BudgetImportConfig {
        common: CommonConfig {
            port: 0,
            environment: Environment::Dev,
        },
        service_name: "budget-import-service-test".to_string(),
        service_version: "test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            url: String::new(), // Unused: tests run against the in-memory store
            max_connections: 1,
            min_connections: 1,
        },
    }
}

/// In-memory store seeded with a small unit registry.
pub struct MemoryStore {
    pub units: Vec<OrganizationalUnit>,
    pub provinces: Vec<Province>,
    pub categories: Vec<BudgetCategory>,
    /// Budget records keyed by (unit, fiscal year), replaced wholesale.
    pub budgets: Mutex<HashMap<(Uuid, i32), Vec<NewBudgetRecord>>>,
    /// Units whose replace_budgets call fails, to exercise row-level errors.
    pub fail_units: Vec<Uuid>,
}

impl MemoryStore {
    pub fn new(units: Vec<OrganizationalUnit>, provinces: Vec<Province>) -> Self {
        Self {
            units,
            provinces,
            categories: categories_17(),
            budgets: Mutex::new(HashMap::new()),
            fail_units: Vec::new(),
        }
    }

    pub fn failing_for(mut self, unit_id: Uuid) -> Self {
        self.fail_units.push(unit_id);
        self
    }

    pub fn stored_budgets(&self, unit_id: Uuid, fiscal_year: i32) -> Option<Vec<NewBudgetRecord>> {
        self.budgets
            .lock()
            .unwrap()
            .get(&(unit_id, fiscal_year))
            .cloned()
    }

    pub fn category_id_for_ordinal(&self, ordinal: i16) -> Uuid {
        self.categories
            .iter()
            .find(|c| c.ordinal == ordinal)
            .map(|c| c.category_id)
            .expect("ordinal out of range")
    }
}

#[async_trait]
impl BudgetImportStore for MemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_units(&self) -> Result<Vec<OrganizationalUnit>, AppError> {
        Ok(self.units.clone())
    }

    async fn list_provinces(&self) -> Result<Vec<Province>, AppError> {
        Ok(self.provinces.clone())
    }

    async fn list_budget_categories(&self) -> Result<Vec<BudgetCategory>, AppError> {
        Ok(self.categories.clone())
    }

    async fn replace_budgets(
        &self,
        unit_id: Uuid,
        fiscal_year: i32,
        records: &[NewBudgetRecord],
    ) -> Result<(), AppError> {
        if self.fail_units.contains(&unit_id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key value violates unique constraint"
            )));
        }
        self.budgets
            .lock()
            .unwrap()
            .insert((unit_id, fiscal_year), records.to_vec());
        Ok(())
    }

    async fn list_budgets(
        &self,
        unit_id: Uuid,
        fiscal_year: i32,
    ) -> Result<Vec<BudgetRecord>, AppError> {
        let budgets = self.budgets.lock().unwrap();
        let records = budgets
            .get(&(unit_id, fiscal_year))
            .map(|staged| {
                staged
                    .iter()
                    .map(|r| BudgetRecord {
                        record_id: Uuid::new_v4(),
                        unit_id,
                        fiscal_year,
                        category_id: r.category_id,
                        amount: r.amount,
                        created_utc: Utc::now(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(records)
    }
}

/// Test application wrapper.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryStore>,
}

/// Spawn a test application over the given store and return an HTTP client.
pub async fn spawn_app(store: MemoryStore) -> TestApp {
    init_tracing();

    let store = Arc::new(store);
    let app = Application::build_with_store(test_config(), store.clone())
        .await
        .expect("Failed to build application");
    let port = app.port();

    // Start the application in the background
    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        store,
    }
}

// ============================================================================
// Registry builders
// ============================================================================

pub fn province(name: &str) -> Province {
    Province {
        province_id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

pub fn hospital(name: &str, province_id: Option<Uuid>) -> OrganizationalUnit {
    OrganizationalUnit {
        unit_id: Uuid::new_v4(),
        name: name.to_string(),
        unit_type: "hospital".to_string(),
        province_id,
        health_region_id: None,
    }
}

pub fn health_office(name: &str, province_id: Option<Uuid>) -> OrganizationalUnit {
    OrganizationalUnit {
        unit_id: Uuid::new_v4(),
        name: name.to_string(),
        unit_type: "health_office".to_string(),
        province_id,
        health_region_id: Some(1),
    }
}

pub fn categories_17() -> Vec<BudgetCategory> {
    (1..=BUDGET_CATEGORY_COUNT as i16)
        .map(|ordinal| BudgetCategory {
            category_id: Uuid::new_v4(),
            ordinal,
            name: format!("Category {}", ordinal),
        })
        .collect()
}
