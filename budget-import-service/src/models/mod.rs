//! Domain models for budget-import-service.

pub mod regions;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Number of fixed budget categories; spreadsheet columns map to ordinals
/// 1..=17 regardless of how many columns a row actually carried.
pub const BUDGET_CATEGORY_COUNT: usize = 17;

// ============================================================================
// Organizational Unit Models
// ============================================================================

/// A hospital or health office eligible as a budget-import match target.
/// Sourced read-only from the registry for the duration of one run.
/// `unit_type` carries `hospital` or `health_office`, enforced by the
/// schema; the registry is never written through this service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrganizationalUnit {
    pub unit_id: Uuid,
    pub name: String,
    pub unit_type: String,
    pub province_id: Option<Uuid>,
    pub health_region_id: Option<i16>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Province {
    pub province_id: Uuid,
    pub name: String,
}

// ============================================================================
// Budget Models
// ============================================================================

/// One of the 17 fixed assessment budget categories. The ordinal is the
/// 1-indexed spreadsheet position, distinct from the row identifier.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BudgetCategory {
    pub category_id: Uuid,
    pub ordinal: i16,
    pub name: String,
}

/// One persisted (unit, fiscal year, category) budget amount.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BudgetRecord {
    pub record_id: Uuid,
    pub unit_id: Uuid,
    pub fiscal_year: i32,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub created_utc: DateTime<Utc>,
}

/// A budget figure staged for insertion during a commit.
#[derive(Debug, Clone)]
pub struct NewBudgetRecord {
    pub category_id: Uuid,
    pub amount: Decimal,
}
