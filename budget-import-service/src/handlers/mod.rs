//! HTTP handlers for budget-import-service.

pub mod health;
pub mod import;
pub mod reference;

pub use health::{health_check, metrics_handler, readiness_check};
pub use import::import_budgets;
pub use reference::{list_provinces, list_unit_budgets, list_units};
