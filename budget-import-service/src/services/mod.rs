//! Service layer: persistence, metrics and the import pipeline.

pub mod database;
pub mod importer;
pub mod metrics;

pub use database::{BudgetImportStore, Database};
pub use metrics::{get_metrics, init_metrics};
