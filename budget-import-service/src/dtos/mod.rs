//! Request/response DTOs for budget-import-service.

pub mod import;
pub mod reference;

pub use import::{
    BudgetImportRequest, ImportMode, ImportResponse, ImportRow, MatchSummary, PreviewResponse,
    RowError,
};
pub use reference::ProvinceResponse;
