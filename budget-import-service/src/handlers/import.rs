use crate::dtos::{BudgetImportRequest, ImportMode, ImportResponse, PreviewResponse};
use crate::services::importer::{self, ReferenceData};
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

/// POST /budget-imports - two-phase budget import.
///
/// Preview mode stops after matching and reports the match summary; import
/// mode additionally replaces budget records per matched row, collecting
/// row-level errors without aborting the batch.
pub async fn import_budgets(
    State(state): State<AppState>,
    Json(request): Json<BudgetImportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fiscal_year = request
        .fiscal_year
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("fiscal_year is required")))?;
    let rows = request
        .data
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("data must be an array of rows")))?;
    let mode = match request.mode.as_deref() {
        None => ImportMode::Preview,
        Some(raw) => ImportMode::parse(raw).ok_or_else(|| {
            AppError::BadRequest(anyhow::anyhow!("mode must be \"preview\" or \"import\""))
        })?,
    };

    tracing::info!(
        fiscal_year,
        mode = mode.as_str(),
        rows = rows.len(),
        "Budget import requested"
    );

    // One registry snapshot per run; a fetch failure aborts before any row
    // is processed.
    let reference = ReferenceData::load(state.store.as_ref()).await?;

    let outcome = importer::run(state.store.as_ref(), &reference, fiscal_year, &rows, mode).await?;

    let response = match mode {
        ImportMode::Preview => Json(PreviewResponse {
            success: true,
            mode: mode.as_str(),
            summary: outcome.summary,
            matches: outcome.matches,
        })
        .into_response(),
        ImportMode::Import => Json(ImportResponse {
            success: true,
            mode: mode.as_str(),
            imported: outcome.imported,
            failed: outcome.failed,
            errors: outcome.errors,
            matches: outcome.matches,
        })
        .into_response(),
    };

    Ok(response)
}
