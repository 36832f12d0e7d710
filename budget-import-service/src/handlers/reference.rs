use crate::dtos::ProvinceResponse;
use crate::models::regions::health_region_for_province;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;
use uuid::Uuid;

/// GET /reference/units - the canonical match targets, for manual
/// resolution of unmatched rows in the portal.
pub async fn list_units(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let units = state.store.list_units().await?;
    Ok(Json(units))
}

/// GET /reference/provinces - provinces with their health region.
pub async fn list_provinces(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let provinces = state.store.list_provinces().await?;
    let provinces: Vec<ProvinceResponse> = provinces
        .into_iter()
        .map(|p| {
            let health_region = health_region_for_province(&p.name);
            ProvinceResponse {
                province_id: p.province_id,
                name: p.name,
                health_region,
            }
        })
        .collect();
    Ok(Json(provinces))
}

#[derive(Debug, Deserialize)]
pub struct BudgetListParams {
    pub fiscal_year: Option<i32>,
}

/// GET /units/:unit_id/budgets - committed budget records for one unit and
/// fiscal year.
pub async fn list_unit_budgets(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    Query(params): Query<BudgetListParams>,
) -> Result<impl IntoResponse, AppError> {
    let fiscal_year = params
        .fiscal_year
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("fiscal_year is required")))?;

    let records = state.store.list_budgets(unit_id, fiscal_year).await?;
    Ok(Json(records))
}
