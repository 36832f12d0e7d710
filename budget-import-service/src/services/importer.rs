//! Two-phase budget import pipeline.
//!
//! Every row is matched first; in import mode the matched rows are then
//! committed one at a time, each as its own delete-then-insert transaction.
//! A failing row is recorded and skipped, never aborting the batch.

use crate::dtos::{ImportMode, ImportRow, MatchSummary, RowError};
use crate::matching::{match_unit, MatchResult, MatchStatus};
use crate::models::{NewBudgetRecord, OrganizationalUnit, Province};
use crate::services::database::BudgetImportStore;
use crate::services::metrics;
use service_core::error::AppError;
use std::collections::HashMap;
use uuid::Uuid;

/// Immutable reference snapshot for one import run, fetched once before any
/// row is processed.
pub struct ReferenceData {
    pub units: Vec<OrganizationalUnit>,
    pub provinces: Vec<Province>,
    category_ids: HashMap<i16, Uuid>,
}

impl ReferenceData {
    /// Load the registry snapshot. A failure here is fatal for the whole
    /// request: matching is meaningless without a reference set.
    pub async fn load(store: &dyn BudgetImportStore) -> Result<Self, AppError> {
        let units = store.list_units().await?;
        let provinces = store.list_provinces().await?;
        let categories = store.list_budget_categories().await?;
        let category_ids = categories
            .into_iter()
            .map(|c| (c.ordinal, c.category_id))
            .collect();
        Ok(Self {
            units,
            provinces,
            category_ids,
        })
    }

    pub fn category_id(&self, ordinal: i16) -> Option<Uuid> {
        self.category_ids.get(&ordinal).copied()
    }
}

/// Outcome of one pipeline run. Preview runs leave the commit counters at
/// zero and `errors` empty.
pub struct ImportOutcome {
    pub matches: Vec<MatchResult>,
    pub summary: MatchSummary,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<RowError>,
}

/// Run the pipeline over all rows, in input order. The returned `matches`
/// stay index-aligned with `rows` so the caller can zip them back against
/// the original spreadsheet.
pub async fn run(
    store: &dyn BudgetImportStore,
    reference: &ReferenceData,
    fiscal_year: i32,
    rows: &[ImportRow],
    mode: ImportMode,
) -> Result<ImportOutcome, AppError> {
    let matches: Vec<MatchResult> = rows
        .iter()
        .map(|row| {
            match_unit(
                &row.unit_name,
                &row.province,
                &reference.units,
                &reference.provinces,
            )
        })
        .collect();

    for matched in &matches {
        metrics::record_row_match(matched.status.as_str());
    }

    let summary = MatchSummary {
        total: matches.len(),
        exact: count_status(&matches, MatchStatus::Exact),
        fuzzy: count_status(&matches, MatchStatus::Fuzzy),
        unmatched: count_status(&matches, MatchStatus::Unmatched),
    };

    let mut imported = 0;
    let mut errors = Vec::new();

    if mode == ImportMode::Import {
        for (row, matched) in rows.iter().zip(&matches) {
            let Some(unit_id) = matched.matched_unit_id else {
                errors.push(RowError {
                    unit_name: row.unit_name.clone(),
                    error: "no matching unit found".to_string(),
                });
                metrics::record_row_commit("unmatched");
                continue;
            };

            let records: Vec<NewBudgetRecord> = row
                .budget_amounts()
                .into_iter()
                .filter_map(|(ordinal, amount)| match reference.category_id(ordinal) {
                    Some(category_id) => Some(NewBudgetRecord {
                        category_id,
                        amount,
                    }),
                    None => {
                        tracing::warn!(
                            ordinal,
                            unit_name = %row.unit_name,
                            "No budget category for ordinal, skipping"
                        );
                        None
                    }
                })
                .collect();

            match store.replace_budgets(unit_id, fiscal_year, &records).await {
                Ok(()) => {
                    imported += 1;
                    metrics::record_row_commit("committed");
                }
                Err(e) => {
                    tracing::warn!(
                        unit_name = %row.unit_name,
                        error = %e,
                        "Budget row commit failed"
                    );
                    errors.push(RowError {
                        unit_name: row.unit_name.clone(),
                        error: e.to_string(),
                    });
                    metrics::record_row_commit("failed");
                }
            }
        }
    }

    let failed = errors.len();
    let status = if failed == 0 { "ok" } else { "partial" };
    metrics::record_import_run(mode.as_str(), status);

    tracing::info!(
        fiscal_year,
        mode = mode.as_str(),
        total = summary.total,
        exact = summary.exact,
        fuzzy = summary.fuzzy,
        unmatched = summary.unmatched,
        imported,
        failed,
        "Budget import run finished"
    );

    Ok(ImportOutcome {
        matches,
        summary,
        imported,
        failed,
        errors,
    })
}

fn count_status(matches: &[MatchResult], status: MatchStatus) -> usize {
    matches.iter().filter(|m| m.status == status).count()
}
