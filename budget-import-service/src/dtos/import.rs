use crate::matching::MatchResult;
use crate::models::BUDGET_CATEGORY_COUNT;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// One parsed spreadsheet line as delivered by the upload parser. Budget
/// values are keyed by 1-indexed ordinal strings ("1".."17").
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRow {
    pub unit_name: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub budgets: HashMap<String, Value>,
}

impl ImportRow {
    /// Budget amounts for all 17 ordinals, in ordinal order. Short rows are
    /// zero-filled; missing or unparseable values read as zero.
    pub fn budget_amounts(&self) -> Vec<(i16, Decimal)> {
        (1..=BUDGET_CATEGORY_COUNT as i16)
            .map(|ordinal| {
                let amount = self
                    .budgets
                    .get(&ordinal.to_string())
                    .map(coerce_amount)
                    .unwrap_or(Decimal::ZERO);
                (ordinal, amount)
            })
            .collect()
    }
}

fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .unwrap_or(Decimal::ZERO),
        Value::String(s) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Preview,
    Import,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Import => "import",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "preview" => Some(Self::Preview),
            "import" => Some(Self::Import),
            _ => None,
        }
    }
}

/// POST /budget-imports request body. Fields are optional so that presence
/// checks can produce the caller-facing error envelope instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct BudgetImportRequest {
    pub fiscal_year: Option<i32>,
    pub data: Option<Vec<ImportRow>>,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchSummary {
    pub total: usize,
    pub exact: usize,
    pub fuzzy: usize,
    pub unmatched: usize,
}

/// A row-level commit failure. Never fatal for the batch.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    pub unit_name: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub mode: &'static str,
    pub summary: MatchSummary,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub mode: &'static str,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<RowError>,
    pub matches: Vec<MatchResult>,
}
