//! Candidate selection: match one imported row against the unit registry.

use crate::matching::{normalize, similarity};
use crate::models::{OrganizationalUnit, Province};
use serde::Serialize;
use uuid::Uuid;

/// Minimum similarity (inclusive) a candidate must reach to count as a
/// fuzzy match.
pub const FUZZY_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Exact,
    Fuzzy,
    Unmatched,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Unmatched => "unmatched",
        }
    }
}

/// Outcome of matching one imported row against the registry snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub unit_name: String,
    pub matched_unit_name: Option<String>,
    pub matched_unit_id: Option<Uuid>,
    pub matched_unit_type: Option<String>,
    pub similarity: f64,
    pub status: MatchStatus,
}

/// Match one row against the full registry snapshot.
///
/// Passes run in strict order, returning at the first that yields a result:
/// exact (normalized or raw equality), province-scoped fuzzy, unscoped
/// fallback fuzzy (only when a province was resolved but its scope missed
/// the threshold), otherwise unmatched carrying the best score seen.
pub fn match_unit(
    unit_name: &str,
    province: &str,
    units: &[OrganizationalUnit],
    provinces: &[Province],
) -> MatchResult {
    let normalized_input = normalize(unit_name);

    // Exact pass: first unit whose normalized name equals the normalized
    // input, or whose raw name is byte-equal, wins without any scoring.
    for unit in units {
        if normalize(&unit.name) == normalized_input || unit.name == unit_name {
            return MatchResult {
                unit_name: unit_name.to_string(),
                matched_unit_name: Some(unit.name.clone()),
                matched_unit_id: Some(unit.unit_id),
                matched_unit_type: Some(unit.unit_type.clone()),
                similarity: 100.0,
                status: MatchStatus::Exact,
            };
        }
    }

    // Province-scoped fuzzy pass. An empty scope falls back to the full
    // candidate set rather than guaranteeing an unmatched row.
    let resolved_province = resolve_province(province, provinces);
    let scoped: Vec<&OrganizationalUnit> = match resolved_province {
        Some(p) => {
            let narrowed: Vec<&OrganizationalUnit> = units
                .iter()
                .filter(|u| u.province_id == Some(p.province_id))
                .collect();
            if narrowed.is_empty() {
                units.iter().collect()
            } else {
                narrowed
            }
        }
        None => units.iter().collect(),
    };

    let mut best = best_candidate(&normalized_input, &scoped);

    // Fallback unscoped pass: the resolved province narrowed the field too
    // far, so rescore the entire registry.
    if resolved_province.is_some() && score_of(&best) < FUZZY_THRESHOLD {
        let all: Vec<&OrganizationalUnit> = units.iter().collect();
        let unscoped = best_candidate(&normalized_input, &all);
        if score_of(&unscoped) > score_of(&best) {
            best = unscoped;
        }
    }

    match best {
        Some((unit, score)) if score >= FUZZY_THRESHOLD => MatchResult {
            unit_name: unit_name.to_string(),
            matched_unit_name: Some(unit.name.clone()),
            matched_unit_id: Some(unit.unit_id),
            matched_unit_type: Some(unit.unit_type.clone()),
            similarity: round1(score),
            status: MatchStatus::Fuzzy,
        },
        _ => MatchResult {
            unit_name: unit_name.to_string(),
            matched_unit_name: None,
            matched_unit_id: None,
            matched_unit_type: None,
            similarity: round1(score_of(&best).max(0.0)),
            status: MatchStatus::Unmatched,
        },
    }
}

/// Resolve a free-text province to a registry province: exact name match or
/// substring containment in either direction, first match wins. Empty input
/// resolves nothing (containment on "" would match every province).
fn resolve_province<'a>(input: &str, provinces: &'a [Province]) -> Option<&'a Province> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    provinces
        .iter()
        .find(|p| p.name == input || p.name.contains(input) || input.contains(p.name.as_str()))
}

/// Highest-scoring candidate. Retention is strictly-greater, so the
/// first-encountered maximum survives ties.
fn best_candidate<'a>(
    normalized_input: &str,
    candidates: &[&'a OrganizationalUnit],
) -> Option<(&'a OrganizationalUnit, f64)> {
    let mut best: Option<(&OrganizationalUnit, f64)> = None;
    for unit in candidates {
        let score = similarity(normalized_input, &normalize(&unit.name));
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((unit, score));
        }
    }
    best
}

fn score_of(best: &Option<(&OrganizationalUnit, f64)>) -> f64 {
    best.map_or(f64::NEG_INFINITY, |(_, s)| s)
}

fn round1(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
