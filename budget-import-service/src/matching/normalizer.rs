//! Unit-name normalization.
//!
//! Spreadsheets arrive with the usual ministry abbreviations (สสจ., รพช.,
//! สนง.เขต ...) while the registry stores full names. Expansion happens
//! before any scoring so that an abbreviated row can still match exactly.

use once_cell::sync::Lazy;
use regex::Regex;

/// Abbreviation rules, tried in priority order; only the first matching
/// rule is applied. Patterns are anchored at the start of the name.
static ABBREVIATION_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // Provincial health office, with or without the trailing dot.
        (r"(?i)^สสจ\.?", "สำนักงานสาธารณสุขจังหวัด"),
        // District health office.
        (r"(?i)^สสอ\.", "สำนักงานสาธารณสุขอำเภอ"),
        // General hospital.
        (r"(?i)^รพท\.", "โรงพยาบาลทั่วไป"),
        // Regional hospital center.
        (r"(?i)^รพศ\.", "โรงพยาบาลศูนย์"),
        // Community hospital.
        (r"(?i)^รพช\.", "โรงพยาบาลชุมชน"),
        // Bare hospital prefix keeps its canonical short form; only the
        // gap after the prefix is dropped.
        (r"(?i)^รพ\.\s*", "รพ."),
        // Regional health office.
        (r"(?i)^สนง\.\s*เขต", "สำนักงานเขตสุขภาพ"),
        // Health-service-support office.
        (r"(?i)^สบส\.", "สำนักงานสนับสนุนบริการสุขภาพ"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("invalid abbreviation pattern"),
            replacement,
        )
    })
    .collect()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("invalid pattern"));

/// Canonicalize a free-text unit name: trim, expand at most one known
/// abbreviation prefix, and collapse whitespace runs. Pure and idempotent.
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();

    let mut expanded = trimmed.to_string();
    for (pattern, replacement) in ABBREVIATION_RULES.iter() {
        if pattern.is_match(trimmed) {
            expanded = pattern.replace(trimmed, *replacement).into_owned();
            break;
        }
    }

    WHITESPACE.replace_all(&expanded, " ").trim().to_string()
}
