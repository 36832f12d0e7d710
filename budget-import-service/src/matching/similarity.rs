//! Levenshtein similarity scaled to a 0-100 percentage.

use strsim::normalized_levenshtein;

/// Similarity between two strings as a percentage: the Levenshtein edit
/// distance over the longer length, inverted and scaled to 0-100.
/// Two empty strings count as identical. Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}
