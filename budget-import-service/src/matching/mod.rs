//! Unit-name reconciliation engine: normalization, similarity scoring and
//! candidate matching for imported spreadsheet rows.

pub mod matcher;
pub mod normalizer;
pub mod similarity;

pub use matcher::{match_unit, MatchResult, MatchStatus, FUZZY_THRESHOLD};
pub use normalizer::normalize;
pub use similarity::similarity;
