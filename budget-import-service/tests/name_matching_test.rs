//! Unit tests for the name reconciliation engine: normalization, similarity
//! scoring and candidate matching.

mod common;

use budget_import_service::matching::{
    match_unit, normalize, similarity, MatchStatus, FUZZY_THRESHOLD,
};
use common::{hospital, province};

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn normalize_expands_provincial_health_office_with_dot() {
    assert_eq!(
        normalize("สสจ.เชียงใหม่"),
        "สำนักงานสาธารณสุขจังหวัดเชียงใหม่"
    );
}

#[test]
fn normalize_expands_provincial_health_office_without_dot() {
    assert_eq!(
        normalize("สสจเชียงใหม่"),
        "สำนักงานสาธารณสุขจังหวัดเชียงใหม่"
    );
}

#[test]
fn normalize_expands_district_health_office() {
    assert_eq!(normalize("สสอ.เมืองขอนแก่น"), "สำนักงานสาธารณสุขอำเภอเมืองขอนแก่น");
}

#[test]
fn normalize_expands_hospital_type_prefixes() {
    assert_eq!(normalize("รพท.ลำปาง"), "โรงพยาบาลทั่วไปลำปาง");
    assert_eq!(normalize("รพศ.ขอนแก่น"), "โรงพยาบาลศูนย์ขอนแก่น");
    assert_eq!(normalize("รพช.แม่ริม"), "โรงพยาบาลชุมชนแม่ริม");
}

#[test]
fn normalize_drops_gap_after_bare_hospital_prefix() {
    assert_eq!(normalize("รพ. เชียงใหม่"), "รพ.เชียงใหม่");
    assert_eq!(normalize("รพ.เชียงใหม่"), "รพ.เชียงใหม่");
}

#[test]
fn normalize_expands_regional_office_and_support_office() {
    assert_eq!(normalize("สนง.เขต 1"), "สำนักงานเขตสุขภาพ 1");
    assert_eq!(normalize("สบส.กรุงเทพ"), "สำนักงานสนับสนุนบริการสุขภาพกรุงเทพ");
}

#[test]
fn normalize_trims_and_collapses_whitespace() {
    assert_eq!(normalize("  โรงพยาบาล   ทดสอบ  "), "โรงพยาบาล ทดสอบ");
}

#[test]
fn normalize_passes_unabbreviated_names_through() {
    assert_eq!(normalize("โรงพยาบาลทดสอบ"), "โรงพยาบาลทดสอบ");
}

#[test]
fn normalize_is_idempotent_for_every_expansion_rule() {
    let samples = [
        "สสจ.เชียงใหม่",
        "สสอ.เมืองขอนแก่น",
        "รพท.ลำปาง",
        "รพศ.ขอนแก่น",
        "รพช.แม่ริม",
        "รพ. เชียงใหม่",
        "สนง.เขต 1",
        "สบส.กรุงเทพ",
    ];
    for sample in samples {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once, "not idempotent for {sample}");
    }
}

// ============================================================================
// Similarity
// ============================================================================

#[test]
fn similarity_of_identical_strings_is_100() {
    assert_eq!(similarity("โรงพยาบาลทดสอบ", "โรงพยาบาลทดสอบ"), 100.0);
}

#[test]
fn similarity_of_two_empty_strings_is_100() {
    assert_eq!(similarity("", ""), 100.0);
}

#[test]
fn similarity_against_empty_string_is_0() {
    assert_eq!(similarity("abc", ""), 0.0);
    assert_eq!(similarity("", "abc"), 0.0);
}

#[test]
fn similarity_is_symmetric() {
    assert_eq!(similarity("kitten", "sitting"), similarity("sitting", "kitten"));
}

#[test]
fn similarity_matches_levenshtein_formula() {
    // kitten -> sitting: distance 3 over max length 7
    let expected = (7.0 - 3.0) / 7.0 * 100.0;
    assert!((similarity("kitten", "sitting") - expected).abs() < 1e-9);
}

#[test]
fn similarity_of_disjoint_strings_is_0() {
    assert_eq!(similarity("abc", "xyz"), 0.0);
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn exact_match_on_raw_name() {
    let units = vec![hospital("โรงพยาบาลทดสอบ", None)];
    let result = match_unit("โรงพยาบาลทดสอบ", "", &units, &[]);

    assert_eq!(result.status, MatchStatus::Exact);
    assert_eq!(result.similarity, 100.0);
    assert_eq!(result.matched_unit_id, Some(units[0].unit_id));
    assert_eq!(result.matched_unit_name.as_deref(), Some("โรงพยาบาลทดสอบ"));
    assert_eq!(result.matched_unit_type.as_deref(), Some("hospital"));
}

#[test]
fn exact_match_via_abbreviation_expansion() {
    let units = vec![hospital("สำนักงานสาธารณสุขจังหวัดเชียงใหม่", None)];
    let result = match_unit("สสจ.เชียงใหม่", "", &units, &[]);

    assert_eq!(result.status, MatchStatus::Exact);
    assert_eq!(result.similarity, 100.0);
    assert_eq!(result.matched_unit_id, Some(units[0].unit_id));
}

#[test]
fn exact_match_ignores_province_scope() {
    let alpha = province("Alpha");
    let beta = province("Beta");
    let units = vec![hospital("abcdefghij", Some(beta.province_id))];

    // The registry unit sits in Beta but the row claims Alpha; exact
    // equality still wins without scoring.
    let result = match_unit("abcdefghij", "Alpha", &units, &[alpha, beta]);
    assert_eq!(result.status, MatchStatus::Exact);
}

#[test]
fn fuzzy_match_at_exactly_the_threshold() {
    // distance 3 over length 10 scores exactly 70.0
    let units = vec![hospital("abcdefgxyz", None)];
    let result = match_unit("abcdefghij", "", &units, &[]);

    assert_eq!(result.status, MatchStatus::Fuzzy);
    assert_eq!(result.similarity, 70.0);
    assert_eq!(result.matched_unit_id, Some(units[0].unit_id));
}

#[test]
fn just_below_threshold_is_unmatched() {
    // distance 4 over length 13 scores 69.23, rounded to 69.2
    let units = vec![hospital("abcdefghiwxyz", None)];
    let result = match_unit("abcdefghijklm", "", &units, &[]);

    assert_eq!(result.status, MatchStatus::Unmatched);
    assert_eq!(result.similarity, 69.2);
    assert_eq!(result.matched_unit_id, None);
}

#[test]
fn unmatched_below_threshold_reports_best_score() {
    // distance 5 over length 10 scores 50.0
    let units = vec![hospital("abcdevwxyz", None)];
    let result = match_unit("abcdefghij", "", &units, &[]);

    assert_eq!(result.status, MatchStatus::Unmatched);
    assert_eq!(result.similarity, 50.0);
    assert_eq!(result.matched_unit_id, None);
    assert_eq!(result.matched_unit_name, None);
}

#[test]
fn unmatched_with_empty_registry_reports_zero() {
    let result = match_unit("โรงพยาบาลทดสอบ", "", &[], &[]);

    assert_eq!(result.status, MatchStatus::Unmatched);
    assert_eq!(result.similarity, 0.0);
}

#[test]
fn province_scope_beats_better_unscoped_candidate() {
    let alpha = province("Alpha");
    let beta = province("Beta");
    // Alpha candidate scores 80, Beta candidate scores 90.
    let in_alpha = hospital("abcdefghzz", Some(alpha.province_id));
    let in_beta = hospital("abcdefghiz", Some(beta.province_id));
    let units = vec![in_beta.clone(), in_alpha.clone()];

    let result = match_unit("abcdefghij", "Alpha", &units, &[alpha, beta]);

    assert_eq!(result.status, MatchStatus::Fuzzy);
    assert_eq!(result.similarity, 80.0);
    assert_eq!(result.matched_unit_id, Some(in_alpha.unit_id));
}

#[test]
fn fallback_rescores_whole_registry_when_scope_misses_threshold() {
    let alpha = province("Alpha");
    let beta = province("Beta");
    let in_alpha = hospital("zzzzzzzzzz", Some(alpha.province_id));
    let in_beta = hospital("abcdefghiz", Some(beta.province_id));
    let units = vec![in_alpha, in_beta.clone()];

    let result = match_unit("abcdefghij", "Alpha", &units, &[alpha, beta]);

    assert_eq!(result.status, MatchStatus::Fuzzy);
    assert_eq!(result.similarity, 90.0);
    assert_eq!(result.matched_unit_id, Some(in_beta.unit_id));
}

#[test]
fn fallback_still_unmatched_when_nothing_reaches_threshold() {
    let alpha = province("Alpha");
    let beta = province("Beta");
    // Alpha candidate scores 0, Beta candidate scores 50.
    let units = vec![
        hospital("zzzzzzzzzz", Some(alpha.province_id)),
        hospital("abcdevwxyz", Some(beta.province_id)),
    ];

    let result = match_unit("abcdefghij", "Alpha", &units, &[alpha, beta]);

    assert_eq!(result.status, MatchStatus::Unmatched);
    assert_eq!(result.similarity, 50.0);
}

#[test]
fn province_resolves_by_substring_containment() {
    let chiang_mai = province("เชียงใหม่");
    let other = province("ลำปาง");
    let scoped = hospital("abcdefghzz", Some(chiang_mai.province_id));
    let unscoped = hospital("abcdefghiz", Some(other.province_id));
    let units = vec![unscoped, scoped.clone()];

    // "จ.เชียงใหม่" contains the registry province name, so the scope
    // narrows to Chiang Mai and its 80-point candidate wins over the 90.
    let result = match_unit("abcdefghij", "จ.เชียงใหม่", &units, &[chiang_mai, other]);

    assert_eq!(result.matched_unit_id, Some(scoped.unit_id));
    assert_eq!(result.similarity, 80.0);
}

#[test]
fn unresolved_province_falls_back_to_full_registry() {
    let alpha = province("Alpha");
    let units = vec![hospital("abcdefghiz", Some(alpha.province_id))];

    let result = match_unit("abcdefghij", "Nowhere", &units, &[alpha]);

    assert_eq!(result.status, MatchStatus::Fuzzy);
    assert_eq!(result.similarity, 90.0);
}

#[test]
fn resolved_province_with_no_units_keeps_full_candidate_set() {
    let alpha = province("Alpha");
    let units = vec![hospital("abcdefghiz", None)];

    let result = match_unit("abcdefghij", "Alpha", &units, std::slice::from_ref(&alpha));

    assert_eq!(result.status, MatchStatus::Fuzzy);
    assert_eq!(result.similarity, 90.0);
}

#[test]
fn tie_keeps_first_encountered_candidate() {
    let first = hospital("abcdefghix", None);
    let second = hospital("abcdefghiy", None);
    let units = vec![first.clone(), second];

    let result = match_unit("abcdefghij", "", &units, &[]);

    assert_eq!(result.similarity, 90.0);
    assert_eq!(result.matched_unit_id, Some(first.unit_id));
}

#[test]
fn abbreviated_hospital_name_does_not_reach_full_registry_name() {
    // The bare "รพ." prefix keeps its short form, so the abbreviated row
    // stays far from the full registry spelling and drops below threshold.
    let units = vec![hospital("โรงพยาบาลเชียงใหม่", None)];
    let result = match_unit("รพ.เชียงใหม่", "", &units, &[]);

    assert_eq!(result.status, MatchStatus::Unmatched);
    assert!(result.similarity < FUZZY_THRESHOLD);
    assert!(result.similarity > 0.0);
}
