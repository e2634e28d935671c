use puzzle_engine::{
    codec, filter_candidates, CandidateFilter, FeedbackPattern, FilterKind, LaneFilter,
    ScalarFilter, WordTable,
};

fn table() -> WordTable {
    WordTable::new([
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
        "abbey", "babes", "mamma", "gamma", "sassy", "assay", "geese", "creep", "speed", "eerie",
        "llama", "cigar", "those", "sores",
        "cried", "brine", "crone", "crepe", "cable", "caper",
    ])
}

#[test]
fn test_lane_filter_matches_scalar() {
    let table = table();
    let all = table.all_indices();
    for guess in ["crane", "abbey", "sassy", "eerie", "cigar"] {
        let packed = codec::encode(guess);
        for p in 0..FeedbackPattern::NUM_PATTERNS {
            let pattern = FeedbackPattern(p as u8);
            let scalar = ScalarFilter.filter(&table, &all, packed, pattern);
            let lanes = LaneFilter.filter(&table, &all, packed, pattern);
            assert_eq!(scalar, lanes, "{guess} {}", pattern.to_digit_string());
        }
    }
}

#[test]
fn test_filter_keeps_exactly_matching_feedback() {
    let table = table();
    let all = table.all_indices();
    let guess = codec::encode("crane");
    for target in ["crate", "cried", "gamma", "those"] {
        let pattern = FeedbackPattern::calculate(guess, codec::encode(target));
        let kept = FilterKind::Lanes.filter(&table, &all, guess, pattern);
        assert!(kept.contains(&table.position(target).unwrap()));
        for &i in &kept {
            assert_eq!(FeedbackPattern::calculate(guess, table.packed(i)), pattern);
        }
    }
}

#[test]
fn test_filter_is_idempotent() {
    let table = table();
    let all = table.all_indices();
    let guess = codec::encode("slate");
    let pattern = FeedbackPattern::from_words("slate", "crate");
    for kind in [FilterKind::Scalar, FilterKind::Lanes] {
        let once = kind.filter(&table, &all, guess, pattern);
        let twice = kind.filter(&table, &once, guess, pattern);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_filter_preserves_order_of_subset() {
    let table = table();
    let subset = vec![9, 3, 2, 0];
    let guess = codec::encode("zzzzz");
    let kept = LaneFilter.filter(&table, &subset, guess, FeedbackPattern(0));
    assert_eq!(kept, subset);
}

#[test]
fn test_filter_candidates_degenerate_input() {
    let table = table();
    let all = table.all_indices();
    assert!(filter_candidates(&table, &all, "cran", "22222", FilterKind::Lanes).is_empty());
    assert!(filter_candidates(&table, &all, "crane", "2222", FilterKind::Lanes).is_empty());
    assert!(filter_candidates(&table, &all, "crane", "22a22", FilterKind::Scalar).is_empty());
    assert!(filter_candidates(&table, &[], "crane", "00000", FilterKind::Scalar).is_empty());

    let kept = filter_candidates(&table, &all, "crane", "22222", FilterKind::Lanes);
    assert_eq!(kept, vec![table.position("crane").unwrap()]);
}
