use puzzle_engine::solver::{adversarial_pattern, best_guess, entropy, pattern_counts};
use puzzle_engine::{
    codec, solve_to_target, FeedbackPattern, SolverConfig, SolverError, WordTable, WordleSolver,
};

fn get_test_words() -> WordTable {
    WordTable::new([
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ])
}

#[test]
fn test_solver_creation() {
    let table = get_test_words();
    let solver = WordleSolver::new(&table);
    assert_eq!(solver.remaining_count(), 10);
    assert!(!solver.is_hard_mode());
}

#[test]
fn test_table_skips_invalid_and_duplicate_words() {
    let table = WordTable::new(["crane", "CRANE", "cranes", "cr4ne", "Slate", "", "slate"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.text(0), "crane");
    assert_eq!(table.text(1), "slate");
}

#[test]
fn test_apply_feedback() {
    let table = get_test_words();
    let mut solver = WordleSolver::new(&table);

    let pattern = FeedbackPattern::from_words("crane", "crate");
    let left = solver.apply_feedback("crane", pattern).unwrap();

    assert!(left < 10);
    assert_eq!(left, solver.remaining_count());
    assert!(solver.possible_answers().contains(&"crate"));
    assert!(!solver.possible_answers().contains(&"crane"));
}

#[test]
fn test_apply_feedback_rejects_bad_input() {
    let table = get_test_words();
    let mut solver = WordleSolver::new(&table);
    assert!(matches!(
        solver.apply_feedback_str("crane", "22x22"),
        Err(SolverError::InvalidPattern(_))
    ));
    assert!(matches!(
        solver.apply_feedback("cranes", FeedbackPattern(0)),
        Err(SolverError::InvalidWord(_))
    ));
    assert_eq!(solver.remaining_count(), 10);
}

#[test]
fn test_find_best_guess() {
    let table = get_test_words();
    let solver = WordleSolver::new(&table);

    let analysis = solver.find_best_guess().unwrap();
    assert!(analysis.entropy > 0.0);
    assert!(analysis.entropy <= (10f64).log2() + 1e-9);
    assert_eq!(table.text(analysis.index), analysis.word);

    let top = solver.find_best_guesses(3);
    assert_eq!(top.len(), 3);
    assert_eq!(top[0], analysis);
    assert!(top.windows(2).all(|w| w[0].entropy >= w[1].entropy));
}

#[test]
fn test_entropy_bounds() {
    let table = get_test_words();
    let targets = table.all_indices();
    let max = (targets.len() as f64).log2();
    for entry in table.iter() {
        let h = entropy(&table, entry.packed, &targets);
        assert!(h >= 0.0 && h <= max + 1e-9, "{}: {}", entry.text, h);
    }
    // A single target carries no information.
    assert_eq!(entropy(&table, table.packed(0), &[3]), 0.0);
    assert_eq!(entropy(&table, table.packed(0), &[]), 0.0);
}

#[test]
fn test_pattern_counts_cover_targets() {
    let table = get_test_words();
    let targets = table.all_indices();
    let counts = pattern_counts(&table, codec::encode("raise"), &targets);
    assert_eq!(counts.iter().sum::<u32>() as usize, targets.len());
    assert_eq!(counts[FeedbackPattern::ALL_CORRECT.0 as usize], 1);
}

#[test]
fn test_best_guess_tie_prefers_earlier() {
    let table = get_test_words();
    let best = best_guess(&table, &[3, 1, 2], &[0]).unwrap();
    assert_eq!(best.index, 3);
    assert_eq!(best.entropy, 0.0);
    assert!(best_guess(&table, &[], &[0]).is_none());
}

#[test]
fn test_calculate_entropy_for_word() {
    let table = get_test_words();
    let solver = WordleSolver::new(&table);
    let best = solver.find_best_guess().unwrap();
    let h = solver.calculate_entropy_for_word(&best.word).unwrap();
    assert!((h - best.entropy).abs() < 1e-12);
    assert!(solver.calculate_entropy_for_word("zz").is_err());
}

#[test]
fn test_two_remaining_words() {
    let table = WordTable::new(["crane", "trace"]);
    let solver = WordleSolver::new(&table);

    let analysis = solver.find_best_guess().unwrap();
    assert_eq!(analysis.word, "crane");
    assert!(analysis.is_possible_answer);
}

#[test]
fn test_empty_candidates() {
    let table = get_test_words();
    let mut solver = WordleSolver::new(&table);
    assert_eq!(solver.apply_feedback("zzzzz", FeedbackPattern::ALL_CORRECT).unwrap(), 0);
    assert!(solver.find_best_guess().is_none());
    assert!(solver.find_best_guesses(5).is_empty());
    assert!(matches!(solver.adversarial_feedback("crane"), Err(SolverError::NoCandidates)));

    solver.reset();
    assert_eq!(solver.remaining_count(), 10);
}

#[test]
fn test_hard_mode() {
    let table = get_test_words();
    let config = SolverConfig {
        hard_mode: true,
        ..SolverConfig::default()
    };
    let mut solver = WordleSolver::with_config(&table, config);

    let pattern = FeedbackPattern::from_words("toast", "crate");
    solver.apply_feedback("toast", pattern).unwrap();
    let remaining: Vec<&str> = solver.possible_answers();

    for analysis in solver.find_best_guesses(10) {
        assert!(remaining.contains(&analysis.word.as_str()));
        assert!(analysis.is_possible_answer);
    }

    let ruled_out = "toast";
    assert!(!remaining.contains(&ruled_out));
    assert!(matches!(
        solver.apply_feedback(ruled_out, FeedbackPattern(0)),
        Err(SolverError::NotAllowed(_))
    ));

    solver.set_hard_mode(false);
    assert!(solver.apply_feedback(ruled_out, FeedbackPattern(0)).is_ok());
}

#[test]
fn test_config_reflects_hard_mode_toggle() {
    let table = get_test_words();
    let config = SolverConfig {
        max_steps: 4,
        ..SolverConfig::default()
    };
    let mut solver = WordleSolver::with_config(&table, config);
    assert_eq!(solver.config().max_steps, 4);
    assert!(!solver.config().hard_mode);

    solver.set_hard_mode(true);
    assert!(solver.config().hard_mode);
    assert_eq!(solver.config().filter, config.filter);
}

#[test]
fn test_solve_every_word() {
    let table = get_test_words();
    for entry in table.iter() {
        let steps = solve_to_target(&table, entry.text, SolverConfig::default());
        assert!(!steps.is_empty() && steps.len() <= 6, "{}", entry.text);

        let last = steps.last().unwrap();
        assert!(last.pattern.is_win());
        assert_eq!(last.guess, entry.text);

        assert_eq!(steps[0].remaining, table.len());
        for pair in steps.windows(2) {
            assert_eq!(pair[0].remaining_after, pair[1].remaining);
        }
        for step in &steps {
            assert!(step.info_bits >= 0.0);
            assert!(step.remaining_after <= step.remaining);
            let expected = -(step.remaining_after as f64 / step.remaining as f64).log2();
            assert!((step.info_bits - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn test_solve_target_outside_list() {
    let table = get_test_words();
    let steps = solve_to_target(&table, "zebra", SolverConfig::default());
    assert!(steps.len() <= 6);
    assert!(steps.iter().all(|s| !s.pattern.is_win()));
    assert_eq!(steps.last().map(|s| s.remaining_after), Some(0));
}

#[test]
fn test_solve_invalid_target() {
    let table = get_test_words();
    assert!(solve_to_target(&table, "abc", SolverConfig::default()).is_empty());
    let empty = WordTable::new(Vec::<String>::new());
    assert!(solve_to_target(&empty, "crane", SolverConfig::default()).is_empty());
}

#[test]
fn test_max_steps_respected() {
    let table = get_test_words();
    let config = SolverConfig {
        max_steps: 1,
        ..SolverConfig::default()
    };
    let first = WordleSolver::new(&table).find_best_guess().unwrap().word;
    for entry in table.iter() {
        let steps = solve_to_target(&table, entry.text, config);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].pattern.is_win(), entry.text == first);
    }
}

#[test]
fn test_adversarial_keeps_largest_bucket() {
    let table = get_test_words();
    let remaining = table.all_indices();
    let guess = codec::encode("crane");
    let counts = pattern_counts(&table, guess, &remaining);
    let (pattern, kept) = adversarial_pattern(&table, guess, &remaining).unwrap();
    assert_eq!(kept, *counts.iter().max().unwrap() as usize);
    assert_eq!(counts[pattern.0 as usize] as usize, kept);

    let solver = WordleSolver::new(&table);
    assert_eq!(solver.adversarial_feedback("crane").unwrap(), pattern);
    assert!(adversarial_pattern(&table, guess, &[]).is_none());
}

#[test]
fn test_benchmark_distribution() {
    let table = get_test_words();
    let solver = WordleSolver::new(&table);
    let distribution = solver.benchmark_guess_distribution();
    let total: usize = distribution.iter().map(|&(_, count)| count).sum();
    assert_eq!(total, table.len());
    assert!(distribution.iter().all(|&(guesses, _)| (1..=6).contains(&guesses)));

    let weighted: usize = distribution.iter().map(|&(g, c)| g * c).sum();
    let average = solver.benchmark_average_guesses();
    assert!((average - weighted as f64 / total as f64).abs() < 1e-12);
}

#[test]
fn test_steps_serialize() {
    let table = get_test_words();
    let steps = solve_to_target(&table, "crate", SolverConfig::default());
    let json = serde_json::to_value(&steps).unwrap();
    let last = json.as_array().unwrap().last().unwrap();
    assert_eq!(last["guess"], "crate");
    assert_eq!(last["pattern"], "22222");
}
