//! Optimal Wordle solver using entropy-based strategy.
//!
//! This module implements an information-theoretic approach to solving Wordle.
//! The key insight is that we want to maximize the expected information gain
//! (entropy) from each guess, which minimizes the expected number of remaining
//! possible words.
//!
//! The guess pool and the target pool are separate inputs: a word that can no
//! longer be the answer may still split the remaining candidates best.

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::codec::{self, PackedWord};
use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::feedback::FeedbackPattern;
use crate::filter::CandidateFilter;
use crate::words::WordTable;

/// Result of analyzing a potential guess
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessAnalysis {
    /// Index into the word table.
    pub index: usize,
    pub word: String,
    pub entropy: f64,
    pub expected_remaining: f64,
    pub is_possible_answer: bool,
}

/// One round of a simulated solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub guess: String,
    pub pattern: FeedbackPattern,
    /// Expected information of the guess before feedback, in bits.
    pub entropy: f64,
    /// Information actually gained, `-log2(after / before)`.
    pub info_bits: f64,
    pub remaining: usize,
    pub remaining_after: usize,
}

/// Histogram of feedback patterns `guess` produces over `targets`.
pub fn pattern_counts(
    table: &WordTable,
    guess: PackedWord,
    targets: &[usize],
) -> [u32; FeedbackPattern::NUM_PATTERNS] {
    let mut counts = [0u32; FeedbackPattern::NUM_PATTERNS];
    for &target in targets {
        let pattern = FeedbackPattern::calculate(guess, table.packed(target));
        counts[pattern.0 as usize] += 1;
    }
    counts
}

/// Shannon entropy, in bits, of the pattern distribution of `guess` over
/// `targets`. Zero for an empty target set.
pub fn entropy(table: &WordTable, guess: PackedWord, targets: &[usize]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    entropy_from_counts(&pattern_counts(table, guess, targets), targets.len())
}

fn entropy_from_counts(counts: &[u32], total: usize) -> f64 {
    let inv_total = 1.0 / total as f64;
    let mut entropy = 0.0;
    for &count in counts {
        if count > 0 {
            let p = count as f64 * inv_total;
            entropy -= p * p.log2();
        }
    }
    entropy
}

/// `(pool position, entropy)`: higher entropy wins, then the earlier position.
/// Independent of the order rayon merges partial results.
fn better(a: (usize, f64), b: (usize, f64)) -> (usize, f64) {
    if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
        b
    } else {
        a
    }
}

fn analysis(
    table: &WordTable,
    index: usize,
    entropy: f64,
    targets: &[usize],
    possible: bool,
) -> GuessAnalysis {
    GuessAnalysis {
        index,
        word: table.text(index).to_string(),
        entropy,
        expected_remaining: targets.len() as f64 / 2_f64.powf(entropy),
        is_possible_answer: possible,
    }
}

/// The guess in `allowed` with the highest entropy over `targets`.
///
/// Equal entropies resolve to the guess that comes first in `allowed`.
/// With no targets every guess scores 0 and the first one is returned.
pub fn best_guess(
    table: &WordTable,
    allowed: &[usize],
    targets: &[usize],
) -> Option<GuessAnalysis> {
    let (pos, entropy) = allowed
        .par_iter()
        .enumerate()
        .map(|(pos, &guess)| (pos, entropy(table, table.packed(guess), targets)))
        .reduce_with(better)?;

    let index = allowed[pos];
    Some(analysis(table, index, entropy, targets, targets.contains(&index)))
}

/// The `n` best guesses, highest entropy first, ties in `allowed` order.
pub fn rank_guesses(
    table: &WordTable,
    allowed: &[usize],
    targets: &[usize],
    n: usize,
) -> Vec<GuessAnalysis> {
    let mut scored: Vec<(usize, f64)> = allowed
        .par_iter()
        .enumerate()
        .map(|(pos, &guess)| (pos, entropy(table, table.packed(guess), targets)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(n);

    let mut is_target = vec![false; table.len()];
    for &target in targets {
        is_target[target] = true;
    }

    scored
        .into_iter()
        .map(|(pos, entropy)| {
            let index = allowed[pos];
            analysis(table, index, entropy, targets, is_target[index])
        })
        .collect()
}

/// Feedback that keeps the most candidates alive, for adversarial play.
///
/// Ties prefer fewer greens, then fewer yellows, then the lower pattern.
/// Returns `None` when `remaining` is empty.
pub fn adversarial_pattern(
    table: &WordTable,
    guess: PackedWord,
    remaining: &[usize],
) -> Option<(FeedbackPattern, usize)> {
    let counts = pattern_counts(table, guess, remaining);
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(pattern, &count)| {
            let pattern = FeedbackPattern(pattern as u8);
            let (greens, yellows) = pattern.counts();
            (pattern, count as usize, greens, yellows)
        })
        .min_by(|a, b| {
            b.1.cmp(&a.1)
                .then(a.2.cmp(&b.2))
                .then(a.3.cmp(&b.3))
                .then(a.0.cmp(&b.0))
        })
        .map(|(pattern, count, _, _)| (pattern, count))
}

/// Simulate a full solve against a known target.
///
/// Returns an empty trace when the target is not a valid word or the table
/// is empty.
pub fn solve_to_target(table: &WordTable, target: &str, config: SolverConfig) -> Vec<Step> {
    let mut solver = WordleSolver::with_config(table, config);
    solver.solve_for_target(target)
}

/// A solving session over a borrowed word table.
///
/// The session owns the shrinking candidate set; the table is shared and
/// never modified.
#[derive(Debug, Clone)]
pub struct WordleSolver<'a> {
    table: &'a WordTable,
    all_words: Vec<usize>,
    possible_answers: Vec<usize>,
    config: SolverConfig,
}

impl<'a> WordleSolver<'a> {
    pub fn new(table: &'a WordTable) -> Self {
        Self::with_config(table, SolverConfig::default())
    }

    pub fn with_config(table: &'a WordTable, config: SolverConfig) -> Self {
        let all_words = table.all_indices();
        Self {
            table,
            possible_answers: all_words.clone(),
            all_words,
            config,
        }
    }

    pub fn config(&self) -> SolverConfig {
        self.config
    }

    pub fn set_hard_mode(&mut self, enabled: bool) {
        self.config.hard_mode = enabled;
    }

    pub fn is_hard_mode(&self) -> bool {
        self.config.hard_mode
    }

    pub fn remaining_count(&self) -> usize {
        self.possible_answers.len()
    }

    /// Remaining candidate indices, in table order.
    pub fn remaining(&self) -> &[usize] {
        &self.possible_answers
    }

    pub fn possible_answers(&self) -> Vec<&'a str> {
        self.possible_answers.iter().map(|&i| self.table.text(i)).collect()
    }

    pub fn reset(&mut self) {
        self.possible_answers = self.all_words.clone();
    }

    /// Words a guess may be drawn from.
    fn guess_pool(&self) -> &[usize] {
        if self.config.hard_mode {
            &self.possible_answers
        } else {
            &self.all_words
        }
    }

    pub fn calculate_entropy_for_word(&self, guess: &str) -> Result<f64, SolverError> {
        let guess = encode_guess(guess)?;
        Ok(entropy(self.table, guess, &self.possible_answers))
    }

    pub fn find_best_guess(&self) -> Option<GuessAnalysis> {
        match self.possible_answers.len() {
            0 => None,
            // Nothing left to learn that beats guessing a candidate outright.
            1 | 2 => {
                let index = self.possible_answers[0];
                let entropy = entropy(self.table, self.table.packed(index), &self.possible_answers);
                Some(analysis(self.table, index, entropy, &self.possible_answers, true))
            }
            _ => best_guess(self.table, self.guess_pool(), &self.possible_answers),
        }
    }

    pub fn find_best_guesses(&self, n: usize) -> Vec<GuessAnalysis> {
        if self.possible_answers.len() <= 2 {
            return self.find_best_guess().into_iter().take(n).collect();
        }
        rank_guesses(self.table, self.guess_pool(), &self.possible_answers, n)
    }

    /// Narrow the candidates by one round of feedback. Returns the new count.
    ///
    /// An empty result is not an error: it means no known word matches.
    pub fn apply_feedback(
        &mut self,
        guess: &str,
        pattern: FeedbackPattern,
    ) -> Result<usize, SolverError> {
        let packed = encode_guess(guess)?;
        if self.config.hard_mode
            && !self
                .possible_answers
                .iter()
                .any(|&i| self.table.packed(i) == packed)
        {
            return Err(SolverError::NotAllowed(codec::decode(packed)));
        }

        let before = self.possible_answers.len();
        self.possible_answers = self
            .config
            .filter
            .filter(self.table, &self.possible_answers, packed, pattern);
        debug!(
            "{} {} -> {} of {} candidates remain",
            codec::decode(packed),
            pattern.to_digit_string(),
            self.possible_answers.len(),
            before
        );
        Ok(self.possible_answers.len())
    }

    /// [`apply_feedback`](Self::apply_feedback) with a textual pattern.
    pub fn apply_feedback_str(&mut self, guess: &str, pattern: &str) -> Result<usize, SolverError> {
        let parsed = FeedbackPattern::parse(pattern)
            .ok_or_else(|| SolverError::InvalidPattern(pattern.to_string()))?;
        self.apply_feedback(guess, parsed)
    }

    /// The feedback an adversary would give for `guess`.
    pub fn adversarial_feedback(&self, guess: &str) -> Result<FeedbackPattern, SolverError> {
        let packed = encode_guess(guess)?;
        adversarial_pattern(self.table, packed, &self.possible_answers)
            .map(|(pattern, _)| pattern)
            .ok_or(SolverError::NoCandidates)
    }

    /// Solve a Wordle puzzle automatically, given a function that provides feedback
    /// Returns the trace of rounds played
    pub fn solve_with_feedback<F>(&mut self, mut get_feedback: F) -> Vec<Step>
    where
        F: FnMut(PackedWord) -> FeedbackPattern,
    {
        let mut steps = Vec::new();

        for _ in 0..self.config.max_steps {
            let best = match self.find_best_guess() {
                Some(g) => g,
                None => break,
            };

            let guess = self.table.packed(best.index);
            let pattern = get_feedback(guess);
            let remaining = self.possible_answers.len();
            let next = self
                .config
                .filter
                .filter(self.table, &self.possible_answers, guess, pattern);
            let info_bits = if next.is_empty() {
                0.0
            } else {
                -(next.len() as f64 / remaining as f64).log2()
            };

            debug!(
                "guess {} entropy {:.4} pattern {} ({} -> {})",
                best.word,
                best.entropy,
                pattern.to_digit_string(),
                remaining,
                next.len()
            );
            steps.push(Step {
                guess: best.word,
                pattern,
                entropy: best.entropy,
                info_bits,
                remaining,
                remaining_after: next.len(),
            });

            if pattern.is_win() {
                break;
            }
            self.possible_answers = next;
        }

        steps
    }

    /// Solve a puzzle knowing the target word (for testing/benchmarking)
    pub fn solve_for_target(&mut self, target: &str) -> Vec<Step> {
        let normalized = codec::normalize(target);
        if !codec::is_valid(&normalized) || self.table.is_empty() {
            return Vec::new();
        }
        let target_packed = codec::encode(&normalized);
        let steps =
            self.solve_with_feedback(|guess| FeedbackPattern::calculate(guess, target_packed));

        let solved = steps.last().is_some_and(|s| s.pattern.is_win());
        let outcome = if solved { "solved" } else { "unsolved" };
        info!("{}: {} in {} guesses", normalized, outcome, steps.len());
        steps
    }

    /// Guesses needed for every word in the table; an unsolved word counts
    /// as `max_steps + 1`.
    fn benchmark_counts(&self) -> Vec<usize> {
        let fail = self.config.max_steps + 1;
        self.all_words
            .par_iter()
            .map(|&target| {
                let mut solver = self.clone();
                solver.reset();
                let steps = solver.solve_for_target(self.table.text(target));
                match steps.last() {
                    Some(step) if step.pattern.is_win() => steps.len(),
                    _ => fail,
                }
            })
            .collect()
    }

    /// Calculate the average number of guesses needed to solve all words
    pub fn benchmark_average_guesses(&self) -> f64 {
        if self.all_words.is_empty() {
            return 0.0;
        }
        let total: usize = self.benchmark_counts().iter().sum();
        total as f64 / self.all_words.len() as f64
    }

    /// Get distribution of guess counts across all words
    pub fn benchmark_guess_distribution(&self) -> Vec<(usize, usize)> {
        let guess_counts = self.benchmark_counts();

        let max_guesses = *guess_counts.iter().max().unwrap_or(&0);
        let mut distribution = vec![0usize; max_guesses + 1];

        for count in guess_counts {
            distribution[count] += 1;
        }

        distribution
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

fn encode_guess(guess: &str) -> Result<PackedWord, SolverError> {
    let normalized = codec::normalize(guess);
    if !codec::is_valid(&normalized) || normalized.len() != guess.trim().len() {
        return Err(SolverError::InvalidWord(guess.to_string()));
    }
    Ok(codec::encode(&normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_better_prefers_earlier_on_tie() {
        assert_eq!(better((3, 1.5), (1, 1.5)), (1, 1.5));
        assert_eq!(better((1, 1.5), (3, 1.5)), (1, 1.5));
        assert_eq!(better((1, 1.0), (3, 1.5)), (3, 1.5));
    }

    #[test]
    fn test_uniform_entropy() {
        let counts = [1u32, 1, 1, 1];
        assert!((entropy_from_counts(&counts, 4) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_encode_guess_rejects_junk() {
        assert!(encode_guess("cr4ne").is_err());
        assert!(encode_guess("cranes").is_err());
        assert!(encode_guess("CRANE").is_ok());
    }
}
