//! Candidate filtering.
//!
//! Two implementations of one contract: [`ScalarFilter`] is the reference,
//! [`LaneFilter`] rejects candidates whose exact-position letters disagree
//! with the guess using a batched masked compare before running the full
//! consistency check. Both must return the same indices in the same order.

use serde::{Deserialize, Serialize};

use crate::codec::{self, PackedWord, LETTER_BITS, LETTER_MASK};
use crate::feedback::{is_consistent, FeedbackPattern};
use crate::words::WordTable;
use crate::WORD_LENGTH;

/// Keep the entries of `remaining` consistent with `(guess, pattern)`.
pub trait CandidateFilter {
    fn filter(
        &self,
        table: &WordTable,
        remaining: &[usize],
        guess: PackedWord,
        pattern: FeedbackPattern,
    ) -> Vec<usize>;
}

/// One consistency check per candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarFilter;

impl CandidateFilter for ScalarFilter {
    fn filter(
        &self,
        table: &WordTable,
        remaining: &[usize],
        guess: PackedWord,
        pattern: FeedbackPattern,
    ) -> Vec<usize> {
        remaining
            .iter()
            .copied()
            .filter(|&index| is_consistent(table.packed(index), guess, pattern))
            .collect()
    }
}

/// Lanes per batch in [`LaneFilter`].
pub const LANES: usize = 8;

/// Green pre-check over batches of [`LANES`] packed words.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneFilter;

impl CandidateFilter for LaneFilter {
    fn filter(
        &self,
        table: &WordTable,
        remaining: &[usize],
        guess: PackedWord,
        pattern: FeedbackPattern,
    ) -> Vec<usize> {
        let green_mask = green_mask(pattern);
        if green_mask == 0 {
            return ScalarFilter.filter(table, remaining, guess, pattern);
        }
        let green_bits = guess.letters & green_mask;

        let mut out = Vec::with_capacity(remaining.len());
        let mut codes = [0u32; LANES];
        for batch in remaining.chunks(LANES) {
            for (code, &index) in codes.iter_mut().zip(batch) {
                *code = table.packed(index).letters;
            }
            let pass = green_lanes(&codes, green_mask, green_bits);
            for (lane, &index) in batch.iter().enumerate() {
                if pass & (1 << lane) == 0 {
                    continue;
                }
                if is_consistent(table.packed(index), guess, pattern) {
                    out.push(index);
                }
            }
        }
        out
    }
}

/// Letter fields that the pattern marks as exact.
pub fn green_mask(pattern: FeedbackPattern) -> u32 {
    pattern
        .digits()
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == 2)
        .fold(0, |mask, (i, _)| mask | (LETTER_MASK << (i as u32 * LETTER_BITS)))
}

/// Bit `i` set iff `codes[i] & mask == bits`.
#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
fn green_lanes(codes: &[u32; LANES], mask: u32, bits: u32) -> u8 {
    use std::arch::x86_64::*;

    // SAFETY: sse2 is enabled for this target and both loads read 4 u32s
    // from inside `codes`.
    unsafe {
        let mv = _mm_set1_epi32(mask as i32);
        let bv = _mm_set1_epi32(bits as i32);
        let lo = _mm_loadu_si128(codes.as_ptr() as *const __m128i);
        let hi = _mm_loadu_si128(codes.as_ptr().add(4) as *const __m128i);
        let lo_eq = _mm_cmpeq_epi32(_mm_and_si128(lo, mv), bv);
        let hi_eq = _mm_cmpeq_epi32(_mm_and_si128(hi, mv), bv);
        let lo_bits = _mm_movemask_ps(_mm_castsi128_ps(lo_eq)) as u8;
        let hi_bits = _mm_movemask_ps(_mm_castsi128_ps(hi_eq)) as u8;
        lo_bits | (hi_bits << 4)
    }
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "sse2")))]
fn green_lanes(codes: &[u32; LANES], mask: u32, bits: u32) -> u8 {
    codes
        .iter()
        .enumerate()
        .fold(0, |pass, (lane, &code)| pass | ((((code & mask) == bits) as u8) << lane))
}

/// Filter implementation chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Scalar,
    #[default]
    Lanes,
}

impl CandidateFilter for FilterKind {
    fn filter(
        &self,
        table: &WordTable,
        remaining: &[usize],
        guess: PackedWord,
        pattern: FeedbackPattern,
    ) -> Vec<usize> {
        match self {
            FilterKind::Scalar => ScalarFilter.filter(table, remaining, guess, pattern),
            FilterKind::Lanes => LaneFilter.filter(table, remaining, guess, pattern),
        }
    }
}

/// String-level filter: a guess or pattern that is not five valid symbols
/// matches nothing.
pub fn filter_candidates(
    table: &WordTable,
    remaining: &[usize],
    guess: &str,
    pattern: &str,
    kind: FilterKind,
) -> Vec<usize> {
    if guess.len() != WORD_LENGTH || !codec::is_valid(guess) {
        return Vec::new();
    }
    let Some(pattern) = FeedbackPattern::parse(pattern) else {
        return Vec::new();
    };
    kind.filter(table, remaining, codec::encode(guess), pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_green_mask_fields() {
        let pattern = FeedbackPattern::parse("20002").unwrap();
        assert_eq!(green_mask(pattern), 0x1F | (0x1F << 20));
        assert_eq!(green_mask(FeedbackPattern(0)), 0);
    }

    #[test]
    fn test_green_lanes() {
        let words = ["crane", "crate", "slate", "trace", "cried", "brine", "crone", "cxxxx"];
        let mut codes = [0u32; LANES];
        for (code, word) in codes.iter_mut().zip(words) {
            *code = codec::encode(word).letters;
        }
        // c at 0 and r at 1
        let mask = 0x1F | (0x1F << 5);
        let bits = codec::encode("crane").letters & mask;
        assert_eq!(green_lanes(&codes, mask, bits), 0b0101_0011);
    }
}
