//! Feedback calculation for Wordle guesses.
//!
//! This module computes the feedback pattern (green/yellow/gray) for a guess
//! against a target word, and answers the inverse question of whether a
//! candidate could have produced a given pattern.

use serde::{Serialize, Serializer};

use crate::codec::{self, PackedWord, ALPHABET};
use crate::WORD_LENGTH;

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Correct,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word (gray)
    Absent,
}

impl Feedback {
    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Base-3 digit of this feedback.
    pub fn digit(self) -> u8 {
        match self {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Correct => 2,
        }
    }

    /// Parse from a character (g=green, y=yellow, b=black/gray, or 0/1/2)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Feedback::Correct),
            'y' | '1' => Some(Feedback::Present),
            'b' | 'x' | '0' => Some(Feedback::Absent),
            _ => None,
        }
    }
}

/// A complete feedback pattern for a 5-letter guess.
/// Encoded as a single u8 value (0-242) for efficiency.
/// Each position can be 0 (absent), 1 (present), or 2 (correct).
/// Pattern = p0 + 3*p1 + 9*p2 + 27*p3 + 81*p4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedbackPattern(pub u8);

impl FeedbackPattern {
    /// The pattern indicating all correct (winning)
    pub const ALL_CORRECT: Self = Self(2 + 2 * 3 + 2 * 9 + 2 * 27 + 2 * 81); // 242

    /// Total number of possible patterns (3^5)
    pub const NUM_PATTERNS: usize = 243;

    /// Create a new pattern from individual feedback values
    pub fn new(feedbacks: [Feedback; WORD_LENGTH]) -> Self {
        Self::from_digits(feedbacks.map(Feedback::digit))
    }

    /// Calculate the feedback pattern for a packed guess against a packed target.
    ///
    /// Exact matches are settled first and consume their letter from the
    /// target's letter counts; remaining positions are then marked present
    /// left to right while unconsumed copies of the letter remain. This is
    /// what keeps repeated letters from being over-reported.
    pub fn calculate(guess: PackedWord, target: PackedWord) -> Self {
        let guess_letters = guess.letter_codes();
        let target_letters = target.letter_codes();

        let mut counts = [0u8; ALPHABET];
        for &letter in &target_letters {
            counts[letter as usize] += 1;
        }

        let mut digits = [0u8; WORD_LENGTH];
        for i in 0..WORD_LENGTH {
            if guess_letters[i] == target_letters[i] {
                digits[i] = 2;
                counts[guess_letters[i] as usize] -= 1;
            }
        }

        for i in 0..WORD_LENGTH {
            if digits[i] != 0 {
                continue;
            }
            let letter = guess_letters[i];
            if !target.contains(letter) {
                continue;
            }
            if counts[letter as usize] > 0 {
                digits[i] = 1;
                counts[letter as usize] -= 1;
            }
        }

        Self::from_digits(digits)
    }

    /// Pattern for two plain words. Both must satisfy [`codec::is_valid`].
    pub fn from_words(guess: &str, target: &str) -> Self {
        Self::calculate(codec::encode(guess), codec::encode(target))
    }

    fn from_digits(digits: [u8; WORD_LENGTH]) -> Self {
        let mut pattern = 0u8;
        let mut base = 1u8;
        for digit in digits {
            pattern += digit * base;
            base = base.wrapping_mul(3);
        }
        Self(pattern)
    }

    /// Per-position base-3 digits, position 0 first.
    pub fn digits(self) -> [u8; WORD_LENGTH] {
        debug_assert!(
            (self.0 as usize) < Self::NUM_PATTERNS,
            "feedback pattern {} out of range",
            self.0
        );
        let mut pattern = self.0;
        let mut digits = [0u8; WORD_LENGTH];
        for digit in digits.iter_mut() {
            *digit = pattern % 3;
            pattern /= 3;
        }
        digits
    }

    /// Convert pattern to array of feedbacks
    pub fn to_feedbacks(self) -> [Feedback; WORD_LENGTH] {
        self.digits().map(|digit| match digit {
            0 => Feedback::Absent,
            1 => Feedback::Present,
            2 => Feedback::Correct,
            _ => unreachable!(),
        })
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(self) -> bool {
        self == Self::ALL_CORRECT
    }

    /// Number of (green, yellow) positions.
    pub fn counts(self) -> (usize, usize) {
        self.digits().iter().fold((0, 0), |(greens, yellows), &d| match d {
            2 => (greens + 1, yellows),
            1 => (greens, yellows + 1),
            _ => (greens, yellows),
        })
    }

    /// Parse a pattern from a string like "gybbb" or "21000"
    pub fn parse(s: &str) -> Option<Self> {
        if s.chars().count() != WORD_LENGTH {
            return None;
        }
        let feedbacks: Option<Vec<_>> = s.chars().map(Feedback::from_char).collect();
        let arr: [Feedback; WORD_LENGTH] = feedbacks?.try_into().ok()?;
        Some(Self::new(arr))
    }

    /// Render as five digits, position 0 first (e.g. "21000")
    pub fn to_digit_string(self) -> String {
        self.digits().iter().map(|&d| (b'0' + d) as char).collect()
    }

    /// Display as emoji string
    pub fn to_emoji_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_char()).collect()
    }
}

impl std::fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

impl Serialize for FeedbackPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_digit_string())
    }
}

/// Would `candidate`, as the secret, have produced `pattern` for `guess`?
///
/// Checks exact digits directly against the letters and replays the
/// duplicate-letter accounting of [`FeedbackPattern::calculate`] over the
/// non-exact positions only, bailing out at the first contradiction.
pub fn is_consistent(candidate: PackedWord, guess: PackedWord, pattern: FeedbackPattern) -> bool {
    let digits = pattern.digits();
    let candidate_letters = candidate.letter_codes();
    let guess_letters = guess.letter_codes();

    let mut counts = [0u8; ALPHABET];
    for i in 0..WORD_LENGTH {
        let same = candidate_letters[i] == guess_letters[i];
        if digits[i] == 2 {
            if !same {
                return false;
            }
        } else {
            // An equal letter here would have been reported green.
            if same {
                return false;
            }
            counts[candidate_letters[i] as usize] += 1;
        }
    }

    for i in 0..WORD_LENGTH {
        let letter = guess_letters[i] as usize;
        match digits[i] {
            2 => {}
            1 => {
                if counts[letter] == 0 {
                    return false;
                }
                counts[letter] -= 1;
            }
            _ => {
                if counts[letter] > 0 {
                    return false;
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_round_trip() {
        let pattern = FeedbackPattern(2 + 3 + 2 * 81);
        assert_eq!(pattern.digits(), [2, 1, 0, 0, 2]);
        assert_eq!(FeedbackPattern::from_digits(pattern.digits()), pattern);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_pattern_rejected() {
        FeedbackPattern(250).to_emoji_string();
    }

    #[test]
    fn test_new_matches_digits() {
        let feedbacks = [
            Feedback::Correct,
            Feedback::Absent,
            Feedback::Present,
            Feedback::Correct,
            Feedback::Absent,
        ];
        let pattern = FeedbackPattern::new(feedbacks);
        assert_eq!(pattern.digits(), [2, 0, 1, 2, 0]);
        assert_eq!(pattern.to_feedbacks(), feedbacks);
    }

    #[test]
    fn test_counts() {
        let pattern = FeedbackPattern::parse("21102").unwrap();
        assert_eq!(pattern.counts(), (2, 2));
    }
}
