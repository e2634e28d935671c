//! Word normalization and bit-packed encoding.
//!
//! Every word the solver touches is reduced to a [`PackedWord`]: five 5-bit
//! letter codes packed into a `u32` (position 0 in the lowest bits) plus a
//! 26-bit presence mask.

use crate::WORD_LENGTH;

/// Size of the letter alphabet.
pub const ALPHABET: usize = 26;

/// Bits used per letter in [`PackedWord::letters`].
pub const LETTER_BITS: u32 = 5;

/// Mask selecting a single letter field.
pub const LETTER_MASK: u32 = 0x1F;

/// A five letter word packed for fast comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackedWord {
    /// Positional letter codes, 5 bits each.
    pub letters: u32,
    /// One bit per letter that occurs somewhere in the word.
    pub mask: u32,
}

impl PackedWord {
    /// Letter code (0 = 'a') at `index`.
    #[inline]
    pub fn letter_at(self, index: usize) -> u8 {
        ((self.letters >> (index as u32 * LETTER_BITS)) & LETTER_MASK) as u8
    }

    /// All five letter codes.
    #[inline]
    pub fn letter_codes(self) -> [u8; WORD_LENGTH] {
        let mut codes = [0u8; WORD_LENGTH];
        for (i, code) in codes.iter_mut().enumerate() {
            *code = self.letter_at(i);
        }
        codes
    }

    /// True if `letter` (0 = 'a') occurs anywhere in the word.
    #[inline]
    pub fn contains(self, letter: u8) -> bool {
        self.mask & (1 << letter) != 0
    }
}

/// Keep ASCII letters only, lowercased.
pub fn normalize(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// True iff `word` is exactly five lowercase ASCII letters.
pub fn is_valid(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.bytes().all(|b| b.is_ascii_lowercase())
}

/// Pack a valid word. Callers check [`is_valid`] first.
pub fn encode(word: &str) -> PackedWord {
    debug_assert!(is_valid(word), "encode called with invalid word {word:?}");

    let mut packed = PackedWord::default();
    for (i, b) in word.bytes().take(WORD_LENGTH).enumerate() {
        let letter = (b - b'a') as u32;
        packed.letters |= (letter & LETTER_MASK) << (i as u32 * LETTER_BITS);
        packed.mask |= 1 << letter;
    }
    packed
}

/// Unpack back to the lowercase string.
pub fn decode(packed: PackedWord) -> String {
    packed
        .letter_codes()
        .iter()
        .map(|&code| (b'a' + code) as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_fields() {
        let packed = encode("crane");
        assert_eq!(packed.letter_at(0), b'c' - b'a');
        assert_eq!(packed.letter_at(4), b'e' - b'a');
        assert!(packed.contains(b'r' - b'a'));
        assert!(!packed.contains(b'z' - b'a'));
    }

    #[test]
    fn test_mask_deduplicates_letters() {
        let packed = encode("mamma");
        assert_eq!(packed.mask.count_ones(), 2);
    }
}
