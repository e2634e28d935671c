//! Word table: normalized words stored once in a shared buffer.

use std::collections::HashSet;
use std::io::BufRead;

use log::{debug, info};

use crate::codec::{self, PackedWord};
use crate::error::SolverError;
use crate::WORD_LENGTH;

/// A table entry: the word's text and its packed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordEntry<'a> {
    pub text: &'a str,
    pub packed: PackedWord,
}

/// Every accepted word lives in `storage` back to back; entry `i` is the
/// slice `storage[i * WORD_LENGTH..(i + 1) * WORD_LENGTH]`.
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    storage: String,
    packed: Vec<PackedWord>,
}

impl WordTable {
    /// Build a table from raw words. Words that do not normalize to five
    /// letters are skipped, as are repeats of a word already in the table.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words.into_iter();
        let (lower, _) = words.size_hint();
        let mut table = Self {
            storage: String::with_capacity(lower * WORD_LENGTH),
            packed: Vec::with_capacity(lower),
        };

        let mut seen = HashSet::new();
        let mut skipped = 0usize;
        for word in words {
            let normalized = codec::normalize(word.as_ref());
            if !codec::is_valid(&normalized) {
                skipped += 1;
                continue;
            }
            let packed = codec::encode(&normalized);
            if !seen.insert(packed) {
                continue;
            }
            table.packed.push(packed);
            table.storage.push_str(&normalized);
        }

        if skipped > 0 {
            debug!("skipped {} invalid words", skipped);
        }
        table
    }

    /// Read one word per whitespace-separated token.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, SolverError> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            words.extend(line.split_whitespace().map(str::to_owned));
        }
        let table = Self::new(words);
        info!("loaded {} words", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.packed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packed.is_empty()
    }

    /// Text of word `index`.
    pub fn text(&self, index: usize) -> &str {
        let start = index * WORD_LENGTH;
        &self.storage[start..start + WORD_LENGTH]
    }

    /// Packed form of word `index`.
    #[inline]
    pub fn packed(&self, index: usize) -> PackedWord {
        self.packed[index]
    }

    pub fn get(&self, index: usize) -> Option<WordEntry<'_>> {
        (index < self.len()).then(|| WordEntry {
            text: self.text(index),
            packed: self.packed[index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = WordEntry<'_>> + '_ {
        (0..self.len()).map(move |i| WordEntry {
            text: self.text(i),
            packed: self.packed[i],
        })
    }

    /// Index of the first entry equal to `word` (after normalization).
    pub fn position(&self, word: &str) -> Option<usize> {
        let normalized = codec::normalize(word);
        if !codec::is_valid(&normalized) {
            return None;
        }
        let packed = codec::encode(&normalized);
        self.packed.iter().position(|&p| p == packed)
    }

    /// Every index, in order.
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_words_skipped() {
        let table = WordTable::new(["Crane", "toolong", "ab", "sl-ate", "four"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.text(0), "crane");
        assert_eq!(table.text(1), "slate");
    }

    #[test]
    fn test_duplicates_dropped() {
        let table = WordTable::new(["crane", "CRANE", "slate", "crane"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_position() {
        let table = WordTable::new(["crane", "slate"]);
        assert_eq!(table.position("SLATE"), Some(1));
        assert_eq!(table.position("trace"), None);
        assert_eq!(table.position("xx"), None);
    }

    #[test]
    fn test_from_reader() {
        let input = "crane slate\n\ntrace\n";
        let table = WordTable::from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(2).unwrap().text, "trace");
        assert!(table.get(3).is_none());
    }
}
