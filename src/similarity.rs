//! Pairwise similarity between puzzle items.
//!
//! Cosine similarity of embedding vectors, optionally blended with a
//! surface-form score that catches wordplay groupings (shared prefixes,
//! shared suffixes, anagrams) embeddings tend to miss.

use log::warn;

/// Dense symmetric N×N matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from a closure evaluated once per unordered pair (and diagonal).
    fn build<F>(size: usize, mut score: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            for j in i..size {
                let value = score(i, j);
                values[i * size + j] = value;
                values[j * size + i] = value;
            }
        }
        Self { size, values }
    }

    /// Cosine similarity matrix.
    pub fn from_embeddings(embeddings: &[Vec<f64>]) -> Self {
        let norms: Vec<f64> = embeddings.iter().map(|v| norm(v)).collect();
        Self::build(embeddings.len(), |i, j| {
            cosine_with_norms(&embeddings[i], &embeddings[j], norms[i], norms[j])
        })
    }

    /// `(1 - w) * cosine + w * lexical`, with `w` clamped to [0, 1].
    ///
    /// Falls back to the plain cosine matrix when `words` does not line up
    /// with `embeddings`.
    pub fn hybrid(embeddings: &[Vec<f64>], words: &[String], lexical_weight: f64) -> Self {
        if embeddings.is_empty() || embeddings.len() != words.len() {
            warn!(
                "{} embeddings for {} words; using cosine similarity only",
                embeddings.len(),
                words.len()
            );
            return Self::from_embeddings(embeddings);
        }
        let weight = lexical_weight.clamp(0.0, 1.0);
        let norms: Vec<f64> = embeddings.iter().map(|v| norm(v)).collect();
        Self::build(embeddings.len(), |i, j| {
            let cosine = cosine_with_norms(&embeddings[i], &embeddings[j], norms[i], norms[j]);
            let lexical = lexical_similarity(&words[i], &words[j]);
            (1.0 - weight) * cosine + weight * lexical
        })
    }

    /// Wrap precomputed row-major values. `values.len()` must be `size * size`.
    pub fn from_values(size: usize, values: Vec<f64>) -> Option<Self> {
        (values.len() == size * size).then_some(Self { size, values })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn cosine_with_norms(a: &[f64], b: &[f64], norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 || a.len() != b.len() {
        return 0.0;
    }
    dot(a, b) / (norm_a * norm_b)
}

/// Cosine similarity; 0 if either vector is zero or the lengths differ.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    cosine_with_norms(a, b, norm(a), norm(b))
}

/// Surface similarity of two strings in [0, 1].
pub fn lexical_similarity(left: &str, right: &str) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    if left == right {
        return 1.0;
    }

    let a = left.as_bytes();
    let b = right.as_bytes();
    let max_len = a.len().max(b.len()) as f64;

    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count();

    let mut score = 0.45 * (prefix as f64 / max_len) + 0.45 * (suffix as f64 / max_len);
    if a.len() == b.len() {
        score += 0.05;
        if a.len() > 1 && is_anagram(a, b) {
            score += 0.25;
        }
    }
    score.min(1.0)
}

fn is_anagram(a: &[u8], b: &[u8]) -> bool {
    let mut sorted_a = a.to_vec();
    let mut sorted_b = b.to_vec();
    sorted_a.sort_unstable();
    sorted_b.sort_unstable();
    sorted_a == sorted_b
}
