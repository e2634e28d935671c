//! Embedding vectors for Connections items.
//!
//! Two on-disk formats are understood: whitespace separated text
//! (GloVe / fastText `.vec`) and the word2vec binary layout.

use std::collections::{HashMap, HashSet};
use std::io::{BufRead, ErrorKind, Read};

use log::{debug, info, warn};

use crate::error::EmbeddingError;

/// Lowercased word to vector.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingStore {
    dimension: usize,
    vectors: HashMap<String, Vec<f64>>,
}

impl EmbeddingStore {
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.vectors.get(&word.to_ascii_lowercase()).map(Vec::as_slice)
    }

    /// Vectors for `words` in order, or the first missing word.
    pub fn lookup(&self, words: &[String]) -> Result<Vec<Vec<f64>>, EmbeddingError> {
        words
            .iter()
            .map(|w| {
                self.get(w)
                    .map(<[f64]>::to_vec)
                    .ok_or_else(|| EmbeddingError::Missing(w.clone()))
            })
            .collect()
    }

    /// Vectors for `words`, substituting [`fallback_embedding`] for misses.
    pub fn lookup_or_fallback(&self, words: &[String]) -> Vec<Vec<f64>> {
        let dims = if self.dimension > 0 { self.dimension } else { DEFAULT_FALLBACK_DIMS };
        words
            .iter()
            .map(|w| match self.get(w) {
                Some(v) => v.to_vec(),
                None => {
                    debug!("no embedding for {:?}, using fallback", w);
                    fallback_embedding(w, dims)
                }
            })
            .collect()
    }

    /// Read `word v1 v2 ...` lines. A row's vector ends at its first
    /// non-numeric token. The first accepted row fixes the dimension; rows
    /// of another width are skipped. An empty `needed` loads every word.
    pub fn load_text<R: BufRead>(
        reader: R,
        needed: &HashSet<String>,
    ) -> Result<Self, EmbeddingError> {
        let mut store = Self::default();
        let mut skipped = 0usize;

        for line in reader.lines() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            // Numbers up to the first unparsable token count.
            let values: Vec<f64> = fields.map_while(|t| t.parse().ok()).collect();
            if values.is_empty() {
                skipped += 1;
                continue;
            }
            if store.dimension == 0 {
                store.dimension = values.len();
            }
            if values.len() != store.dimension {
                skipped += 1;
                continue;
            }
            let key = word.to_ascii_lowercase();
            if !needed.is_empty() && !needed.contains(&key) {
                continue;
            }
            store.vectors.insert(key, values);
        }

        if skipped > 0 {
            warn!("skipped {} malformed embedding rows", skipped);
        }
        store.finish()
    }

    /// Read the word2vec binary format: an ASCII `vocab dims` header line,
    /// then per word the word, one space and `dims` little-endian f32s.
    pub fn load_word2vec<R: BufRead>(
        mut reader: R,
        needed: &HashSet<String>,
    ) -> Result<Self, EmbeddingError> {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let mut parts = header.split_whitespace().map(str::parse::<usize>);
        let (vocab, dims) = match (parts.next(), parts.next()) {
            (Some(Ok(vocab)), Some(Ok(dims))) if dims > 0 => (vocab, dims),
            _ => return Err(EmbeddingError::Header(header.trim().to_string())),
        };

        let mut store = Self {
            dimension: dims,
            vectors: HashMap::new(),
        };
        let mut word_buf = Vec::new();
        let mut value_buf = vec![0u8; dims * 4];

        for _ in 0..vocab {
            word_buf.clear();
            if reader.read_until(b' ', &mut word_buf)? == 0 {
                break;
            }
            let word = String::from_utf8_lossy(&word_buf).trim().to_ascii_lowercase();

            if let Err(e) = reader.read_exact(&mut value_buf) {
                return Err(match e.kind() {
                    ErrorKind::UnexpectedEof => EmbeddingError::Truncated(word),
                    _ => e.into(),
                });
            }

            if needed.is_empty() || needed.contains(&word) {
                let vector = value_buf
                    .chunks_exact(4)
                    .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64)
                    .collect();
                store.vectors.insert(word, vector);
                if !needed.is_empty() && store.vectors.len() == needed.len() {
                    break;
                }
            }
        }

        store.finish()
    }

    fn finish(self) -> Result<Self, EmbeddingError> {
        if self.vectors.is_empty() {
            return Err(EmbeddingError::Empty);
        }
        info!("loaded {} vectors of dimension {}", self.vectors.len(), self.dimension);
        Ok(self)
    }
}

/// Width of fallback vectors when nothing else fixes it.
pub const DEFAULT_FALLBACK_DIMS: usize = 64;

/// Deterministic stand-in vector derived from an FNV-1a hash of `word`.
pub fn fallback_embedding(word: &str, dims: usize) -> Vec<f64> {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in word.bytes() {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    (0..dims)
        .map(|i| {
            let value = hash.checked_shr(i as u32 * 3).unwrap_or(0) & 0xFFFF;
            (value as f64 * 0.001 + i as f64).sin()
        })
        .collect()
}
