//! Error types for the solvers and loaders.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("not a five letter word: {0:?}")]
    InvalidWord(String),
    #[error("invalid feedback pattern {0:?} (use 5 of 0/1/2 or b/y/g)")]
    InvalidPattern(String),
    #[error("hard mode: {0:?} does not match the revealed feedback")]
    NotAllowed(String),
    #[error("no possible words remain")]
    NoCandidates,
    #[error("failed to read word list")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("partition search needs exactly {expected} items, got {actual}")]
    WrongItemCount { expected: usize, actual: usize },
    #[error("{words} words but {vectors} embedding vectors")]
    LengthMismatch { words: usize, vectors: usize },
}

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("failed to read embeddings")]
    Io(#[from] std::io::Error),
    #[error("malformed embeddings header: {0:?}")]
    Header(String),
    #[error("embeddings file ended inside the vector for {0:?}")]
    Truncated(String),
    #[error("no embedding for {0:?}")]
    Missing(String),
    #[error("no vectors were loaded")]
    Empty,
}
