//! # Puzzle Engine
//!
//! Two offline puzzle solvers sharing one approach: reduce the puzzle to a
//! compact numeric form, then search it exhaustively under a score.
//!
//! - Wordle: pick the guess with the highest expected information
//!   (Shannon entropy) over the 243 feedback patterns, using bit-packed
//!   words and parallel candidate scoring.
//! - Connections: split 16 items into four groups of four maximizing the
//!   total within-group similarity, by exact search over disjoint covers.

pub mod codec;
pub mod config;
pub mod connections;
pub mod demo;
pub mod embedding;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod partition;
pub mod similarity;
pub mod solver;
pub mod words;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use codec::PackedWord;
pub use config::{ConnectionsConfig, SolverConfig};
pub use connections::{cluster_confidence, solve_connections, ConnectionsReport};
pub use demo::{DemoPuzzle, DEMO_PUZZLES};
pub use error::{EmbeddingError, PartitionError, SolverError};
pub use feedback::{is_consistent, Feedback, FeedbackPattern};
pub use filter::{filter_candidates, CandidateFilter, FilterKind, LaneFilter, ScalarFilter};
pub use partition::{Group, Partition, PartitionSearch};
pub use similarity::SimilarityMatrix;
pub use solver::{best_guess, solve_to_target, GuessAnalysis, Step, WordleSolver};
pub use words::WordTable;

/// Word length for Wordle
pub const WORD_LENGTH: usize = 5;

/// Load a word list file into a table
pub fn load_dictionary(path: impl AsRef<Path>) -> Result<WordTable, SolverError> {
    let file = File::open(path)?;
    WordTable::from_reader(BufReader::new(file))
}
