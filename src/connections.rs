//! End-to-end Connections solve: similarity matrix, best partition, and
//! per-group statistics for display.

use log::info;
use nalgebra::{DMatrix, SymmetricEigen};
use serde::Serialize;

use crate::config::ConnectionsConfig;
use crate::error::PartitionError;
use crate::partition::{self, PartitionSearch, GROUP_SIZE};
use crate::similarity::SimilarityMatrix;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub label: String,
    pub members: [usize; GROUP_SIZE],
    pub words: Vec<String>,
    pub score: f64,
    pub average_similarity: f64,
    /// See [`cluster_confidence`].
    pub confidence: f64,
    /// 0 for the most cohesive group.
    pub difficulty: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionsReport {
    pub score: f64,
    pub groups: Vec<GroupReport>,
    pub red_herrings: Vec<String>,
}

/// Similarity matrix for `words`, hybrid when the config asks for it.
pub fn build_matrix(
    words: &[String],
    vectors: &[Vec<f64>],
    config: &ConnectionsConfig,
) -> SimilarityMatrix {
    if config.hybrid {
        SimilarityMatrix::hybrid(vectors, words, config.lexical_weight)
    } else {
        SimilarityMatrix::from_embeddings(vectors)
    }
}

/// Share of the group's variance along its main axis: the largest
/// eigenvalue of the members' covariance over the sum of all of them.
/// 0 for fewer than two members, mixed widths, or no spread at all.
pub fn cluster_confidence(vectors: &[Vec<f64>], members: &[usize]) -> f64 {
    let n = members.len();
    let Some(dims) = members.first().map(|&i| vectors[i].len()) else {
        return 0.0;
    };
    if n < 2 || dims == 0 || members.iter().any(|&i| vectors[i].len() != dims) {
        return 0.0;
    }

    let mean: Vec<f64> = (0..dims)
        .map(|c| members.iter().map(|&i| vectors[i][c]).sum::<f64>() / n as f64)
        .collect();
    let centered = DMatrix::from_fn(n, dims, |r, c| vectors[members[r]][c] - mean[c]);

    // The n×n Gram matrix shares the covariance's nonzero eigenvalues.
    let gram = (&centered * centered.transpose()) / (n - 1) as f64;
    let eigenvalues = SymmetricEigen::new(gram).eigenvalues;
    let sum: f64 = eigenvalues.iter().map(|v| v.max(0.0)).sum();
    if sum <= 0.0 {
        return 0.0;
    }
    eigenvalues.max() / sum
}

/// Solve a 16-word puzzle from one embedding vector per word.
pub fn solve_connections(
    words: &[String],
    vectors: &[Vec<f64>],
    config: &ConnectionsConfig,
) -> Result<ConnectionsReport, PartitionError> {
    if words.len() != vectors.len() {
        return Err(PartitionError::LengthMismatch {
            words: words.len(),
            vectors: vectors.len(),
        });
    }

    let matrix = build_matrix(words, vectors, config);
    let search = PartitionSearch::new(&matrix)?;
    let best = search.solve_parallel();
    info!("best partition score {:.4}", best.score);

    let scores: Vec<f64> = best.groups.iter().map(|g| g.score).collect();
    let ranks = partition::rank_groups_by_difficulty(&scores);

    let groups = best
        .groups
        .iter()
        .zip(ranks)
        .enumerate()
        .map(|(g, (group, difficulty))| {
            let members = group.members();
            GroupReport {
                label: format!("Group {}", g + 1),
                members,
                words: members.iter().map(|&i| words[i].clone()).collect(),
                score: group.score,
                average_similarity: partition::average_within_group_similarity(&matrix, &members),
                confidence: cluster_confidence(vectors, &members),
                difficulty,
            }
        })
        .collect();

    let red_herrings = partition::red_herrings(&matrix, &best, config.red_herrings)
        .into_iter()
        .map(|i| words[i].clone())
        .collect();

    Ok(ConnectionsReport {
        score: best.score,
        groups,
        red_herrings,
    })
}
