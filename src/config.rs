//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::filter::FilterKind;

/// Knobs for a Wordle session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of guesses in a simulated solve.
    pub max_steps: usize,
    /// Restrict guesses to words that are still possible answers.
    pub hard_mode: bool,
    /// Candidate filter implementation.
    pub filter: FilterKind,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_steps: 6,
            hard_mode: false,
            filter: FilterKind::Lanes,
        }
    }
}

/// Knobs for a Connections solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionsConfig {
    /// Blend lexical similarity into the matrix.
    pub hybrid: bool,
    /// Weight of the lexical term, clamped to [0, 1] when used.
    pub lexical_weight: f64,
    /// How many ambiguous items to report.
    pub red_herrings: usize,
}

impl Default for ConnectionsConfig {
    fn default() -> Self {
        Self {
            hybrid: false,
            lexical_weight: 0.25,
            red_herrings: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SolverConfig = serde_json::from_str(r#"{"hard_mode": true}"#).unwrap();
        assert!(config.hard_mode);
        assert_eq!(config.max_steps, 6);
        assert_eq!(config.filter, FilterKind::Lanes);
    }
}
