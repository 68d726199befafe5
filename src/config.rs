use serde::{Deserialize, Serialize};

use crate::ranking::DEFAULT_TOP_K;

/// Shared recommender knobs. Defaults reproduce the production ranking:
/// three results, three neighbors, strictly-positive similarity only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Cutoff applied by the top-K selector.
    pub max_results: usize,

    /// Historical neighbors the collaborative recommender scores against.
    pub neighbor_count: usize,

    /// Neighbors at or below this similarity are discarded.
    pub min_similarity: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_TOP_K,
            neighbor_count: 3,
            min_similarity: 0.0,
        }
    }
}
