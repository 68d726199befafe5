use std::sync::Arc;

use tracing::debug;

use crate::config::RecommendationConfig;
use crate::error::Result;
use crate::features::{flatten_preferences, restaurant_vector};
use crate::models::{PreferenceRequest, ScoredRecommendation};
use crate::ranking::top_k;
use crate::repository::RestaurantCatalog;
use crate::similarity::cosine;

/// Scores restaurants by cosine similarity between the flattened request
/// and each restaurant's 0/1 feature vector. No history dependency.
pub struct ContentBasedRecommender {
    catalog: Arc<dyn RestaurantCatalog>,
    config: RecommendationConfig,
}

impl ContentBasedRecommender {
    pub fn new(catalog: Arc<dyn RestaurantCatalog>) -> Self {
        Self::with_config(catalog, RecommendationConfig::default())
    }

    pub fn with_config(catalog: Arc<dyn RestaurantCatalog>, config: RecommendationConfig) -> Self {
        Self { catalog, config }
    }

    pub fn recommend(&self, prefs: &PreferenceRequest) -> Result<Vec<ScoredRecommendation>> {
        let restaurants = self.catalog.all()?;

        let user_vector = flatten_preferences(prefs);

        let scored: Vec<ScoredRecommendation> = restaurants
            .iter()
            .map(|r| {
                let similarity = cosine(&user_vector, &restaurant_vector(r));
                ScoredRecommendation::new(r.name.clone(), similarity)
            })
            .collect();

        debug!(candidates = scored.len(), "Scored catalog by content similarity");

        // Rank on the raw similarity, then scale to a 0-100 report.
        let mut top = top_k(scored, self.config.max_results);
        for rec in &mut top {
            rec.score = (rec.score * 100.0).round();
        }
        Ok(top)
    }
}
