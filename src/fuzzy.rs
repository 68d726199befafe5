use std::sync::Arc;

use tracing::debug;

use crate::config::RecommendationConfig;
use crate::error::Result;
use crate::features::{normalize, parse_weight};
use crate::models::{CategoryMap, PreferenceRequest, RestaurantRecord, ScoredRecommendation};
use crate::ranking::top_k;
use crate::repository::RestaurantCatalog;

/// Factor used when the request says nothing usable about a key: the key is
/// missing, its value does not parse, or it is an explicit 0.
const WEAK_DEFAULT: f64 = 0.2;

/// Heuristic scorer over three categories (budget, distance, cuisine),
/// independent of history. A weight of 3 saturates a factor at 1.0;
/// heavier weights push it beyond 1.0 unclamped.
pub struct FuzzyRecommender {
    catalog: Arc<dyn RestaurantCatalog>,
    config: RecommendationConfig,
}

impl FuzzyRecommender {
    pub fn new(catalog: Arc<dyn RestaurantCatalog>) -> Self {
        Self::with_config(catalog, RecommendationConfig::default())
    }

    pub fn with_config(catalog: Arc<dyn RestaurantCatalog>, config: RecommendationConfig) -> Self {
        Self { catalog, config }
    }

    /// Ranked `(name, round(score * 100))` pairs.
    pub fn recommend(&self, prefs: &PreferenceRequest) -> Result<Vec<ScoredRecommendation>> {
        let mut top = self.rank(prefs)?;
        for rec in &mut top {
            rec.score = (rec.score * 100.0).round();
        }
        Ok(top)
    }

    /// The same ranking, names only.
    pub fn recommend_names(&self, prefs: &PreferenceRequest) -> Result<Vec<String>> {
        Ok(self.rank(prefs)?.into_iter().map(|rec| rec.name).collect())
    }

    fn rank(&self, prefs: &PreferenceRequest) -> Result<Vec<ScoredRecommendation>> {
        let restaurants = self.catalog.all()?;

        let scored: Vec<ScoredRecommendation> = restaurants
            .iter()
            .map(|r| ScoredRecommendation::new(r.name.clone(), score_restaurant(r, prefs)))
            .collect();

        debug!(candidates = scored.len(), "Scored catalog with fuzzy heuristics");

        Ok(top_k(scored, self.config.max_results))
    }
}

fn score_restaurant(restaurant: &RestaurantRecord, prefs: &PreferenceRequest) -> f64 {
    let budget = normalize(restaurant.budget_range.as_deref().unwrap_or(""));
    let distance = normalize(restaurant.distance.as_deref().unwrap_or(""));
    let cuisine = normalize(&restaurant.cuisine_type);

    fuzzy_factor(prefs.get("budget_range"), &budget)
        * fuzzy_factor(prefs.get("distance"), &distance)
        * fuzzy_factor(prefs.get("cuisine"), &cuisine)
}

fn fuzzy_factor(prefs: Option<&CategoryMap>, key: &str) -> f64 {
    let value = prefs.and_then(|map| {
        map.iter()
            .find_map(|(k, v)| (normalize(k) == key).then_some(v))
    });

    match value.and_then(|v| parse_weight(v)) {
        Some(weight) if weight != 0.0 => 0.5 + 0.5 * (weight / 3.0),
        _ => WEAK_DEFAULT,
    }
}
