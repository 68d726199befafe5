use std::sync::Arc;

use tracing::debug;

use crate::config::RecommendationConfig;
use crate::error::Result;
use crate::features::{normalize, parse_weight};
use crate::models::{
    CategoryMap, PreferenceRecord, PreferenceRequest, RestaurantRecord, ScoredRecommendation,
};
use crate::ranking::top_k;
use crate::repository::{PreferenceHistory, RestaurantCatalog};

/// Scores each restaurant as a product of Laplace-smoothed per-category
/// probabilities drawn from the preference history, each raised to the
/// importance weight the current request assigns to that category key.
pub struct BayesianRecommender {
    history: Arc<dyn PreferenceHistory>,
    catalog: Arc<dyn RestaurantCatalog>,
    config: RecommendationConfig,
}

impl BayesianRecommender {
    pub fn new(history: Arc<dyn PreferenceHistory>, catalog: Arc<dyn RestaurantCatalog>) -> Self {
        Self::with_config(history, catalog, RecommendationConfig::default())
    }

    pub fn with_config(
        history: Arc<dyn PreferenceHistory>,
        catalog: Arc<dyn RestaurantCatalog>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            history,
            catalog,
            config,
        }
    }

    pub fn recommend(&self, prefs: &PreferenceRequest) -> Result<Vec<ScoredRecommendation>> {
        let history = self.history.all()?;
        let restaurants = self.catalog.all()?;

        let scored: Vec<ScoredRecommendation> = restaurants
            .iter()
            .map(|r| ScoredRecommendation::new(r.name.clone(), score_restaurant(r, prefs, &history)))
            .collect();

        debug!(
            candidates = scored.len(),
            observations = history.len(),
            "Scored catalog with Bayesian weighted probabilities"
        );

        // Ranking runs on raw probabilities; rounding is presentation only.
        let mut top = top_k(scored, self.config.max_results);
        for rec in &mut top {
            rec.score = (rec.score * 10000.0).round() / 10000.0;
        }
        Ok(top)
    }
}

/// Categories are examined in fixed order: cuisine type, dietary tags,
/// cuisine-matching dishes, budget, seating, distance.
fn score_restaurant(
    restaurant: &RestaurantRecord,
    prefs: &PreferenceRequest,
    history: &[PreferenceRecord],
) -> f64 {
    let mut score = 1.0;

    let mut apply = |factor: Option<f64>| {
        if let Some(p) = factor {
            score *= p;
        }
    };

    apply(weighted_probability(
        "cuisine",
        &normalize(&restaurant.cuisine_type),
        prefs.get("cuisine"),
        history,
    ));

    for tag in &restaurant.dietary_preferences {
        apply(weighted_probability(
            "dietary_preferences",
            &normalize(tag),
            prefs.get("dietary_preferences"),
            history,
        ));
    }

    if let Some(category) = restaurant.cuisine().preference_category() {
        for dish in restaurant.dishes() {
            apply(weighted_probability(
                category,
                &normalize(dish),
                prefs.get(category),
                history,
            ));
        }
    }

    apply(weighted_probability(
        "budget_range",
        &normalize(restaurant.budget_range.as_deref().unwrap_or("")),
        prefs.get("budget_range"),
        history,
    ));
    apply(weighted_probability(
        "seating",
        &normalize(restaurant.seating.as_deref().unwrap_or("")),
        prefs.get("seating"),
        history,
    ));
    apply(weighted_probability(
        "distance",
        &normalize(restaurant.distance.as_deref().unwrap_or("")),
        prefs.get("distance"),
        history,
    ));

    score
}

/// Laplace-smoothed empirical probability for one category key, raised to
/// the importance weight from the current request. `None` means the user
/// explicitly weighted the key 0 and the factor drops out of the product.
fn weighted_probability(
    category: &str,
    key: &str,
    request_category: Option<&CategoryMap>,
    history: &[PreferenceRecord],
) -> Option<f64> {
    let mut count: i64 = 0;
    let mut total: i64 = 0;

    for record in history {
        if let Some(map) = record.category(category) {
            if let Some(value) = lookup(map, key) {
                // Unparseable values still count as an observation.
                count += value.trim().parse::<i64>().unwrap_or(0);
                total += 1;
            }
        }
    }

    let base_probability = (count as f64 + 1.0) / (total as f64 + 1.0);

    let weight = request_category
        .and_then(|map| lookup(map, key))
        .and_then(|value| parse_weight(value))
        .unwrap_or(1.0);

    if weight == 0.0 {
        return None;
    }

    Some(base_probability.powf(weight))
}

fn lookup<'a>(map: &'a CategoryMap, key: &str) -> Option<&'a String> {
    map.iter()
        .find_map(|(k, v)| (normalize(k) == key).then_some(v))
}
