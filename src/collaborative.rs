use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use crate::config::RecommendationConfig;
use crate::error::Result;
use crate::features::{flatten_preferences, flatten_record, normalize, parse_weight};
use crate::models::{
    CategoryMap, PreferenceRecord, PreferenceRequest, RestaurantRecord, ScoredRecommendation,
};
use crate::ranking::top_k;
use crate::repository::{PreferenceHistory, RestaurantCatalog};
use crate::similarity::cosine;

/// Recommends restaurants by scoring them against the stated preferences
/// of the historical submissions most similar to the current request,
/// weighted by that similarity.
pub struct CollaborativeRecommender {
    history: Arc<dyn PreferenceHistory>,
    catalog: Arc<dyn RestaurantCatalog>,
    config: RecommendationConfig,
}

struct Neighbor {
    record: PreferenceRecord,
    similarity: f64,
}

impl CollaborativeRecommender {
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

        let user_vector = flatten_preferences(prefs);

        let mut neighbors: Vec<Neighbor> = Vec::new();
        for record in history {
            let similarity = cosine(&user_vector, &flatten_record(&record));
            if similarity > self.config.min_similarity {
                neighbors.push(Neighbor { record, similarity });
            }
        }

        // Stable sort: equally similar submissions keep history order.
        neighbors.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        neighbors.truncate(self.config.neighbor_count);

        debug!(neighbors = neighbors.len(), "Selected similar historical users");

        let mut scored: Vec<ScoredRecommendation> = Vec::new();
        for restaurant in &restaurants {
            let mut total = 0.0;
            let mut contributed = false;

            for neighbor in &neighbors {
                let product = neighbor_product(restaurant, &neighbor.record);
                if product > 0.0 {
                    total += product * neighbor.similarity;
                    contributed = true;
                }
            }

            if contributed {
                scored.push(ScoredRecommendation::new(restaurant.name.clone(), total));
            }
        }

        let mut top = top_k(scored, self.config.max_results);
        for rec in &mut top {
            rec.score = rec.score.round();
        }
        Ok(top)
    }
}

/// Multiplicative score over cuisine type, dietary tags and matching
/// dishes, each factor looked up in the neighbor's own category maps.
fn neighbor_product(restaurant: &RestaurantRecord, neighbor: &PreferenceRecord) -> f64 {
    let mut score = 1.0;

    apply_factor(&mut score, factor(&neighbor.cuisine, &normalize(&restaurant.cuisine_type)));

    for tag in &restaurant.dietary_preferences {
        apply_factor(
            &mut score,
            factor(&neighbor.dietary_preferences, &normalize(tag)),
        );
    }

    if let Some(category) = restaurant.cuisine().preference_category() {
        if let Some(dish_map) = neighbor.category(category) {
            for dish in restaurant.dishes() {
                apply_factor(&mut score, factor(dish_map, &normalize(dish)));
            }
        }
    }

    score
}

/// An explicit zero weight means the neighbor does not care about the key;
/// that single factor is treated as absent rather than zeroing the product.
fn apply_factor(score: &mut f64, factor: f64) {
    if factor != 0.0 {
        *score *= factor;
    }
}

/// Present key: parsed weight, 1.0 on parse failure. Absent key: 1.0.
fn factor(map: &CategoryMap, key: &str) -> f64 {
    map.iter()
        .find_map(|(k, v)| (normalize(k) == key).then_some(v))
        .map(|value| parse_weight(value).unwrap_or(1.0))
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryCatalog, InMemoryHistory};
    use std::collections::HashMap;

    fn request(category: &str, key: &str, value: &str) -> PreferenceRequest {
        let mut inner = HashMap::new();
        inner.insert(key.to_string(), value.to_string());
        let mut prefs = PreferenceRequest::new();
        prefs.insert(category.to_string(), inner);
        prefs
    }

    fn greek_restaurant(name: &str, dishes: &[&str]) -> RestaurantRecord {
        RestaurantRecord {
            name: name.to_string(),
            cuisine_type: "greek".to_string(),
            dietary_preferences: vec![],
            greek_food: dishes.iter().map(|d| d.to_string()).collect(),
            italian_food: vec![],
            mexican_food: vec![],
            budget_range: None,
            seating: None,
            distance: None,
        }
    }

    fn engine(
        history: Vec<PreferenceRecord>,
        restaurants: Vec<RestaurantRecord>,
    ) -> CollaborativeRecommender {
        CollaborativeRecommender::new(
            Arc::new(InMemoryHistory::new(history)),
            Arc::new(InMemoryCatalog::new(restaurants)),
        )
    }

    #[test]
    fn test_dissimilar_history_is_not_a_neighbor() {
        // No key overlap with the request: similarity 0, excluded, and with
        // no neighbors nothing accumulates.
        let mut unrelated = PreferenceRecord::default();
        unrelated
            .cuisine
            .insert("mexican".to_string(), "3".to_string());

        let top = engine(vec![unrelated], vec![greek_restaurant("Olympia", &[])])
            .recommend(&request("cuisine", "greek", "1"))
            .unwrap();
        assert!(top.is_empty());
    }

    #[test]
    fn test_similarity_weighted_score() {
        let mut neighbor = PreferenceRecord::default();
        neighbor.cuisine.insert("greek".to_string(), "2".to_string());
        neighbor
            .greek_cuisine
            .insert("gyros".to_string(), "2".to_string());

        let top = engine(
            vec![neighbor],
            vec![greek_restaurant("Athena", &["gyros"])],
        )
        .recommend(&request("cuisine", "greek", "1"))
        .unwrap();

        // user = {greek: 1}, neighbor = {greek: 2, gyros: 2}
        // similarity = 2 / (1 * sqrt(8)) ~= 0.7071
        // product = 2 (cuisine) * 2 (gyros) = 4
        // 4 * 0.7071 = 2.8284 -> rounds to 3
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Athena");
        assert_eq!(top[0].score, 3.0);
    }

    #[test]
    fn test_zero_weight_factor_is_skipped_not_zeroing() {
        let mut neighbor = PreferenceRecord::default();
        neighbor.cuisine.insert("greek".to_string(), "2".to_string());
        neighbor
            .dietary_preferences
            .insert("vegan".to_string(), "0".to_string());

        let mut restaurant = greek_restaurant("Athena", &[]);
        restaurant.dietary_preferences = vec!["vegan".to_string()];

        let top = engine(vec![neighbor], vec![restaurant])
            .recommend(&request("cuisine", "greek", "1"))
            .unwrap();

        // The vegan factor drops out; the cuisine factor (2) survives.
        // user = {greek: 1}, neighbor = {greek: 2, vegan: 0}
        // similarity = 2 / (1 * 2) = 1.0, score = 2 * 1.0 = 2
        assert_eq!(top[0].score, 2.0);
    }

    #[test]
    fn test_only_top_three_neighbors_contribute() {
        let mut matching = PreferenceRecord::default();
        matching.cuisine.insert("greek".to_string(), "1".to_string());

        // Four identical fully-similar neighbors; only three may count.
        let history = vec![
            matching.clone(),
            matching.clone(),
            matching.clone(),
            matching,
        ];

        let top = engine(history, vec![greek_restaurant("Olympia", &[])])
            .recommend(&request("cuisine", "greek", "1"))
            .unwrap();

        // Each neighbor contributes product 1 * similarity 1.
        assert_eq!(top[0].score, 3.0);
    }

    #[test]
    fn test_negative_products_never_accumulate() {
        // Positive similarity (shared greek interest) but a negative
        // dietary weight turns the product negative; it must not land in
        // the ranking.
        let mut neighbor = PreferenceRecord::default();
        neighbor.cuisine.insert("greek".to_string(), "1".to_string());
        neighbor
            .dietary_preferences
            .insert("vegan".to_string(), "-1".to_string());

        let mut restaurant = greek_restaurant("Olympia", &[]);
        restaurant.dietary_preferences = vec!["vegan".to_string()];

        let top = engine(vec![neighbor], vec![restaurant])
            .recommend(&request("cuisine", "greek", "1"))
            .unwrap();
        assert!(top.is_empty());
    }

    #[test]
    fn test_absent_keys_default_to_factor_one() {
        // Neighbor shares the cuisine interest but says nothing about the
        // restaurant's dishes; those factors default to 1.0.
        let mut neighbor = PreferenceRecord::default();
        neighbor.cuisine.insert("greek".to_string(), "1".to_string());

        let top = engine(
            vec![neighbor],
            vec![greek_restaurant("Athena", &["gyros", "souvlaki"])],
        )
        .recommend(&request("cuisine", "greek", "1"))
        .unwrap();

        // similarity 1.0, product 1 * 1 * 1 = 1
        assert_eq!(top[0].score, 1.0);
    }

    #[test]
    fn test_equal_scores_keep_catalog_order() {
        let mut neighbor = PreferenceRecord::default();
        neighbor.cuisine.insert("greek".to_string(), "1".to_string());

        let top = engine(
            vec![neighbor],
            vec![
                greek_restaurant("First", &[]),
                greek_restaurant("Second", &[]),
                greek_restaurant("Third", &[]),
                greek_restaurant("Fourth", &[]),
            ],
        )
        .recommend(&request("cuisine", "greek", "1"))
        .unwrap();

        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }
}
