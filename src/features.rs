use std::collections::HashMap;

use crate::models::{PreferenceRecord, PreferenceRequest, RestaurantRecord};

/// Sparse mapping from normalized string key to numeric weight. An absent
/// key is an implicit 0 for similarity purposes.
pub type FeatureVector = HashMap<String, f64>;

/// Canonicalize a free-text value into a stable lookup key: lower-case,
/// strip the currency symbol, hyphens and all whitespace. Idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| *c != '£' && *c != '-' && !c.is_whitespace())
        .collect()
}

/// Parse a string-encoded weight. `None` for anything that is not a finite
/// number; callers choose the documented default for their algorithm.
pub fn parse_weight(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|w| w.is_finite())
}

/// Flatten a nested preference structure (category -> item -> weight) into
/// a sparse vector. Entries whose value is not numeric are dropped
/// silently; the category simply contributes nothing for that item.
pub fn flatten_preferences(prefs: &PreferenceRequest) -> FeatureVector {
    let mut flat = FeatureVector::new();
    for category in prefs.values() {
        for (key, value) in category {
            if let Some(weight) = parse_weight(value) {
                flat.insert(normalize(key), weight);
            }
        }
    }
    flat
}

/// Flatten a stored record through the same routine as an ad hoc request.
pub fn flatten_record(record: &PreferenceRecord) -> FeatureVector {
    flatten_preferences(&record.as_request())
}

/// Project a restaurant into a flat 0/1 feature vector: cuisine type,
/// dietary tags, dishes from the cuisine-matching list, and the normalized
/// budget/seating/distance scalars. Absent fields contribute nothing.
pub fn restaurant_vector(restaurant: &RestaurantRecord) -> FeatureVector {
    let mut vector = FeatureVector::new();

    insert_unit(&mut vector, &restaurant.cuisine_type);

    for tag in &restaurant.dietary_preferences {
        insert_unit(&mut vector, tag);
    }

    for dish in restaurant.dishes() {
        insert_unit(&mut vector, dish);
    }

    if let Some(budget) = restaurant.budget_range.as_deref() {
        insert_unit(&mut vector, budget);
    }
    if let Some(seating) = restaurant.seating.as_deref() {
        insert_unit(&mut vector, seating);
    }
    if let Some(distance) = restaurant.distance.as_deref() {
        insert_unit(&mut vector, distance);
    }

    vector
}

fn insert_unit(vector: &mut FeatureVector, raw: &str) {
    let key = normalize(raw);
    // A value that normalizes to nothing (e.g. a bare currency symbol) is
    // indistinguishable from an absent field.
    if !key.is_empty() {
        vector.insert(key, 1.0);
    }
}
