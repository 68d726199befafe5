use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One preference dimension: item key to string-encoded weight.
pub type CategoryMap = HashMap<String, String>;

/// Ad hoc per-call preference request: category name to category map.
/// Structurally identical to the category maps of a stored record.
pub type PreferenceRequest = HashMap<String, CategoryMap>;

/// A stored preference submission. Absent categories deserialize to empty
/// maps; weights stay string-encoded until a scorer parses them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(default)]
    pub cuisine: CategoryMap,

    #[serde(default)]
    pub dietary_preferences: CategoryMap,

    #[serde(default)]
    pub greek_cuisine: CategoryMap,

    #[serde(default)]
    pub italian_cuisine: CategoryMap,

    #[serde(default)]
    pub mexican_cuisine: CategoryMap,

    #[serde(default)]
    pub budget_range: CategoryMap,

    #[serde(default)]
    pub seating: CategoryMap,

    #[serde(default)]
    pub distance: CategoryMap,
}

impl PreferenceRecord {
    /// Look up a category map by its wire name.
    pub fn category(&self, name: &str) -> Option<&CategoryMap> {
        match name {
            "cuisine" => Some(&self.cuisine),
            "dietary_preferences" => Some(&self.dietary_preferences),
            "greek_cuisine" => Some(&self.greek_cuisine),
            "italian_cuisine" => Some(&self.italian_cuisine),
            "mexican_cuisine" => Some(&self.mexican_cuisine),
            "budget_range" => Some(&self.budget_range),
            "seating" => Some(&self.seating),
            "distance" => Some(&self.distance),
            _ => None,
        }
    }

    /// All eight category maps under their wire names, in declaration order.
    pub fn categories(&self) -> [(&'static str, &CategoryMap); 8] {
        [
            ("cuisine", &self.cuisine),
            ("dietary_preferences", &self.dietary_preferences),
            ("greek_cuisine", &self.greek_cuisine),
            ("italian_cuisine", &self.italian_cuisine),
            ("mexican_cuisine", &self.mexican_cuisine),
            ("budget_range", &self.budget_range),
            ("seating", &self.seating),
            ("distance", &self.distance),
        ]
    }

    /// Re-express the record in the nested request shape, so stored and ad
    /// hoc preferences flow through the same flattening routine.
    pub fn as_request(&self) -> PreferenceRequest {
        self.categories()
            .into_iter()
            .map(|(name, map)| (name.to_string(), map.clone()))
            .collect()
    }
}

/// A catalog entry. Only the dish list matching the cuisine type is
/// relevant for scoring; the others are carried as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantRecord {
    /// Unique key for ranking output
    pub name: String,

    /// Cuisine type ("greek" | "italian" | "mexican" | other)
    #[serde(rename = "type")]
    pub cuisine_type: String,

    #[serde(default)]
    pub dietary_preferences: Vec<String>,

    #[serde(default)]
    pub greek_food: Vec<String>,

    #[serde(default)]
    pub italian_food: Vec<String>,

    #[serde(default)]
    pub mexican_food: Vec<String>,

    #[serde(default)]
    pub budget_range: Option<String>,

    #[serde(default)]
    pub seating: Option<String>,

    #[serde(default)]
    pub distance: Option<String>,
}

impl RestaurantRecord {
    pub fn cuisine(&self) -> Cuisine {
        Cuisine::parse(&self.cuisine_type)
    }

    /// The dish list matching this restaurant's cuisine type. A cuisine
    /// outside the known three yields an empty list.
    pub fn dishes(&self) -> &[String] {
        match self.cuisine() {
            Cuisine::Greek => &self.greek_food,
            Cuisine::Italian => &self.italian_food,
            Cuisine::Mexican => &self.mexican_food,
            Cuisine::Other => &[],
        }
    }
}

/// Closed cuisine enumeration driving dish-list and per-cuisine category
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cuisine {
    Greek,
    Italian,
    Mexican,
    Other,
}

impl Cuisine {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "greek" => Cuisine::Greek,
            "italian" => Cuisine::Italian,
            "mexican" => Cuisine::Mexican,
            _ => Cuisine::Other,
        }
    }

    /// Wire name of the per-cuisine dish preference category.
    pub fn preference_category(&self) -> Option<&'static str> {
        match self {
            Cuisine::Greek => Some("greek_cuisine"),
            Cuisine::Italian => Some("italian_cuisine"),
            Cuisine::Mexican => Some("mexican_cuisine"),
            Cuisine::Other => None,
        }
    }
}

/// One ranked entry. Score semantics differ per algorithm (raw probability,
/// summed similarity, cosine percentage); scores are not comparable across
/// algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecommendation {
    pub name: String,
    pub score: f64,
}

impl ScoredRecommendation {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Response envelope returned by the serving layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<ScoredRecommendation>,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationResponse {
    pub fn new(recommendations: Vec<ScoredRecommendation>) -> Self {
        Self {
            recommendations,
            generated_at: Utc::now(),
        }
    }
}
