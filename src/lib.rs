pub mod bayesian;
pub mod collaborative;
pub mod config;
pub mod content_based;
pub mod error;
pub mod features;
pub mod fuzzy;
pub mod models;
pub mod ranking;
pub mod repository;
pub mod similarity;

pub use bayesian::BayesianRecommender;
pub use collaborative::CollaborativeRecommender;
pub use config::RecommendationConfig;
pub use content_based::ContentBasedRecommender;
pub use error::{RecommendError, Result};
pub use fuzzy::FuzzyRecommender;
pub use models::{
    Cuisine, PreferenceRecord, PreferenceRequest, RecommendationResponse, RestaurantRecord,
    ScoredRecommendation,
};
pub use repository::{InMemoryCatalog, InMemoryHistory, PreferenceHistory, RestaurantCatalog};

/// Restaurant recommendation library
///
/// Features:
/// - Bayesian weighted-probability scoring over historical submissions
/// - Collaborative filtering against the most similar past users
/// - Content-based cosine matching of preferences to restaurant features
/// - Fuzzy heuristic scoring independent of history
///
/// Every recommender pulls a full snapshot of the catalog (and history,
/// where used) per call and returns at most the configured top-K results.
pub fn initialize() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("restaurant_recommender=debug")
        .init();

    Ok(())
}
