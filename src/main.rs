use anyhow::{Context, Result};
use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use restaurant_recommender::{
    BayesianRecommender, CollaborativeRecommender, ContentBasedRecommender, FuzzyRecommender,
    InMemoryCatalog, InMemoryHistory, PreferenceRequest, RecommendationConfig,
    RecommendationResponse, ScoredRecommendation,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8095")]
    port: u16,

    /// Path to the restaurant catalog JSON file
    #[arg(long, default_value = "./data/restaurants.json")]
    catalog: PathBuf,

    /// Path to the primary preference history JSON file
    #[arg(long, default_value = "./data/preferences.json")]
    history: PathBuf,

    /// Path to the regular preference history JSON file
    #[arg(long, default_value = "./data/preferences_regular.json")]
    regular_history: PathBuf,
}

/// One engine per algorithm and history wiring. The algorithms are
/// data-source-agnostic; only the `PreferenceHistory` handed to them
/// differs between the primary and regular routes.
#[derive(Clone)]
struct AppState {
    bayesian: Arc<BayesianRecommender>,
    bayesian_regular: Arc<BayesianRecommender>,
    collaborative: Arc<CollaborativeRecommender>,
    collaborative_regular: Arc<CollaborativeRecommender>,
    content_based: Arc<ContentBasedRecommender>,
    fuzzy: Arc<FuzzyRecommender>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting Recommendation Service on port {}", args.port);

    let catalog = Arc::new(
        InMemoryCatalog::from_json_file(&args.catalog).context("loading restaurant catalog")?,
    );
    let history = Arc::new(
        InMemoryHistory::from_json_file(&args.history).context("loading preference history")?,
    );
    let regular_history = Arc::new(
        InMemoryHistory::from_json_file(&args.regular_history)
            .context("loading regular preference history")?,
    );

    let config = RecommendationConfig::default();

    let state = AppState {
        bayesian: Arc::new(BayesianRecommender::with_config(
            history.clone(),
            catalog.clone(),
            config.clone(),
        )),
        bayesian_regular: Arc::new(BayesianRecommender::with_config(
            regular_history.clone(),
            catalog.clone(),
            config.clone(),
        )),
        collaborative: Arc::new(CollaborativeRecommender::with_config(
            history.clone(),
            catalog.clone(),
            config.clone(),
        )),
        collaborative_regular: Arc::new(CollaborativeRecommender::with_config(
            regular_history.clone(),
            catalog.clone(),
            config.clone(),
        )),
        content_based: Arc::new(ContentBasedRecommender::with_config(
            catalog.clone(),
            config.clone(),
        )),
        fuzzy: Arc::new(FuzzyRecommender::with_config(catalog.clone(), config)),
    };

    let app = Router::new()
        .route("/api/recommend/bayesian", post(recommend_bayesian))
        .route(
            "/api/recommend/bayesian/regular",
            post(recommend_bayesian_regular),
        )
        .route("/api/recommend/collaborative", post(recommend_collaborative))
        .route(
            "/api/recommend/collaborative/regular",
            post(recommend_collaborative_regular),
        )
        .route("/api/recommend/content", post(recommend_content))
        .route("/api/recommend/content/regular", post(recommend_content))
        .route("/api/recommend/fuzzy", post(recommend_fuzzy_names))
        .route("/api/recommend/fuzzy/regular", post(recommend_fuzzy))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn recommend_bayesian(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceRequest>,
) -> std::result::Result<Json<RecommendationResponse>, StatusCode> {
    to_response(state.bayesian.recommend(&prefs))
}

async fn recommend_bayesian_regular(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceRequest>,
) -> std::result::Result<Json<RecommendationResponse>, StatusCode> {
    to_response(state.bayesian_regular.recommend(&prefs))
}

async fn recommend_collaborative(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceRequest>,
) -> std::result::Result<Json<RecommendationResponse>, StatusCode> {
    to_response(state.collaborative.recommend(&prefs))
}

async fn recommend_collaborative_regular(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceRequest>,
) -> std::result::Result<Json<RecommendationResponse>, StatusCode> {
    to_response(state.collaborative_regular.recommend(&prefs))
}

async fn recommend_content(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceRequest>,
) -> std::result::Result<Json<RecommendationResponse>, StatusCode> {
    to_response(state.content_based.recommend(&prefs))
}

async fn recommend_fuzzy(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceRequest>,
) -> std::result::Result<Json<RecommendationResponse>, StatusCode> {
    to_response(state.fuzzy.recommend(&prefs))
}

/// The fuzzy endpoint's historical shape: a bare ranked name array.
async fn recommend_fuzzy_names(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceRequest>,
) -> std::result::Result<Json<Vec<String>>, StatusCode> {
    match state.fuzzy.recommend_names(&prefs) {
        Ok(names) => Ok(Json(names)),
        Err(err) => {
            error!("Fuzzy recommendation failed: {}", err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn to_response(
    result: restaurant_recommender::Result<Vec<ScoredRecommendation>>,
) -> std::result::Result<Json<RecommendationResponse>, StatusCode> {
    match result {
        Ok(recommendations) => Ok(Json(RecommendationResponse::new(recommendations))),
        Err(err) => {
            error!("Recommendation failed: {}", err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
