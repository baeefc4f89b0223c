pub mod config;
pub mod culture;
pub mod error;
pub mod gateway;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod routes;
pub mod store;

use axum::{Router, routing::{post, get}};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use routes::{generate_ideas, validate_idea, generate_promotion_kit, get_content, list_countries, health, AppState};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate-ideas", post(generate_ideas))
        .route("/api/validate-idea", post(validate_idea))
        .route("/api/generate-promotion-kit", post(generate_promotion_kit))
        .route("/api/content/:session_id", get(get_content))
        .route("/api/countries", get(list_countries))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
