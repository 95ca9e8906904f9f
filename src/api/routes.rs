//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Assistant
        .route("/chat", post(handlers::chat))
        // Rehabilitation records
        .route("/rehab-plan", get(handlers::get_rehab_plan))
        .route(
            "/progress",
            get(handlers::list_progress).post(handlers::add_progress),
        )
        .route("/resources", get(handlers::list_resources))
        .with_state(state)
}

/// Root banner plus the API under `/api`, without middleware layers
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api_routes(state))
}
