/// API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::api::types::RootResponse;
use crate::rag::AssistantHandle;
use crate::store::RehabStore;

pub mod chat;
pub mod plan;
pub mod progress;
pub mod resources;

pub use chat::*;
pub use plan::*;
pub use progress::*;
pub use resources::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub assistant: AssistantHandle,
    pub store: Arc<RehabStore>,
}

impl AppState {
    pub fn new(assistant: AssistantHandle, store: Arc<RehabStore>) -> Self {
        Self { assistant, store }
    }
}

/// Service banner
pub async fn root() -> Json<ApiResponse<RootResponse>> {
    Json(ApiResponse::success(RootResponse {
        message: "Welcome to the Rehabilitation Assistant API".to_string(),
    }))
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let chunk_count = state
        .assistant
        .pipeline()
        .map_or(0, |pipeline| pipeline.chunk_count());

    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        assistant: state.assistant.status(),
        chunk_count,
    }))
}
