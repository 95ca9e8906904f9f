use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::models::Resource;

/// Resource center listing
pub async fn list_resources(State(state): State<AppState>) -> Json<ApiResponse<Vec<Resource>>> {
    info!("GET /api/resources");
    Json(ApiResponse::success(state.store.resources().await))
}
