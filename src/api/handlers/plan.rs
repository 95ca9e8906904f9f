use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::models::RehabPlan;

/// Current rehabilitation plan
pub async fn get_rehab_plan(State(state): State<AppState>) -> Json<ApiResponse<RehabPlan>> {
    info!("GET /api/rehab-plan");
    Json(ApiResponse::success(state.store.plan().clone()))
}
