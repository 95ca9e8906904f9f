/// Progress log handlers
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::api::types::ApiError;
use crate::api::types::ApiJson;
use crate::api::types::ApiResponse;
use crate::api::types::ApiResult;
use crate::api::types::ProgressQuery;
use crate::models::NewProgressEntry;
use crate::models::ProgressEntry;

/// List progress entries, optionally for one exercise
pub async fn list_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> ApiResult<Vec<ProgressEntry>> {
    info!("GET /api/progress: {:?}", query);

    let exercise_id = match query.exercise_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            Uuid::parse_str(raw)
                .map_err(|_| ApiError::bad_request(format!("Invalid exercise_id: {raw}")))?,
        ),
    };

    let entries = state.store.progress(exercise_id).await;
    Ok(Json(ApiResponse::success(entries)))
}

/// Record a progress entry
pub async fn add_progress(
    State(state): State<AppState>,
    ApiJson(entry): ApiJson<NewProgressEntry>,
) -> Result<(StatusCode, Json<ApiResponse<ProgressEntry>>), ApiError> {
    info!("POST /api/progress: exercise {}", entry.exercise_id);

    let recorded = state.store.add_progress(entry).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(recorded))))
}
