/// Chat handler backed by the RAG pipeline
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::types::ApiError;
use crate::api::types::ApiJson;
use crate::api::types::ApiResponse;
use crate::api::types::ApiResult;
use crate::api::types::ChatRequest;
use crate::api::types::ChatResponse;

/// Answer a chat message
pub async fn chat(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> ApiResult<ChatResponse> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("Message cannot be empty"));
    }
    info!("POST /api/chat: {}", message);

    let answer = state.assistant.answer(message).await?;
    Ok(Json(ApiResponse::success(ChatResponse::from_ai(answer))))
}
