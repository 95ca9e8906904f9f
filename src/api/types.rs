//! API request and response types

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use tracing::error;

use crate::errors::RehabRagError;
use crate::rag::AssistantStatus;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Service banner
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub assistant: AssistantStatus,
    /// Indexed chunks, 0 while initializing
    pub chunk_count: usize,
}

/// Chat request
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub sender: String,
    pub text: String,
}

impl ChatResponse {
    pub fn from_ai(text: String) -> Self {
        Self {
            sender: "ai".to_string(),
            text,
        }
    }
}

/// Progress listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ProgressQuery {
    #[serde(default)]
    pub exercise_id: Option<String>,
}

/// Error returned by handlers, rendered as an `ApiResponse` with a status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<RehabRagError> for ApiError {
    fn from(err: RehabRagError) -> Self {
        match err {
            e if e.is_client_error() => Self::bad_request(e.to_string()),
            RehabRagError::NotReady => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "AI assistant is initializing, please try again shortly".to_string(),
            },
            e => {
                // Cause stays in the log, the client gets a generic message
                error!("Request failed: {}", e);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Failed to get response from AI assistant".to_string(),
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: format!("Invalid request body: {}", rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

/// JSON body extractor whose rejections use the `ApiResponse` envelope
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;
