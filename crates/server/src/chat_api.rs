//! Chat API: one turn per request.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use protocol::{ChatRequest, ChatResponse};
use runtime::{ModelBackend, Orchestrator};
use serde_json::{Value, json};
use std::sync::Arc;
use tools::ToolHost;
use tracing::error;

/// Shown to callers when a turn cannot be completed.
const MODEL_UNAVAILABLE: &str = "The language model is currently unavailable. Please try again later.";

/// An API error with HTTP status code and message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Routes: `POST /api/chat`, `GET /api/status`.
pub fn chat_router<M, H>(orchestrator: Arc<Orchestrator<M, H>>) -> Router
where
    M: ModelBackend + 'static,
    H: ToolHost + 'static,
{
    Router::new()
        .route("/api/chat", post(chat::<M, H>))
        .route("/api/status", get(status::<M, H>))
        .with_state(orchestrator)
}

async fn chat<M: ModelBackend, H: ToolHost>(
    State(orchestrator): State<Arc<Orchestrator<M, H>>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "No message provided"));
    }

    match orchestrator.handle_turn(message).await {
        Ok(outcome) => Ok(Json(outcome.into())),
        Err(e) => {
            error!(error = %e, "chat turn failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to process request: {MODEL_UNAVAILABLE}"),
            ))
        }
    }
}

async fn status<M: ModelBackend, H: ToolHost>(
    State(orchestrator): State<Arc<Orchestrator<M, H>>>,
) -> (StatusCode, Json<Value>) {
    match orchestrator.status().await {
        Ok(status) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "model": status.model,
                "tools_available": status.tools_available,
            })),
        ),
        Err(e) => {
            error!(error = %e, "status check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "error": MODEL_UNAVAILABLE})),
            )
        }
    }
}
