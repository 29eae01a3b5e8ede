//! Tool server: discovery and execution over HTTP.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use protocol::{ErrorDetail, ExecuteRequest, ExecuteResponse, ToolDescriptor};
use serde_json::{Value, json};
use std::sync::Arc;
use tools::{ToolError, ToolHost};
use tracing::{info, warn};

/// Tool dispatch failure rendered as `{detail}`.
struct DetailError(ToolError);

impl IntoResponse for DetailError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorDetail {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Routes: `GET /`, `GET /health`, `GET /mcp/tools`, `POST /mcp/execute`.
pub fn tool_router<H: ToolHost + 'static>(host: Arc<H>) -> Router {
    Router::new()
        .route("/", get(index::<H>))
        .route("/health", get(health::<H>))
        .route("/mcp/tools", get(list_tools::<H>))
        .route("/mcp/execute", post(execute::<H>))
        .with_state(host)
}

async fn index<H: ToolHost>(State(host): State<Arc<H>>) -> Json<Value> {
    Json(json!({
        "message": "Steward tool server",
        "available_endpoints": ["/mcp/tools", "/mcp/execute", "/health"],
        "tools_count": host.descriptors().len(),
    }))
}

async fn health<H: ToolHost>(State(host): State<Arc<H>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "tools": host.names(),
    }))
}

async fn list_tools<H: ToolHost>(State(host): State<Arc<H>>) -> Json<Vec<ToolDescriptor>> {
    Json(host.descriptors().to_vec())
}

async fn execute<H: ToolHost>(
    State(host): State<Arc<H>>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, DetailError> {
    info!(tool = %request.tool_name, "execute request");
    match host.execute(&request.tool_name, &request.parameters).await {
        Ok(result) => Ok(Json(ExecuteResponse {
            result: result.into_string(),
        })),
        Err(e) => {
            warn!(tool = %request.tool_name, error = %e, "execute failed");
            Err(DetailError(e))
        }
    }
}
