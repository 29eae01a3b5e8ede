//! Tool server routes, in-process and over a real socket.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use protocol::{Parameters, ToolDescriptor};
use serde_json::{Value, json};
use server::tool_router;
use std::sync::{Arc, LazyLock};
use tools::builtin::{Calculator, Temperature};
use tools::{BoxError, LocalToolHost, RemoteToolHost, Tool, ToolError, ToolHost, ToolRegistry, ToolResult};
use tower::ServiceExt;

struct Explodes;

#[async_trait]
impl Tool for Explodes {
    fn descriptor(&self) -> &ToolDescriptor {
        static DESCRIPTOR: LazyLock<ToolDescriptor> =
            LazyLock::new(|| ToolDescriptor::new("explodes", "Always panics"));
        &DESCRIPTOR
    }

    async fn execute(&self, _params: &Parameters) -> Result<ToolResult, BoxError> {
        panic!("boom")
    }
}

fn host() -> Arc<LocalToolHost> {
    let registry = ToolRegistry::builder()
        .with_tool(Calculator::new())
        .with_tool(Temperature::new())
        .with_tool(Explodes)
        .build()
        .unwrap();
    Arc::new(LocalToolHost::new(registry))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let resp = tool_router(host()).oneshot(request).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn index_describes_server() {
    let (status, json) = get_json("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tools_count"], 3);
    assert!(json["available_endpoints"].as_array().unwrap().contains(&json!("/mcp/execute")));
}

#[tokio::test]
async fn health_lists_tool_names() {
    let (status, json) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"status": "healthy", "tools": ["calculator", "get_temperature", "explodes"]}));
}

#[tokio::test]
async fn tools_are_listed_with_parameters() {
    let (status, json) = get_json("/mcp/tools").await;
    assert_eq!(status, StatusCode::OK);

    let tools: Vec<ToolDescriptor> = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(tools[0].name, "calculator");
    assert_eq!(json[0]["parameters"][1], json!({
        "name": "a",
        "type": "float",
        "description": "First number",
        "required": true
    }));
}

#[tokio::test]
async fn execute_returns_result() {
    let (status, json) = post_json(
        "/mcp/execute",
        json!({"tool_name": "calculator", "parameters": {"operation": "add", "a": 5, "b": 3}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"result": "The result of 5 + 3 = 8"}));
}

#[tokio::test]
async fn business_errors_are_still_results() {
    let (status, json) = post_json(
        "/mcp/execute",
        json!({"tool_name": "calculator", "parameters": {"operation": "divide", "a": 1, "b": 0}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"], "Error: Cannot divide by zero");
}

#[tokio::test]
async fn unknown_tool_is_404_with_available_names() {
    let (status, json) = post_json(
        "/mcp/execute",
        json!({"tool_name": "nonexistent_tool", "parameters": {}}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["detail"],
        "Tool 'nonexistent_tool' not found. Available tools: calculator, get_temperature, explodes"
    );
}

#[tokio::test]
async fn execution_failure_is_500() {
    let (status, json) = post_json("/mcp/execute", json!({"tool_name": "explodes"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["detail"], "Tool 'explodes' failed: tool panicked");
}

#[tokio::test]
async fn remote_host_round_trips_through_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, tool_router(host())).await });

    let remote = RemoteToolHost::connect(format!("http://{addr}/")).await.unwrap();
    assert_eq!(remote.names(), ["calculator", "get_temperature", "explodes"]);

    let params = json!({"operation": "multiply", "a": 6, "b": 7});
    let result = remote
        .execute("calculator", params.as_object().unwrap())
        .await
        .unwrap();
    assert_eq!(result.as_str(), "The result of 6 × 7 = 42");

    let err = remote
        .execute("explodes", &Parameters::new())
        .await
        .unwrap_err();
    assert!(
        matches!(&err, ToolError::ExecutionFailed { name, message } if name == "explodes" && message.contains("tool panicked")),
        "{err}"
    );

    let err = remote
        .execute("weather", &Parameters::new())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
