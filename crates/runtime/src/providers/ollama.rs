//! Ollama chat backend.

use crate::model::{GenerationOptions, ModelBackend, ModelError};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: [ApiMessage<'a>; 1],
    stream: bool,
    options: &'a GenerationOptions,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    content: String,
}

/// Backend for a local Ollama server's `/api/chat` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: host.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

impl std::fmt::Display for OllamaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ollama({}, {})", self.model, self.base_url)
    }
}

impl ModelBackend for OllamaBackend {
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ModelError> {
        let request = ApiRequest {
            model: &self.model,
            messages: [ApiMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(format!("{status}: {body}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        debug!(chars = api_response.message.content.len(), "ollama responded");
        Ok(api_response.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_single_user_message_with_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({
                "model": "qwen3:4b",
                "stream": false,
                "messages": [{"role": "user", "content": "Hello"}],
                "options": {"top_k": 40, "num_predict": 500}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "qwen3:4b",
                "message": {"role": "assistant", "content": "Hi there!"},
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = OllamaBackend::new(format!("{}/", server.uri()), "qwen3:4b");
        let options = GenerationOptions::default().final_answer();
        let text = backend.complete("Hello", &options).await.unwrap();
        assert_eq!(text, "Hi there!");
    }

    #[tokio::test]
    async fn error_status_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .mount(&server)
            .await;

        let backend = OllamaBackend::new(server.uri(), "missing");
        let err = backend
            .complete("Hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Api(ref body) if body.contains("model not found")));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let backend = OllamaBackend::new("http://127.0.0.1:9", "qwen3:4b");
        let err = backend
            .complete("Hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Network(_)));
    }
}
