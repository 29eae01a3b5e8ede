//! Tool host backed by a tool server over HTTP.

use crate::{Error, NETWORK_TIMEOUT, Result, ToolError, ToolHost, ToolResult};
use protocol::{ErrorDetail, ExecuteRequest, ExecuteResponse, Parameters, ToolDescriptor};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{info, warn};

/// Timeout for catalog discovery.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a tool server exposing `/mcp/tools` and `/mcp/execute`.
///
/// The catalog is fetched once at connect time and cached.
#[derive(Debug, Clone)]
pub struct RemoteToolHost {
    client: reqwest::Client,
    base_url: String,
    descriptors: Vec<ToolDescriptor>,
    execute_timeout: Duration,
}

impl RemoteToolHost {
    /// Connect to a tool server and cache its catalog.
    pub async fn connect(base_url: impl Into<String>) -> Result<Self> {
        Self::connect_with_timeout(base_url, NETWORK_TIMEOUT).await
    }

    /// Connect with a custom timeout for execute requests.
    pub async fn connect_with_timeout(
        base_url: impl Into<String>,
        execute_timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::new();
        let descriptors = fetch_tools(&client, &base_url).await?;
        info!(url = %base_url, tools = descriptors.len(), "connected to tool server");

        Ok(Self {
            client,
            base_url,
            descriptors,
            execute_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn not_found(&self, tool_name: &str) -> ToolError {
        ToolError::NotFound {
            name: tool_name.to_string(),
            available: self.names(),
        }
    }
}

async fn fetch_tools(client: &reqwest::Client, base_url: &str) -> Result<Vec<ToolDescriptor>> {
    let connect_error = |message: String| Error::Connect {
        url: base_url.to_string(),
        message,
    };

    let response = client
        .get(format!("{base_url}/mcp/tools"))
        .timeout(DISCOVERY_TIMEOUT)
        .send()
        .await
        .map_err(|e| connect_error(e.to_string()))?;

    if !response.status().is_success() {
        return Err(connect_error(format!("status {}", response.status())));
    }

    response
        .json()
        .await
        .map_err(|e| Error::InvalidResponse(e.to_string()))
}

impl ToolHost for RemoteToolHost {
    fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    async fn execute(
        &self,
        tool_name: &str,
        parameters: &Parameters,
    ) -> std::result::Result<ToolResult, ToolError> {
        if !self.descriptors.iter().any(|d| d.name == tool_name) {
            warn!(tool = tool_name, "tool not in remote catalog");
            return Err(self.not_found(tool_name));
        }

        let request = ExecuteRequest {
            tool_name: tool_name.to_string(),
            parameters: parameters.clone(),
        };
        info!(tool = tool_name, url = %self.base_url, "executing remote tool");

        let response = self
            .client
            .post(format!("{}/mcp/execute", self.base_url))
            .timeout(self.execute_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| ToolError::execution(tool_name, format!("request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(self.not_found(tool_name));
        }
        if !status.is_success() {
            let detail = response
                .json::<ErrorDetail>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| format!("tool server returned {status}"));
            return Err(ToolError::execution(tool_name, detail));
        }

        let body: ExecuteResponse = response
            .json()
            .await
            .map_err(|e| ToolError::execution(tool_name, format!("invalid response: {e}")))?;
        Ok(ToolResult::from(body.result))
    }
}
