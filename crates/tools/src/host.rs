//! Tool hosts: the boundary between the orchestration loop and side effects.

use crate::{RemoteToolHost, ToolError, ToolRegistry, ToolResult};
use protocol::{Parameters, ToolDescriptor};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Trait for tool execution hosts.
///
/// Implementations provide the tool catalog and execute tool calls by name.
pub trait ToolHost: Send + Sync {
    /// Descriptors of the available tools, in stable order.
    fn descriptors(&self) -> &[ToolDescriptor];

    /// Execute `tool_name` with `parameters` exactly as given.
    fn execute(
        &self,
        tool_name: &str,
        parameters: &Parameters,
    ) -> impl Future<Output = Result<ToolResult, ToolError>> + Send;

    /// Names of the available tools.
    fn names(&self) -> Vec<String> {
        self.descriptors().iter().map(|d| d.name.clone()).collect()
    }
}

/// Tool host running tools from an in-process registry.
#[derive(Debug, Clone)]
pub struct LocalToolHost {
    registry: Arc<ToolRegistry>,
}

impl LocalToolHost {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

impl ToolHost for LocalToolHost {
    fn descriptors(&self) -> &[ToolDescriptor] {
        self.registry.list()
    }

    async fn execute(
        &self,
        tool_name: &str,
        parameters: &Parameters,
    ) -> Result<ToolResult, ToolError> {
        let Some(tool) = self.registry.tool(tool_name) else {
            warn!(tool = tool_name, "tool not found");
            return Err(ToolError::NotFound {
                name: tool_name.to_string(),
                available: self.registry.names(),
            });
        };

        let limit = tool.timeout();
        let params = parameters.clone();
        info!(tool = tool_name, ?params, "executing tool");

        // Spawned so a panic surfaces as a join error instead of unwinding the turn.
        let mut task = tokio::spawn(async move { tool.execute(&params).await });

        match tokio::time::timeout(limit, &mut task).await {
            Ok(Ok(Ok(result))) => {
                debug!(tool = tool_name, is_error = result.is_error(), %result, "tool finished");
                Ok(result)
            }
            Ok(Ok(Err(e))) => Err(ToolError::execution(tool_name, e.to_string())),
            Ok(Err(join)) if join.is_panic() => Err(ToolError::execution(tool_name, "tool panicked")),
            Ok(Err(_)) => Err(ToolError::execution(tool_name, "tool task was cancelled")),
            Err(_) => {
                task.abort();
                Err(ToolError::execution(
                    tool_name,
                    format!("timed out after {}s", limit.as_secs()),
                ))
            }
        }
    }
}

/// A tool host chosen at startup: in-process tools or a remote tool server.
#[derive(Debug)]
pub enum ToolBackend {
    Local(LocalToolHost),
    Remote(RemoteToolHost),
}

impl ToolHost for ToolBackend {
    fn descriptors(&self) -> &[ToolDescriptor] {
        match self {
            Self::Local(host) => host.descriptors(),
            Self::Remote(host) => host.descriptors(),
        }
    }

    async fn execute(
        &self,
        tool_name: &str,
        parameters: &Parameters,
    ) -> Result<ToolResult, ToolError> {
        match self {
            Self::Local(host) => host.execute(tool_name, parameters).await,
            Self::Remote(host) => host.execute(tool_name, parameters).await,
        }
    }
}
