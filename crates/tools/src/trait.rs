//! Tool trait.

use crate::ToolResult;
use async_trait::async_trait;
use protocol::{Parameters, ToolDescriptor};
use std::time::Duration;

/// Default timeout for tools that only compute locally.
pub const LOCAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for tools that call out over the network.
pub const NETWORK_TIMEOUT: Duration = Duration::from_secs(300);

/// Error type for failures a tool could not turn into a result.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A named, parameterized capability the model can ask for.
///
/// Implementations interpret their own parameters, synonyms included, and
/// report business failures as [`ToolResult::error`]. Returning `Err` is
/// reserved for failures the tool cannot describe itself; the host reports
/// those as an execution failure.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Public description used for discovery and prompts.
    fn descriptor(&self) -> &ToolDescriptor;

    /// How long the host waits before giving up on this tool.
    fn timeout(&self) -> Duration {
        LOCAL_TIMEOUT
    }

    /// Run the tool.
    async fn execute(&self, params: &Parameters) -> Result<ToolResult, BoxError>;
}
