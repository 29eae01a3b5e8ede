use thiserror::Error;

/// Errors that can occur while dispatching a tool call.
///
/// A tool's own business errors (division by zero, a missing parameter) are
/// not represented here: those come back as an error-prefixed
/// [`ToolResult`](crate::ToolResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Tool '{name}' not found. Available tools: {}", available.join(", "))]
    NotFound { name: String, available: Vec<String> },

    #[error("Tool '{name}' failed: {message}")]
    ExecutionFailed { name: String, message: String },
}

impl ToolError {
    pub fn execution(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from building a registry or connecting to a tool server.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Two tools were registered under the same name.
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),

    /// The tool server could not be reached.
    #[error("failed to connect to tool server at {url}: {message}")]
    Connect { url: String, message: String },

    /// The tool server answered with something unexpected.
    #[error("invalid response from tool server: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
