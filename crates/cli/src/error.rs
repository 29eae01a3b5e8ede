//! CLI error types.

use crate::config::ConfigError;
use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is invalid or could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `--params` was not a JSON object.
    #[error("invalid --params: {0}")]
    InvalidParams(String),

    /// The tool registry could not be built or the tool server reached.
    #[error(transparent)]
    Tools(#[from] tools::Error),

    /// A direct tool call failed.
    #[error(transparent)]
    Tool(#[from] tools::ToolError),

    /// An error occurred in the runtime layer.
    #[error(transparent)]
    Runtime(#[from] runtime::Error),

    /// An HTTP surface failed to start or stopped.
    #[error(transparent)]
    Server(#[from] server::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
