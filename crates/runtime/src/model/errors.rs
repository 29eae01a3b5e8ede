use std::time::Duration;
use thiserror::Error;

/// Why a completion produced no text.
///
/// Every variant means the model is unavailable for this turn; the
/// orchestrator does not distinguish between them beyond logging.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The model server could not be reached.
    #[error("cannot reach model server: {0}")]
    Network(String),

    /// The model server answered with a non-success status.
    #[error("model server rejected the request: {0}")]
    Api(String),

    /// The reply did not have the expected shape.
    #[error("unexpected model reply: {0}")]
    InvalidResponse(String),

    #[error("no response within {}s", .0.as_secs())]
    Timeout(Duration),
}
