use crate::ModelError;
use thiserror::Error;

/// Turn-level errors.
///
/// Tool failures never appear here: they are recovered inside the turn
/// and surfaced on the outcome instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The model backend could not produce text for a required call.
    #[error("model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, Error>;
