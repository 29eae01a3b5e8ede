//! Model provider adapters.
//!
//! Each provider implements [`ModelBackend`] for its specific API.
//! [`Provider`] selects one at startup.

mod anthropic;
mod ollama;

pub use anthropic::{AnthropicBackend, AnthropicBackendBuilder};
pub use ollama::{DEFAULT_OLLAMA_HOST, OllamaBackend};

use crate::model::{GenerationOptions, ModelBackend, ModelError};

/// A model backend chosen from configuration.
#[derive(Debug)]
pub enum Provider {
    Ollama(OllamaBackend),
    Anthropic(AnthropicBackend),
}

impl From<OllamaBackend> for Provider {
    fn from(backend: OllamaBackend) -> Self {
        Self::Ollama(backend)
    }
}

impl From<AnthropicBackend> for Provider {
    fn from(backend: AnthropicBackend) -> Self {
        Self::Anthropic(backend)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ollama(backend) => std::fmt::Display::fmt(backend, f),
            Self::Anthropic(backend) => std::fmt::Display::fmt(backend, f),
        }
    }
}

impl ModelBackend for Provider {
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ModelError> {
        match self {
            Self::Ollama(backend) => backend.complete(prompt, options).await,
            Self::Anthropic(backend) => backend.complete(prompt, options).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Self::Ollama(backend) => backend.model_name(),
            Self::Anthropic(backend) => backend.model_name(),
        }
    }
}
