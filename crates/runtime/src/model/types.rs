use super::errors::ModelError;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Sampling settings sent with every completion.
///
/// Field names match Ollama's `options` object; unset fields take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    /// Context window size in tokens.
    pub num_ctx: u32,
    /// Maximum output tokens.
    pub num_predict: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            num_ctx: 8192,
            num_predict: 400,
        }
    }
}

impl GenerationOptions {
    /// Settings for phrasing an answer from a tool result: cooler and longer.
    pub fn final_answer(self) -> Self {
        Self {
            temperature: 0.3,
            num_predict: 500,
            ..self
        }
    }

    /// Settings for a connectivity check.
    pub fn probe(self) -> Self {
        Self {
            num_predict: 5,
            ..self
        }
    }
}

/// Trait for model provider backends.
///
/// A backend is a stateless single-turn text completion: one prompt in,
/// one piece of text out.
pub trait ModelBackend: Send + Sync {
    fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;

    /// Model identifier, for status reporting.
    fn model_name(&self) -> &str;
}
