//! Steward runtime: model backends and the tool-orchestration turn.
//!
//! This crate turns one user message into one answer. A language model
//! decides whether a tool is needed, the decision is extracted from its
//! free-form text, the tool is dispatched through a [`tools::ToolHost`], and
//! the model is asked again to phrase the result.
//!
//! # Overview
//!
//! - **ModelBackend**: a stateless `complete(prompt, options)` call.
//!   [`OllamaBackend`] and [`AnthropicBackend`] implement it; [`Provider`]
//!   picks one from configuration.
//! - **Decision extraction**: [`extract`] classifies model text as
//!   [`DecisionOutcome::NoToolNeeded`], a [`ToolInvocation`], or unparseable.
//! - **Orchestrator**: runs the turn and recovers tool failures with a
//!   fallback answer.
//!
//! # Example
//!
//! ```no_run
//! use runtime::{OllamaBackend, Orchestrator};
//! use tools::{LocalToolHost, StandardTools, ToolRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let model = OllamaBackend::new("http://localhost:11434", "qwen3:4b");
//! let tools = LocalToolHost::new(ToolRegistry::standard(&StandardTools::default())?);
//!
//! let orchestrator = Orchestrator::new(model, tools);
//! let outcome = orchestrator.handle_turn("What's 5 + 3?").await?;
//! println!("{}", outcome.content);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod extract;
pub mod model;
mod orchestrator;
pub mod prompt;
mod providers;

pub use error::{Error, Result};
pub use extract::{DecisionOutcome, NO_TOOL_SENTINEL, ToolInvocation, extract, strip_reasoning};
pub use model::{GenerationOptions, ModelBackend, ModelError};
pub use orchestrator::{
    AnswerPath, DEFAULT_MODEL_TIMEOUT, Orchestrator, RESULT_PREVIEW_CHARS, Status, TurnOutcome,
};
pub use providers::{
    AnthropicBackend, AnthropicBackendBuilder, DEFAULT_OLLAMA_HOST, OllamaBackend, Provider,
};
