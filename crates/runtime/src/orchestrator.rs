//! The per-turn orchestration loop.
//!
//! A turn makes one decision call, at most one tool dispatch, and one
//! answer call:
//!
//! ```text
//! decide ─┬─ NO_TOOL_NEEDED ──────────────────────────► direct answer
//!         ├─ unparseable ─────────────────────────────► fallback answer
//!         └─ tool call ─► dispatch ─┬─ result ────────► final answer
//!                                   └─ ToolError ─────► failure answer
//! ```
//!
//! Tool failures are recovered inside the turn. Only a model failure ends a
//! turn with an error.

use crate::extract::{DecisionOutcome, ToolInvocation, extract};
use crate::model::{GenerationOptions, ModelBackend, ModelError};
use crate::{Result, prompt};
use protocol::{ChatResponse, ToolCallRecord};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tools::ToolHost;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// Default limit for a single model call.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(120);

/// Tool output longer than this is cut in the turn's tool record.
pub const RESULT_PREVIEW_CHARS: usize = 500;

/// How a turn's answer was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerPath {
    /// The model said no tool was needed.
    Direct,
    /// The decision could not be read; answered without tools.
    Fallback,
    /// A tool ran and the model phrased its result.
    ToolAnswer,
    /// The requested tool could not be used.
    ToolFailure,
}

/// The result of one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub content: String,
    pub tool_call: Option<ToolCallRecord>,
    /// Curated text when a tool could not be used.
    pub error: Option<String>,
    pub path: AnswerPath,
}

impl TurnOutcome {
    fn answered(content: String, path: AnswerPath) -> Self {
        Self {
            content,
            tool_call: None,
            error: None,
            path,
        }
    }
}

impl From<TurnOutcome> for ChatResponse {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            content: outcome.content,
            tool_calls: outcome.tool_call.into_iter().collect(),
            error: outcome.error,
        }
    }
}

/// Health snapshot for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub model: String,
    pub tools_available: usize,
}

/// Drives turns against a model backend and a tool host.
///
/// Holds no per-turn state; one instance can serve concurrent turns.
#[derive(Debug)]
pub struct Orchestrator<M, H> {
    model: M,
    tools: H,
    options: GenerationOptions,
    model_timeout: Duration,
}

impl<M: ModelBackend, H: ToolHost> Orchestrator<M, H> {
    pub fn new(model: M, tools: H) -> Self {
        Self {
            model,
            tools,
            options: GenerationOptions::default(),
            model_timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    /// Generation options for decision and direct-answer calls.
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn tools(&self) -> &H {
        &self.tools
    }

    /// Answer one user message.
    pub async fn handle_turn(&self, message: &str) -> Result<TurnOutcome> {
        let span = info_span!("turn", id = %Uuid::new_v4());
        self.run_turn(message).instrument(span).await
    }

    /// Make a tiny model call and report the tool count.
    pub async fn status(&self) -> Result<Status> {
        self.complete("Test", &self.options.probe()).await?;
        Ok(Status {
            model: self.model.model_name().to_string(),
            tools_available: self.tools.descriptors().len(),
        })
    }

    async fn run_turn(&self, message: &str) -> Result<TurnOutcome> {
        info!(chars = message.len(), "deciding tool");
        let decision_prompt = prompt::decision(self.tools.descriptors(), message);
        let decision = self.complete(&decision_prompt, &self.options).await?;
        debug!(%decision, "model decision");

        match extract(&decision) {
            DecisionOutcome::NoToolNeeded => {
                info!("no tool needed");
                let content = self.complete(&prompt::direct(message), &self.options).await?;
                Ok(TurnOutcome::answered(content, AnswerPath::Direct))
            }
            DecisionOutcome::Unparseable(raw) => {
                warn!(raw = %raw, "could not read tool decision, answering directly");
                let content = self.complete(&prompt::fallback(message), &self.options).await?;
                Ok(TurnOutcome::answered(content, AnswerPath::Fallback))
            }
            DecisionOutcome::ToolCall(invocation) => self.dispatch(message, invocation).await,
        }
    }

    async fn dispatch(&self, message: &str, invocation: ToolInvocation) -> Result<TurnOutcome> {
        let ToolInvocation {
            tool_name,
            parameters,
        } = invocation;
        info!(tool = %tool_name, "dispatching tool");

        match self.tools.execute(&tool_name, &parameters).await {
            Ok(result) => {
                info!(tool = %tool_name, is_error = result.is_error(), "tool returned");
                let final_prompt = prompt::final_answer(message, &tool_name, result.as_str());
                let content = self
                    .complete(&final_prompt, &self.options.final_answer())
                    .await?;

                Ok(TurnOutcome {
                    content,
                    tool_call: Some(ToolCallRecord {
                        name: tool_name,
                        parameters: Value::Object(parameters),
                        result: result.preview(RESULT_PREVIEW_CHARS),
                    }),
                    error: None,
                    path: AnswerPath::ToolAnswer,
                })
            }
            Err(error) => {
                warn!(tool = %tool_name, %error, "tool could not be used");
                let failure_prompt = prompt::tool_failure(message, &error.to_string());
                let content = self.complete(&failure_prompt, &self.options).await?;

                Ok(TurnOutcome {
                    content,
                    tool_call: None,
                    error: Some(format!("Tool execution failed: {error}")),
                    path: AnswerPath::ToolFailure,
                })
            }
        }
    }

    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        match tokio::time::timeout(self.model_timeout, self.model.complete(prompt, options)).await
        {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => {
                warn!(error = %e, "model call failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(timeout_secs = self.model_timeout.as_secs(), "model call timed out");
                Err(ModelError::Timeout(self.model_timeout).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tools::ToolResult;

    #[test]
    fn outcome_converts_to_chat_response() {
        let outcome = TurnOutcome {
            content: "5 + 3 is 8.".into(),
            tool_call: Some(ToolCallRecord {
                name: "calculator".into(),
                parameters: serde_json::json!({"operation": "add", "a": 5, "b": 3}),
                result: "The result of 5 + 3 = 8".into(),
            }),
            error: None,
            path: AnswerPath::ToolAnswer,
        };

        let response = ChatResponse::from(outcome);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "calculator");
        assert!(response.error.is_none());

        let direct = ChatResponse::from(TurnOutcome::answered("Hi!".into(), AnswerPath::Direct));
        assert!(direct.tool_calls.is_empty());
    }

    #[test]
    fn long_results_are_previewed() {
        let result = ToolResult::ok("x".repeat(RESULT_PREVIEW_CHARS + 20));
        let preview = result.preview(RESULT_PREVIEW_CHARS);
        assert_eq!(preview.len(), RESULT_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }
}
