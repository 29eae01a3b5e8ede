//! Web search through the research service.

use super::research::{ResearchBackend, SearchBackend, SearchError};
use crate::params::lookup_text;
use crate::{BoxError, NETWORK_TIMEOUT, Tool, ToolResult};
use async_trait::async_trait;
use protocol::{ParameterSpec, Parameters, ToolDescriptor};
use std::time::Duration;
use tracing::{info, warn};

const QUERY: &[&str] = &["query", "question", "search_query"];
const MAX_LENGTH: &[&str] = &["max_length"];

/// `web_search`: real-time answers for questions about current events.
pub struct WebSearch<B = ResearchBackend> {
    descriptor: ToolDescriptor,
    backend: B,
    timeout: Duration,
}

impl<B: SearchBackend> WebSearch<B> {
    pub fn new(backend: B) -> Self {
        let descriptor = ToolDescriptor::new(
            "web_search",
            "Performs real-time web search for latest information and current events",
        )
        .with_parameter(ParameterSpec::required(
            "query",
            "string",
            "Search query or question requiring latest information",
        ))
        .with_parameter(ParameterSpec::optional(
            "max_length",
            "string",
            "Content length: short, medium, long",
        ));

        Self {
            descriptor,
            backend,
            timeout: NETWORK_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Character budget for a `max_length` setting; `medium` when unset or unknown.
fn content_limit(max_length: Option<&str>) -> usize {
    match max_length {
        Some("short") => 1000,
        Some("long") => 3000,
        _ => 2000,
    }
}

/// Cut `content` to `max_chars`, preferring a sentence end in the last fifth.
fn truncate_content(content: &str, max_chars: usize) -> String {
    let total = content.chars().count();
    let Some((end, _)) = content.char_indices().nth(max_chars) else {
        return content.to_string();
    };

    let mut truncated = &content[..end];
    if let Some(pos) = truncated.rfind(['.', '!', '?']) {
        if truncated[..pos].chars().count() * 5 > max_chars * 4 {
            truncated = &truncated[..=pos];
        }
    }

    format!(
        "{truncated}\n\n[Content truncated for context window - showing first {} of {total} characters]",
        truncated.chars().count()
    )
}

#[async_trait]
impl<B: SearchBackend + 'static> Tool for WebSearch<B> {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn execute(&self, params: &Parameters) -> Result<ToolResult, BoxError> {
        let Some(query) = lookup_text(params, QUERY) else {
            return Ok(ToolResult::error(
                "No search query provided. Please specify what you want to search for.",
            ));
        };
        let limit = content_limit(lookup_text(params, MAX_LENGTH).as_deref());
        info!(%query, limit, "web search");

        match self.backend.search(&query).await {
            Ok(answer) => Ok(ToolResult::ok(format!(
                "Latest web search results for '{query}':\n\n{}",
                truncate_content(&answer, limit)
            ))),
            Err(SearchError::EmptyAnswer) => Ok(ToolResult::error(format!(
                "Could not retrieve search results for '{query}'. The search service may be unavailable."
            ))),
            Err(e) => {
                warn!(error = %e, "web search failed");
                Ok(ToolResult::error(format!(
                    "Web search failed for '{query}': {e}"
                )))
            }
        }
    }
}
