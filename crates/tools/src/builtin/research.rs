//! Client for the research agent service used by web search.
//!
//! The service runs a multi-step research graph. A run is started in two
//! steps: create a thread, then stream the run and read its server-sent
//! events. The longest piece of text seen across events is taken as the
//! answer.

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Keys holding answer text, checked before any other string field.
const ANSWER_KEYS: &[&str] = &["messages", "content", "web_research_result"];

/// Other string fields shorter than this are status noise.
const MIN_LOOSE_FIELD_LEN: usize = 50;

/// Research service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    pub url: String,
    pub reasoning_model: String,
    pub initial_search_query_count: u32,
    pub max_research_loops: u32,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:2024".to_string(),
            reasoning_model: "gemini-2.5-flash-preview-04-17".to_string(),
            initial_search_query_count: 3,
            max_research_loops: 3,
        }
    }
}

/// Errors from a search backend.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("research service did not return a thread id")]
    MissingThread,

    #[error("no answer received")]
    EmptyAnswer,
}

/// Something that can answer a free-text query with current information.
pub trait SearchBackend: Send + Sync {
    fn search(&self, query: &str) -> impl Future<Output = Result<String, SearchError>> + Send;
}

/// HTTP client for the research service.
#[derive(Debug, Clone)]
pub struct ResearchBackend {
    client: reqwest::Client,
    config: ResearchConfig,
}

#[derive(Debug, Deserialize)]
struct ThreadCreated {
    #[serde(default)]
    thread_id: Option<String>,
}

impl ResearchBackend {
    pub fn new(config: ResearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn payload(&self, query: &str) -> Value {
        json!({
            "input": {
                "messages": [
                    {"type": "human", "content": query, "id": Uuid::new_v4().to_string()}
                ],
                "initial_search_query_count": self.config.initial_search_query_count,
                "max_research_loops": self.config.max_research_loops,
                "reasoning_model": self.config.reasoning_model,
            },
            "stream_mode": ["messages-tuple", "values", "updates"],
            "assistant_id": "agent",
            "on_disconnect": "cancel",
        })
    }
}

impl SearchBackend for ResearchBackend {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let base = self.config.url.trim_end_matches('/');
        let payload = self.payload(query);

        let thread: ThreadCreated = self
            .client
            .post(format!("{base}/threads/"))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let thread_id = thread
            .thread_id
            .filter(|id| !id.is_empty())
            .ok_or(SearchError::MissingThread)?;
        info!(%thread_id, "research run started");

        let events = self
            .client
            .post(format!("{base}/threads/{thread_id}/runs/stream"))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let answer = clean_answer(&best_answer(&events));
        debug!(chars = answer.len(), "research run finished");
        if answer.is_empty() {
            return Err(SearchError::EmptyAnswer);
        }
        Ok(answer)
    }
}

/// Longest answer text found in a server-sent event stream.
fn best_answer(events: &str) -> String {
    let mut best = String::new();
    let mut consider = |candidate: &str| {
        if candidate.len() > best.len() {
            best = candidate.to_string();
        }
    };

    for line in events.lines() {
        let Some(data) = line.strip_prefix("data: ") else {
            continue;
        };
        match serde_json::from_str::<Value>(data) {
            Ok(Value::Object(event)) => answer_candidates(&event).for_each(&mut consider),
            Ok(_) => {}
            Err(_) => consider(data),
        }
    }

    best.trim().to_string()
}

fn answer_candidates(event: &Map<String, Value>) -> impl Iterator<Item = &str> {
    let research = event.get("web_research_result").and_then(Value::as_str);
    let messages = event
        .get("messages")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|msg| msg.get("content").and_then(Value::as_str));
    let content = event.get("content").and_then(Value::as_str);
    let loose = event
        .iter()
        .filter(|(key, _)| !ANSWER_KEYS.contains(&key.as_str()))
        .filter_map(|(_, value)| value.as_str())
        .filter(|text| text.len() > MIN_LOOSE_FIELD_LEN);

    research.into_iter().chain(messages).chain(content).chain(loose)
}

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\s+").unwrap());
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static CITATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[\d\s,]+\]").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

/// Strip markdown artifacts that read badly when re-prompted.
fn clean_answer(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = BULLET.replace_all(&text, "• ");
    let text = BLANK_LINES.replace_all(&text, "\n");
    let text = CITATION.replace_all(&text, "");
    let text = LINK.replace_all(&text, "");
    text.trim().to_string()
}
