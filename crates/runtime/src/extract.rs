//! Decision extraction: turning free-form model text into a tool decision.
//!
//! Model output is prose that may wrap a JSON object, carry reasoning
//! markup, or say nothing useful at all. Extraction never fails; anything
//! that is neither the sentinel nor a usable tool call is reported as
//! [`DecisionOutcome::Unparseable`] and handled by the caller.

use protocol::Parameters;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Marker a model emits when no tool is needed.
pub const NO_TOOL_SENTINEL: &str = "NO_TOOL_NEEDED";

/// A tool call requested by the model.
///
/// Whether `tool_name` is registered is checked at dispatch, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub tool_name: String,
    pub parameters: Parameters,
}

/// What the model decided for a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionOutcome {
    NoToolNeeded,
    ToolCall(ToolInvocation),
    /// Neither the sentinel nor a valid call; holds the original text.
    Unparseable(String),
}

static REASONING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<think(?:ing)?>.*?</think(?:ing)?>").unwrap());

/// Remove `<think>`/`<thinking>` blocks, case-insensitively.
///
/// Only complete blocks are removed; either tag spelling may close either
/// opener. A tag with no partner is left in place as ordinary text.
pub fn strip_reasoning(text: &str) -> String {
    REASONING.replace_all(text, "").into_owned()
}

/// Classify raw model text.
pub fn extract(text: &str) -> DecisionOutcome {
    let visible = strip_reasoning(text);

    if visible.to_ascii_uppercase().contains(NO_TOOL_SENTINEL) {
        return DecisionOutcome::NoToolNeeded;
    }

    json_objects(&visible)
        .into_iter()
        .find_map(|candidate| serde_json::from_str::<ToolInvocation>(candidate).ok())
        .map_or_else(
            || DecisionOutcome::Unparseable(text.to_string()),
            DecisionOutcome::ToolCall,
        )
}

/// Every balanced `{...}` span, ordered by its opening brace.
///
/// A single pass with a stack of open braces. Braces inside string literals
/// don't count; quotes are only tracked while some brace is open, so prose
/// around the object can't start a string. Opening braces that never close
/// produce no span.
fn json_objects(text: &str) -> Vec<&str> {
    let mut open = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if !open.is_empty() => in_string = true,
            '{' => open.push(i),
            '}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, i));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable_by_key(|&(start, _)| start);
    spans.into_iter().map(|(start, end)| &text[start..=end]).collect()
}
