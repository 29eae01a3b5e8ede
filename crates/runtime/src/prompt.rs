//! Prompt builders for each step of a turn.

use crate::extract::NO_TOOL_SENTINEL;
use protocol::ToolDescriptor;
use std::fmt::Write;

/// One `- name: description` line per tool, in catalog order.
pub fn render_catalog(tools: &[ToolDescriptor]) -> String {
    tools
        .iter()
        .map(|tool| format!("- {}: {}", tool.name, tool.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asks the model to pick a tool or answer with the sentinel.
pub fn decision(tools: &[ToolDescriptor], query: &str) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Available tools:\n{}\n", render_catalog(tools));
    let _ = writeln!(prompt, "User query: {query}\n");
    let _ = writeln!(
        prompt,
        "If this query needs a tool, respond with ONLY this JSON format:\n\
         {{\"tool_name\": \"exact_tool_name\", \"parameters\": {{\"param\": \"value\"}}}}\n"
    );
    let _ = writeln!(
        prompt,
        "If no tool is needed, respond with: {NO_TOOL_SENTINEL}\n"
    );
    prompt.push_str("Examples:\n");
    for (question, answer) in EXAMPLES {
        let _ = writeln!(prompt, "- \"{question}\" → {answer}");
    }
    let _ = writeln!(prompt, "- \"Hello\" → {NO_TOOL_SENTINEL}");
    prompt.push_str("\nResponse:");
    prompt
}

const EXAMPLES: &[(&str, &str)] = &[
    (
        "What's 5 + 3?",
        r#"{"tool_name": "calculator", "parameters": {"operation": "add", "a": 5, "b": 3}}"#,
    ),
    (
        "Temperature in Pune",
        r#"{"tool_name": "get_temperature", "parameters": {"place_name": "Pune"}}"#,
    ),
    (
        "Latest AI developments",
        r#"{"tool_name": "web_search", "parameters": {"query": "latest AI developments"}}"#,
    ),
    (
        "WTC 2025 final",
        r#"{"tool_name": "web_search", "parameters": {"query": "WTC 2025 final Australia South Africa"}}"#,
    ),
];

/// Answer without tools.
pub fn direct(query: &str) -> String {
    format!("User asked: {query}\n\nProvide a helpful, friendly answer:")
}

/// Answer without tools after the decision could not be read.
pub fn fallback(query: &str) -> String {
    format!("User asked: {query}\n\nProvide a helpful answer:")
}

/// Phrase the answer from a tool's result.
pub fn final_answer(query: &str, tool_name: &str, result: &str) -> String {
    format!(
        "The user asked: \"{query}\"\n\n\
         I used the {tool_name} tool and received this information:\n\n\
         TOOL RESULT:\n{result}\n\n\
         IMPORTANT INSTRUCTIONS:\n\
         1. Use ONLY the information from the tool result above to answer the user's question\n\
         2. Do NOT ignore the tool result or say the information is unavailable\n\
         3. Include any specific facts, numbers, dates, or details from the tool result\n\
         4. If the tool result reports an error, explain it plainly\n\
         5. Be conversational and helpful\n\n\
         Based on the tool result above, provide a complete and accurate answer to the user's question:"
    )
}

/// Explain that the tool could not be used.
pub fn tool_failure(query: &str, error: &str) -> String {
    format!(
        "User asked: {query}\n\n\
         I encountered an error while trying to use a tool to answer this: {error}\n\n\
         Please provide a helpful response explaining this limitation and suggest alternative \
         ways to find the information:"
    )
}
