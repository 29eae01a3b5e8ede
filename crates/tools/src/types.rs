//! Tool output type.

use std::fmt;

const ERROR_PREFIX: &str = "Error";

/// Human-readable output of a tool.
///
/// Tools report their own failures as text starting with `Error`, so a
/// result is always something the model can be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult(String);

impl ToolResult {
    /// A successful outcome description.
    pub fn ok(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// An error description, rendered as `Error: <message>`.
    pub fn error(message: impl fmt::Display) -> Self {
        Self(format!("{ERROR_PREFIX}: {message}"))
    }

    /// Whether the tool reported a failure.
    pub fn is_error(&self) -> bool {
        self.0.starts_with(ERROR_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The text cut to at most `max_chars` characters, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.0.char_indices().nth(max_chars) {
            Some((end, _)) => format!("{}...", &self.0[..end]),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for ToolResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ToolResult {
    fn from(text: String) -> Self {
        Self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(!ToolResult::ok("The result of 5 + 3 = 8").is_error());
        let err = ToolResult::error("Cannot divide by zero");
        assert!(err.is_error());
        assert_eq!(err.as_str(), "Error: Cannot divide by zero");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let result = ToolResult::ok("ÿÿÿÿ");
        assert_eq!(result.preview(2), "ÿÿ...");
        assert_eq!(result.preview(4), "ÿÿÿÿ");
        assert_eq!(result.preview(10), "ÿÿÿÿ");
    }
}
