use async_trait::async_trait;
use protocol::{Parameters, ToolDescriptor};
use runtime::{
    AnswerPath, Error, GenerationOptions, ModelBackend, ModelError, Orchestrator, prompt,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tools::builtin::{Calculator, Temperature};
use tools::{BoxError, LocalToolHost, Tool, ToolHost, ToolRegistry, ToolResult};

/// Replays canned replies in order and records every call.
struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ModelError>>>,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
    delay: Option<Duration>,
}

impl ScriptedModel {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    fn failing() -> Self {
        let model = Self::new(&[]);
        model
            .replies
            .lock()
            .unwrap()
            .push_back(Err(ModelError::Network("connection refused".into())));
        model
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(&["too late"])
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    fn options(&self, call: usize) -> GenerationOptions {
        self.calls.lock().unwrap()[call].1
    }
}

impl ModelBackend for ScriptedModel {
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ModelError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *options));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Api("script exhausted".into())))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

struct Verbose;

#[async_trait]
impl Tool for Verbose {
    fn descriptor(&self) -> &ToolDescriptor {
        static DESCRIPTOR: std::sync::LazyLock<ToolDescriptor> =
            std::sync::LazyLock::new(|| ToolDescriptor::new("verbose", "Talks a lot"));
        &DESCRIPTOR
    }

    async fn execute(&self, _params: &Parameters) -> Result<ToolResult, BoxError> {
        Ok(ToolResult::ok("word ".repeat(120)))
    }
}

struct Explodes;

#[async_trait]
impl Tool for Explodes {
    fn descriptor(&self) -> &ToolDescriptor {
        static DESCRIPTOR: std::sync::LazyLock<ToolDescriptor> =
            std::sync::LazyLock::new(|| ToolDescriptor::new("explodes", "Always panics"));
        &DESCRIPTOR
    }

    async fn execute(&self, _params: &Parameters) -> Result<ToolResult, BoxError> {
        panic!("boom")
    }
}

fn tool_host() -> LocalToolHost {
    let registry = ToolRegistry::builder()
        .with_tool(Calculator::new())
        .with_tool(Temperature::new())
        .with_tool(Verbose)
        .with_tool(Explodes)
        .build()
        .unwrap();
    LocalToolHost::new(registry)
}

fn orchestrator(model: ScriptedModel) -> Orchestrator<ScriptedModel, LocalToolHost> {
    Orchestrator::new(model, tool_host())
}

#[tokio::test]
async fn arithmetic_question_uses_calculator() {
    let orchestrator = orchestrator(ScriptedModel::new(&[
        "<think>The user wants a sum.</think>\n{\"tool_name\": \"calculator\", \"parameters\": {\"operation\": \"add\", \"a\": 5, \"b\": 3}}",
        "5 + 3 equals 8.",
    ]));

    let outcome = orchestrator.handle_turn("What's 5 + 3?").await.unwrap();

    assert_eq!(outcome.path, AnswerPath::ToolAnswer);
    assert_eq!(outcome.content, "5 + 3 equals 8.");
    assert!(outcome.error.is_none());
    let record = outcome.tool_call.expect("tool record");
    assert_eq!(record.name, "calculator");
    assert_eq!(record.parameters, json!({"operation": "add", "a": 5, "b": 3}));
    assert_eq!(record.result, "The result of 5 + 3 = 8");

    let model = orchestrator.model();
    let prompts = model.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("The result of 5 + 3 = 8"));
    assert_eq!(model.options(0), GenerationOptions::default());
    assert_eq!(model.options(1), GenerationOptions::default().final_answer());
}

#[tokio::test]
async fn greeting_needs_no_tool() {
    let orchestrator = orchestrator(ScriptedModel::new(&[
        "NO_TOOL_NEEDED",
        "Hello! How can I help you today?",
    ]));

    let outcome = orchestrator.handle_turn("Hello").await.unwrap();

    assert_eq!(outcome.path, AnswerPath::Direct);
    assert_eq!(outcome.content, "Hello! How can I help you today?");
    assert!(outcome.tool_call.is_none());
    assert!(outcome.error.is_none());
    assert_eq!(orchestrator.model().prompts()[1], prompt::direct("Hello"));
}

#[tokio::test]
async fn unknown_tool_falls_back_with_error() {
    let orchestrator = orchestrator(ScriptedModel::new(&[
        r#"{"tool_name": "nonexistent_tool", "parameters": {"x": 1}}"#,
        "I couldn't use that tool, but you could try a search engine.",
    ]));

    let outcome = orchestrator.handle_turn("Do something odd").await.unwrap();

    assert_eq!(outcome.path, AnswerPath::ToolFailure);
    assert!(!outcome.content.is_empty());
    assert!(outcome.tool_call.is_none());
    let error = outcome.error.expect("error surfaced");
    assert_eq!(
        error,
        "Tool execution failed: Tool 'nonexistent_tool' not found. \
         Available tools: calculator, get_temperature, verbose, explodes"
    );

    let prompts = orchestrator.model().prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("Available tools: calculator, get_temperature, verbose, explodes"));
}

#[tokio::test]
async fn division_by_zero_reaches_final_answer() {
    let orchestrator = orchestrator(ScriptedModel::new(&[
        r#"{"tool_name": "calculator", "parameters": {"operation": "divide", "a": 1, "b": 0}}"#,
        "You can't divide by zero.",
    ]));

    let outcome = orchestrator.handle_turn("What's 1 / 0?").await.unwrap();

    assert_eq!(outcome.path, AnswerPath::ToolAnswer);
    assert_eq!(
        outcome.tool_call.expect("tool record").result,
        "Error: Cannot divide by zero"
    );
    assert!(orchestrator.model().prompts()[1].contains("Error: Cannot divide by zero"));
}

#[tokio::test]
async fn unreadable_decision_answers_directly() {
    let orchestrator = orchestrator(ScriptedModel::new(&[
        "Hmm, I would probably use {the calculator} here.",
        "It depends on the numbers.",
    ]));

    let outcome = orchestrator.handle_turn("Help me count").await.unwrap();

    assert_eq!(outcome.path, AnswerPath::Fallback);
    assert_eq!(outcome.content, "It depends on the numbers.");
    assert!(outcome.tool_call.is_none());
    assert!(outcome.error.is_none());
    assert_eq!(orchestrator.model().prompts()[1], prompt::fallback("Help me count"));
}

#[tokio::test]
async fn panicking_tool_is_recovered() {
    let orchestrator = orchestrator(ScriptedModel::new(&[
        r#"{"tool_name": "explodes", "parameters": {}}"#,
        "Something went wrong with that tool.",
    ]));

    let outcome = orchestrator.handle_turn("Blow up").await.unwrap();

    assert_eq!(outcome.path, AnswerPath::ToolFailure);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Tool execution failed: Tool 'explodes' failed: tool panicked")
    );
}

#[tokio::test]
async fn long_results_are_cut_in_the_record_only() {
    let orchestrator = orchestrator(ScriptedModel::new(&[
        r#"{"tool_name": "verbose", "parameters": {}}"#,
        "Lots of words.",
    ]));

    let outcome = orchestrator.handle_turn("Say a lot").await.unwrap();

    let record = outcome.tool_call.expect("tool record");
    assert_eq!(record.result.chars().count(), 503);
    assert!(record.result.ends_with("..."));
    assert!(orchestrator.model().prompts()[1].contains(&"word ".repeat(120)));
}

#[tokio::test]
async fn decision_prompt_lists_every_tool() {
    let orchestrator = orchestrator(ScriptedModel::new(&["NO_TOOL_NEEDED", "Hi"]));
    orchestrator.handle_turn("Hello").await.unwrap();

    let decision = &orchestrator.model().prompts()[0];
    for descriptor in orchestrator.tools().descriptors() {
        let line = format!("- {}: {}", descriptor.name, descriptor.description);
        assert!(decision.contains(&line), "missing {line}");
    }
    assert!(decision.contains("User query: Hello"));
}

#[tokio::test]
async fn model_failure_ends_the_turn() {
    let orchestrator = orchestrator(ScriptedModel::failing());

    let err = orchestrator.handle_turn("Hello").await.unwrap_err();

    assert!(matches!(err, Error::ModelUnavailable(ModelError::Network(_))));
    assert_eq!(orchestrator.model().prompts().len(), 1);
}

#[tokio::test]
async fn slow_model_times_out() {
    let orchestrator = Orchestrator::new(
        ScriptedModel::slow(Duration::from_secs(30)),
        tool_host(),
    )
    .with_model_timeout(Duration::from_millis(50));

    let err = orchestrator.handle_turn("Hello").await.unwrap_err();

    assert!(matches!(err, Error::ModelUnavailable(ModelError::Timeout(_))));
}

#[tokio::test]
async fn status_pings_model_and_counts_tools() {
    let orchestrator = orchestrator(ScriptedModel::new(&["ok"]));

    let status = orchestrator.status().await.unwrap();

    assert_eq!(status.model, "scripted");
    assert_eq!(status.tools_available, 4);
    assert_eq!(orchestrator.model().options(0).num_predict, 5);
}
