//! Configuration loading from steward.toml.

use runtime::{AnthropicBackend, DEFAULT_OLLAMA_HOST, GenerationOptions, OllamaBackend, Provider};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tools::StandardTools;
use tools::builtin::ResearchConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Model provider configuration.
    #[serde(default)]
    pub model: ModelConfig,

    /// Where tools run and how long they may take.
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Research service used by web search.
    #[serde(default)]
    pub search: ResearchConfig,

    /// Listen addresses.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Model provider configuration.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Provider name: "ollama" or "anthropic".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Ollama server URL.
    #[serde(default = "default_host")]
    pub host: String,

    /// Model to use.
    #[serde(default = "default_model")]
    pub model: String,

    /// Anthropic API key. Falls back to `ANTHROPIC_API_KEY`.
    pub api_key: Option<String>,

    /// Per-call limit in seconds.
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,

    /// Sampling settings.
    #[serde(flatten)]
    pub generation: GenerationOptions,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            host: default_host(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_model_timeout(),
            generation: GenerationOptions::default(),
        }
    }
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_host() -> String {
    DEFAULT_OLLAMA_HOST.to_string()
}

fn default_model() -> String {
    "qwen3:4b".to_string()
}

fn default_model_timeout() -> u64 {
    runtime::DEFAULT_MODEL_TIMEOUT.as_secs()
}

/// Where tools execute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// In-process registry.
    #[default]
    Local,
    /// A tool server at `server_url`.
    Remote,
}

/// Tool configuration.
#[derive(Debug, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub mode: ToolMode,

    /// Tool server URL for remote mode.
    #[serde(default = "default_tool_server")]
    pub server_url: String,

    /// Timeout for local-compute tools.
    #[serde(default = "default_local_timeout")]
    pub local_timeout_secs: u64,

    /// Timeout for network tools and remote execution.
    #[serde(default = "default_network_timeout")]
    pub network_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            mode: ToolMode::default(),
            server_url: default_tool_server(),
            local_timeout_secs: default_local_timeout(),
            network_timeout_secs: default_network_timeout(),
        }
    }
}

fn default_tool_server() -> String {
    "http://localhost:8000".to_string()
}

fn default_local_timeout() -> u64 {
    tools::LOCAL_TIMEOUT.as_secs()
}

fn default_network_timeout() -> u64 {
    tools::NETWORK_TIMEOUT.as_secs()
}

/// Listen addresses for the HTTP surfaces.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_tools_addr")]
    pub tools_addr: SocketAddr,

    #[serde(default = "default_web_addr")]
    pub web_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            tools_addr: default_tools_addr(),
            web_addr: default_web_addr(),
        }
    }
}

fn default_tools_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_web_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load from `path`, or use defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build the configured model backend.
    pub fn provider(&self) -> Result<Provider, ConfigError> {
        self.provider_with_env_key(std::env::var("ANTHROPIC_API_KEY").ok())
    }

    fn provider_with_env_key(&self, env_key: Option<String>) -> Result<Provider, ConfigError> {
        let model = &self.model;
        match model.provider.as_str() {
            "ollama" => Ok(OllamaBackend::new(&model.host, &model.model).into()),
            "anthropic" => {
                let api_key = model
                    .api_key
                    .clone()
                    .or(env_key)
                    .ok_or(ConfigError::MissingApiKey)?;
                Ok(AnthropicBackend::builder(api_key, &model.model).build().into())
            }
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model.timeout_secs)
    }

    /// Settings for the built-in tools.
    pub fn standard_tools(&self) -> StandardTools {
        StandardTools {
            local_timeout: Duration::from_secs(self.tools.local_timeout_secs),
            network_timeout: Duration::from_secs(self.tools.network_timeout_secs),
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("anthropic provider needs model.api_key or ANTHROPIC_API_KEY")]
    MissingApiKey,

    #[error("unknown model provider '{0}' (expected 'ollama' or 'anthropic')")]
    UnknownProvider(String),
}
