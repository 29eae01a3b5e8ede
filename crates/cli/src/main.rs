mod config;
mod error;

use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use protocol::ChatResponse;
use runtime::{Orchestrator, Provider};
use tools::{LocalToolHost, RemoteToolHost, ToolBackend, ToolHost, ToolRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, ToolMode};
use error::{Error, Result};

const CONFIG_FILE: &str = "steward.toml";
const EXIT_WORDS: &[&str] = &["exit", "quit", "bye"];

#[derive(Parser)]
#[command(name = "steward")]
#[command(about = "Ask questions; a local model decides when to use tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat
    Chat,
    /// Answer a single question
    Ask {
        question: String,
        /// Print the full turn as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available tools
    Tools,
    /// Run one tool directly
    Call {
        tool: String,
        /// Parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,
    },
    /// Serve the tools over HTTP
    ServeTools {
        /// Listen address (overrides server.tools_addr)
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Serve the chat API over HTTP
    Serve {
        /// Listen address (overrides server.web_addr)
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Some(Commands::Chat) | None => cmd_chat(&config).await,
        Some(Commands::Ask { question, json }) => cmd_ask(&config, &question, json).await,
        Some(Commands::Tools) => cmd_tools(&config).await,
        Some(Commands::Call { tool, params }) => cmd_call(&config, &tool, &params).await,
        Some(Commands::ServeTools { addr }) => cmd_serve_tools(&config, addr).await,
        Some(Commands::Serve { addr }) => cmd_serve(&config, addr).await,
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("steward=debug,runtime=debug,tools=debug,server=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("steward=info,runtime=info,tools=info,server=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn tool_backend(config: &Config) -> Result<ToolBackend> {
    let backend = match config.tools.mode {
        ToolMode::Local => ToolBackend::Local(local_tools(config)?),
        ToolMode::Remote => {
            let timeout = config.standard_tools().network_timeout;
            ToolBackend::Remote(
                RemoteToolHost::connect_with_timeout(&config.tools.server_url, timeout).await?,
            )
        }
    };
    Ok(backend)
}

fn local_tools(config: &Config) -> Result<LocalToolHost> {
    let registry = ToolRegistry::standard(&config.standard_tools())?;
    Ok(LocalToolHost::new(registry))
}

async fn orchestrator(config: &Config) -> Result<Orchestrator<Provider, ToolBackend>> {
    let provider = config.provider()?;
    let tools = tool_backend(config).await?;
    info!(model = %provider, tools = tools.descriptors().len(), "orchestrator ready");

    Ok(Orchestrator::new(provider, tools)
        .with_options(config.model.generation)
        .with_model_timeout(config.model_timeout()))
}

async fn cmd_chat(config: &Config) -> Result<()> {
    println!("steward v{}", env!("CARGO_PKG_VERSION"));

    let orchestrator = orchestrator(config).await?;
    let status = orchestrator.status().await?;

    println!("Model: {}", status.model);
    println!("Tools:");
    for descriptor in orchestrator.tools().descriptors() {
        println!("  - {}: {}", descriptor.name, descriptor.description);
    }
    println!("Type 'exit' or Ctrl+D to quit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            break;
        }

        match orchestrator.handle_turn(input).await {
            Ok(outcome) => {
                if let Some(call) = &outcome.tool_call {
                    println!("\n[{} {}]", call.name, call.parameters);
                }
                if let Some(error) = &outcome.error {
                    println!("\n[{error}]");
                }
                println!("\n{}\n", outcome.content);
            }
            Err(e) => {
                eprintln!("Error: {e}\n");
            }
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

async fn cmd_ask(config: &Config, question: &str, json: bool) -> Result<()> {
    let orchestrator = orchestrator(config).await?;
    let outcome = orchestrator.handle_turn(question).await?;

    if json {
        let response = ChatResponse::from(outcome);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", outcome.content);
    }
    Ok(())
}

async fn cmd_tools(config: &Config) -> Result<()> {
    let tools = tool_backend(config).await?;

    for descriptor in tools.descriptors() {
        println!("{}: {}", descriptor.name, descriptor.description);
        for param in &descriptor.parameters {
            let required = if param.required { "required" } else { "optional" };
            println!(
                "    {} ({}, {required}): {}",
                param.name, param.kind, param.description
            );
        }
    }
    Ok(())
}

async fn cmd_call(config: &Config, tool: &str, params: &str) -> Result<()> {
    let parameters = match serde_json::from_str(params)? {
        serde_json::Value::Object(map) => map,
        other => return Err(Error::InvalidParams(format!("expected a JSON object, got {other}"))),
    };

    let tools = tool_backend(config).await?;
    let result = tools.execute(tool, &parameters).await?;
    println!("{result}");
    Ok(())
}

async fn cmd_serve_tools(config: &Config, addr: Option<SocketAddr>) -> Result<()> {
    let host = Arc::new(local_tools(config)?);
    let addr = addr.unwrap_or(config.server.tools_addr);
    info!(tools = ?host.names(), "starting tool server");

    server::serve(addr, server::tool_router(host)).await?;
    Ok(())
}

async fn cmd_serve(config: &Config, addr: Option<SocketAddr>) -> Result<()> {
    let orchestrator = orchestrator(config).await?;
    let status = orchestrator.status().await?;
    let addr = addr.unwrap_or(config.server.web_addr);
    info!(model = %status.model, tools = status.tools_available, "starting chat api");

    server::serve(addr, server::chat_router(Arc::new(orchestrator))).await?;
    Ok(())
}
