//! Tool registry and dispatch.
//!
//! This crate owns everything on the tool side of a turn: the static
//! registry of built-in tools, and the hosts that execute a named tool
//! either in-process or against a remote tool server.
//!
//! # Overview
//!
//! - **Tool**: a named capability with a descriptor and an async `execute`.
//! - **ToolRegistry**: immutable name-to-tool mapping built at startup.
//! - **ToolHost**: dispatch by name. [`LocalToolHost`] runs tools in-process
//!   with per-tool timeouts; [`RemoteToolHost`] speaks the tool protocol
//!   over HTTP. [`ToolBackend`] picks one at runtime.
//!
//! Business failures (bad input, division by zero, an unreachable search
//! service) come back as ordinary [`ToolResult`]s whose text starts with
//! `Error`. Only unknown tools, panics, timeouts and transport failures
//! surface as [`ToolError`].
//!
//! # Example
//!
//! ```no_run
//! use tools::{LocalToolHost, StandardTools, ToolHost, ToolRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ToolRegistry::standard(&StandardTools::default())?;
//! let host = LocalToolHost::new(registry);
//!
//! let params = serde_json::json!({"operation": "add", "a": 5, "b": 3});
//! let result = host.execute("calculator", params.as_object().unwrap()).await?;
//! assert_eq!(result.as_str(), "The result of 5 + 3 = 8");
//! # Ok(())
//! # }
//! ```

pub mod builtin;
mod errors;
mod host;
pub mod params;
mod registry;
mod remote;
mod r#trait;
mod types;

pub use builtin::StandardTools;
pub use errors::{Error, Result, ToolError};
pub use host::{LocalToolHost, ToolBackend, ToolHost};
pub use r#trait::{BoxError, LOCAL_TIMEOUT, NETWORK_TIMEOUT, Tool};
pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use remote::{DISCOVERY_TIMEOUT, RemoteToolHost};
pub use types::ToolResult;
