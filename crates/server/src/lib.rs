//! HTTP surfaces for Steward.
//!
//! Two independent routers:
//!
//! - [`tool_router`] exposes a [`ToolHost`](tools::ToolHost) as a tool
//!   server (`/mcp/tools`, `/mcp/execute`), the counterpart of
//!   [`RemoteToolHost`](tools::RemoteToolHost).
//! - [`chat_router`] exposes an [`Orchestrator`](runtime::Orchestrator) as
//!   a chat API (`/api/chat`, `/api/status`).
//!
//! [`serve`] binds an address and runs either one until the process exits.

mod chat_api;
mod tool_api;

pub use chat_api::{ApiError, chat_router};
pub use tool_api::tool_router;

use axum::Router;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind `addr` and serve `app`.
pub async fn serve(addr: SocketAddr, app: Router) -> Result<(), Error> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
