//! Wire types shared by the tool server, its clients, and the chat surfaces.
//!
//! Two contracts live here:
//!
//! - **Tool protocol**: discovery (`GET /mcp/tools`) returns a list of
//!   [`ToolDescriptor`]s, and execution (`POST /mcp/execute`) takes an
//!   [`ExecuteRequest`] and answers with an [`ExecuteResponse`] or an
//!   [`ErrorDetail`].
//! - **Turn contract**: a caller sends a [`ChatRequest`] and receives a
//!   [`ChatResponse`] carrying the answer and at most one [`ToolCallRecord`].
//!
//! # Example
//!
//! ```
//! use protocol::{ParameterSpec, ToolDescriptor};
//!
//! let descriptor = ToolDescriptor::new("calculator", "Performs basic arithmetic")
//!     .with_parameter(ParameterSpec::required("a", "float", "First number"));
//!
//! let json = serde_json::to_value(&descriptor).unwrap();
//! assert_eq!(json["parameters"][0]["type"], "float");
//! ```

mod chat;
mod tool;

pub use chat::{ChatRequest, ChatResponse, ToolCallRecord};
pub use tool::{ErrorDetail, ExecuteRequest, ExecuteResponse, ParameterSpec, Parameters, ToolDescriptor};
