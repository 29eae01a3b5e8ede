//! Model backend trait and generation options.

pub mod errors;
pub mod types;

pub use errors::ModelError;
pub use types::{GenerationOptions, ModelBackend};
