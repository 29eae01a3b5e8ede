//! Built-in tools.

mod calculator;
mod research;
mod temperature;
mod web_search;

pub use calculator::Calculator;
pub use research::{ResearchBackend, ResearchConfig, SearchBackend, SearchError};
pub use temperature::Temperature;
pub use web_search::WebSearch;

use crate::{LOCAL_TIMEOUT, NETWORK_TIMEOUT};
use std::time::Duration;

/// Settings for [`ToolRegistry::standard`](crate::ToolRegistry::standard).
#[derive(Debug, Clone)]
pub struct StandardTools {
    /// Timeout for the local-compute tools.
    pub local_timeout: Duration,
    /// Timeout for tools that call out over the network.
    pub network_timeout: Duration,
    pub search: ResearchConfig,
}

impl Default for StandardTools {
    fn default() -> Self {
        Self {
            local_timeout: LOCAL_TIMEOUT,
            network_timeout: NETWORK_TIMEOUT,
            search: ResearchConfig::default(),
        }
    }
}
