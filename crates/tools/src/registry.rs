//! Static tool registry.

use crate::builtin::{Calculator, ResearchBackend, StandardTools, Temperature, WebSearch};
use crate::{Error, Result, Tool};
use protocol::ToolDescriptor;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable mapping from tool name to tool, in registration order.
///
/// Built once at startup and shared read-only afterwards.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    descriptors: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// The built-in tools: `calculator`, `get_temperature`, `web_search`.
    pub fn standard(config: &StandardTools) -> Result<Self> {
        Self::builder()
            .with_tool(Calculator::new().with_timeout(config.local_timeout))
            .with_tool(Temperature::new().with_timeout(config.local_timeout))
            .with_tool(
                WebSearch::new(ResearchBackend::new(config.search.clone()))
                    .with_timeout(config.network_timeout),
            )
            .build()
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.descriptors[i])
    }

    /// The tool registered under `name`.
    pub fn tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| Arc::clone(&self.tools[i]))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.descriptors.iter().map(|d| d.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

/// Builder for [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistryBuilder {
    pub fn with_tool(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    /// Build the registry, rejecting duplicate names.
    pub fn build(self) -> Result<ToolRegistry> {
        let mut index = HashMap::with_capacity(self.tools.len());
        let mut descriptors = Vec::with_capacity(self.tools.len());

        for (i, tool) in self.tools.iter().enumerate() {
            let descriptor = tool.descriptor().clone();
            if index.insert(descriptor.name.clone(), i).is_some() {
                return Err(Error::DuplicateTool(descriptor.name));
            }
            descriptors.push(descriptor);
        }

        Ok(ToolRegistry {
            tools: self.tools,
            descriptors,
            index,
        })
    }
}
