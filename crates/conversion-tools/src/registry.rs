//! Tool registry for managing and executing tools.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::ToolError;
use crate::extract::Domain;
use crate::result::ConversionResult;
use crate::tool::Tool;

/// Registry of tools in registration order.
///
/// Order is significant: the router runs tools in the order they were
/// registered, so the default registry registers unit, currency, date/time.
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Register a tool.
    ///
    /// If a tool with the same name already exists, it is replaced in place.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_boxed(Arc::new(tool));
    }

    /// Register a shared tool.
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        info!("Registering tool: {}", name);
        self.tools.insert(name, tool);
    }

    /// Registered tool names, in order.
    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// First tool handling `domain`.
    pub fn for_domain(&self, domain: Domain) -> Option<&Arc<dyn Tool>> {
        self.tools.values().find(|t| t.domain() == domain)
    }

    /// Tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }

    /// Get tool descriptions for help text.
    pub fn get_descriptions(&self) -> Vec<(&str, &str)> {
        self.tools
            .values()
            .map(|t| (t.name(), t.description()))
            .collect()
    }

    /// Run a tool by name against a raw query.
    ///
    /// `Ok(None)` means the tool found nothing to do in the query.
    pub async fn execute(
        &self,
        name: &str,
        query: &str,
    ) -> Result<Option<ConversionResult>, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        debug!("Executing tool '{}'", name);
        let result = tool.run(query).await;

        debug!(
            "Tool '{}' completed: matched={}, success={}",
            name,
            result.is_some(),
            result.as_ref().is_some_and(|r| r.success)
        );
        Ok(result)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ConversionIntent;
    use crate::result::ResultDetails;
    use async_trait::async_trait;

    struct EchoTool(&'static str, Domain);

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "Echoes back the input"
        }

        fn domain(&self) -> Domain {
            self.1
        }

        fn extract(&self, query: &str) -> Option<ConversionIntent> {
            query.strip_prefix("echo ").map(|rest| {
                ConversionIntent::Unit(crate::extract::UnitIntent {
                    value: 1.0,
                    from_unit: rest.to_string(),
                    to_unit: rest.to_string(),
                })
            })
        }

        async fn calculate(&self, _intent: ConversionIntent) -> ConversionResult {
            ConversionResult::ok(ResultDetails::Unparsed { query: "echo".into() }, "echoed")
        }
    }

    #[tokio::test]
    async fn test_registry_preserves_order() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool("zeta", Domain::DateTime));
        registry.register(EchoTool("alpha", Domain::Unit));
        registry.register(EchoTool("mid", Domain::Currency));

        assert_eq!(registry.list_tools(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.for_domain(Domain::Unit).unwrap().name(), "alpha");
        assert!(registry.has_tool("mid"));
        assert!(!registry.has_tool("nonexistent"));
    }

    #[tokio::test]
    async fn test_registry_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool("echo", Domain::Unit));

        let hit = registry.execute("echo", "echo hello").await.unwrap();
        assert_eq!(hit.unwrap().formatted(), Some("echoed"));

        let miss = registry.execute("echo", "goodbye").await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_registry_not_found() {
        let registry = ToolRegistry::new();
        let result = registry.execute("nonexistent", "query").await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }
}
