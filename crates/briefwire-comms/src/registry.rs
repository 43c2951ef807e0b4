//! Operation registry for a single agent

use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

use crate::{CommsError, Operation, Result};

/// Registry of the operations one agent exposes
///
/// Thread-safe and cheap to clone; shared between the hosting seam and
/// the in-process transport.
#[derive(Clone)]
pub struct OperationRegistry {
    /// Map of operation name to implementation
    operations: Arc<DashMap<String, Arc<dyn Operation>>>,
}

impl OperationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            operations: Arc::new(DashMap::new()),
        }
    }

    /// Register an operation
    ///
    /// # Returns
    /// Error if an operation with the same name is already registered
    pub fn register<O: Operation + 'static>(&self, operation: O) -> Result<()> {
        let name = operation.name().to_string();

        if self.operations.contains_key(&name) {
            return Err(CommsError::AlreadyRegistered(name));
        }

        self.operations.insert(name.clone(), Arc::new(operation));
        tracing::debug!("Registered operation: {}", name);
        Ok(())
    }

    /// Check if an operation is registered
    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Get an operation by name
    pub fn get_operation(&self, name: &str) -> Option<Arc<dyn Operation>> {
        self.operations.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Invoke an operation by name
    ///
    /// An unknown operation is an error. An operation that fails
    /// internally degrades to an `{"error": ...}` value, so one failing
    /// collaborator never takes its caller down with it.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value> {
        let operation = self
            .get_operation(name)
            .ok_or_else(|| CommsError::OperationNotFound(name.to_string()))?;

        tracing::info!("Invoking operation: {} with args: {}", name, args);

        match operation.invoke(args).await {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!("Operation {} failed: {}", name, e);
                Ok(serde_json::json!({ "error": e.to_string() }))
            }
        }
    }

    /// List all registered operation names
    pub fn list_operations(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.operations.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Describe all operations for a listing endpoint
    pub fn describe(&self) -> Vec<Value> {
        let mut described: Vec<Value> = self
            .operations
            .iter()
            .map(|entry| {
                let op = entry.value();
                serde_json::json!({
                    "name": op.name(),
                    "description": op.description(),
                    "parameters": op.parameters_schema(),
                })
            })
            .collect();
        described.sort_by(|a, b| {
            a["name"].as_str().unwrap_or("").cmp(b["name"].as_str().unwrap_or(""))
        });
        described
    }

    /// Get the number of registered operations
    pub fn count(&self) -> usize {
        self.operations.len()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperationSchema;
    use async_trait::async_trait;

    struct MockOperation;

    #[async_trait]
    impl Operation for MockOperation {
        fn name(&self) -> &str {
            "mock_op"
        }

        fn description(&self) -> &str {
            "A mock operation for testing"
        }

        fn parameters_schema(&self) -> OperationSchema {
            OperationSchema::new()
        }

        async fn invoke(&self, _args: Value) -> Result<Value> {
            Ok(serde_json::json!({"result": "mocked"}))
        }
    }

    struct FailingOperation;

    #[async_trait]
    impl Operation for FailingOperation {
        fn name(&self) -> &str {
            "failing_op"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn parameters_schema(&self) -> OperationSchema {
            OperationSchema::new()
        }

        async fn invoke(&self, _args: Value) -> Result<Value> {
            Err(CommsError::operation("upstream unavailable"))
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = OperationRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_register_operation() {
        let registry = OperationRegistry::new();

        registry.register(MockOperation).unwrap();
        assert_eq!(registry.count(), 1);
        assert!(registry.has_operation("mock_op"));
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = OperationRegistry::new();

        registry.register(MockOperation).unwrap();
        let result = registry.register(MockOperation);

        assert!(matches!(result, Err(CommsError::AlreadyRegistered(_))));
    }

    #[tokio::test]
    async fn test_invoke_operation() {
        let registry = OperationRegistry::new();
        registry.register(MockOperation).unwrap();

        let result = registry.invoke("mock_op", serde_json::json!({})).await.unwrap();
        assert_eq!(result["result"], "mocked");
    }

    #[tokio::test]
    async fn test_invoke_nonexistent_operation() {
        let registry = OperationRegistry::new();
        let result = registry.invoke("nonexistent", serde_json::json!({})).await;

        assert!(matches!(result, Err(CommsError::OperationNotFound(_))));
    }

    #[tokio::test]
    async fn test_failing_operation_degrades_to_error_value() {
        let registry = OperationRegistry::new();
        registry.register(FailingOperation).unwrap();

        let result = registry.invoke("failing_op", serde_json::json!({})).await.unwrap();
        assert!(result["error"].as_str().unwrap().contains("upstream unavailable"));
    }

    #[test]
    fn test_list_operations() {
        let registry = OperationRegistry::new();
        registry.register(MockOperation).unwrap();
        registry.register(FailingOperation).unwrap();

        let names = registry.list_operations();
        assert_eq!(names, vec!["failing_op", "mock_op"]);
    }

    #[test]
    fn test_describe() {
        let registry = OperationRegistry::new();
        registry.register(MockOperation).unwrap();

        let described = registry.describe();
        assert_eq!(described.len(), 1);
        assert_eq!(described[0]["name"], "mock_op");
        assert_eq!(described[0]["parameters"]["type"], "object");
    }
}
