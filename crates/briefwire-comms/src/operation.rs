//! Operation trait definition

use async_trait::async_trait;
use serde_json::Value;

use crate::{OperationSchema, Result};

/// Trait for named operations an agent exposes to remote callers
///
/// Operations take JSON arguments and return a JSON value. Failures are
/// typed; the seam that exposes the operation decides how to render them
/// for the caller.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Get the operation's unique name
    ///
    /// This is what remote callers invoke.
    fn name(&self) -> &str;

    /// Get a human-readable description of what the operation does
    fn description(&self) -> &str;

    /// Get the JSON schema for the operation's arguments
    fn parameters_schema(&self) -> OperationSchema;

    /// Invoke the operation with given arguments
    ///
    /// # Arguments
    /// * `args` - JSON value containing the operation arguments
    ///
    /// # Returns
    /// The operation's result value or a typed error
    async fn invoke(&self, args: Value) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommsError;

    struct EchoOperation;

    #[async_trait]
    impl Operation for EchoOperation {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Returns its arguments unchanged"
        }

        fn parameters_schema(&self) -> OperationSchema {
            OperationSchema::new()
        }

        async fn invoke(&self, args: Value) -> Result<Value> {
            if args.is_null() {
                return Err(CommsError::operation("echo requires arguments"));
            }
            Ok(args)
        }
    }

    #[tokio::test]
    async fn test_operation_invoke() {
        let op = EchoOperation;
        let result = op.invoke(serde_json::json!({"x": 1})).await.unwrap();
        assert_eq!(result["x"], 1);
    }

    #[tokio::test]
    async fn test_operation_error() {
        let op = EchoOperation;
        let result = op.invoke(Value::Null).await;
        assert!(matches!(result, Err(CommsError::Operation(_))));
    }
}
