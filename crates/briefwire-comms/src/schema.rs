//! JSON Schema descriptions for operations

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON Schema for operation arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSchema {
    /// Type (usually "object" for operation arguments)
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Properties of the object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,

    /// Required properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Description of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OperationSchema {
    /// Create a new operation schema
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: None,
            required: None,
            description: None,
        }
    }

    /// Set properties
    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Set required fields
    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = Some(required);
        self
    }

    /// Set description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Default for OperationSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to create a simple property schema
pub fn property(type_name: &str, description: &str) -> Value {
    serde_json::json!({
        "type": type_name,
        "description": description,
    })
}
