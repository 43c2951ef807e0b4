//! LLM Provider trait definition

use async_trait::async_trait;

use crate::{ChatOptions, Message, Response, Result};

/// Trait for LLM providers
///
/// Implementations provide a unified interface over chat-completion
/// services. briefwire ships an OpenAI implementation; tests use mocks.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send a conversation and wait for the complete response
    ///
    /// # Arguments
    /// * `messages` - Conversation history including the new message
    /// * `options` - Generation options for this request
    ///
    /// # Returns
    /// The complete response from the LLM
    ///
    /// # Example
    /// ```no_run
    /// use briefwire_llm::{ChatOptions, LLMProvider, Message};
    ///
    /// async fn example(provider: &dyn LLMProvider) -> Result<(), Box<dyn std::error::Error>> {
    ///     let messages = vec![Message::user("Hello!")];
    ///     let response = provider.send_message(messages, ChatOptions::new()).await?;
    ///     println!("{}", response.content);
    ///     Ok(())
    /// }
    /// ```
    async fn send_message(&self, messages: Vec<Message>, options: ChatOptions) -> Result<Response>;

    /// Get the model name/identifier
    fn model(&self) -> &str;

    /// Get the provider name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock provider for testing
    struct MockProvider;

    #[async_trait]
    impl LLMProvider for MockProvider {
        async fn send_message(
            &self,
            _messages: Vec<Message>,
            options: ChatOptions,
        ) -> Result<Response> {
            let content = if options.json_mode {
                "{\"country\": \"Japan\", \"capital\": \"Tokyo\"}".to_string()
            } else {
                "Mock response".to_string()
            };

            Ok(Response {
                content,
                model: "mock-model".to_string(),
                usage: None,
                finish_reason: Some("stop".to_string()),
            })
        }

        fn model(&self) -> &str {
            "mock-model"
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockProvider;
        let response = provider
            .send_message(vec![Message::user("test")], ChatOptions::new())
            .await
            .unwrap();
        assert_eq!(response.content, "Mock response");
        assert_eq!(provider.model(), "mock-model");
        assert_eq!(provider.name(), "mock");
    }

    #[tokio::test]
    async fn test_mock_provider_json_mode() {
        let provider = MockProvider;
        let response = provider
            .send_message(
                vec![Message::user("Where is the capital?")],
                ChatOptions::new().with_json_mode(),
            )
            .await
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&response.content).unwrap();
        assert_eq!(parsed["capital"], "Tokyo");
    }
}
