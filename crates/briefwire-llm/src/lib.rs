//! LLM Provider Abstraction
//!
//! This crate provides a unified interface for the chat-completion
//! calls briefwire makes: rendering the daily brief and resolving
//! locations.
//!
//! # Example
//!
//! ```no_run
//! use briefwire_llm::{ChatOptions, LLMProvider, Message, OpenAIProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAIProvider::new("your-api-key", "gpt-4o")?;
//!
//!     let messages = vec![Message::user("Summarize today's energy news")];
//!     let options = ChatOptions::new().with_temperature(0.7).with_max_tokens(1000);
//!
//!     let response = provider.send_message(messages, options).await?;
//!     println!("Response: {}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod provider;
pub mod types;

// Provider implementations
pub mod openai;

// Re-exports
pub use error::{LLMError, Result};
pub use provider::LLMProvider;
pub use types::{ChatOptions, Message, MessageRole, Response, TokenUsage};

pub use openai::OpenAIProvider;
