pub mod advisor;
pub mod anthropic;
pub mod client;
pub mod prompts;

pub use advisor::Advisor;
pub use anthropic::AnthropicClient;
pub use client::{ApiErrorKind, LLMClient, LLMError};
pub use prompts::parse_suggested_command;
