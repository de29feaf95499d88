use crate::llm::anthropic::AnthropicClient;
use crate::llm::client::{LLMClient, LLMError};
use crate::llm::prompts;
use crate::store::HistoryEntry;

/// Remote advice on commands, history, diffs and logs.
///
/// Every operation builds one prompt and makes one request. Failures are
/// returned as-is; nothing is retried.
pub struct Advisor {
    client: Box<dyn LLMClient>,
}

impl Advisor {
    pub fn new(client: Box<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Build an advisor backed by the Anthropic API.
    ///
    /// `None` (no key configured) is reported as `MissingApiKey`.
    pub fn from_api_key(api_key: Option<String>) -> Result<Self, LLMError> {
        let api_key = api_key.ok_or(LLMError::MissingApiKey)?;
        let client = AnthropicClient::new(api_key)?;
        Ok(Self::new(Box::new(client)))
    }

    pub async fn ask_command(&self, query: &str) -> Result<String, LLMError> {
        self.client.complete(&prompts::ask_command(query)).await
    }

    pub async fn explain_command(&self, command: &str) -> Result<String, LLMError> {
        self.client.complete(&prompts::explain_command(command)).await
    }

    pub async fn generate_commit_message(&self, diff: &str) -> Result<String, LLMError> {
        if diff.trim().is_empty() {
            return Err(LLMError::EmptyInput("no changes in diff".to_string()));
        }
        self.client.complete(&prompts::commit_message(diff)).await
    }

    pub async fn analyze_history(&self, history: &[HistoryEntry]) -> Result<String, LLMError> {
        self.client.complete(&prompts::analyze_history(history)).await
    }

    pub async fn suggest_rollback(&self, dangerous: &[&HistoryEntry]) -> Result<String, LLMError> {
        self.client.complete(&prompts::suggest_rollback(dangerous)).await
    }

    pub async fn analyze_log(&self, content: &str, project_context: &str) -> Result<String, LLMError> {
        self.client
            .complete(&prompts::analyze_log(content, project_context))
            .await
    }
}
