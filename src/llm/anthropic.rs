use crate::llm::client::{ApiErrorKind, LLMClient, LLMError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const MAX_TOKENS: u32 = 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    #[serde(default)]
    message: String,
}

pub struct AnthropicClient {
    api_key: String,
    model: String,
    endpoint: String,
    http_client: Client,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Result<Self, LLMError> {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Result<Self, LLMError> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            api_key,
            model,
            endpoint: ANTHROPIC_API_URL.to_string(),
            http_client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call_api(&self, prompt: &str) -> Result<String, LLMError> {
        let request_body = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "sending request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();

        if status.is_success() {
            let api_response: AnthropicResponse = response.json().await?;
            return Self::extract_text(api_response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::warn!(status = status.as_u16(), "API request failed");
        Err(Self::error_for_status(status.as_u16(), retry_after, &body))
    }

    fn map_transport_error(e: reqwest::Error) -> LLMError {
        if e.is_timeout() {
            LLMError::Timeout
        } else {
            LLMError::NetworkError(e)
        }
    }

    fn extract_text(response: AnthropicResponse) -> Result<String, LLMError> {
        let text: Vec<String> = response
            .content
            .into_iter()
            .map(|block| block.text)
            .filter(|text| !text.is_empty())
            .collect();

        if text.is_empty() {
            return Err(LLMError::InvalidResponse("No content in response".to_string()));
        }

        Ok(text.join("\n"))
    }

    /// Build the error for a failed response.
    ///
    /// The status code decides first, then the structured error type in the
    /// body. Anything left is an `ApiError` carrying the raw text.
    fn error_for_status(status: u16, retry_after: Option<u64>, body: &str) -> LLMError {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
        let detail = envelope
            .as_ref()
            .map(|e| e.error.message.clone())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| body.to_string());

        let kind = ApiErrorKind::from_status(status)
            .or_else(|| envelope.as_ref().and_then(|e| ApiErrorKind::from_error_type(&e.error.error_type)));

        match kind {
            Some(ApiErrorKind::RateLimited) => LLMError::RateLimitExceeded(retry_after.unwrap_or(60)),
            Some(ApiErrorKind::AuthFailed) => LLMError::AuthFailed(detail),
            Some(ApiErrorKind::NotFound) => LLMError::NotFound(detail),
            Some(ApiErrorKind::Other) | None => {
                LLMError::ApiError(format!("API returned status {}: {}", status, detail))
            }
        }
    }
}

#[async_trait]
impl LLMClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        let response = self.call_api(prompt).await?;
        Ok(response.trim().to_string())
    }
}
