use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("API key not configured. Set ANTHROPIC_API_KEY or run: devkit config --api-key <key>")]
    MissingApiKey,

    #[error("Rate limit exceeded, retry after {0}s")]
    RateLimitExceeded(u64),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Model or endpoint not found: {0}")]
    NotFound(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Nothing to send; raised before any request is made
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Coarse category of a remote API failure, used to pick advice for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    RateLimited,
    AuthFailed,
    NotFound,
    Other,
}

impl ApiErrorKind {
    /// Category for an HTTP status code, if the status alone decides it
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            429 => Some(ApiErrorKind::RateLimited),
            401 | 403 => Some(ApiErrorKind::AuthFailed),
            404 => Some(ApiErrorKind::NotFound),
            _ => None,
        }
    }

    /// Category for a provider error type such as `rate_limit_error`
    pub fn from_error_type(error_type: &str) -> Option<Self> {
        match error_type {
            "rate_limit_error" => Some(ApiErrorKind::RateLimited),
            "authentication_error" | "permission_error" => Some(ApiErrorKind::AuthFailed),
            "not_found_error" => Some(ApiErrorKind::NotFound),
            _ => None,
        }
    }

    /// Last-resort heuristic over free-form error text.
    ///
    /// Only used when neither a status code nor a structured error type
    /// classified the failure; provider wording can change at any time.
    pub fn classify_message(message: &str) -> Self {
        let lower = message.to_lowercase();

        if lower.contains("quota") || lower.contains("limit") {
            ApiErrorKind::RateLimited
        } else if lower.contains("api_key") || lower.contains("api key") || lower.contains("authentication") {
            ApiErrorKind::AuthFailed
        } else if lower.contains("404") || lower.contains("not found") {
            ApiErrorKind::NotFound
        } else {
            ApiErrorKind::Other
        }
    }
}

impl LLMError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            LLMError::RateLimitExceeded(_) => ApiErrorKind::RateLimited,
            LLMError::AuthFailed(_) | LLMError::MissingApiKey => ApiErrorKind::AuthFailed,
            LLMError::NotFound(_) => ApiErrorKind::NotFound,
            LLMError::ApiError(message) => ApiErrorKind::classify_message(message),
            LLMError::NetworkError(e) => match e.status() {
                Some(status) => ApiErrorKind::from_status(status.as_u16()).unwrap_or(ApiErrorKind::Other),
                None => ApiErrorKind::Other,
            },
            LLMError::Timeout | LLMError::InvalidResponse(_) | LLMError::EmptyInput(_) | LLMError::JsonError(_) => {
                ApiErrorKind::Other
            }
        }
    }
}

/// Trait for remote text generators: free-text prompt in, free-text answer out
#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError>;
}
