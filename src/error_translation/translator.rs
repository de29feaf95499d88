use crate::error::AppError;
use crate::llm::client::{ApiErrorKind, LLMError};
use crate::store::StoreError;

#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    pub simple_message: String,
    pub suggestion: Option<String>,
    pub raw_error: String,
}

impl UserFriendlyError {
    fn new(simple_message: &str, suggestion: Option<&str>, raw_error: String) -> Self {
        Self {
            simple_message: simple_message.to_string(),
            suggestion: suggestion.map(str::to_string),
            raw_error,
        }
    }
}

pub struct ErrorTranslator;

impl ErrorTranslator {
    /// Translate an AppError into a user-friendly error message
    pub fn translate_app_error(error: &AppError) -> UserFriendlyError {
        match error {
            AppError::Store(store_err) => Self::translate_store(store_err),
            AppError::Llm(llm_err) => Self::translate_llm(llm_err),
            AppError::Config(config_err) => UserFriendlyError::new(
                "Invalid configuration value.",
                Some("See current settings with: devkit config"),
                config_err.to_string(),
            ),
            AppError::Exec(exec_err) => UserFriendlyError::new(
                "Could not run the command.",
                Some("Check that the command is not empty and that `sh` is on your PATH."),
                exec_err.to_string(),
            ),
            AppError::Workspace(workspace_err) => UserFriendlyError::new(
                &workspace_err.to_string(),
                None,
                workspace_err.to_string(),
            ),
            AppError::Log(log_err) => UserFriendlyError::new(
                "Could not read the log input.",
                Some("Pass a log file path or pipe the log into: devkit logs analyze"),
                log_err.to_string(),
            ),
            AppError::Io(io_err) => UserFriendlyError::new(
                "I/O error occurred.",
                Some("Check file permissions and disk space"),
                io_err.to_string(),
            ),
        }
    }

    /// Translate a StoreError into a user-friendly error message
    pub fn translate_store(error: &StoreError) -> UserFriendlyError {
        let raw_error = error.to_string();

        match error {
            StoreError::SnippetNotFound(name) => UserFriendlyError {
                simple_message: format!("Snippet '{}' not found.", name),
                suggestion: Some("List saved snippets with: devkit snippet list".to_string()),
                raw_error,
            },
            StoreError::NotEnoughHistory { available, .. } => UserFriendlyError {
                simple_message: format!("Only {} command(s) in history.", available),
                suggestion: Some("Show history with: devkit rewind".to_string()),
                raw_error,
            },
            StoreError::DirectoryNotFound => UserFriendlyError::new(
                "Could not locate a home directory for devkit data.",
                Some("Set DEVKIT_HOME or pass --home <DIR>"),
                raw_error,
            ),
            StoreError::CreateDir { .. } | StoreError::Write { .. } | StoreError::Serialize { .. } => {
                UserFriendlyError::new(
                    "Could not save devkit data.",
                    Some("Check permissions and free space in the devkit data directory"),
                    raw_error,
                )
            }
            StoreError::Read { .. } | StoreError::Parse { .. } => UserFriendlyError::new(
                "Could not read the input file.",
                Some("Check the path and that the file is valid JSON or snippet text"),
                raw_error,
            ),
        }
    }

    /// Translate an LLMError by its failure category
    pub fn translate_llm(error: &LLMError) -> UserFriendlyError {
        let raw_error = error.to_string();

        match error {
            LLMError::MissingApiKey => {
                return UserFriendlyError::new(
                    "AI features need an API key.",
                    Some("Set ANTHROPIC_API_KEY or run: devkit config --api-key <key>"),
                    raw_error,
                );
            }
            LLMError::EmptyInput(_) => {
                return UserFriendlyError::new(
                    "There is nothing to send to the AI.",
                    Some("Stage some changes first, then try: git diff --staged | devkit commit-msg"),
                    raw_error,
                );
            }
            LLMError::Timeout => {
                return UserFriendlyError::new(
                    "The AI request timed out.",
                    Some("Check your network connection and try again"),
                    raw_error,
                );
            }
            _ => {}
        }

        match error.kind() {
            ApiErrorKind::RateLimited => UserFriendlyError::new(
                "API rate limit or quota reached.",
                Some("Wait a minute and try again, or check your plan's usage limits"),
                raw_error,
            ),
            ApiErrorKind::AuthFailed => UserFriendlyError::new(
                "The API key was rejected.",
                Some("Update it with: devkit config --api-key <key>"),
                raw_error,
            ),
            ApiErrorKind::NotFound => UserFriendlyError::new(
                "The AI model or endpoint was not found.",
                Some("The configured model may be retired or unavailable for your key"),
                raw_error,
            ),
            ApiErrorKind::Other => UserFriendlyError::new(
                "Error communicating with the AI service.",
                Some("Check your API key and network connection"),
                raw_error,
            ),
        }
    }
}
