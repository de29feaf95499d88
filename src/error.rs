use std::io;
use thiserror::Error;

use crate::config::settings::ConfigError;
use crate::llm::client::LLMError;
use crate::logs::LogError;
use crate::shell::ExecError;
use crate::store::StoreError;
use crate::workspace::WorkspaceError;

/// Top-level application error that wraps all module-specific errors
///
/// Command handlers return this so `main` can render any failure the same
/// way. Each module error converts via `From`, so `?` works across modules.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Command execution error: {0}")]
    Exec(#[from] ExecError),

    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    #[error("Workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    #[error("Log analysis error: {0}")]
    Log(#[from] LogError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
