pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod error_translation;
pub mod llm;
pub mod logs;
pub mod output;
pub mod security;
pub mod shell;
pub mod store;
pub mod workspace;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{AppError, AppResult};
pub use security::{compute_danger_statistics, find_recent_dangerous, is_dangerous, DangerStatistics};
pub use store::{HistoryEntry, Snippet, Store, StoreError};
