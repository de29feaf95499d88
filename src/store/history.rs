use super::{read_document, timestamp, write_document, Store, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of entries kept after each append
pub const HISTORY_LIMIT: usize = 100;

/// Maximum number of characters of command output kept per entry
pub const OUTPUT_LIMIT: usize = 1000;

/// One executed command, as recorded for later review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub command: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub exit_code: i32,
}

impl HistoryEntry {
    /// Build an entry stamped with the current time, truncating the output
    pub fn new(command: &str, output: &str, exit_code: i32) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.to_string(),
            output: truncate_chars(output, OUTPUT_LIMIT),
            exit_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

impl Store {
    /// Load command history in chronological order.
    ///
    /// Entries that cannot be decoded are dropped individually.
    pub fn load_history(&self) -> Vec<HistoryEntry> {
        let path = self.history_path();
        let Some(raw) = read_document::<Vec<serde_json::Value>>(&path) else {
            return Vec::new();
        };

        raw.into_iter()
            .enumerate()
            .filter_map(|(idx, value)| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(index = idx, error = %e, "skipping malformed history entry");
                    None
                }
            })
            .collect()
    }

    /// Replace the stored history
    pub fn save_history(&self, history: &[HistoryEntry]) -> Result<(), StoreError> {
        write_document(&self.history_path(), history)
    }

    /// Clear command history
    pub fn clear_history(&self) -> Result<(), StoreError> {
        self.save_history(&[])
    }

    /// Append a command execution to history, keeping the most recent entries
    pub fn log_command(&self, command: &str, output: &str, exit_code: i32) -> Result<HistoryEntry, StoreError> {
        let mut history = self.load_history();
        let entry = HistoryEntry::new(command, output, exit_code);
        history.push(entry.clone());

        if history.len() > HISTORY_LIMIT {
            let excess = history.len() - HISTORY_LIMIT;
            history.drain(..excess);
        }

        self.save_history(&history)?;
        tracing::debug!(command, exit_code, entries = history.len(), "logged command");

        Ok(entry)
    }
}

/// The last `limit` entries, oldest first
pub fn recent(history: &[HistoryEntry], limit: usize) -> &[HistoryEntry] {
    let start = history.len().saturating_sub(limit);
    &history[start..]
}

/// Entries with a non-zero exit code, in order
pub fn failures(history: &[HistoryEntry]) -> Vec<&HistoryEntry> {
    history.iter().filter(|entry| !entry.is_success()).collect()
}

/// The last `steps` entries, newest first, as the order to undo them in
pub fn rewind_plan(history: &[HistoryEntry], steps: usize) -> Result<Vec<&HistoryEntry>, StoreError> {
    if history.len() < steps {
        return Err(StoreError::NotEnoughHistory {
            available: history.len(),
            requested: steps,
        });
    }

    Ok(recent(history, steps).iter().rev().collect())
}
