//! Local persistent store
//!
//! Three independent JSON documents live under one root directory:
//! `snippets.json`, `history.json` and `config.json`. Reads are forgiving: a
//! missing or corrupt document is treated as empty (or default) and logged.
//! Writes replace the whole document atomically and report failures.

pub mod history;
pub mod snippets;
pub mod timestamp;

pub use history::{HistoryEntry, HISTORY_LIMIT, OUTPUT_LIMIT};
pub use snippets::{ExportFormat, ImportSummary, Snippet, SnippetMap};

use crate::config::Config;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

pub const SNIPPETS_FILE: &str = "snippets.json";
pub const HISTORY_FILE: &str = "history.json";
pub const CONFIG_FILE: &str = "config.json";

/// Overrides the store root when set
pub const HOME_ENV: &str = "DEVKIT_HOME";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store directory not found (HOME is not set)")]
    DirectoryNotFound,

    #[error("Failed to create store directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Snippet '{0}' not found")]
    SnippetNotFound(String),

    #[error("Only {available} commands in history, can't rewind {requested} steps")]
    NotEnoughHistory { available: usize, requested: usize },
}

/// Handle to the directory holding the persisted documents
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(&root).map_err(|source| StoreError::CreateDir {
            path: root.clone(),
            source,
        })?;

        tracing::debug!(root = %root.display(), "opened store");
        Ok(Self { root })
    }

    /// Open the store at the default location
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_root()?)
    }

    /// `$DEVKIT_HOME` if set, otherwise `~/.devkit`
    pub fn default_root() -> Result<PathBuf, StoreError> {
        if let Ok(dir) = std::env::var(HOME_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let home = std::env::var("HOME").map_err(|_| StoreError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".devkit"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snippets_path(&self) -> PathBuf {
        self.root.join(SNIPPETS_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Load configuration, falling back to defaults when absent or corrupt
    pub fn load_config(&self) -> Config {
        read_document(&self.config_path()).unwrap_or_default()
    }

    /// Save configuration, replacing the stored document
    pub fn save_config(&self, config: &Config) -> Result<(), StoreError> {
        write_document(&self.config_path(), config)
    }

    /// Get API key from the environment, then from the stored config
    pub fn get_api_key(&self) -> Option<String> {
        self.load_config().get_api_key()
    }
}

/// Read and decode a JSON document.
///
/// Returns `None` when the file does not exist or cannot be decoded; both cases
/// are recoverable for every document the store manages.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable document, using empty value");
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt document, using empty value");
            None
        }
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path` with it
pub(crate) fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;

    serde_json::to_writer_pretty(&mut file, value).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(b"\n").map_err(write_err)?;
    file.flush().map_err(write_err)?;

    file.persist(path).map_err(|e| write_err(e.error))?;

    tracing::trace!(path = %path.display(), "wrote document");
    Ok(())
}
