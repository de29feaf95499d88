#![allow(dead_code)]

use async_trait::async_trait;
use devkit::llm::{LLMClient, LLMError};
use devkit::store::Store;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Helper to create a store rooted in a fresh temporary directory
pub fn create_test_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open(temp_dir.path().join("devkit")).expect("Failed to open store");
    (temp_dir, store)
}

/// Helper to write a raw document into the store, bypassing the typed API
pub fn write_raw(store: &Store, file: &str, contents: &str) {
    fs::write(store.root().join(file), contents).expect("Failed to write raw document");
}

/// Helper to log a series of commands with the given exit codes
pub fn log_commands(store: &Store, commands: &[(&str, i32)]) {
    for (command, exit_code) in commands {
        store
            .log_command(command, "", *exit_code)
            .expect("Failed to log command");
    }
}

/// LLM client that returns canned answers and records the prompts it saw
pub struct MockLLMClient {
    response: Result<String, fn() -> LLMError>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLLMClient {
    pub fn answering(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(make_error: fn() -> LLMError) -> Self {
        Self {
            response: Err(make_error),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}
