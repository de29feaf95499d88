use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Empty command")]
    EmptyCommand,

    #[error("Failed to start '{shell}': {source}")]
    SpawnFailed { shell: String, source: io::Error },
}

/// Result of running a shell command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout followed by stderr, as recorded in history
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Runs commands through a POSIX shell
#[derive(Debug)]
pub struct ShellExecutor {
    shell: String,
    working_dir: Option<PathBuf>,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
            working_dir: None,
        }
    }

    /// Run commands from `dir` instead of the current directory
    pub fn in_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Use a different shell binary (it must accept `-c <command>`)
    pub fn with_shell(mut self, shell: &str) -> Self {
        self.shell = shell.to_string();
        self
    }

    /// Run `command` and capture its output.
    ///
    /// A non-zero exit status is a normal result here; only a command that
    /// could not be started is an error.
    pub fn run(&self, command: &str) -> Result<CommandOutput, ExecError> {
        let command = command.trim();
        if command.is_empty() {
            return Err(ExecError::EmptyCommand);
        }

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(shell = %self.shell, command, "running command");

        let output = cmd.output().map_err(|source| ExecError::SpawnFailed {
            shell: self.shell.clone(),
            source,
        })?;

        Ok(Self::process_output(output))
    }

    fn process_output(output: Output) -> CommandOutput {
        // killed by a signal: no exit code
        let exit_code = output.status.code().unwrap_or(-1);

        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code,
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_success() {
        let executor = ShellExecutor::new();
        let output = executor.run("echo hello").unwrap();

        assert!(output.success());
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    fn test_non_zero_exit_is_not_an_error() {
        let executor = ShellExecutor::new();
        let output = executor.run("echo oops >&2; exit 3").unwrap();

        assert!(!output.success());
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn test_combined_output() {
        let executor = ShellExecutor::new();
        let output = executor.run("echo out; echo err >&2").unwrap();
        assert_eq!(output.combined(), "out\nerr\n");
    }

    #[test]
    fn test_empty_command() {
        let executor = ShellExecutor::new();
        assert!(matches!(executor.run("   "), Err(ExecError::EmptyCommand)));
    }

    #[test]
    fn test_working_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("marker.txt"), "x").unwrap();

        let executor = ShellExecutor::new().in_dir(temp_dir.path());
        let output = executor.run("ls").unwrap();
        assert!(output.stdout.contains("marker.txt"));
    }

    #[test]
    fn test_missing_shell() {
        let executor = ShellExecutor::new().with_shell("/definitely/not/a/shell");
        let result = executor.run("echo hi");
        assert!(matches!(result, Err(ExecError::SpawnFailed { .. })));
    }
}
