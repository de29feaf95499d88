use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Lines above which a log is cut down before it is sent for analysis
pub const MAX_LOG_LINES: usize = 500;

const HEAD_LINES: usize = 100;
const TAIL_LINES: usize = 400;
const TRUNCATION_MARKER: &str = "... (truncated) ...";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to read log file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("No log input provided. Pass a file or pipe one in: cat app.log | devkit logs analyze")]
    NoInput,
}

/// A matched log line with its 1-based line number
pub type PatternLine = (usize, String);

/// An exception line followed by its `at ...` / `File ...` frames
pub type StackTrace = Vec<String>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorPatterns {
    pub exceptions: Vec<PatternLine>,
    pub errors: Vec<PatternLine>,
    pub warnings: Vec<PatternLine>,
    pub stack_traces: Vec<StackTrace>,
}

impl ErrorPatterns {
    pub fn is_empty(&self) -> bool {
        self.exceptions.is_empty() && self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Read a log file, replacing invalid UTF-8 rather than failing on it
pub fn read_log_file(path: &Path) -> Result<String, LogError> {
    let bytes = fs::read(path).map_err(|source| LogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Cut `content` down to the first 100 and last 400 lines when it has more
/// than `max_lines` lines. The flag reports whether anything was dropped.
pub fn truncate_log(content: &str, max_lines: usize) -> (String, bool) {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() <= max_lines {
        return (content.to_string(), false);
    }

    let tail_start = lines.len().saturating_sub(TAIL_LINES).max(HEAD_LINES);
    let mut kept: Vec<&str> = Vec::with_capacity(HEAD_LINES + TAIL_LINES + 1);
    kept.extend_from_slice(&lines[..HEAD_LINES.min(lines.len())]);
    kept.push(TRUNCATION_MARKER);
    kept.extend_from_slice(&lines[tail_start..]);

    tracing::debug!(total = lines.len(), kept = kept.len(), "truncated log");
    (kept.join("\n"), true)
}

/// Scan a log line by line for exceptions, errors, warnings and stack traces.
///
/// Matching is case-insensitive. A line with `exception` or `error:` is an
/// exception and opens a trace; a line with `error` is an error; a line with
/// `warn` is a warning. While a trace is open, lines starting with `at ` or
/// `File ` are appended to it and any other line closes it.
pub fn extract_error_patterns(content: &str) -> ErrorPatterns {
    let mut patterns = ErrorPatterns::default();
    let mut current: Option<StackTrace> = None;

    for (index, line) in content.split('\n').enumerate() {
        let lower = line.to_lowercase();
        let trimmed = line.trim();
        let line_number = index + 1;

        if lower.contains("exception") || lower.contains("error:") {
            close_trace(&mut patterns, current.take());
            patterns.exceptions.push((line_number, trimmed.to_string()));
            current = Some(vec![trimmed.to_string()]);
        } else if lower.contains("error") {
            patterns.errors.push((line_number, trimmed.to_string()));
        } else if lower.contains("warn") {
            patterns.warnings.push((line_number, trimmed.to_string()));
        } else if let Some(trace) = current.as_mut() {
            if trimmed.starts_with("at ") || trimmed.starts_with("File ") {
                trace.push(trimmed.to_string());
            } else {
                close_trace(&mut patterns, current.take());
            }
        }
    }
    close_trace(&mut patterns, current);

    patterns
}

// a lone exception line with no frames is not a trace
fn close_trace(patterns: &mut ErrorPatterns, trace: Option<StackTrace>) {
    if let Some(trace) = trace.filter(|t| t.len() > 1) {
        patterns.stack_traces.push(trace);
    }
}
