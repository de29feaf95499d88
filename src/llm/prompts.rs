//! Prompt text sent to the advice generator.

use crate::logs::truncate_log;
use crate::store::HistoryEntry;

/// Characters of a diff forwarded for commit message generation
pub const DIFF_LIMIT: usize = 3000;

/// History entries forwarded for analysis
pub const HISTORY_WINDOW: usize = 10;

pub fn ask_command(query: &str) -> String {
    format!(
        "You are a terminal command expert. The user wants to: {query}

Respond with ONLY the command they should run, followed by a brief explanation.

Format:
COMMAND: <the actual command>
EXPLANATION: <brief 1-line explanation>

Be concise and practical. Assume they're on a Unix-like system (Linux/Mac)."
    )
}

pub fn explain_command(command: &str) -> String {
    format!(
        "Explain this terminal command in simple terms:

{command}

Break it down part by part and explain what each part does. Be concise but clear.
If there are any potential risks or important notes, mention them."
    )
}

pub fn commit_message(diff: &str) -> String {
    let diff: String = diff.chars().take(DIFF_LIMIT).collect();

    format!(
        "You are a git commit message expert. Analyze this git diff and generate a conventional commit message.

Git diff:
{diff}

Generate a commit message in this format:
<type>(<scope>): <description>

Types: feat, fix, docs, style, refactor, test, chore
Keep the description concise (under 50 chars).

Respond with ONLY the commit message, nothing else."
    )
}

pub fn analyze_history(history: &[HistoryEntry]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let listing: Vec<String> = history[start..]
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {} (exit code: {})", i + 1, entry.command, entry.exit_code))
        .collect();

    format!(
        "You are debugging a terminal session. Here are the last commands run:

{}

Analyze this sequence and:
1. Identify any failed commands (non-zero exit codes)
2. Explain what likely went wrong
3. Suggest how to fix it
4. Point out if earlier commands caused the issue

Be concise and actionable.",
        listing.join("\n")
    )
}

pub fn suggest_rollback(dangerous: &[&HistoryEntry]) -> String {
    let listing: Vec<String> = dangerous
        .iter()
        .map(|entry| format!("- {} ({})", entry.command, entry.timestamp.to_rfc3339()))
        .collect();

    format!(
        "These potentially dangerous commands were just run:

{}

For each command, suggest how to rollback/undo it safely.
Be specific with exact commands to run.

Format your response as:
ROLLBACK STEPS:
1. <command> - <explanation>
2. <command> - <explanation>
etc.

Be practical and safe. If rollback is risky, warn about it.",
        listing.join("\n")
    )
}

pub fn analyze_log(log_content: &str, project_context: &str) -> String {
    let (log, truncated) = truncate_log(log_content, crate::logs::MAX_LOG_LINES);
    let truncation_note = if truncated {
        "\n(Note: Log was truncated to fit context window)"
    } else {
        ""
    };

    format!(
        "You are a senior software engineer debugging an application crash.

{project_context}

Analyze this log file and provide:

1. **Critical Errors**: Identify the main errors or exceptions
2. **Root Cause**: What likely caused the crash?
3. **Stack Trace**: Highlight the relevant stack trace lines
4. **Suggested Fix**: What should the developer do to fix this?
5. **Prevention**: How to prevent this in the future?

Log content:
```
{log}
```
{truncation_note}

Format your response clearly with sections. Be specific and actionable."
    )
}

/// Pull the `COMMAND:` line out of an `ask_command` answer
pub fn parse_suggested_command(response: &str) -> Option<String> {
    response
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("COMMAND:"))
        .map(|command| command.trim().trim_matches('`').trim().to_string())
        .filter(|command| !command.is_empty())
}
