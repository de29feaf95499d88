use crate::commands::advisor;
use crate::error::AppResult;
use crate::llm::parse_suggested_command;
use crate::logs::{extract_error_patterns, read_log_file, ErrorPatterns, LogError};
use crate::output;
use crate::store::Store;
use crate::workspace::project_context;
use crossterm::style::Stylize;
use std::collections::BTreeSet;
use std::path::Path;

const KEY_EXCEPTIONS: usize = 5;
const EXCEPTION_PREVIEW: usize = 100;
const ASK_SNIPPET_TAG: &str = "ai-generated";

pub async fn ask(store: &Store, query: &str) -> AppResult<()> {
    let advisor = advisor(store)?;

    println!("\n🤖 Asking AI: {}\n", query.cyan());
    let answer = advisor.ask_command(query).await?;
    output::boxed(&answer);

    let Some(command) = parse_suggested_command(&answer) else {
        return Ok(());
    };

    if output::confirm("\n💾 Save this command as a snippet?", false)? {
        let name = snippet_name(query);
        let tags: BTreeSet<String> = [ASK_SNIPPET_TAG.to_string()].into_iter().collect();
        store.save_snippet(&name, &command, tags)?;
        output::success(&format!("Saved as snippet: {name}"));
    }
    Ok(())
}

/// Snippet name derived from the first words of a query
fn snippet_name(query: &str) -> String {
    let words: Vec<String> = query
        .split_whitespace()
        .take(4)
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        "ai-command".to_string()
    } else {
        words.join("-")
    }
}

pub async fn explain(store: &Store, command: &str) -> AppResult<()> {
    let advisor = advisor(store)?;

    println!("\n📖 Explaining: {}\n", command.cyan());
    let explanation = advisor.explain_command(command).await?;
    output::boxed(&explanation);
    Ok(())
}

pub async fn commit_message(store: &Store, diff_path: Option<&Path>) -> AppResult<()> {
    let diff = match diff_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => output::read_piped_stdin()?.unwrap_or_default(),
    };

    if diff.trim().is_empty() {
        output::warning("No diff provided. Try: git diff --staged | devkit commit-msg");
        return Ok(());
    }

    let advisor = advisor(store)?;
    println!("\n🤖 Generating commit message...\n");
    let message = advisor.generate_commit_message(&diff).await?;

    println!("{}", "Suggested commit message:".green());
    output::boxed(&message);
    Ok(())
}

pub async fn analyze_logs(store: &Store, file: Option<&Path>) -> AppResult<()> {
    let content = match file {
        Some(path) => read_log_file(path)?,
        None => output::read_piped_stdin()?.ok_or(LogError::NoInput)?,
    };

    if content.trim().is_empty() {
        output::warning("Empty log, nothing to analyze");
        return Ok(());
    }

    let patterns = extract_error_patterns(&content);
    print_patterns(&patterns);

    let context = std::env::current_dir()
        .map(|dir| project_context(&dir))
        .unwrap_or_default();

    let advisor = advisor(store)?;
    println!("{}", "🤖 AI Analysis:".bold());
    let analysis = advisor.analyze_log(&content, &context).await?;
    output::boxed(&analysis);
    Ok(())
}

fn print_patterns(patterns: &ErrorPatterns) {
    output::heading("🔍 LOG ANALYSIS RESULTS");

    println!("📊 Quick Stats:");
    println!("  - Exceptions found: {}", patterns.exceptions.len());
    println!("  - Errors found: {}", patterns.errors.len());
    println!("  - Warnings found: {}", patterns.warnings.len());
    println!("  - Stack traces: {}\n", patterns.stack_traces.len());

    if !patterns.exceptions.is_empty() {
        println!("{}", "🔴 Key Exceptions:".red());
        for (line, text) in patterns.exceptions.iter().take(KEY_EXCEPTIONS) {
            println!("  Line {}: {}", line, output::truncate(text, EXCEPTION_PREVIEW));
        }
        println!();
    }
}
