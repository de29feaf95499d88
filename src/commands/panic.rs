use crate::commands::advisor;
use crate::error::AppResult;
use crate::llm::LLMError;
use crate::output;
use crate::security::{DangerClassifier, RollbackHint};
use crate::store::{HistoryEntry, Store};
use crossterm::style::Stylize;

const TOP_KEYWORDS: usize = 5;

pub async fn run(store: &Store, stats: bool, limit: usize, no_ai: bool) -> AppResult<()> {
    let history = store.load_history();
    let classifier = DangerClassifier::new();

    if stats {
        show_statistics(&classifier, &history);
        return Ok(());
    }

    println!("\n{}\n", "🚨 PANIC MODE - Emergency Rollback Assistant".red().bold());

    let dangerous = classifier.find_recent_dangerous(&history, limit);
    if dangerous.is_empty() {
        output::success("No recent dangerous commands detected.");
        println!("You're probably fine! 😅\n");
        return Ok(());
    }

    output::warning("Recent potentially dangerous commands:");
    println!("{}", output::rule());
    for (i, entry) in dangerous.iter().enumerate() {
        let status = if entry.is_success() { "✅ Success" } else { "❌ Failed" };
        println!("\n{}. {}", i + 1, entry.command);
        println!("   Time: {}", entry.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"));
        println!("   Status: {status}");
    }
    println!("\n{}", output::rule());

    if !no_ai {
        match ai_rollback(store, &dangerous).await {
            Ok(()) => return Ok(()),
            Err(LLMError::MissingApiKey) => {
                tracing::debug!("no API key, using built-in rollback hints");
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI rollback suggestions failed");
                output::failure(&format!("AI analysis failed: {e}"));
            }
        }
    }

    show_builtin_hints(&dangerous);
    Ok(())
}

async fn ai_rollback(store: &Store, dangerous: &[&HistoryEntry]) -> Result<(), LLMError> {
    let advisor = advisor(store)?;

    println!("\n🔍 Analyzing and generating rollback steps...\n");
    let suggestions = advisor.suggest_rollback(dangerous).await?;

    output::boxed(&suggestions);
    output::warning("Review these suggestions carefully before running!");
    println!("Always test rollback in staging first if possible.\n");
    Ok(())
}

fn show_builtin_hints(dangerous: &[&HistoryEntry]) {
    println!("\nℹ️  Built-in rollback patterns:");

    for entry in dangerous {
        let hint = RollbackHint::for_command(&entry.command);
        println!("\n{}", format!("{}: {}", hint.title(), entry.command).cyan());
        for step in hint.steps() {
            println!("  {step}");
        }
    }
    println!();
}

fn show_statistics(classifier: &DangerClassifier, history: &[HistoryEntry]) {
    if history.is_empty() {
        println!("No command history yet.");
        return;
    }

    let stats = classifier.statistics(history);

    output::heading("📊 Dangerous Command Statistics");
    println!("Total commands: {}", stats.total);
    println!("Dangerous commands: {} ({:.1}%)", stats.dangerous_count, stats.percentage);

    let top = stats.top_keywords(TOP_KEYWORDS);
    if !top.is_empty() {
        println!("\nMost common risky operations:");
        for (keyword, count) in top {
            println!("  - {keyword}: {count} time(s)");
        }
    }
    println!();
}
