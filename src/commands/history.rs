use crate::commands::{advisor, execute_and_record};
use crate::error::AppResult;
use crate::output;
use crate::store::history::{failures, recent, rewind_plan};
use crate::store::{HistoryEntry, Store};
use chrono::Local;

const FAILURE_OUTPUT_PREVIEW: usize = 200;

pub fn exec(store: &Store, command: &str) -> AppResult<()> {
    execute_and_record(store, command)?;
    Ok(())
}

fn local_time(entry: &HistoryEntry, format: &str) -> String {
    entry.timestamp.with_timezone(&Local).format(format).to_string()
}

pub async fn rewind(
    store: &Store,
    limit: usize,
    only_failures: bool,
    analyze: bool,
    undo: Option<usize>,
) -> AppResult<()> {
    let history = store.load_history();

    if let Some(steps) = undo {
        return show_rewind_plan(&history, steps);
    }
    if analyze {
        return analyze_history(store, &history).await;
    }
    if only_failures {
        show_failures(&history);
        return Ok(());
    }

    show_history(&history, limit);
    Ok(())
}

fn show_history(history: &[HistoryEntry], limit: usize) {
    if history.is_empty() {
        println!("No command history yet. Run some commands first!");
        return;
    }

    let shown = recent(history, limit);
    output::heading(&format!("⏰ Command History (last {} commands):", shown.len()));

    for (i, entry) in shown.iter().enumerate() {
        let status = if entry.is_success() { "✅" } else { "❌" };
        println!("\n{}. [{}] {} {}", i + 1, local_time(entry, "%H:%M:%S"), status, entry.command);
        if !entry.is_success() {
            println!("   Exit code: {}", entry.exit_code);
        }
    }
    println!();
}

fn show_failures(history: &[HistoryEntry]) {
    let failed = failures(history);
    if failed.is_empty() {
        output::success("No failed commands in history!");
        return;
    }

    output::heading(&format!("❌ Found {} failed command(s):", failed.len()));
    for (i, entry) in failed.iter().enumerate() {
        println!("\n{}. [{}]", i + 1, local_time(entry, "%Y-%m-%d %H:%M:%S"));
        println!("   Command: {}", entry.command);
        println!("   Exit code: {}", entry.exit_code);
        if !entry.output.is_empty() {
            println!("   Output: {}", output::truncate(entry.output.trim_end(), FAILURE_OUTPUT_PREVIEW));
        }
    }
    println!();
}

fn show_rewind_plan(history: &[HistoryEntry], steps: usize) -> AppResult<()> {
    let plan = rewind_plan(history, steps)?;

    output::heading(&format!("⏪ To rewind {steps} step(s), you might need to:"));
    for entry in plan {
        println!("\nUndo: {}", entry.command);
        println!("  (No automatic undo available - review and revert manually)");
    }
    println!();
    Ok(())
}

async fn analyze_history(store: &Store, history: &[HistoryEntry]) -> AppResult<()> {
    if history.is_empty() {
        println!("No command history to analyze yet.");
        return Ok(());
    }

    let advisor = advisor(store)?;
    println!("\n🔍 Analyzing recent commands with AI...\n");
    let analysis = advisor.analyze_history(history).await?;
    output::boxed(&analysis);
    Ok(())
}

pub fn clear(store: &Store, yes: bool) -> AppResult<()> {
    if !yes && !output::confirm("Clear all command history?", false)? {
        output::info("History kept");
        return Ok(());
    }

    store.clear_history()?;
    output::success("Command history cleared");
    Ok(())
}
