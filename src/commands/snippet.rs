use crate::cli::SnippetCommand;
use crate::commands::execute_and_record;
use crate::error::AppResult;
use crate::output;
use crate::store::snippets::{filter_by_tag, parse_tags, search, similar_names};
use crate::store::{ExportFormat, Snippet, StoreError, Store};
use crossterm::style::Stylize;

pub fn handle(store: &Store, command: SnippetCommand) -> AppResult<()> {
    match command {
        SnippetCommand::Save {
            name,
            command,
            tags,
            yes,
        } => save(store, &name, &command, tags.as_deref(), yes),
        SnippetCommand::List { tag } => list(store, tag.as_deref()),
        SnippetCommand::Search { query } => search_snippets(store, &query),
        SnippetCommand::Get { name } => get(store, &name),
        SnippetCommand::Delete { name, yes } => delete(store, &name, yes),
        SnippetCommand::Run { name } => run(store, &name),
        SnippetCommand::Export { file, format } => {
            let format = format.unwrap_or_else(|| ExportFormat::for_export(&file));
            let count = store.export_snippets(&file, format)?;
            output::success(&format!("Exported {} snippet(s) to {} ({})", count, file.display(), format));
            Ok(())
        }
        SnippetCommand::Import {
            file,
            format,
            overwrite,
        } => {
            let format = format.unwrap_or_else(|| ExportFormat::for_import(&file));
            let summary = store.import_snippets(&file, format, overwrite)?;
            output::success(&format!("Imported {} snippet(s) from {}", summary.imported, file.display()));
            if !summary.conflicts.is_empty() {
                output::warning(&format!(
                    "Skipped {} existing snippet(s): {} (use --overwrite to replace)",
                    summary.conflicts.len(),
                    summary.conflicts.join(", ")
                ));
            }
            Ok(())
        }
    }
}

fn save(store: &Store, name: &str, command: &str, tags: Option<&str>, yes: bool) -> AppResult<()> {
    if !yes
        && store.get_snippet(name).is_some()
        && !output::confirm(&format!("Snippet {name} already exists. Overwrite?"), false)?
    {
        output::info("Kept the existing snippet");
        return Ok(());
    }

    let tags = tags.map(parse_tags).unwrap_or_default();
    let tag_info = if tags.is_empty() {
        String::new()
    } else {
        format!(" (tags: {})", tags.iter().cloned().collect::<Vec<_>>().join(", "))
    };

    store.save_snippet(name, command, tags)?;
    output::success(&format!("Saved snippet: {name}{tag_info}"));
    Ok(())
}

fn print_snippet(snippet: &Snippet) {
    println!("\n{}", snippet.name.as_str().cyan());
    println!("  {}", snippet.command);
    if !snippet.tags.is_empty() {
        let tags: Vec<&str> = snippet.tags.iter().map(String::as_str).collect();
        println!("  {}", format!("Tags: {}", tags.join(", ")).yellow());
    }
}

fn list(store: &Store, tag: Option<&str>) -> AppResult<()> {
    let snippets = store.load_snippets();
    if snippets.is_empty() {
        println!("No snippets saved yet!");
        return Ok(());
    }

    let shown: Vec<&Snippet> = match tag {
        Some(tag) => filter_by_tag(&snippets, tag),
        None => snippets.values().collect(),
    };

    if shown.is_empty() {
        println!("No snippets found with tag '{}'", tag.unwrap_or_default());
        return Ok(());
    }

    output::heading(&format!("📋 Saved Snippets ({} total):", shown.len()));
    shown.into_iter().for_each(print_snippet);
    println!();
    Ok(())
}

fn search_snippets(store: &Store, query: &str) -> AppResult<()> {
    let snippets = store.load_snippets();
    let found = search(&snippets, query);

    if found.is_empty() {
        println!("No snippets found matching '{query}'");
        return Ok(());
    }

    output::heading(&format!("🔍 Found {} snippet(s) matching '{}':", found.len(), query));
    found.into_iter().for_each(print_snippet);
    println!();
    Ok(())
}

fn not_found(store: &Store, name: &str) -> StoreError {
    let similar = similar_names(&store.load_snippets(), name);
    if !similar.is_empty() {
        output::warning(&format!("Did you mean: {}", similar.join(", ")));
    }
    StoreError::SnippetNotFound(name.to_string())
}

fn get(store: &Store, name: &str) -> AppResult<()> {
    let snippet = store.get_snippet(name).ok_or_else(|| not_found(store, name))?;

    println!("\n{}", format!("📝 Snippet: {}", snippet.name).cyan());
    println!("Command: {}", snippet.command);
    if !snippet.tags.is_empty() {
        let tags: Vec<&str> = snippet.tags.iter().map(String::as_str).collect();
        println!("{}", format!("Tags: {}", tags.join(", ")).yellow());
    }
    let created = snippet.created.with_timezone(&chrono::Local);
    println!("{}", format!("Created: {}", created.format("%Y-%m-%d %H:%M:%S")).blue());
    println!();
    Ok(())
}

fn delete(store: &Store, name: &str, yes: bool) -> AppResult<()> {
    if store.get_snippet(name).is_none() {
        return Err(not_found(store, name).into());
    }

    if !yes && !output::confirm(&format!("Delete snippet {name}?"), false)? {
        output::info("Nothing deleted");
        return Ok(());
    }

    store.delete_snippet(name)?;
    output::success(&format!("Deleted snippet: {name}"));
    Ok(())
}

fn run(store: &Store, name: &str) -> AppResult<()> {
    let snippet = store.get_snippet(name).ok_or_else(|| not_found(store, name))?;

    output::info(&format!("🚀 Running: {}", snippet.command));
    execute_and_record(store, &snippet.command)?;
    Ok(())
}
