//! Terminal rendering for command handlers.

use crossterm::style::Stylize;
use std::io::{self, BufRead, IsTerminal, Read, Write};

const RULE_WIDTH: usize = 70;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn heading(title: &str) {
    println!("\n{}", title.bold());
    println!("{}", rule());
}

pub fn success(message: &str) {
    println!("{}", format!("✅ {message}").green());
}

pub fn warning(message: &str) {
    println!("{}", format!("⚠️  {message}").yellow());
}

pub fn failure(message: &str) {
    println!("{}", format!("❌ {message}").red());
}

pub fn info(message: &str) {
    println!("{}", message.blue());
}

/// Print a block of free text (an AI answer) between rules
pub fn boxed(text: &str) {
    println!("{}", rule());
    println!("{}", text.trim_end());
    println!("{}", rule());
}

/// Error line plus optional suggestion, on stderr
pub fn error(message: &str, suggestion: Option<&str>) {
    eprintln!("{} {}", "Error:".red().bold(), message);
    if let Some(suggestion) = suggestion {
        eprintln!("  {}", suggestion.yellow());
    }
}

pub fn detail(text: &str) {
    eprintln!("  {}", text.dim());
}

/// Ask a yes/no question on stdin; an empty answer picks `default`
pub fn confirm(prompt: &str, default: bool) -> io::Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    print!("{prompt} {hint} ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(parse_answer(&answer, default))
}

fn parse_answer(answer: &str, default: bool) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}

/// Read all of stdin when something is piped in; `None` on an interactive terminal
pub fn read_piped_stdin() -> io::Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut bytes = Vec::new();
    stdin.lock().read_to_end(&mut bytes)?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Cut `text` to `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max).collect();
    format!("{kept}...")
}
