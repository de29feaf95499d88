//! Command-line interface definition for devkit
//!
//! The CLI is declared with clap's derive API; every subcommand maps to a
//! handler in `commands`.

use crate::store::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// devkit - snippets, command history and AI help for the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "devkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding snippets, history and config (default ~/.devkit)
    #[arg(long, env = "DEVKIT_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Save and run frequently used commands
    Snippet {
        #[command(subcommand)]
        command: SnippetCommand,
    },

    /// Run a shell command and record it in history
    Exec {
        /// Command to run (passed to `sh -c`)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// View and analyze command history
    Rewind {
        /// Number of commands to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Show only failed commands
        #[arg(long)]
        failures: bool,

        /// Analyze recent history with AI
        #[arg(long)]
        analyze: bool,

        /// Show what to undo to go back this many steps
        #[arg(long, value_name = "STEPS")]
        undo: Option<usize>,
    },

    /// Emergency rollback assistant for recent dangerous commands
    Panic {
        /// Show dangerous command statistics
        #[arg(long)]
        stats: bool,

        /// History entries to scan
        #[arg(long, default_value_t = crate::security::PANIC_WINDOW)]
        limit: usize,

        /// Use built-in rollback hints instead of AI
        #[arg(long)]
        no_ai: bool,
    },

    /// Ask for the command that does something
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Explain what a command does
    Explain {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Generate a conventional commit message from a diff
    CommitMsg {
        /// Diff file to read (stdin when omitted)
        #[arg(long)]
        diff: Option<PathBuf>,
    },

    /// Analyze application logs
    Logs {
        #[command(subcommand)]
        command: LogsCommand,
    },

    /// Create a .devkit workspace in the current project
    Init {
        /// Reinitialize if .devkit already exists
        #[arg(long)]
        force: bool,
    },

    /// Show or change settings
    Config {
        /// Store an API key
        #[arg(long)]
        api_key: Option<String>,

        /// Turn history logging on or off
        #[arg(long, value_name = "on|off")]
        time_travel: Option<String>,

        /// Maximum history size to report
        #[arg(long)]
        max_history: Option<usize>,
    },

    /// Show snippet, history and API key status
    Status,

    /// Clear command history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SnippetCommand {
    /// Save a snippet
    Save {
        name: String,
        command: String,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Overwrite without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// List snippets
    List {
        /// Only snippets with this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Search names, commands and tags
    Search { query: String },

    /// Show one snippet
    Get { name: String },

    /// Delete a snippet
    Delete {
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Run a snippet
    Run { name: String },

    /// Export snippets to a file
    Export {
        file: PathBuf,

        /// json or txt (guessed from the extension when omitted)
        #[arg(long)]
        format: Option<ExportFormat>,
    },

    /// Import snippets from a json or txt file
    Import {
        file: PathBuf,

        /// json or txt (json for `.json` files, txt otherwise, when omitted)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Replace snippets that already exist
        #[arg(long)]
        overwrite: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum LogsCommand {
    /// Summarize errors in a log and ask AI for the root cause
    Analyze {
        /// Log file (stdin when omitted)
        file: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
