//! Command handlers behind the CLI.
//!
//! Each handler takes the opened `Store` plus its parsed arguments and
//! returns an `AppResult`; rendering goes through `crate::output`.

pub mod assist;
pub mod history;
pub mod panic;
pub mod snippet;
pub mod system;

use crate::cli::{Cli, Commands, LogsCommand};
use crate::error::AppResult;
use crate::llm::{Advisor, LLMError};
use crate::output;
use crate::shell::{CommandOutput, ShellExecutor};
use crate::store::Store;

/// Open the store named by `--home` / `DEVKIT_HOME`, or the default one
pub fn open_store(cli: &Cli) -> AppResult<Store> {
    let store = match &cli.home {
        Some(root) => Store::open(root)?,
        None => Store::open_default()?,
    };
    Ok(store)
}

/// Advisor using the resolved API key
pub fn advisor(store: &Store) -> Result<Advisor, LLMError> {
    Advisor::from_api_key(store.get_api_key())
}

/// Run `command` through the shell, print its output and record it in
/// history when history logging is enabled.
pub fn execute_and_record(store: &Store, command: &str) -> AppResult<CommandOutput> {
    let result = ShellExecutor::new().run(command)?;

    print!("{}", result.stdout);
    eprint!("{}", result.stderr);

    if store.load_config().time_travel_enabled {
        store.log_command(command, &result.combined(), result.exit_code)?;
    } else {
        tracing::debug!(command, "history logging disabled, not recording");
    }

    if result.success() {
        output::success("Command completed successfully");
    } else {
        output::failure(&format!("Command failed with exit code {}", result.exit_code));
    }

    Ok(result)
}

pub async fn dispatch(cli: Cli) -> AppResult<()> {
    let store = open_store(&cli)?;

    match cli.command {
        Commands::Snippet { command } => snippet::handle(&store, command),
        Commands::Exec { command } => history::exec(&store, &command.join(" ")),
        Commands::Rewind {
            limit,
            failures,
            analyze,
            undo,
        } => history::rewind(&store, limit, failures, analyze, undo).await,
        Commands::Panic { stats, limit, no_ai } => panic::run(&store, stats, limit, no_ai).await,
        Commands::Ask { query } => assist::ask(&store, &query.join(" ")).await,
        Commands::Explain { command } => assist::explain(&store, &command.join(" ")).await,
        Commands::CommitMsg { diff } => assist::commit_message(&store, diff.as_deref()).await,
        Commands::Logs {
            command: LogsCommand::Analyze { file },
        } => assist::analyze_logs(&store, file.as_deref()).await,
        Commands::Init { force } => system::init(force),
        Commands::Config {
            api_key,
            time_travel,
            max_history,
        } => system::config(&store, api_key, time_travel, max_history),
        Commands::Status => system::status(&store),
        Commands::Clear { yes } => history::clear(&store, yes),
    }
}
