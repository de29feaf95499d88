use crate::config::settings::mask_key;
use crate::config::{parse_toggle, API_KEY_ENV};
use crate::error::AppResult;
use crate::output;
use crate::security::{DangerClassifier, STATUS_WINDOW};
use crate::store::history::failures;
use crate::store::Store;
use crate::workspace::{find_project_root, init_project_workspace};

pub fn init(force: bool) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let root = find_project_root(&cwd).unwrap_or(cwd);

    let config = init_project_workspace(&root, force)?;

    output::success(&format!("Initialized DevKit workspace in {}", root.display()));
    println!("  Project: {}", config.project_name);
    println!("  Type: {}", config.project_type);
    println!("\nProject snippets live in .devkit/snippets.json\n");
    Ok(())
}

pub fn config(
    store: &Store,
    api_key: Option<String>,
    time_travel: Option<String>,
    max_history: Option<usize>,
) -> AppResult<()> {
    if api_key.is_none() && time_travel.is_none() && max_history.is_none() {
        show_config(store);
        return Ok(());
    }

    let mut config = store.load_config();
    if let Some(key) = api_key {
        config.api_key = Some(key.trim().to_string());
    }
    if let Some(toggle) = time_travel {
        config.time_travel_enabled = parse_toggle(&toggle)?;
    }
    if let Some(max) = max_history {
        config.max_history = max;
    }

    config.validate()?;
    store.save_config(&config)?;
    output::success(&format!("Configuration saved to {}", store.config_path().display()));
    Ok(())
}

fn show_config(store: &Store) {
    let config = store.load_config();

    output::heading("⚙️  Current Configuration:");

    let env_key = std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty());
    match (&env_key, &config.api_key) {
        (Some(key), _) => println!("API Key: {} (from environment)", mask_key(key)),
        (None, Some(key)) => println!("API Key: {} (stored)", mask_key(key)),
        (None, None) => println!("API Key: Not configured"),
    }

    let logging = if config.time_travel_enabled { "Enabled" } else { "Disabled" };
    println!("\nHistory logging: {logging}");
    println!("Max history: {} commands", config.max_history);
    println!("{}", output::rule());
    println!("\nTo set API key: devkit config --api-key <your-key>");
    println!("Or set environment variable: export {API_KEY_ENV}=<your-key>\n");
}

pub fn status(store: &Store) -> AppResult<()> {
    output::heading("📊 DevKit Status");

    let snippets = store.load_snippets();
    println!("\n📝 Snippets: {} saved", snippets.len());

    let history = store.load_history();
    println!("⏰ Command History: {} commands logged", history.len());
    if !history.is_empty() {
        let failed = failures(&history).len();
        println!("   - Successful: {}", history.len() - failed);
        println!("   - Failed: {failed}");
    }

    let dangerous = DangerClassifier::new().find_recent_dangerous(&history, STATUS_WINDOW);
    println!("⚠️  Recent Dangerous Commands: {}", dangerous.len());

    if store.get_api_key().is_some() {
        println!("🤖 AI Features: ✅ Enabled (API key configured)");
    } else {
        println!("🤖 AI Features: ❌ Disabled (no API key)");
        println!("   Set API key: devkit config --api-key <key>");
    }

    println!("\n{}\n", output::rule());
    Ok(())
}
