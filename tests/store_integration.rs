mod helpers;

use devkit::config::Config;
use devkit::store::history::{failures, recent, rewind_plan};
use devkit::store::snippets::{filter_by_tag, parse_tags, search};
use devkit::store::{ExportFormat, StoreError, HISTORY_LIMIT};
use helpers::{create_test_store, log_commands, write_raw};
use std::fs;

/// Test saving then loading a snippet returns the same command text
#[test]
fn test_snippet_round_trip() {
    let (_temp, store) = create_test_store();

    store
        .save_snippet("clean", "docker system prune -a", parse_tags("docker, cleanup"))
        .unwrap();

    let snippets = store.load_snippets();
    let snippet = &snippets["clean"];
    assert_eq!(snippet.name, "clean");
    assert_eq!(snippet.command, "docker system prune -a");
    assert!(snippet.has_tag("DOCKER"));
}

/// Test legacy string-valued snippets are normalized on load
#[test]
fn test_legacy_snippets_normalized() {
    let (_temp, store) = create_test_store();
    write_raw(
        &store,
        "snippets.json",
        r#"{"old": "ls -la", "new": {"command": "git status", "tags": ["git"], "created": "2024-01-15T10:30:00"}}"#,
    );

    let snippets = store.load_snippets();
    assert_eq!(snippets.len(), 2);
    assert_eq!(snippets["old"].command, "ls -la");
    assert!(snippets["old"].tags.is_empty());
    assert_eq!(snippets["new"].command, "git status");

    // saving rewrites the legacy entry in structured form
    store.save_snippets(&snippets).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.snippets_path()).unwrap()).unwrap();
    assert_eq!(raw["old"]["command"], "ls -la");
    assert!(raw["old"]["created"].is_string());
}

/// Test saving an existing name reports the overwrite
#[test]
fn test_save_snippet_reports_overwrite() {
    let (_temp, store) = create_test_store();

    assert!(!store.save_snippet("build", "make", Default::default()).unwrap());
    assert!(store.save_snippet("build", "cargo build", Default::default()).unwrap());
    assert_eq!(store.get_snippet("build").unwrap().command, "cargo build");
}

/// Test deleting a missing snippet is an error
#[test]
fn test_delete_missing_snippet() {
    let (_temp, store) = create_test_store();
    assert!(matches!(
        store.delete_snippet("ghost"),
        Err(StoreError::SnippetNotFound(name)) if name == "ghost"
    ));
}

/// Test tag filtering and search over the stored snippets
#[test]
fn test_filter_and_search() {
    let (_temp, store) = create_test_store();
    store.save_snippet("up", "docker compose up -d", parse_tags("docker")).unwrap();
    store.save_snippet("logs", "kubectl logs -f web", parse_tags("k8s,debug")).unwrap();

    let snippets = store.load_snippets();
    let docker: Vec<&str> = filter_by_tag(&snippets, "Docker").iter().map(|s| s.name.as_str()).collect();
    assert_eq!(docker, vec!["up"]);

    let found: Vec<&str> = search(&snippets, "DEBUG").iter().map(|s| s.name.as_str()).collect();
    assert_eq!(found, vec!["logs"]);
}

/// Test txt export then import restores names, commands and tags
#[test]
fn test_txt_export_import() {
    let (temp, store) = create_test_store();
    store.save_snippet("up", "docker compose up -d", parse_tags("docker,dev")).unwrap();
    store.save_snippet("st", "git status", Default::default()).unwrap();

    let export_path = temp.path().join("snippets.txt");
    assert_eq!(store.export_snippets(&export_path, ExportFormat::Txt).unwrap(), 2);

    let (_other_temp, other) = create_test_store();
    let summary = other.import_snippets(&export_path, ExportFormat::Txt, false).unwrap();
    assert_eq!(summary.imported, 2);

    let imported = other.load_snippets();
    assert_eq!(imported["up"].command, "docker compose up -d");
    assert_eq!(imported["up"].tags, parse_tags("dev,docker"));
    assert_eq!(imported["st"].command, "git status");
    assert!(imported["st"].tags.is_empty());
}

/// Test a txt export written without a .txt extension imports back as txt
#[test]
fn test_txt_export_without_extension_imports_back() {
    let (temp, store) = create_test_store();
    store.save_snippet("up", "docker compose up -d", parse_tags("docker")).unwrap();

    let export_path = temp.path().join("team-snippets");
    store.export_snippets(&export_path, ExportFormat::Txt).unwrap();

    let (_other_temp, other) = create_test_store();
    let summary = other
        .import_snippets(&export_path, ExportFormat::for_import(&export_path), false)
        .unwrap();

    assert_eq!(summary.imported, 1);
    assert_eq!(other.get_snippet("up").unwrap().command, "docker compose up -d");
    assert_eq!(other.get_snippet("up").unwrap().tags, parse_tags("docker"));
}

/// Test json import skips conflicts unless overwrite is set
#[test]
fn test_json_import_conflicts() {
    let (temp, store) = create_test_store();
    store.save_snippet("build", "make", Default::default()).unwrap();

    let import_path = temp.path().join("incoming.json");
    fs::write(&import_path, r#"{"build": "cargo build", "test": "cargo test"}"#).unwrap();

    let summary = store.import_snippets(&import_path, ExportFormat::Json, false).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.conflicts, vec!["build".to_string()]);
    assert_eq!(store.get_snippet("build").unwrap().command, "make");

    let summary = store.import_snippets(&import_path, ExportFormat::Json, true).unwrap();
    assert_eq!(summary.imported, 2);
    assert!(summary.conflicts.is_empty());
    assert_eq!(store.get_snippet("build").unwrap().command, "cargo build");
}

/// Test history never grows past the limit and keeps the newest entries
#[test]
fn test_history_capped() {
    let (_temp, store) = create_test_store();

    for i in 0..(HISTORY_LIMIT + 25) {
        store.log_command(&format!("echo {i}"), "", 0).unwrap();
    }

    let history = store.load_history();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history.first().unwrap().command, "echo 25");
    assert_eq!(history.last().unwrap().command, format!("echo {}", HISTORY_LIMIT + 24));
}

/// Test history queries over logged commands
#[test]
fn test_history_queries() {
    let (_temp, store) = create_test_store();
    log_commands(&store, &[("make", 0), ("make test", 2), ("git push", 0), ("cargo run", 101)]);

    let history = store.load_history();

    let tail: Vec<&str> = recent(&history, 2).iter().map(|e| e.command.as_str()).collect();
    assert_eq!(tail, vec!["git push", "cargo run"]);

    let failed: Vec<i32> = failures(&history).iter().map(|e| e.exit_code).collect();
    assert_eq!(failed, vec![2, 101]);

    let plan: Vec<&str> = rewind_plan(&history, 3).unwrap().iter().map(|e| e.command.as_str()).collect();
    assert_eq!(plan, vec!["cargo run", "git push", "make test"]);

    assert!(matches!(
        rewind_plan(&history, 5),
        Err(StoreError::NotEnoughHistory {
            available: 4,
            requested: 5
        })
    ));
}

/// Test clearing history leaves it empty
#[test]
fn test_clear_history() {
    let (_temp, store) = create_test_store();
    log_commands(&store, &[("ls", 0)]);

    store.clear_history().unwrap();
    assert!(store.load_history().is_empty());
    assert_eq!(fs::read_to_string(store.history_path()).unwrap().trim(), "[]");
}

/// Test corrupt documents fall back to empty values
#[test]
fn test_corrupt_documents_recover() {
    let (_temp, store) = create_test_store();
    write_raw(&store, "snippets.json", "{ not json");
    write_raw(&store, "history.json", "[1, 2,");
    write_raw(&store, "config.json", "null-ish");

    assert!(store.load_snippets().is_empty());
    assert!(store.load_history().is_empty());
    assert_eq!(store.load_config(), Config::default());

    // logging still works on top of a corrupt file
    store.log_command("ls", "a\nb\n", 0).unwrap();
    assert_eq!(store.load_history().len(), 1);
}

/// Test saving the loaded config changes nothing
#[test]
fn test_config_save_idempotent() {
    let (_temp, store) = create_test_store();
    write_raw(&store, "config.json", r#"{"api_key": "sk-test", "max_history": 50}"#);

    let config = store.load_config();
    assert!(config.time_travel_enabled);
    assert_eq!(config.max_history, 50);

    store.save_config(&config).unwrap();
    let first = fs::read_to_string(store.config_path()).unwrap();
    store.save_config(&store.load_config()).unwrap();
    let second = fs::read_to_string(store.config_path()).unwrap();

    assert_eq!(first, second);
}
