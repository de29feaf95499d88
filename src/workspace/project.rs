use crate::store::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const WORKSPACE_DIR: &str = ".devkit";
const PROJECT_CONFIG_FILE: &str = "config.json";
const PROJECT_SNIPPETS_FILE: &str = "snippets.json";
const GITIGNORE_ENTRY: &str = ".devkit/";

/// Files or directories whose presence marks a project root
const ROOT_MARKERS: &[&str] = &[
    ".git",
    "package.json",
    "setup.py",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    WORKSPACE_DIR,
];

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(".devkit already exists in {0} (use --force to reinitialize)")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to encode project config: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Nodejs,
    Python,
    Rust,
    Go,
    JavaMaven,
    JavaGradle,
    GitRepo,
    Unknown,
}

impl ProjectType {
    /// Detect the project type from the files in `root`; the first match wins
    pub fn detect(root: &Path) -> Self {
        let has = |name: &str| root.join(name).exists();

        if has("package.json") {
            ProjectType::Nodejs
        } else if has("setup.py") || has("pyproject.toml") {
            ProjectType::Python
        } else if has("Cargo.toml") {
            ProjectType::Rust
        } else if has("go.mod") {
            ProjectType::Go
        } else if has("pom.xml") {
            ProjectType::JavaMaven
        } else if has("build.gradle") {
            ProjectType::JavaGradle
        } else if has(".git") {
            ProjectType::GitRepo
        } else {
            ProjectType::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Nodejs => "nodejs",
            ProjectType::Python => "python",
            ProjectType::Rust => "rust",
            ProjectType::Go => "go",
            ProjectType::JavaMaven => "java-maven",
            ProjectType::JavaGradle => "java-gradle",
            ProjectType::GitRepo => "git-repo",
            ProjectType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(default)]
    pub auto_stage: bool,
    #[serde(default)]
    pub commit_template: Option<String>,
}

/// Contents of `.devkit/config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project_name: String,
    pub project_type: ProjectType,
    pub project_root: PathBuf,
    #[serde(with = "timestamp")]
    pub initialized_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: ProjectSettings,
}

/// Walk up from `start` to the first directory holding a project marker
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

fn directory_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

fn manifest_name(root: &Path, project_type: ProjectType) -> Option<String> {
    match project_type {
        ProjectType::Nodejs => {
            let text = fs::read_to_string(root.join("package.json")).ok()?;
            let value: serde_json::Value = serde_json::from_str(&text).ok()?;
            value.get("name")?.as_str().map(str::to_string)
        }
        ProjectType::Python => {
            let text = fs::read_to_string(root.join("pyproject.toml")).ok()?;
            let value: toml::Value = toml::from_str(&text).ok()?;
            value.get("project")?.get("name")?.as_str().map(str::to_string)
        }
        ProjectType::Rust => {
            let text = fs::read_to_string(root.join("Cargo.toml")).ok()?;
            let value: toml::Value = toml::from_str(&text).ok()?;
            value.get("package")?.get("name")?.as_str().map(str::to_string)
        }
        _ => None,
    }
}

/// Project name from its manifest, falling back to the directory name
pub fn project_name(root: &Path, project_type: ProjectType) -> String {
    manifest_name(root, project_type)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| directory_name(root))
}

fn write_file(path: &Path, contents: &str) -> Result<(), WorkspaceError> {
    fs::write(path, contents).map_err(|source| WorkspaceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_gitignored(root: &Path) -> Result<(), WorkspaceError> {
    let gitignore = root.join(".gitignore");
    let existing = fs::read_to_string(&gitignore).unwrap_or_default();
    if existing.contains(GITIGNORE_ENTRY) {
        return Ok(());
    }

    let to_write_err = |source| WorkspaceError::Write {
        path: gitignore.clone(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&gitignore)
        .map_err(to_write_err)?;
    write!(file, "\n# DevKit project workspace\n{}\n", GITIGNORE_ENTRY).map_err(to_write_err)
}

/// Create `.devkit/` in `root` with a project config and an empty snippet file.
///
/// Inside a git repository `.devkit/` is also added to `.gitignore`.
pub fn init_project_workspace(root: &Path, force: bool) -> Result<ProjectConfig, WorkspaceError> {
    let workspace_dir = root.join(WORKSPACE_DIR);
    if workspace_dir.exists() && !force {
        return Err(WorkspaceError::AlreadyInitialized(root.to_path_buf()));
    }

    fs::create_dir_all(&workspace_dir).map_err(|source| WorkspaceError::Write {
        path: workspace_dir.clone(),
        source,
    })?;

    let project_type = ProjectType::detect(root);
    let config = ProjectConfig {
        project_name: project_name(root, project_type),
        project_type,
        project_root: root.to_path_buf(),
        initialized_at: Utc::now(),
        settings: ProjectSettings::default(),
    };

    let json = serde_json::to_string_pretty(&config)?;
    write_file(&workspace_dir.join(PROJECT_CONFIG_FILE), &(json + "\n"))?;

    let snippets_path = workspace_dir.join(PROJECT_SNIPPETS_FILE);
    if !snippets_path.exists() {
        write_file(&snippets_path, "{}\n")?;
    }

    if root.join(".git").exists() {
        ensure_gitignored(root)?;
    }

    tracing::info!(root = %root.display(), project_type = %project_type, "initialized project workspace");
    Ok(config)
}

/// The workspace config of the project containing `start`, if it has one
pub fn load_project_config(start: &Path) -> Option<ProjectConfig> {
    let root = find_project_root(start)?;
    let path = root.join(WORKSPACE_DIR).join(PROJECT_CONFIG_FILE);
    let text = fs::read_to_string(&path).ok()?;

    match serde_json::from_str(&text) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable project config");
            None
        }
    }
}

/// Project summary line block for prompts; empty outside a workspace
pub fn project_context(start: &Path) -> String {
    match load_project_config(start) {
        Some(config) => format!(
            "Project Context:\n- Name: {}\n- Type: {}",
            config.project_name, config.project_type
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        assert_eq!(ProjectType::detect(root), ProjectType::Unknown);

        fs::create_dir(root.join(".git")).unwrap();
        assert_eq!(ProjectType::detect(root), ProjectType::GitRepo);

        fs::write(root.join("Cargo.toml"), "").unwrap();
        assert_eq!(ProjectType::detect(root), ProjectType::Rust);

        fs::write(root.join("pyproject.toml"), "").unwrap();
        assert_eq!(ProjectType::detect(root), ProjectType::Python);

        fs::write(root.join("package.json"), "{}").unwrap();
        assert_eq!(ProjectType::detect(root), ProjectType::Nodejs);
    }

    #[test]
    fn test_find_project_root_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("proj");
        let nested = root.join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("go.mod"), "module x").unwrap();

        assert_eq!(find_project_root(&nested), Some(root));
    }

    #[test]
    fn test_project_name_from_manifests() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("Cargo.toml"), "[package]\nname = \"crab\"\nversion = \"0.1.0\"\n").unwrap();
        assert_eq!(project_name(root, ProjectType::Rust), "crab");

        fs::write(root.join("pyproject.toml"), "[project]\nname = \"snake\"\n").unwrap();
        assert_eq!(project_name(root, ProjectType::Python), "snake");

        fs::write(root.join("package.json"), r#"{"name": "node-app"}"#).unwrap();
        assert_eq!(project_name(root, ProjectType::Nodejs), "node-app");
    }

    #[test]
    fn test_project_name_falls_back_to_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("fallback-dir");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("package.json"), "not json").unwrap();

        assert_eq!(project_name(&root, ProjectType::Nodejs), "fallback-dir");
        assert_eq!(project_name(&root, ProjectType::Go), "fallback-dir");
    }

    #[test]
    fn test_init_creates_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("Cargo.toml"), "[package]\nname = \"crab\"\n").unwrap();

        let config = init_project_workspace(root, false).unwrap();
        assert_eq!(config.project_name, "crab");
        assert_eq!(config.project_type, ProjectType::Rust);
        assert!(root.join(".devkit/config.json").exists());
        assert_eq!(fs::read_to_string(root.join(".devkit/snippets.json")).unwrap().trim(), "{}");

        let loaded = load_project_config(root).unwrap();
        assert_eq!(loaded.project_name, "crab");
        assert_eq!(
            project_context(root),
            "Project Context:\n- Name: crab\n- Type: rust"
        );
    }

    #[test]
    fn test_init_twice_requires_force() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        init_project_workspace(root, false).unwrap();
        assert!(matches!(
            init_project_workspace(root, false),
            Err(WorkspaceError::AlreadyInitialized(_))
        ));
        assert!(init_project_workspace(root, true).is_ok());
    }

    #[test]
    fn test_init_updates_gitignore_once() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".gitignore"), "target/\n").unwrap();

        init_project_workspace(root, false).unwrap();
        init_project_workspace(root, true).unwrap();

        let gitignore = fs::read_to_string(root.join(".gitignore")).unwrap();
        assert!(gitignore.starts_with("target/\n"));
        assert_eq!(gitignore.matches(".devkit/").count(), 1);
    }

    #[test]
    fn test_no_gitignore_outside_git() {
        let temp_dir = TempDir::new().unwrap();
        init_project_workspace(temp_dir.path(), false).unwrap();
        assert!(!temp_dir.path().join(".gitignore").exists());
    }

    #[test]
    fn test_context_empty_without_workspace() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(project_context(temp_dir.path()), "");
    }
}
