use super::{read_document, timestamp, write_document, Store, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Snippets keyed by their unique name
pub type SnippetMap = BTreeMap<String, Snippet>;

/// A named, reusable shell command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    #[serde(skip)]
    pub name: String,
    pub command: String,
    pub tags: BTreeSet<String>,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
}

impl Snippet {
    pub fn new(name: &str, command: &str, tags: BTreeSet<String>) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            tags,
            created: Utc::now(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Case-insensitive match against name, command or tags
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.command.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

/// The two shapes a snippet value can take on disk
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredSnippet {
    Legacy(String),
    Structured {
        #[serde(default)]
        command: String,
        #[serde(default)]
        tags: BTreeSet<String>,
        #[serde(default)]
        created: Option<String>,
    },
}

impl StoredSnippet {
    fn normalize(self, name: &str) -> Snippet {
        match self {
            StoredSnippet::Legacy(command) => Snippet::new(name, &command, BTreeSet::new()),
            StoredSnippet::Structured {
                command,
                tags,
                created,
            } => Snippet {
                name: name.to_string(),
                command,
                tags,
                created: created
                    .as_deref()
                    .and_then(timestamp::parse)
                    .unwrap_or_else(Utc::now),
            },
        }
    }
}

/// Decode a snippet document of either shape, skipping undecodable entries
fn decode_snippets(raw: serde_json::Map<String, serde_json::Value>) -> SnippetMap {
    raw.into_iter()
        .filter_map(|(name, value)| match serde_json::from_value::<StoredSnippet>(value) {
            Ok(stored) => {
                let snippet = stored.normalize(&name);
                Some((name, snippet))
            }
            Err(e) => {
                tracing::warn!(snippet = %name, error = %e, "skipping malformed snippet");
                None
            }
        })
        .collect()
}

/// Split a comma-separated tag list
pub fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// On-disk layout for snippet export and import.
///
/// `Txt` writes `# name`, an optional `# Tags: a, b` line, then the command.
/// Command lines that are blank or start with `#` or `\` are written with a
/// leading `\`, which the importer strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Txt,
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

impl ExportFormat {
    /// Format for an export without an explicit one: `.txt` files get txt, anything else JSON
    pub fn for_export(path: &Path) -> Self {
        if has_extension(path, "txt") {
            ExportFormat::Txt
        } else {
            ExportFormat::Json
        }
    }

    /// Format for an import without an explicit one: `.json` files are JSON, anything else txt
    pub fn for_import(path: &Path) -> Self {
        if has_extension(path, "json") {
            ExportFormat::Json
        } else {
            ExportFormat::Txt
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(format!("unknown export format '{other}' (expected json or txt)")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Txt => write!(f, "txt"),
        }
    }
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    /// Names already present that were left untouched
    pub conflicts: Vec<String>,
}

impl Store {
    /// Load snippets, normalizing legacy string-valued entries
    pub fn load_snippets(&self) -> SnippetMap {
        read_document::<serde_json::Map<String, serde_json::Value>>(&self.snippets_path())
            .map(decode_snippets)
            .unwrap_or_default()
    }

    /// Replace the stored snippets
    pub fn save_snippets(&self, snippets: &SnippetMap) -> Result<(), StoreError> {
        write_document(&self.snippets_path(), snippets)
    }

    /// Save (or overwrite) a snippet. Returns true when a snippet was replaced.
    pub fn save_snippet(&self, name: &str, command: &str, tags: BTreeSet<String>) -> Result<bool, StoreError> {
        let mut snippets = self.load_snippets();
        let replaced = snippets
            .insert(name.to_string(), Snippet::new(name, command, tags))
            .is_some();

        self.save_snippets(&snippets)?;
        tracing::debug!(snippet = name, replaced, "saved snippet");

        Ok(replaced)
    }

    pub fn get_snippet(&self, name: &str) -> Option<Snippet> {
        self.load_snippets().remove(name)
    }

    pub fn delete_snippet(&self, name: &str) -> Result<Snippet, StoreError> {
        let mut snippets = self.load_snippets();
        let removed = snippets
            .remove(name)
            .ok_or_else(|| StoreError::SnippetNotFound(name.to_string()))?;

        self.save_snippets(&snippets)?;
        Ok(removed)
    }

    /// Export every snippet to `path`. Returns the number written.
    pub fn export_snippets(&self, path: &Path, format: ExportFormat) -> Result<usize, StoreError> {
        let snippets = self.load_snippets();

        match format {
            ExportFormat::Json => write_document(path, &snippets)?,
            ExportFormat::Txt => fs::write(path, render_txt(&snippets)).map_err(|source| StoreError::Write {
                path: path.to_path_buf(),
                source,
            })?,
        }

        Ok(snippets.len())
    }

    /// Import snippets from a JSON or txt export
    pub fn import_snippets(
        &self,
        path: &Path,
        format: ExportFormat,
        overwrite: bool,
    ) -> Result<ImportSummary, StoreError> {
        let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let incoming = match format {
            ExportFormat::Json => {
                let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&contents)
                    .map_err(|source| StoreError::Parse {
                        path: path.to_path_buf(),
                        source,
                    })?;
                decode_snippets(raw)
            }
            ExportFormat::Txt => parse_txt(&contents),
        };

        let mut existing = self.load_snippets();
        let mut summary = ImportSummary::default();

        for (name, snippet) in incoming {
            if existing.contains_key(&name) && !overwrite {
                summary.conflicts.push(name);
                continue;
            }
            existing.insert(name, snippet);
            summary.imported += 1;
        }

        self.save_snippets(&existing)?;
        Ok(summary)
    }
}

/// Snippets carrying `tag` (case-insensitive)
pub fn filter_by_tag<'a>(snippets: &'a SnippetMap, tag: &str) -> Vec<&'a Snippet> {
    snippets.values().filter(|s| s.has_tag(tag)).collect()
}

/// Snippets whose name, command or tags contain `query`
pub fn search<'a>(snippets: &'a SnippetMap, query: &str) -> Vec<&'a Snippet> {
    snippets.values().filter(|s| s.matches(query)).collect()
}

/// Names containing `name`, for "did you mean" hints
pub fn similar_names(snippets: &SnippetMap, name: &str) -> Vec<String> {
    let needle = name.to_lowercase();
    snippets
        .keys()
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

fn render_txt(snippets: &SnippetMap) -> String {
    let mut out = String::new();

    for (name, snippet) in snippets {
        out.push_str(&format!("# {name}\n"));
        if !snippet.tags.is_empty() {
            let tags: Vec<&str> = snippet.tags.iter().map(String::as_str).collect();
            out.push_str(&format!("# Tags: {}\n", tags.join(", ")));
        }
        for line in snippet.command.split('\n') {
            if line.trim().is_empty() || line.starts_with('#') || line.starts_with('\\') {
                out.push('\\');
            }
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

type TxtEntry<'a> = (String, BTreeSet<String>, Vec<&'a str>);

fn flush_txt_entry(entry: Option<TxtEntry<'_>>, snippets: &mut SnippetMap) {
    if let Some((name, tags, lines)) = entry {
        if !lines.is_empty() {
            let snippet = Snippet::new(&name, &lines.join("\n"), tags);
            snippets.insert(name, snippet);
        }
    }
}

fn parse_txt(contents: &str) -> SnippetMap {
    let mut snippets = SnippetMap::new();
    let mut current: Option<TxtEntry<'_>> = None;

    for line in contents.lines() {
        if let Some(literal) = line.strip_prefix('\\') {
            if let Some((_, _, lines)) = current.as_mut() {
                lines.push(literal);
            }
        } else if let Some(header) = line.strip_prefix("# ") {
            // A tags line directly follows the name line
            if let Some((_, tags, lines)) = current.as_mut() {
                if lines.is_empty() {
                    if let Some(raw_tags) = header.strip_prefix("Tags:") {
                        *tags = parse_tags(raw_tags);
                        continue;
                    }
                }
            }
            flush_txt_entry(current.take(), &mut snippets);
            current = Some((header.trim().to_string(), BTreeSet::new(), Vec::new()));
        } else if !line.trim().is_empty() {
            if let Some((_, _, lines)) = current.as_mut() {
                lines.push(line);
            }
        }
    }
    flush_txt_entry(current, &mut snippets);

    snippets
}
