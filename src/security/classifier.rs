use crate::security::DANGEROUS_KEYWORDS;
use crate::store::HistoryEntry;
use std::collections::HashMap;

/// Keyword heuristic for commands that deserve a second look
pub struct DangerClassifier {
    keywords: Vec<&'static str>,
}

impl DangerClassifier {
    pub fn new() -> Self {
        Self::with_keywords(DANGEROUS_KEYWORDS)
    }

    /// Classifier over a custom keyword list (expected lowercase)
    pub fn with_keywords(keywords: &[&'static str]) -> Self {
        Self {
            keywords: keywords.to_vec(),
        }
    }

    /// Check if a command is potentially dangerous
    pub fn is_dangerous(&self, command: &str) -> bool {
        let lower = command.to_lowercase();
        self.keywords.iter().any(|keyword| lower.contains(keyword))
    }

    /// Every keyword that occurs in `command`, in keyword-list order
    pub fn matched_keywords(&self, command: &str) -> Vec<&'static str> {
        let lower = command.to_lowercase();
        self.keywords
            .iter()
            .copied()
            .filter(|keyword| lower.contains(keyword))
            .collect()
    }

    /// Dangerous entries among the last `limit` history entries, oldest first
    pub fn find_recent_dangerous<'a>(&self, history: &'a [HistoryEntry], limit: usize) -> Vec<&'a HistoryEntry> {
        let start = history.len().saturating_sub(limit);
        history[start..]
            .iter()
            .filter(|entry| self.is_dangerous(&entry.command))
            .collect()
    }

    /// Summarize how much of `history` is dangerous and which keywords drive it
    pub fn statistics(&self, history: &[HistoryEntry]) -> DangerStatistics {
        let mut dangerous_count = 0;
        let mut keyword_frequency: HashMap<&'static str, usize> = HashMap::new();

        for entry in history {
            let matched = self.matched_keywords(&entry.command);
            if matched.is_empty() {
                continue;
            }

            dangerous_count += 1;
            for keyword in matched {
                *keyword_frequency.entry(keyword).or_insert(0) += 1;
            }
        }

        let total = history.len();
        let percentage = if total == 0 {
            0.0
        } else {
            dangerous_count as f64 / total as f64 * 100.0
        };

        DangerStatistics {
            total,
            dangerous_count,
            percentage,
            keyword_frequency,
            keyword_order: self.keywords.clone(),
        }
    }
}

impl Default for DangerClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate view of dangerous commands in a history
#[derive(Debug, Clone, PartialEq)]
pub struct DangerStatistics {
    pub total: usize,
    pub dangerous_count: usize,
    pub percentage: f64,
    pub keyword_frequency: HashMap<&'static str, usize>,
    keyword_order: Vec<&'static str>,
}

impl DangerStatistics {
    /// The `n` most frequent keywords, ties broken by keyword-list order
    pub fn top_keywords(&self, n: usize) -> Vec<(&'static str, usize)> {
        let mut ranked: Vec<(&'static str, usize)> = self
            .keyword_order
            .iter()
            .filter_map(|keyword| self.keyword_frequency.get(keyword).map(|count| (*keyword, *count)))
            .collect();

        // stable sort keeps list order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

/// Check a command against the default keyword list
pub fn is_dangerous(command: &str) -> bool {
    DangerClassifier::new().is_dangerous(command)
}

/// Dangerous entries among the last `limit` entries, using the default keywords
pub fn find_recent_dangerous(history: &[HistoryEntry], limit: usize) -> Vec<&HistoryEntry> {
    DangerClassifier::new().find_recent_dangerous(history, limit)
}

/// Danger statistics over `history`, using the default keywords
pub fn compute_danger_statistics(history: &[HistoryEntry]) -> DangerStatistics {
    DangerClassifier::new().statistics(history)
}
