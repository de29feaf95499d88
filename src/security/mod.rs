pub mod classifier;
pub mod rollback;

pub use classifier::{
    compute_danger_statistics, find_recent_dangerous, is_dangerous, DangerClassifier, DangerStatistics,
};
pub use rollback::RollbackHint;

/// Keywords that mark a command as potentially dangerous
///
/// Matching is a case-insensitive substring test with no word boundaries, so
/// `masterclass` matches `master`. Both the classifier and the statistics pass
/// read from this list; its order is the tie-break order for keyword rankings.
pub const DANGEROUS_KEYWORDS: &[&str] = &[
    "deploy",
    "push",
    "delete",
    "drop",
    "rm",
    "remove",
    "prune",
    "migrate",
    "rollout",
    "apply",
    "destroy",
    "shutdown",
    "reboot",
    "kill",
    "force",
    "production",
    "prod",
    "master",
    "main",
];

/// History window scanned by `devkit panic`
pub const PANIC_WINDOW: usize = 20;

/// History window scanned by `devkit status`
pub const STATUS_WINDOW: usize = 10;
