pub mod analyzer;

pub use analyzer::{
    extract_error_patterns, read_log_file, truncate_log, ErrorPatterns, LogError, PatternLine, StackTrace,
    MAX_LOG_LINES,
};
