pub mod settings;

pub use settings::{parse_toggle, Config, ConfigError, API_KEY_ENV};
