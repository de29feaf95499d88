pub mod executor;

pub use executor::{CommandOutput, ExecError, ShellExecutor};
