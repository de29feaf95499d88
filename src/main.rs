use devkit::cli::Cli;
use devkit::commands;
use devkit::error_translation::ErrorTranslator;
use devkit::output;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Err(e) = commands::dispatch(cli).await {
        tracing::debug!(error = ?e, "command failed");

        let friendly = ErrorTranslator::translate_app_error(&e);
        output::error(&friendly.simple_message, friendly.suggestion.as_deref());
        if friendly.raw_error != friendly.simple_message {
            output::detail(&friendly.raw_error);
        }
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber with environment filter, logging to stderr
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "devkit=debug" } else { "devkit=warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
