// tracing-subscriber setup for the binary
use tracing_subscriber::EnvFilter;

use crate::cli::Verbosity;

/// Filter directive used when `RUST_LOG` is not set
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
        Verbosity::VeryVerbose => "trace",
    }
}

/// Install the global subscriber, writing to stderr so answers stay clean on stdout
pub fn init_logging(verbosity: Verbosity, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    // try_init: a subscriber may already be installed (tests, embedding hosts)
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
