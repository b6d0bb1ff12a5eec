//! Tracing initialization for the CLI.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber from the `-v` count.
///
/// `RUST_LOG` wins when set; otherwise `-v` maps to info and `-vv` (and up)
/// to debug. Logs go to stderr so report output on stdout stays parseable.
pub fn init(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
