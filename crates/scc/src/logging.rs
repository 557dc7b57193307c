//! Tracing initialization for the scc binary.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Picks the default log level from the verbosity flags.
fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `--verbose` and
/// `--quiet`.
pub fn init_tracing(verbose: bool, quiet: bool, use_colors: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_ansi(use_colors)
                .with_target(verbose),
        )
        .with(filter)
        .try_init();
}
