//! Logging initialization.
//!
//! Diagnostics go through `tracing` to stderr so they never mix with the
//! command output on stdout. Verbosity comes from repeated `-v` flags;
//! `DOCSITE_LOG` (an `EnvFilter` directive such as `docsite=debug`) takes
//! precedence when set.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the `-v` verbosity.
pub const LOG_ENV: &str = "DOCSITE_LOG";

/// Maps a verbosity level to a tracing directive string.
///
/// - 0 → `"warn"` (dead-rule lints still show)
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"`
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}
