/// Logging setup for the service binary.
///
/// Library code logs through `tracing` macros with structured fields
/// (`source`, `error`, `preset`, ...). The binary installs a `fmt`
/// subscriber once at startup; `RUST_LOG` overrides the default filter.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Crate target the verbosity flags apply to.
pub const LOG_TARGET: &str = "hazmon_service";

/// Maps `-v` count and `--quiet` to a level. Quiet wins.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    }
}

/// Filter directive used when `RUST_LOG` is unset, e.g. `hazmon_service=info`.
pub fn default_directive(level: Level) -> String {
    format!("{}={}", LOG_TARGET, level.as_str().to_lowercase())
}

/// Installs the global subscriber. Call once, before anything logs.
/// `RUST_LOG`, when set, replaces the flag-derived filter entirely.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
