//! Process-wide logging setup for all playground binaries.

use env_logger::Env;

const DEFAULT_FILTER: &str = "info";

/// Initializes the global logger.
///
/// Defaults to `info` for every target; override per target via `RUST_LOG`
/// (e.g. `RUST_LOG=moonplay_framework::orchestrator=debug`).
pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_millis()
        .init();
}
