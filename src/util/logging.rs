// Grazer Launcher - util/logging.rs
//
// Structured logging to stderr via tracing.
//
// Level selection, first match wins:
//   RUST_LOG env var > --debug CLI flag > config.toml [logging] level >
//   default ("info").
//
// Thread ids are included because child output is drained on per-stream
// reader threads; interleaved lines are much easier to follow with them.

use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem. Call once, before any other module
/// logs.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if debug_flag => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new(config_level.unwrap_or(super::constants::DEFAULT_LOG_LEVEL)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "logging ready"
    );
}
