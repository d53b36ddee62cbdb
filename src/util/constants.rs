// Grazer Launcher - util/constants.rs
//
// Every limit, marker, file name, and default lives here under its own
// name; nothing elsewhere in the crate hard-codes one.

// =============================================================================
// Application metadata
// =============================================================================

/// Name shown in the window title and the about dialog.
pub const APP_NAME: &str = "Grazer Launcher";

/// Identifier the `directories` crate derives per-user paths from.
pub const APP_ID: &str = "GrazerLauncher";

/// Current application version, taken from Cargo.toml at build time.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Grazer executable
// =============================================================================

/// Base file name of the external grazer executable (platform suffix is
/// appended at lookup time).
pub const GRAZER_BIN_NAME: &str = "grazer";

// =============================================================================
// Log extraction markers
// =============================================================================

/// Literal marker grazer prints immediately before the simulation CSV table.
pub const SIM_START_MARKER: &str = "=== simulation start ===";

/// Literal marker grazer prints immediately after the simulation CSV table.
pub const SIM_END_MARKER: &str = "=== simulation end ===";

/// Input size in bytes above which the filter binary memory-maps a FILE
/// argument instead of reading it into a heap buffer.
pub const MMAP_THRESHOLD_BYTES: u64 = 16 * 1024 * 1024; // 16 MiB

// =============================================================================
// Launch limits
// =============================================================================

/// Maximum bytes of child stdout retained for post-run extraction.
/// Output beyond this cap still reaches the console view line-by-line, but
/// the retained capture is truncated and the run is flagged so the results
/// panel can say the CSV block may be incomplete.
pub const MAX_CAPTURE_BYTES: usize = 64 * 1024 * 1024; // 64 MiB

/// Maximum length of a single child output line forwarded to the UI.
/// Longer lines are truncated to keep frame times stable.
pub const MAX_CONSOLE_LINE_LEN: usize = 8 * 1024; // 8 KiB

/// Maximum number of console lines retained in the UI ring buffer.
/// Older lines are dropped once the cap is reached and a notice is shown.
pub const MAX_CONSOLE_LINES: usize = 50_000;

/// Maximum number of launch-progress messages processed by the UI update
/// loop per frame.  Any remaining messages are left in the channel and
/// processed on subsequent frames, preventing a burst of child output from
/// stalling the render loop.
pub const MAX_LAUNCH_MESSAGES_PER_FRAME: usize = 500;

/// Repaint interval while a run is active (ms).  The launch worker has no
/// way to wake the UI thread, so the frame loop re-arms a repaint at this
/// cadence to drain the progress channel.
pub const LAUNCH_REPAINT_INTERVAL_MS: u64 = 100;

// =============================================================================
// Run history
// =============================================================================

/// Maximum number of completed runs kept in the session history.
pub const MAX_HISTORY_ENTRIES: usize = 50;

// =============================================================================
// Workspace inspection
// =============================================================================

/// Directory that holds the problem data JSONs inside a grazer directory.
pub const PROBLEM_DIR_NAME: &str = "problem";

/// Directory grazer writes simulation results into.
pub const OUTPUT_DIR_NAME: &str = "output";

/// Directory that holds the generated JSON schema files.
pub const SCHEMAS_DIR_NAME: &str = "schemas";

/// The problem description file grazer reads from the problem directory.
pub const PROBLEM_DATA_FILE: &str = "problem_data.json";

/// The four data categories grazer generates schemas for.  Schema files are
/// named `<type>_schema.json`; the matching data files live under the
/// problem directory as `<type>.json`.
pub const SCHEMA_TYPES: &[&str] = &["boundary", "control", "initial", "topology"];

/// Maximum recursion depth below each known subdirectory during workspace
/// inspection (1 = direct children).  The grazer layout is flat, but output
/// directories occasionally nest results one level down.
pub const WORKSPACE_MAX_DEPTH: usize = 2;

/// Maximum number of files listed per workspace subdirectory.  Output
/// directories of long simulations can hold thousands of result files; the
/// report truncates with a notice instead of flooding the panel.
pub const WORKSPACE_MAX_FILES: usize = 200;

/// Maximum number of non-fatal warnings accumulated by a single workspace
/// inspection.
pub const MAX_WORKSPACE_WARNINGS: usize = 100;

// =============================================================================
// UI defaults
// =============================================================================

/// Font size applied when config.toml does not set one (points).
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Smallest accepted `font_size` config value (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Largest accepted `font_size` config value (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Log level when neither RUST_LOG, --debug, nor config chose one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session snapshot file, kept in the platform data directory.
pub const SESSION_FILE_NAME: &str = "session.json";
