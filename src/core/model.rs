// Grazer Launcher - core/model.rs
//
// The data types the rest of the crate talks in: console lines, launch
// progress, run outcomes and records, the parsed results table, and the
// workspace report. Plain data, no I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Console output
// =============================================================================

/// Which child stream a console line arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamSource {
    Stdout,
    Stderr,
}

impl StreamSource {
    /// Short label for compact display (console gutter).
    pub fn short_label(&self) -> &'static str {
        match self {
            StreamSource::Stdout => "out",
            StreamSource::Stderr => "err",
        }
    }
}

/// A single line of child output as shown in the console panel.
#[derive(Debug, Clone)]
pub struct ConsoleLine {
    /// Stream the line arrived on.
    pub source: StreamSource,

    /// Line text without the trailing newline. Truncated to
    /// `MAX_CONSOLE_LINE_LEN` when the child produced something longer.
    pub text: String,
}

// =============================================================================
// Run status
// =============================================================================

/// How a grazer run ended, as reported by the operating system.
///
/// The launcher never interprets grazer's failures beyond this; the exit
/// status and the child's own output are the entire failure story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Child exited with code 0.
    Success,

    /// Child exited with a non-zero code.
    ExitCode(i32),

    /// Child was terminated without an exit code (signal on Unix).
    Terminated,
}

impl RunStatus {
    /// Builds a status from the OS exit report.
    pub fn from_exit_status(status: std::process::ExitStatus) -> Self {
        match status.code() {
            Some(0) => RunStatus::Success,
            Some(code) => RunStatus::ExitCode(code),
            None => RunStatus::Terminated,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Success => f.write_str("exit 0"),
            RunStatus::ExitCode(code) => write!(f, "exit {code}"),
            RunStatus::Terminated => f.write_str("terminated by signal"),
        }
    }
}

// =============================================================================
// Run outcome (result of one completed invocation)
// =============================================================================

/// Everything known about a grazer invocation after the child exited.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// How the child ended.
    pub status: RunStatus,

    /// Wall-clock time from spawn to exit.
    pub duration: Duration,

    /// Captured stdout, bounded by `MAX_CAPTURE_BYTES`.
    pub captured_stdout: String,

    /// True when stdout exceeded the capture cap and was truncated.
    /// The console view still saw every line; only the retained capture
    /// (and therefore the extracted CSV block) may be incomplete.
    pub capture_truncated: bool,

    /// The simulation CSV block extracted from the capture, when the
    /// marker pair was present. Schema subcommands never print one, so
    /// `None` here is not an error.
    pub csv_block: Option<String>,
}

/// Compact record of a completed run, persisted in the session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// CLI name of the subcommand that was run (e.g. "run",
    /// "schema make-full-factory").
    pub command: String,

    /// The grazer directory the run was pointed at.
    pub directory: PathBuf,

    /// When the child was spawned.
    pub started: DateTime<Utc>,

    /// Wall-clock run duration.
    pub duration: Duration,

    /// How the child ended.
    pub status: RunStatus,

    /// Whether the captured output contained the simulation CSV block.
    pub had_csv_block: bool,
}

// =============================================================================
// Launch progress (for UI updates)
// =============================================================================

/// Progress messages sent from the launch thread to the UI thread.
#[derive(Debug, Clone)]
pub enum LaunchProgress {
    /// The child process has been spawned.
    Started {
        /// Resolved path of the executable that was spawned.
        program: PathBuf,
        /// Shell-style rendering of the full command line, echoed into
        /// the console so the user sees exactly what ran.
        display_line: String,
    },

    /// One line of child output arrived.
    Line(ConsoleLine),

    /// The child exited and its output has been fully collected.
    Completed { outcome: RunOutcome },

    /// The invocation failed before or during the run (spawn failure,
    /// stream capture failure). The child's own non-zero exits are NOT
    /// reported here; those arrive as `Completed` with a failing status.
    Failed { error: String },
}

// =============================================================================
// Parsed CSV table (results panel)
// =============================================================================

/// The simulation CSV block parsed into rows for tabular display.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    /// Column names from the header row.
    pub headers: Vec<String>,

    /// Data rows, each with as many cells as there are headers.
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

// =============================================================================
// Workspace report (grazer directory inspection)
// =============================================================================

/// Metadata about one file found inside a grazer directory.
#[derive(Debug, Clone)]
pub struct WorkspaceFile {
    /// Full path to the file.
    pub path: PathBuf,

    /// File size in bytes.
    pub size: u64,

    /// Last modification timestamp.
    pub modified: Option<DateTime<Utc>>,
}

impl WorkspaceFile {
    /// Final path component for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Listing of one known subdirectory (problem/, schemas/, output/).
#[derive(Debug, Clone, Default)]
pub struct DirListing {
    /// Whether the subdirectory exists at all.
    pub present: bool,

    /// Files found, bounded by `WORKSPACE_MAX_FILES`.
    pub files: Vec<WorkspaceFile>,

    /// True when the listing hit the file cap and was cut short.
    pub truncated: bool,
}

/// Per-schema-type presence flags, one row per entry in `SCHEMA_TYPES`.
#[derive(Debug, Clone)]
pub struct SchemaStatus {
    /// One of the four grazer data categories.
    pub schema_type: &'static str,

    /// `schemas/<type>_schema.json` exists.
    pub schema_file: bool,

    /// `problem/<type>.json` exists.
    pub data_file: bool,
}

/// Read-only snapshot of a grazer directory's layout.
///
/// Strictly informational. The report never gates a launch; grazer itself
/// is the authority on whether a directory is usable.
#[derive(Debug, Clone)]
pub struct WorkspaceReport {
    /// The inspected root.
    pub root: PathBuf,

    /// `problem/` contents.
    pub problem: DirListing,

    /// `schemas/` contents.
    pub schemas: DirListing,

    /// `output/` contents.
    pub output: DirListing,

    /// Presence of the four schema/data file pairs.
    pub schema_status: Vec<SchemaStatus>,

    /// Non-fatal problems encountered while walking (unreadable entries,
    /// metadata failures). Bounded by `MAX_WORKSPACE_WARNINGS`.
    pub warnings: Vec<String>,
}
