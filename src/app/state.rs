// Grazer Launcher - app/state.rs
//
// The one mutable hub the frame loop and every panel share: launch form
// fields, the console ring, the last outcome, run history, the workspace
// report, and the request flags panels raise for gui.rs to act on.

use crate::app::session::{self, SessionData, SESSION_VERSION};
use crate::core::command::GrazerCommand;
use crate::core::model::{ConsoleLine, CsvTable, RunOutcome, RunRecord, WorkspaceReport};
use crate::platform::exe;
use crate::util::constants::{MAX_CONSOLE_LINES, MAX_HISTORY_ENTRIES};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Outcome of the most recent grazer executable lookup.
#[derive(Debug, Clone)]
pub enum GrazerStatus {
    /// Lookup has not run yet.
    Unknown,
    /// Executable resolved to this path.
    Found(PathBuf),
    /// Nothing found; the diagnostic lists the searched locations.
    NotFound(String),
}

impl GrazerStatus {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            GrazerStatus::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Everything the frame loop and the panels read and write.
#[derive(Debug)]
pub struct AppState {
    // -- Launch form --
    /// Editable grazer directory path (bound to the text field).
    pub directory_input: String,

    /// Currently selected subcommand.
    pub selected_command: GrazerCommand,

    /// Explicit grazer executable override (CLI flag or in-GUI picker).
    pub grazer_override: Option<PathBuf>,

    /// Grazer executable path from config.toml.
    pub configured_grazer: Option<PathBuf>,

    /// Result of the last executable lookup.
    pub grazer_status: GrazerStatus,

    // -- Active run --
    /// Whether an invocation is currently running. The form is locked
    /// while this is true; there is no cancellation.
    pub run_in_progress: bool,

    /// Console ring buffer, bounded by `MAX_CONSOLE_LINES`.
    pub console: VecDeque<ConsoleLine>,

    /// Number of console lines dropped after the ring filled up.
    pub dropped_console_lines: usize,

    /// Shell-style echo of the command line being run, pinned above the
    /// console output.
    pub command_echo: Option<String>,

    /// The invocation currently running (used to build the history record
    /// when it completes).
    pub active_directory: Option<PathBuf>,

    /// When the active run was started.
    pub run_started_at: Option<DateTime<Utc>>,

    // -- Results --
    /// Outcome of the most recent completed run.
    pub last_outcome: Option<RunOutcome>,

    /// Parsed CSV table from the last outcome's csv_block, if it parsed.
    pub results_table: Option<CsvTable>,

    /// Completed runs, newest first, bounded by `MAX_HISTORY_ENTRIES`.
    pub history: Vec<RunRecord>,

    // -- Workspace --
    /// Report for the directory currently in the form, if inspected.
    pub workspace: Option<WorkspaceReport>,

    // -- UI state --
    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config validation, workspace) shown in the UI.
    pub warnings: Vec<String>,

    /// Whether to show the about dialog.
    pub show_about: bool,

    /// Whether to show the run history dialog.
    pub show_history: bool,

    /// Debug flag carried over from the command line.
    pub debug_mode: bool,

    // -- Request flags (set by panels, consumed by gui.rs update) --
    /// A panel requested a launch of the current form contents.
    pub request_launch: bool,

    /// A panel requested a fresh workspace inspection.
    pub request_refresh_workspace: bool,

    // -- Persistence --
    /// Resolved session file path (None disables persistence).
    pub session_file: Option<PathBuf>,
}

impl AppState {
    pub fn new(debug_mode: bool) -> Self {
        Self {
            directory_input: String::new(),
            selected_command: GrazerCommand::default(),
            grazer_override: None,
            configured_grazer: None,
            grazer_status: GrazerStatus::Unknown,
            run_in_progress: false,
            console: VecDeque::new(),
            dropped_console_lines: 0,
            command_echo: None,
            active_directory: None,
            run_started_at: None,
            last_outcome: None,
            results_table: None,
            history: Vec::new(),
            workspace: None,
            status_message: "Ready. Choose a grazer directory and press Start.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            show_history: false,
            debug_mode,
            request_launch: false,
            request_refresh_workspace: false,
            session_file: None,
        }
    }

    /// The directory currently in the form, trimmed. `None` when empty.
    /// No validation beyond that; grazer decides what it accepts.
    pub fn form_directory(&self) -> Option<PathBuf> {
        let trimmed = self.directory_input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    /// Re-run the executable lookup and cache the result for display.
    pub fn refresh_grazer_status(&mut self) {
        self.grazer_status = match exe::locate_grazer(
            self.grazer_override.as_deref(),
            self.configured_grazer.as_deref(),
        ) {
            Ok(path) => GrazerStatus::Found(path),
            Err(e) => GrazerStatus::NotFound(e.to_string()),
        };
    }

    /// Append a console line, dropping the oldest once the ring is full.
    pub fn push_console_line(&mut self, line: ConsoleLine) {
        if self.console.len() >= MAX_CONSOLE_LINES {
            self.console.pop_front();
            self.dropped_console_lines += 1;
        }
        self.console.push_back(line);
    }

    /// Record a completed run at the head of the history.
    pub fn push_history(&mut self, record: RunRecord) {
        self.history.insert(0, record);
        self.history.truncate(MAX_HISTORY_ENTRIES);
    }

    /// Clear console and results ahead of a new run.
    pub fn clear_run_output(&mut self) {
        self.console.clear();
        self.dropped_console_lines = 0;
        self.command_echo = None;
        self.last_outcome = None;
        self.results_table = None;
    }

    /// Apply a restored session snapshot.
    pub fn restore_session(&mut self, data: SessionData) {
        if let Some(dir) = data.last_directory {
            self.directory_input = dir.display().to_string();
        }
        self.selected_command = data.last_command;
        // A CLI --grazer flag beats the persisted override.
        if self.grazer_override.is_none() {
            self.grazer_override = data.grazer_override;
        }
        self.history = data.history;
    }

    /// Persist the current session snapshot. Failures are logged, never
    /// surfaced; losing a session is not worth interrupting the user.
    pub fn save_session(&self) {
        let Some(ref path) = self.session_file else {
            return;
        };
        let data = SessionData {
            version: SESSION_VERSION,
            last_directory: self.form_directory(),
            last_command: self.selected_command,
            grazer_override: self.grazer_override.clone(),
            history: self.history.clone(),
        };
        if let Err(e) = session::save(&data, path) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }
}
