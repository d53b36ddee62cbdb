// Grazer Launcher - app/session.rs
//
// Persists the launch form and run history between application restarts:
// last directory, last subcommand, executable override, recorded runs.
//
// Saves go through a temp file and rename so an interrupted save leaves
// the previous snapshot intact. Loads never error out; anything wrong with
// the file (missing, malformed, wrong version) just means a fresh start.

use crate::core::command::GrazerCommand;
use crate::core::model::RunRecord;
use crate::util::constants::{MAX_HISTORY_ENTRIES, SESSION_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bump on breaking `SessionData` changes; a mismatch discards the file.
/// Additive changes are covered by serde defaults instead.
pub const SESSION_VERSION: u32 = 1;

/// What survives a restart.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub version: u32,

    /// The grazer directory that was in the form.
    pub last_directory: Option<PathBuf>,

    /// The selected subcommand.
    #[serde(default)]
    pub last_command: GrazerCommand,

    /// In-GUI executable override, if the user picked one.
    #[serde(default)]
    pub grazer_override: Option<PathBuf>,

    /// Completed runs, newest first, bounded by `MAX_HISTORY_ENTRIES`.
    #[serde(default)]
    pub history: Vec<RunRecord>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            version: SESSION_VERSION,
            last_directory: None,
            last_command: GrazerCommand::default(),
            grazer_override: None,
            history: Vec::new(),
        }
    }
}

/// Where the session file lives under the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Write the snapshot to `path`, creating parent directories as needed.
///
/// Temp-and-rename keeps the previous snapshot intact when this one dies
/// halfway. The error is a display string; callers log it and move on.
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("session serialise failed: {e}"))?;

    let tmp = path.with_extension("json.tmp");
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&tmp, json.as_bytes())?;
        std::fs::rename(&tmp, path)
    };

    match write() {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "session written");
            Ok(())
        }
        Err(e) => {
            let _ = std::fs::remove_file(&tmp);
            Err(format!(
                "session write failed at '{}': {e}",
                path.display()
            ))
        }
    }
}

/// Read a snapshot back. `None` means start fresh, whatever the reason;
/// an oversized persisted history is trimmed rather than rejected.
pub fn load(path: &Path) -> Option<SessionData> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            // Not-found is the normal first run; stay quiet about it.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Session file unreadable");
            }
            return None;
        }
    };

    let mut data: SessionData = match serde_json::from_str(&content) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file malformed; starting fresh"
            );
            return None;
        }
    };

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session version mismatch; starting fresh"
        );
        return None;
    }

    data.history.truncate(MAX_HISTORY_ENTRIES);
    tracing::info!(
        path = %path.display(),
        history = data.history.len(),
        "Session restored"
    );
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::RunStatus;
    use chrono::Utc;
    use std::time::Duration;

    fn record(status: RunStatus) -> RunRecord {
        RunRecord {
            command: "run".to_string(),
            directory: PathBuf::from("/data/paddock"),
            started: Utc::now(),
            duration: Duration::from_millis(3_200),
            status,
            had_csv_block: status.is_success(),
        }
    }

    fn snapshot() -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            last_directory: Some(PathBuf::from("/data/paddock")),
            last_command: GrazerCommand::SchemaInsertKey,
            grazer_override: Some(PathBuf::from("/opt/grazer/bin/grazer")),
            history: vec![record(RunStatus::Success), record(RunStatus::ExitCode(2))],
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        save(&snapshot(), &path).unwrap();
        let loaded = load(&path).expect("fresh save must load");

        assert_eq!(loaded.last_directory, Some(PathBuf::from("/data/paddock")));
        assert_eq!(loaded.last_command, GrazerCommand::SchemaInsertKey);
        assert_eq!(
            loaded.grazer_override,
            Some(PathBuf::from("/opt/grazer/bin/grazer"))
        );
        assert_eq!(loaded.history.len(), 2);
        assert_eq!(loaded.history[1].status, RunStatus::ExitCode(2));
        assert!(!loaded.history[1].had_csv_block);
    }

    #[test]
    fn missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.json")).is_none());
    }

    #[test]
    fn malformed_json_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{\"version\": ").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn version_mismatch_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut data = snapshot();
        data.version = SESSION_VERSION + 1;
        save(&data, &path).unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn oversized_history_is_trimmed_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut data = snapshot();
        data.history = (0..MAX_HISTORY_ENTRIES + 4)
            .map(|_| record(RunStatus::Success))
            .collect();
        save(&data, &path).unwrap();
        assert_eq!(load(&path).unwrap().history.len(), MAX_HISTORY_ENTRIES);
    }

    #[test]
    fn leftover_temp_file_does_not_break_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        save(&snapshot(), &path).unwrap();

        // A temp file from a crashed previous save must be overwritten.
        std::fs::write(path.with_extension("json.tmp"), "junk").unwrap();

        let mut updated = snapshot();
        updated.last_command = GrazerCommand::Run;
        save(&updated, &path).unwrap();
        assert_eq!(load(&path).unwrap().last_command, GrazerCommand::Run);
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/session.json");
        save(&snapshot(), &path).unwrap();
        assert!(load(&path).is_some());
    }
}
