// Grazer Launcher - platform/exe.rs
//
// Locating the external grazer executable, plus the file-manager helper
// used by the workspace panel.

use crate::util::constants::GRAZER_BIN_NAME;
use crate::util::error::LaunchError;
use std::path::{Path, PathBuf};

/// Platform-specific file name of the grazer executable.
pub fn grazer_exe_name() -> String {
    format!("{}{}", GRAZER_BIN_NAME, std::env::consts::EXE_SUFFIX)
}

/// Resolve the grazer executable.
///
/// Candidates are tried in priority order and the first one that exists
/// wins:
/// 1. the CLI / in-GUI override,
/// 2. the `[grazer] executable` path from config.toml,
/// 3. a grazer binary sitting next to the launcher's own executable,
/// 4. each entry of `PATH`.
///
/// On failure, every searched location is carried in the error so the GUI
/// can show the user exactly where it looked.
pub fn locate_grazer(
    cli_override: Option<&Path>,
    configured: Option<&Path>,
) -> Result<PathBuf, LaunchError> {
    let exe_name = grazer_exe_name();
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(path) = cli_override {
        candidates.push(path.to_path_buf());
    }
    if let Some(path) = configured {
        candidates.push(path.to_path_buf());
    }
    if let Ok(current) = std::env::current_exe() {
        if let Some(dir) = current.parent() {
            candidates.push(dir.join(&exe_name));
        }
    }
    if let Some(path_var) = std::env::var_os("PATH") {
        for dir in std::env::split_paths(&path_var) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            candidates.push(dir.join(&exe_name));
        }
    }

    for candidate in &candidates {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Grazer executable resolved");
            return Ok(candidate.clone());
        }
        tracing::trace!(path = %candidate.display(), "Candidate not present");
    }

    Err(LaunchError::ExecutableNotFound {
        name: exe_name,
        searched: candidates,
    })
}

/// Open the system file manager on `dir`.
///
/// Platform behaviour:
/// - **Windows**: `explorer.exe "<dir>"`
/// - **macOS**: `open "<dir>"`
/// - **Linux**: `xdg-open "<dir>"`
///
/// The subprocess is spawned detached and forgotten; when it cannot be
/// started the failure is logged and the UI carries on.
pub fn open_in_file_manager(dir: &Path) {
    #[cfg(target_os = "windows")]
    {
        if let Err(e) = std::process::Command::new("explorer").arg(dir).spawn() {
            tracing::warn!(
                path = %dir.display(),
                error = %e,
                "Failed to open directory in Explorer"
            );
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Err(e) = std::process::Command::new("open").arg(dir).spawn() {
            tracing::warn!(
                path = %dir.display(),
                error = %e,
                "Failed to open directory in Finder"
            );
        }
    }
    #[cfg(target_os = "linux")]
    {
        if let Err(e) = std::process::Command::new("xdg-open").arg(dir).spawn() {
            tracing::warn!(
                path = %dir.display(),
                error = %e,
                "Failed to open directory in file manager"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn override_wins_over_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let override_exe = dir.path().join("grazer-dev");
        let configured_exe = dir.path().join("grazer-stable");
        fs::write(&override_exe, "#!/bin/sh\n").unwrap();
        fs::write(&configured_exe, "#!/bin/sh\n").unwrap();

        let resolved = locate_grazer(Some(&override_exe), Some(&configured_exe)).unwrap();
        assert_eq!(resolved, override_exe);
    }

    #[test]
    fn missing_override_falls_through_to_configured() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-built-yet");
        let configured_exe = dir.path().join("grazer");
        fs::write(&configured_exe, "#!/bin/sh\n").unwrap();

        let resolved = locate_grazer(Some(&missing), Some(&configured_exe)).unwrap();
        assert_eq!(resolved, configured_exe);
    }

    #[test]
    fn exe_name_carries_platform_suffix() {
        let name = grazer_exe_name();
        assert!(name.starts_with(GRAZER_BIN_NAME));
        #[cfg(windows)]
        assert!(name.ends_with(".exe"));
    }
}
