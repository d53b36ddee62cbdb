// Grazer Launcher - platform/config.rs
//
// Platform directory resolution and config.toml loading.
//
// The config file is optional and never fatal: a missing file is a normal
// first run, and invalid values fall back to defaults with a warning the
// GUI surfaces in the status bar.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Per-platform locations for the config file and the session file.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve via the `directories` crate (XDG on Linux, AppData on
    /// Windows, Library on macOS). Without a resolvable home directory
    /// both paths fall back to the working directory.
    pub fn resolve() -> Self {
        match ProjectDirs::from("", "", constants::APP_ID) {
            Some(dirs) => {
                let paths = Self {
                    config_dir: dirs.config_dir().to_path_buf(),
                    data_dir: dirs.data_dir().to_path_buf(),
                };
                tracing::debug!(
                    config = %paths.config_dir.display(),
                    data = %paths.data_dir.display(),
                    "per-user directories resolved"
                );
                paths
            }
            None => {
                tracing::warn!("No home directory; using the working directory for config and data");
                Self {
                    config_dir: PathBuf::from("."),
                    data_dir: PathBuf::from("."),
                }
            }
        }
    }
}

// =============================================================================
// config.toml
// =============================================================================

/// Deserialised shape of config.toml. Unknown keys are ignored so an older
/// binary tolerates a newer file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RawConfig {
    grazer: GrazerSection,
    ui: UiSection,
    logging: LoggingSection,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct GrazerSection {
    /// Explicit grazer executable path. Beats the PATH search, loses to
    /// the --grazer CLI flag.
    executable: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiSection {
    theme: Option<String>,
    font_size: Option<f32>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct LoggingSection {
    level: Option<String>,
}

/// Validated configuration as the rest of the application sees it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Configured grazer executable path, if any.
    pub grazer_executable: Option<PathBuf>,

    /// Dark (true) or light (false) visuals.
    pub dark_mode: bool,

    /// UI font size in points.
    pub font_size: f32,

    /// Log level string, consumed before tracing is initialised.
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grazer_executable: None,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Load `config.toml` from `config_dir`.
///
/// Returns the validated config plus a warning per ignored value. An
/// unreadable or unparseable file warns once and yields defaults
/// wholesale; the application starts either way.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_dir.join(constants::CONFIG_FILE_NAME);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml; defaults apply");
        return (AppConfig::default(), Vec::new());
    }

    let parsed: Result<RawConfig, String> = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|text| toml::from_str(&text).map_err(|e| e.to_string()));
    let raw = match parsed {
        Ok(raw) => raw,
        Err(e) => {
            let msg = format!("Ignoring config file '{}': {e}", path.display());
            tracing::warn!("{msg}");
            return (AppConfig::default(), vec![msg]);
        }
    };
    tracing::info!(path = %path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();
    let mut warnings = Vec::new();
    apply_grazer(&raw.grazer, &mut config, &mut warnings);
    apply_ui(&raw.ui, &mut config, &mut warnings);
    apply_logging(&raw.logging, &mut config, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config values ignored");
    }
    (config, warnings)
}

fn apply_grazer(section: &GrazerSection, config: &mut AppConfig, warnings: &mut Vec<String>) {
    let Some(ref exe) = section.executable else {
        return;
    };
    let trimmed = exe.trim();
    if trimmed.is_empty() {
        warnings
            .push("[grazer] executable is empty; remove the key or set a path.".to_string());
    } else {
        // Existence is checked at launch time, not here; an installer or
        // network mount may make the path valid later.
        config.grazer_executable = Some(PathBuf::from(trimmed));
    }
}

fn apply_ui(section: &UiSection, config: &mut AppConfig, warnings: &mut Vec<String>) {
    if let Some(ref theme) = section.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => warnings.push(format!(
                "[ui] theme \"{other}\" is not \"dark\" or \"light\"; keeping dark."
            )),
        }
    }
    if let Some(size) = section.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size {size} is outside {}..{} points; keeping {}.",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE
            ));
        }
    }
}

fn apply_logging(section: &LoggingSection, config: &mut AppConfig, warnings: &mut Vec<String>) {
    let Some(ref level) = section.level else {
        return;
    };
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    let lower = level.to_lowercase();
    if LEVELS.contains(&lower.as_str()) {
        config.log_level = Some(lower);
    } else {
        warnings.push(format!(
            "[logging] level \"{level}\" is not one of error/warn/info/debug/trace; \
             keeping the default."
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, body: &str) {
        fs::write(dir.join(constants::CONFIG_FILE_NAME), body).unwrap();
    }

    #[test]
    fn missing_file_means_defaults_and_no_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert!(config.grazer_executable.is_none());
        assert!(config.dark_mode);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
    }

    #[test]
    fn valid_values_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[grazer]\nexecutable = \" /opt/grazer/bin/grazer \"\n\
             [ui]\ntheme = \"Light\"\nfont_size = 18.0\n\
             [logging]\nlevel = \"DEBUG\"\n",
        );

        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(
            config.grazer_executable,
            Some(PathBuf::from("/opt/grazer/bin/grazer"))
        );
        assert!(!config.dark_mode);
        assert_eq!(config.font_size, 18.0);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn each_bad_value_warns_and_keeps_its_default() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[ui]\ntheme = \"sepia\"\nfont_size = 3.0\n[logging]\nlevel = \"chatty\"\n",
        );

        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 3, "{warnings:?}");
        assert!(config.dark_mode);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn empty_executable_is_ignored_with_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[grazer]\nexecutable = \"  \"\n");

        let (config, warnings) = load_config(dir.path());
        assert!(config.grazer_executable.is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("[grazer]"));
    }

    #[test]
    fn unparseable_file_warns_once_and_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[ui\nbroken =");

        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(config.dark_mode);
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[ui]\ntheme = \"dark\"\nfuture_knob = 42\n[telemetry]\nenabled = true\n",
        );

        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "{warnings:?}");
        assert!(config.dark_mode);
    }
}
