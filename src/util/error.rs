// Grazer Launcher - util/error.rs
//
// Error types for the launcher, grouped by subsystem. Each variant keeps
// its underlying cause so `source()` chains stay intact in logs.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::util::constants::{SIM_END_MARKER, SIM_START_MARKER};

/// Umbrella error for launcher operations, one variant per subsystem.
#[derive(Debug)]
pub enum LauncherError {
    /// Launching or supervising the grazer child process failed.
    Launch(LaunchError),

    /// Extracting the simulation CSV block from captured output failed.
    Extract(ExtractError),

    /// Inspecting a grazer directory failed.
    Workspace(WorkspaceError),

    /// Loading the configuration file failed.
    Config(ConfigError),

    /// I/O failure with the path that triggered it.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LauncherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launch(e) => write!(f, "Launch error: {e}"),
            Self::Extract(e) => write!(f, "Extraction error: {e}"),
            Self::Workspace(e) => write!(f, "Workspace error: {e}"),
            Self::Config(e) => write!(f, "Config error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(f, "{operation} on '{}' failed: {source}", path.display()),
        }
    }
}

impl std::error::Error for LauncherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Launch(e) => Some(e),
            Self::Extract(e) => Some(e),
            Self::Workspace(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Launch errors
// ---------------------------------------------------------------------------

/// Errors related to spawning and supervising the grazer process.
#[derive(Debug)]
pub enum LaunchError {
    /// No grazer executable was found in any of the searched locations.
    ExecutableNotFound {
        name: String,
        searched: Vec<PathBuf>,
    },

    /// The child process could not be started.
    SpawnFailed { program: PathBuf, source: io::Error },

    /// A child output stream could not be captured.
    StreamCapture {
        program: PathBuf,
        stream: &'static str,
    },

    /// Waiting for the child to exit failed.
    Wait { program: PathBuf, source: io::Error },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutableNotFound { name, searched } => {
                write!(f, "'{name}' executable not found. Searched: ")?;
                for (i, path) in searched.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}'", path.display())?;
                }
                Ok(())
            }
            Self::SpawnFailed { program, source } => {
                write!(f, "Failed to start '{}': {source}", program.display())
            }
            Self::StreamCapture { program, stream } => {
                write!(
                    f,
                    "Could not capture {stream} of '{}'",
                    program.display()
                )
            }
            Self::Wait { program, source } => {
                write!(f, "Failed waiting for '{}': {source}", program.display())
            }
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SpawnFailed { source, .. } => Some(source),
            Self::Wait { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LaunchError> for LauncherError {
    fn from(e: LaunchError) -> Self {
        Self::Launch(e)
    }
}

// ---------------------------------------------------------------------------
// Extraction errors
// ---------------------------------------------------------------------------

/// Errors related to extracting the simulation CSV block.
#[derive(Debug)]
pub enum ExtractError {
    /// The start/end marker pair was not present in the input.
    MarkersNotFound { input_bytes: usize },

    /// The extracted block could not be parsed as CSV.
    CsvParse { source: csv::Error },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkersNotFound { input_bytes } => write!(
                f,
                "no simulation block found: markers '{SIM_START_MARKER}' and \
                 '{SIM_END_MARKER}' not present in {input_bytes} bytes of input"
            ),
            Self::CsvParse { source } => {
                write!(f, "simulation block is not valid CSV: {source}")
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CsvParse { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ExtractError> for LauncherError {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

// ---------------------------------------------------------------------------
// Workspace errors
// ---------------------------------------------------------------------------

/// Errors related to inspecting a grazer directory.
#[derive(Debug)]
pub enum WorkspaceError {
    /// The chosen path does not exist.
    RootNotFound { path: PathBuf },

    /// The chosen path is not a directory.
    NotADirectory { path: PathBuf },
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "'{}' is not a directory", path.display())
            }
        }
    }
}

impl std::error::Error for WorkspaceError {}

impl From<WorkspaceError> for LauncherError {
    fn from(e: WorkspaceError) -> Self {
        Self::Workspace(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from loading the configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but is not valid TOML.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A setting has a value outside its accepted range.
    OutOfRange {
        key: String,
        value: String,
        expected: String,
    },

    /// The file could not be read.
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { path, source } => {
                write!(f, "could not parse config '{}': {source}", path.display())
            }
            Self::OutOfRange {
                key,
                value,
                expected,
            } => write!(f, "config key {key} has value '{value}' outside {expected}"),
            Self::Read { path, source } => {
                write!(f, "could not read config '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LauncherError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for launcher results.
pub type Result<T> = std::result::Result<T, LauncherError>;
