// Grazer Launcher - core/command.rs
//
// The grazer CLI surface as constructed by this launcher. Pure argv
// assembly; nothing here validates the directory or second-guesses what
// grazer will do with it.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// =============================================================================
// Subcommands
// =============================================================================

/// The grazer subcommands this launcher can invoke.
///
/// Each variant maps to exactly one external command line; the launcher
/// adds nothing and removes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GrazerCommand {
    /// `grazer run <DIR>`
    #[default]
    Run,

    /// `grazer schema make-full-factory <DIR>`
    SchemaMakeFullFactory,

    /// `grazer schema insert-key <DIR>`
    SchemaInsertKey,
}

impl GrazerCommand {
    /// Returns all variants in selector display order.
    pub fn all() -> &'static [GrazerCommand] {
        &[
            GrazerCommand::Run,
            GrazerCommand::SchemaMakeFullFactory,
            GrazerCommand::SchemaInsertKey,
        ]
    }

    /// Human-readable label for the subcommand selector.
    pub fn label(&self) -> &'static str {
        match self {
            GrazerCommand::Run => "Run simulation",
            GrazerCommand::SchemaMakeFullFactory => "Generate schemas",
            GrazerCommand::SchemaInsertKey => "Insert $schema keys",
        }
    }

    /// Help text shown next to the selector.
    pub fn description(&self) -> &'static str {
        match self {
            GrazerCommand::Run => {
                "Run the simulation on a grazer directory. The directory must \
                 contain a 'problem' folder; an 'output' folder will appear \
                 after the run."
            }
            GrazerCommand::SchemaMakeFullFactory => {
                "Write the four JSON schema files (boundary, control, initial, \
                 topology) into the directory's 'schemas' folder."
            }
            GrazerCommand::SchemaInsertKey => {
                "Insert '$schema' keys pointing at the generated schemas into \
                 the data files under the directory's 'problem' folder."
            }
        }
    }

    /// The subcommand as it appears on the grazer command line.
    pub fn cli_name(&self) -> &'static str {
        match self {
            GrazerCommand::Run => "run",
            GrazerCommand::SchemaMakeFullFactory => "schema make-full-factory",
            GrazerCommand::SchemaInsertKey => "schema insert-key",
        }
    }

    /// Parses the `--command` CLI value. Accepts the exact grazer spelling.
    pub fn parse_cli_name(s: &str) -> Option<GrazerCommand> {
        let normalised = s.trim().split_whitespace().collect::<Vec<_>>().join(" ");
        GrazerCommand::all()
            .iter()
            .copied()
            .find(|c| c.cli_name() == normalised)
    }

    /// The exact argv tail passed to the grazer executable.
    pub fn args(&self, directory: &Path) -> Vec<OsString> {
        let mut argv: Vec<OsString> = match self {
            GrazerCommand::Run => vec![OsString::from("run")],
            GrazerCommand::SchemaMakeFullFactory => {
                vec![OsString::from("schema"), OsString::from("make-full-factory")]
            }
            GrazerCommand::SchemaInsertKey => {
                vec![OsString::from("schema"), OsString::from("insert-key")]
            }
        };
        argv.push(directory.as_os_str().to_os_string());
        argv
    }
}

impl std::fmt::Display for GrazerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.cli_name())
    }
}

// =============================================================================
// Invocation
// =============================================================================

/// One fully-specified grazer invocation: which executable, which
/// subcommand, which directory.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Resolved path of the grazer executable.
    pub program: PathBuf,

    /// Selected subcommand.
    pub command: GrazerCommand,

    /// The grazer directory argument.
    pub directory: PathBuf,
}

impl Invocation {
    pub fn new(program: PathBuf, command: GrazerCommand, directory: PathBuf) -> Self {
        Self {
            program,
            command,
            directory,
        }
    }

    /// The argv tail (everything after the program path).
    pub fn argv(&self) -> Vec<OsString> {
        self.command.args(&self.directory)
    }

    /// Shell-style rendering of the full command line for the console echo.
    pub fn display_line(&self) -> String {
        let mut line = shell_quote(&self.program.display().to_string());
        for arg in self.argv() {
            line.push(' ');
            line.push_str(&shell_quote(&arg.to_string_lossy()));
        }
        line
    }
}

/// Wraps a token in quotes when it contains whitespace, for display only.
fn shell_quote(token: &str) -> String {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        format!("\"{token}\"")
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv_strings(command: GrazerCommand, dir: &str) -> Vec<String> {
        command
            .args(Path::new(dir))
            .into_iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn run_argv_is_exactly_run_plus_directory() {
        assert_eq!(
            argv_strings(GrazerCommand::Run, "/data/sim01"),
            vec!["run", "/data/sim01"]
        );
    }

    #[test]
    fn make_full_factory_argv_matches_grazer_cli() {
        assert_eq!(
            argv_strings(GrazerCommand::SchemaMakeFullFactory, "/data/sim01"),
            vec!["schema", "make-full-factory", "/data/sim01"]
        );
    }

    #[test]
    fn insert_key_argv_matches_grazer_cli() {
        assert_eq!(
            argv_strings(GrazerCommand::SchemaInsertKey, "/data/sim01"),
            vec!["schema", "insert-key", "/data/sim01"]
        );
    }

    #[test]
    fn cli_names_roundtrip_through_parse() {
        for command in GrazerCommand::all() {
            assert_eq!(
                GrazerCommand::parse_cli_name(command.cli_name()),
                Some(*command)
            );
        }
    }

    #[test]
    fn parse_tolerates_surrounding_and_internal_whitespace() {
        assert_eq!(
            GrazerCommand::parse_cli_name("  schema   make-full-factory "),
            Some(GrazerCommand::SchemaMakeFullFactory)
        );
    }

    #[test]
    fn parse_rejects_unknown_subcommands() {
        assert_eq!(GrazerCommand::parse_cli_name("scheme insert-key"), None);
        assert_eq!(GrazerCommand::parse_cli_name(""), None);
    }

    #[test]
    fn display_line_quotes_paths_with_spaces() {
        let invocation = Invocation::new(
            PathBuf::from("/opt/grazer/grazer"),
            GrazerCommand::Run,
            PathBuf::from("/data/My Sims/sim01"),
        );
        assert_eq!(
            invocation.display_line(),
            "/opt/grazer/grazer run \"/data/My Sims/sim01\""
        );
    }
}
