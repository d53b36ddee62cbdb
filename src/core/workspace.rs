// Grazer Launcher - core/workspace.rs
//
// Read-only inspection of a grazer directory: which of the known
// subdirectories (problem/, schemas/, output/) exist and what they hold.
//
// The report is informational only. It never gates a launch; grazer itself
// decides whether a directory is usable and reports its own errors.

use crate::core::model::{DirListing, SchemaStatus, WorkspaceFile, WorkspaceReport};
use crate::util::constants::{
    MAX_WORKSPACE_WARNINGS, OUTPUT_DIR_NAME, PROBLEM_DIR_NAME, SCHEMAS_DIR_NAME, SCHEMA_TYPES,
    WORKSPACE_MAX_DEPTH, WORKSPACE_MAX_FILES,
};
use crate::util::error::WorkspaceError;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Inspect `root` and report what it contains.
///
/// # Non-fatal errors
/// Entries that cannot be read (permissions, vanished files) are recorded
/// as human-readable warnings in the report, bounded by
/// `MAX_WORKSPACE_WARNINGS`; they never fail the inspection.
///
/// # Fatal errors
/// Returns `Err` only if `root` itself does not exist or is not a
/// directory.
pub fn inspect(root: &Path) -> Result<WorkspaceReport, WorkspaceError> {
    let metadata = std::fs::metadata(root).map_err(|_| WorkspaceError::RootNotFound {
        path: root.to_path_buf(),
    })?;
    if !metadata.is_dir() {
        return Err(WorkspaceError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut warnings: Vec<String> = Vec::new();

    let problem = list_dir(&root.join(PROBLEM_DIR_NAME), &mut warnings);
    let schemas = list_dir(&root.join(SCHEMAS_DIR_NAME), &mut warnings);
    let output = list_dir(&root.join(OUTPUT_DIR_NAME), &mut warnings);

    let schema_status = SCHEMA_TYPES
        .iter()
        .map(|ty| SchemaStatus {
            schema_type: ty,
            schema_file: root
                .join(SCHEMAS_DIR_NAME)
                .join(format!("{ty}_schema.json"))
                .is_file(),
            data_file: root
                .join(PROBLEM_DIR_NAME)
                .join(format!("{ty}.json"))
                .is_file(),
        })
        .collect();

    tracing::debug!(
        root = %root.display(),
        problem_files = problem.files.len(),
        schema_files = schemas.files.len(),
        output_files = output.files.len(),
        warnings = warnings.len(),
        "Workspace inspected"
    );

    Ok(WorkspaceReport {
        root: root.to_path_buf(),
        problem,
        schemas,
        output,
        schema_status,
        warnings,
    })
}

/// Lists the files below one known subdirectory, sorted by name, bounded
/// by `WORKSPACE_MAX_FILES`.
fn list_dir(dir: &Path, warnings: &mut Vec<String>) -> DirListing {
    if !dir.is_dir() {
        return DirListing::default();
    }

    let mut files: Vec<WorkspaceFile> = Vec::new();
    let mut truncated = false;

    for entry_result in walkdir::WalkDir::new(dir)
        .max_depth(WORKSPACE_MAX_DEPTH)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                push_warning(warnings, format!("Cannot access '{path_str}': {e}"));
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        if files.len() >= WORKSPACE_MAX_FILES {
            truncated = true;
            break;
        }

        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                push_warning(
                    warnings,
                    format!("Cannot read metadata for '{}': {e}", path.display()),
                );
                continue;
            }
        };

        files.push(WorkspaceFile {
            path: path.to_path_buf(),
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        });
    }

    DirListing {
        present: true,
        files,
        truncated,
    }
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    if warnings.len() < MAX_WORKSPACE_WARNINGS {
        tracing::debug!(warning = %message, "Workspace warning");
        warnings.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_grazer_tree() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        let problem = root.join("problem");
        fs::create_dir(&problem).expect("mkdir problem");
        fs::write(problem.join("problem_data.json"), "{}").expect("write problem_data");
        fs::write(problem.join("initial.json"), "{}").expect("write initial");

        let schemas = root.join("schemas");
        fs::create_dir(&schemas).expect("mkdir schemas");
        fs::write(schemas.join("topology_schema.json"), "{}").expect("write topology schema");
        fs::write(schemas.join("initial_schema.json"), "{}").expect("write initial schema");

        // No output/ until grazer has run.
        dir
    }

    #[test]
    fn reports_known_subdirectories() {
        let dir = make_grazer_tree();
        let report = inspect(dir.path()).unwrap();

        assert!(report.problem.present);
        assert_eq!(report.problem.files.len(), 2);
        assert!(report.schemas.present);
        assert_eq!(report.schemas.files.len(), 2);
        assert!(!report.output.present);
        assert!(report.output.files.is_empty());
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn listing_is_sorted_and_carries_metadata() {
        let dir = make_grazer_tree();
        let report = inspect(dir.path()).unwrap();

        let names: Vec<String> = report.problem.files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["initial.json", "problem_data.json"]);
        assert_eq!(report.problem.files[0].size, 2);
        assert!(report.problem.files[0].modified.is_some());
    }

    #[test]
    fn schema_status_pairs_schema_and_data_files() {
        let dir = make_grazer_tree();
        let report = inspect(dir.path()).unwrap();

        let initial = report
            .schema_status
            .iter()
            .find(|s| s.schema_type == "initial")
            .unwrap();
        assert!(initial.schema_file);
        assert!(initial.data_file);

        let boundary = report
            .schema_status
            .iter()
            .find(|s| s.schema_type == "boundary")
            .unwrap();
        assert!(!boundary.schema_file);
        assert!(!boundary.data_file);

        let listed: Vec<&str> = report
            .schema_status
            .iter()
            .map(|s| s.schema_type)
            .collect();
        assert_eq!(listed, SCHEMA_TYPES);
    }

    #[test]
    fn output_listing_truncates_at_file_cap() {
        let dir = make_grazer_tree();
        let output = dir.path().join("output");
        fs::create_dir(&output).unwrap();
        for i in 0..(WORKSPACE_MAX_FILES + 10) {
            fs::write(output.join(format!("states_{i:04}.json")), "{}").unwrap();
        }

        let report = inspect(dir.path()).unwrap();
        assert_eq!(report.output.files.len(), WORKSPACE_MAX_FILES);
        assert!(report.output.truncated);
    }

    #[test]
    fn missing_root_is_an_error() {
        let result = inspect(Path::new("/nonexistent/grazer/dir"));
        assert!(matches!(result, Err(WorkspaceError::RootNotFound { .. })));
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir.json");
        fs::write(&file, "{}").unwrap();
        let result = inspect(&file);
        assert!(matches!(result, Err(WorkspaceError::NotADirectory { .. })));
    }
}
