// Grazer Launcher - tests/e2e_launch.rs
//
// End-to-end tests for the launch pipeline against real child processes.
//
// The stand-in grazer executables are POSIX shell scripts written into a
// tempdir, so these tests are Unix-only; the pipeline under test is
// platform-independent, the harness is not. Each script accepts the real
// grazer argv (`run <DIR>`, `schema ... <DIR>`) and produces exactly the
// output and exit status the test needs.

#![cfg(unix)]

use grazer_launcher::app::launch::{run_to_completion, LaunchManager};
use grazer_launcher::core::command::{GrazerCommand, Invocation};
use grazer_launcher::core::model::{ConsoleLine, LaunchProgress, RunStatus, StreamSource};
use grazer_launcher::util::error::LaunchError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Write an executable shell script into `dir` and return its path.
fn fake_grazer(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("grazer");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Run an invocation and collect every console line it produces.
fn run_collecting(
    invocation: &Invocation,
) -> (
    Result<grazer_launcher::core::model::RunOutcome, LaunchError>,
    Vec<ConsoleLine>,
) {
    let mut lines = Vec::new();
    let result = run_to_completion(invocation, |line| lines.push(line));
    (result, lines)
}

fn texts(lines: &[ConsoleLine], source: StreamSource) -> Vec<String> {
    lines
        .iter()
        .filter(|l| l.source == source)
        .map(|l| l.text.clone())
        .collect()
}

// =============================================================================
// Success path
// =============================================================================

/// A run that prints the simulation markers yields a CSV block, collected
/// stdout lines, and a success status.
#[test]
fn successful_run_collects_output_and_csv_block() {
    let dir = TempDir::new().unwrap();
    let program = fake_grazer(
        dir.path(),
        r#"echo 'grazer 2.4 loading problem'
echo '=== simulation start ==='
echo 'date,cover'
echo '2024-07-01,1500'
echo '=== simulation end ==='
echo 'run complete'"#,
    );

    let invocation = Invocation::new(program, GrazerCommand::Run, dir.path().to_path_buf());
    let (result, lines) = run_collecting(&invocation);
    let outcome = result.expect("launch should succeed");

    assert_eq!(outcome.status, RunStatus::Success);
    assert!(outcome.status.is_success());
    assert!(!outcome.capture_truncated);
    assert_eq!(
        outcome.csv_block.as_deref(),
        Some("\ndate,cover\n2024-07-01,1500\n")
    );

    let stdout_lines = texts(&lines, StreamSource::Stdout);
    assert_eq!(stdout_lines.first().unwrap(), "grazer 2.4 loading problem");
    assert_eq!(stdout_lines.last().unwrap(), "run complete");
    assert_eq!(stdout_lines.len(), 6);
}

/// Output with no markers is still a successful run, just with no CSV
/// block. Schema subcommands always land here.
#[test]
fn run_without_markers_has_no_csv_block() {
    let dir = TempDir::new().unwrap();
    let program = fake_grazer(
        dir.path(),
        "echo 'wrote schemas/boundary_schema.json'\necho 'wrote schemas/control_schema.json'",
    );

    let invocation = Invocation::new(
        program,
        GrazerCommand::SchemaMakeFullFactory,
        dir.path().to_path_buf(),
    );
    let (result, lines) = run_collecting(&invocation);
    let outcome = result.expect("launch should succeed");

    assert_eq!(outcome.status, RunStatus::Success);
    assert_eq!(outcome.csv_block, None);
    assert_eq!(texts(&lines, StreamSource::Stdout).len(), 2);
}

/// The child receives exactly the grazer CLI: subcommand words, then the
/// directory, nothing else.
#[test]
fn child_receives_exact_grazer_argv() {
    let dir = TempDir::new().unwrap();
    let program = fake_grazer(dir.path(), r#"echo "$@""#);

    for (command, expected_words) in [
        (GrazerCommand::Run, "run"),
        (GrazerCommand::SchemaMakeFullFactory, "schema make-full-factory"),
        (GrazerCommand::SchemaInsertKey, "schema insert-key"),
    ] {
        let invocation = Invocation::new(program.clone(), command, dir.path().to_path_buf());
        let (result, lines) = run_collecting(&invocation);
        result.expect("launch should succeed");

        let echoed = texts(&lines, StreamSource::Stdout);
        assert_eq!(
            echoed,
            vec![format!("{expected_words} {}", dir.path().display())],
            "argv mismatch for {command}"
        );
    }
}

// =============================================================================
// Failure semantics (grazer's failures are outcomes, not errors)
// =============================================================================

/// A non-zero child exit is an outcome with a failing status, never an
/// `Err`. Diagnosing the failure is grazer's job, not the launcher's.
#[test]
fn nonzero_exit_is_an_outcome_not_an_error() {
    let dir = TempDir::new().unwrap();
    let program = fake_grazer(
        dir.path(),
        "echo 'error: problem folder missing' >&2\nexit 3",
    );

    let invocation = Invocation::new(program, GrazerCommand::Run, dir.path().to_path_buf());
    let (result, lines) = run_collecting(&invocation);
    let outcome = result.expect("a failing child is still a completed launch");

    assert_eq!(outcome.status, RunStatus::ExitCode(3));
    assert!(!outcome.status.is_success());
    assert_eq!(outcome.csv_block, None);
    assert_eq!(
        texts(&lines, StreamSource::Stderr),
        vec!["error: problem folder missing"]
    );
}

/// A child killed by a signal reports `Terminated`, not an exit code.
#[test]
fn signal_death_reports_terminated() {
    let dir = TempDir::new().unwrap();
    let program = fake_grazer(dir.path(), "kill -TERM $$");

    let invocation = Invocation::new(program, GrazerCommand::Run, dir.path().to_path_buf());
    let (result, _) = run_collecting(&invocation);
    let outcome = result.expect("signal death is still a completed launch");

    assert_eq!(outcome.status, RunStatus::Terminated);
    assert_eq!(outcome.status.to_string(), "terminated by signal");
}

/// A missing executable is the launcher's own failure: `Err`, not an
/// outcome.
#[test]
fn spawn_failure_is_a_launch_error() {
    let dir = TempDir::new().unwrap();
    let absent = dir.path().join("no-such-grazer");

    let invocation = Invocation::new(absent, GrazerCommand::Run, dir.path().to_path_buf());
    let (result, lines) = run_collecting(&invocation);

    assert!(matches!(result, Err(LaunchError::SpawnFailed { .. })));
    assert!(lines.is_empty(), "no output lines without a child");
}

// =============================================================================
// Stream handling
// =============================================================================

/// Both streams are drained; each keeps its own ordering.
#[test]
fn both_streams_are_drained_in_order() {
    let dir = TempDir::new().unwrap();
    let program = fake_grazer(
        dir.path(),
        "echo out1\necho err1 >&2\necho out2\necho err2 >&2",
    );

    let invocation = Invocation::new(program, GrazerCommand::Run, dir.path().to_path_buf());
    let (result, lines) = run_collecting(&invocation);
    result.expect("launch should succeed");

    assert_eq!(texts(&lines, StreamSource::Stdout), vec!["out1", "out2"]);
    assert_eq!(texts(&lines, StreamSource::Stderr), vec!["err1", "err2"]);
}

/// CRLF line endings from the child are stripped before display.
#[test]
fn crlf_output_is_normalised() {
    let dir = TempDir::new().unwrap();
    let program = fake_grazer(dir.path(), r"printf 'line one\r\nline two\r\n'");

    let invocation = Invocation::new(program, GrazerCommand::Run, dir.path().to_path_buf());
    let (result, lines) = run_collecting(&invocation);
    result.expect("launch should succeed");

    assert_eq!(
        texts(&lines, StreamSource::Stdout),
        vec!["line one", "line two"]
    );
}

// =============================================================================
// LaunchManager channel plumbing
// =============================================================================

/// The manager delivers Started, then lines, then Completed, across
/// however many polls it takes.
#[test]
fn manager_delivers_started_lines_completed() {
    let dir = TempDir::new().unwrap();
    let program = fake_grazer(
        dir.path(),
        "echo '=== simulation start ==='\necho 'a,b'\necho '=== simulation end ==='",
    );

    let mut manager = LaunchManager::new();
    manager.start_launch(Invocation::new(
        program,
        GrazerCommand::Run,
        dir.path().to_path_buf(),
    ));

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut messages = Vec::new();
    let mut completed = false;
    while !completed && Instant::now() < deadline {
        for msg in manager.poll_progress() {
            if matches!(msg, LaunchProgress::Completed { .. }) {
                completed = true;
            }
            messages.push(msg);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(completed, "launch did not complete within the deadline");

    assert!(
        matches!(&messages[0], LaunchProgress::Started { display_line, .. }
            if display_line.contains("run")),
        "first message must be the command echo"
    );
    let line_count = messages
        .iter()
        .filter(|m| matches!(m, LaunchProgress::Line(_)))
        .count();
    assert_eq!(line_count, 3);

    match messages.last().unwrap() {
        LaunchProgress::Completed { outcome } => {
            assert_eq!(outcome.status, RunStatus::Success);
            assert_eq!(outcome.csv_block.as_deref(), Some("\na,b\n"));
        }
        other => panic!("expected Completed last, got {other:?}"),
    }
}

/// A spawn failure surfaces as a Failed message on the channel.
#[test]
fn manager_reports_spawn_failure() {
    let dir = TempDir::new().unwrap();
    let absent = dir.path().join("no-such-grazer");

    let mut manager = LaunchManager::new();
    manager.start_launch(Invocation::new(
        absent,
        GrazerCommand::Run,
        dir.path().to_path_buf(),
    ));

    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        assert!(Instant::now() < deadline, "no Failed message arrived");
        let mut failed = false;
        for msg in manager.poll_progress() {
            match msg {
                LaunchProgress::Started { .. } => {}
                LaunchProgress::Failed { error } => {
                    assert!(error.contains("no-such-grazer"));
                    failed = true;
                }
                other => panic!("unexpected message: {other:?}"),
            }
        }
        if failed {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}
