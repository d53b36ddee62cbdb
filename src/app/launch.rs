// Grazer Launcher - app/launch.rs
//
// Launch lifecycle management. Runs one grazer invocation to completion on
// a background thread, sending progress messages to the UI thread via an
// mpsc channel.
//
// Architecture:
//   - `LaunchManager` lives on the UI thread; `run_launch` runs on a
//     background thread.
//   - There is no cancel flag: an invocation runs to completion exactly as
//     it would in a terminal, and the form stays locked until it does.
//   - Both child streams are drained concurrently (one reader thread per
//     stream) so neither pipe can fill up and deadlock the child.

use crate::core::command::Invocation;
use crate::core::extract;
use crate::core::model::{ConsoleLine, LaunchProgress, RunOutcome, RunStatus, StreamSource};
use crate::util::constants::{
    MAX_CAPTURE_BYTES, MAX_CONSOLE_LINE_LEN, MAX_LAUNCH_MESSAGES_PER_FRAME,
};
use crate::util::error::LaunchError;
use std::io::{self, BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::time::Instant;

// =============================================================================
// LaunchManager
// =============================================================================

/// Manages a grazer invocation on a background thread.
pub struct LaunchManager {
    /// Receiver the UI side drains once per frame.
    pub progress_rx: Option<mpsc::Receiver<LaunchProgress>>,
}

impl LaunchManager {
    pub fn new() -> Self {
        Self { progress_rx: None }
    }

    /// Start one grazer invocation.
    ///
    /// Spawns a background thread immediately; progress is sent over the
    /// channel. Callers must not start another launch until a `Completed`
    /// or `Failed` message has arrived; the UI enforces this by disabling
    /// the form while a run is active.
    pub fn start_launch(&mut self, invocation: Invocation) {
        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);

        tracing::info!(
            command = %invocation.command,
            directory = %invocation.directory.display(),
            program = %invocation.program.display(),
            "Launch started"
        );

        std::thread::spawn(move || run_launch(invocation, tx));
    }

    /// Poll for progress messages without blocking.
    ///
    /// Returns at most `MAX_LAUNCH_MESSAGES_PER_FRAME` messages so a child
    /// that blasts output cannot stall a UI frame; the rest stay queued
    /// for the next frame.
    pub fn poll_progress(&self) -> Vec<LaunchProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while messages.len() < MAX_LAUNCH_MESSAGES_PER_FRAME {
                match rx.try_recv() {
                    Ok(msg) => messages.push(msg),
                    Err(_) => break,
                }
            }
        }
        messages
    }
}

impl Default for LaunchManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background launch pipeline
// =============================================================================

/// Full launch pipeline: echo → spawn → stream → wait → extract.
///
/// Runs on a background thread. Sends `LaunchProgress` messages to `tx`.
fn run_launch(invocation: Invocation, tx: mpsc::Sender<LaunchProgress>) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped (UI closed); exit quietly.
            }
        };
    }

    // Echo the exact command line first so the console always shows what
    // was attempted, even when the spawn itself fails.
    send!(LaunchProgress::Started {
        program: invocation.program.clone(),
        display_line: invocation.display_line(),
    });

    let line_tx = tx.clone();
    let result = run_to_completion(&invocation, move |line| {
        // A failed send means the UI went away; nothing left to do.
        let _ = line_tx.send(LaunchProgress::Line(line));
    });

    match result {
        Ok(outcome) => send!(LaunchProgress::Completed { outcome }),
        Err(e) => {
            tracing::warn!(error = %e, "Launch failed");
            send!(LaunchProgress::Failed {
                error: e.to_string(),
            });
        }
    }
}

/// Run one grazer invocation to completion, blocking the calling thread.
///
/// `on_line` is called once per child output line, on the calling thread,
/// with UI-bounded text. The full (untruncated) stdout is accumulated for
/// post-run extraction, bounded by `MAX_CAPTURE_BYTES`.
///
/// Failure semantics are grazer's own: a non-zero exit is NOT an `Err`
/// here, it is an outcome with a failing `RunStatus`. `Err` means the
/// launcher itself could not start or supervise the child.
pub fn run_to_completion<F>(invocation: &Invocation, mut on_line: F) -> Result<RunOutcome, LaunchError>
where
    F: FnMut(ConsoleLine),
{
    let start = Instant::now();

    let mut child = Command::new(&invocation.program)
        .args(invocation.argv())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| LaunchError::SpawnFailed {
            program: invocation.program.clone(),
            source: e,
        })?;

    let stdout = match child.stdout.take() {
        Some(s) => s,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(LaunchError::StreamCapture {
                program: invocation.program.clone(),
                stream: "stdout",
            });
        }
    };
    let stderr = match child.stderr.take() {
        Some(s) => s,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(LaunchError::StreamCapture {
                program: invocation.program.clone(),
                stream: "stderr",
            });
        }
    };

    // One reader thread per stream, both feeding a single collector channel.
    // The for-loop below ends when both readers hit EOF and drop their
    // sender clones.
    let (line_tx, line_rx) = mpsc::channel::<(StreamSource, String)>();
    let stdout_tx = line_tx.clone();
    let stdout_reader =
        std::thread::spawn(move || forward_lines(stdout, StreamSource::Stdout, &stdout_tx));
    let stderr_reader =
        std::thread::spawn(move || forward_lines(stderr, StreamSource::Stderr, &line_tx));

    let mut captured = String::new();
    let mut capture_truncated = false;

    for (source, mut text) in line_rx {
        if source == StreamSource::Stdout {
            if captured.len() + text.len() < MAX_CAPTURE_BYTES {
                captured.push_str(&text);
                captured.push('\n');
            } else if !capture_truncated {
                capture_truncated = true;
                tracing::warn!(
                    cap_bytes = MAX_CAPTURE_BYTES,
                    "Stdout capture cap reached; retained output is truncated"
                );
            }
        }

        if text.len() > MAX_CONSOLE_LINE_LEN {
            let mut cut = MAX_CONSOLE_LINE_LEN;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
            text.push_str(" [line truncated]");
        }

        on_line(ConsoleLine { source, text });
    }

    let _ = stdout_reader.join();
    let _ = stderr_reader.join();

    let exit = child.wait().map_err(|e| LaunchError::Wait {
        program: invocation.program.clone(),
        source: e,
    })?;

    let duration = start.elapsed();
    let status = RunStatus::from_exit_status(exit);
    let csv_block = extract::extract_csv_block(&captured)
        .ok()
        .map(str::to_string);

    tracing::info!(
        status = %status,
        duration_ms = duration.as_millis() as u64,
        captured_bytes = captured.len(),
        has_csv_block = csv_block.is_some(),
        "Grazer run complete"
    );

    Ok(RunOutcome {
        status,
        duration,
        captured_stdout: captured,
        capture_truncated,
        csv_block,
    })
}

/// Forward a child stream to the collector channel, one line per message.
///
/// Lines are read as raw bytes and converted lossily so invalid UTF-8 in
/// child output never aborts the drain. Stops at EOF, on a read error, or
/// when the collector has gone away.
fn forward_lines<R: io::Read>(reader: R, source: StreamSource, tx: &mpsc::Sender<(StreamSource, String)>) {
    let mut buf_reader = BufReader::new(reader);
    let mut buf: Vec<u8> = Vec::new();

    loop {
        buf.clear();
        match buf_reader.read_until(b'\n', &mut buf) {
            Ok(0) => break, // EOF
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                let text = String::from_utf8_lossy(&buf).into_owned();
                if tx.send((source, text)).is_err() {
                    break; // Collector gone; stop reading.
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(
                    stream = source.short_label(),
                    error = %e,
                    "Child stream read failed"
                );
                break;
            }
        }
    }
}
