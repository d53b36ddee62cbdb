// Grazer Launcher - bin/csv_from_log.rs
//
// Command-line filter: extracts the simulation CSV block from grazer's
// console output.
//
//   grazer run sims/paddock | csv-from-log > results.csv
//   csv-from-log output.log > results.csv
//
// Prints the text between the simulation markers to stdout. When the
// markers are missing the filter prints a diagnostic to stderr and exits
// non-zero with nothing on stdout, so a pipeline fails loudly instead of
// writing an empty results file.

use clap::Parser;
use grazer_launcher::core::extract;
use grazer_launcher::util::constants::MMAP_THRESHOLD_BYTES;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Extract the simulation CSV block from grazer output.
#[derive(Parser, Debug)]
#[command(name = "csv-from-log", version, about)]
struct Cli {
    /// Log file to read (stdin when omitted).
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let content = match read_input(cli.file.as_deref()) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("csv-from-log: {e}");
            return ExitCode::FAILURE;
        }
    };

    match extract::extract_csv_block(&content) {
        Ok(block) => {
            // Byte-for-byte: the interior already carries its own newlines.
            print!("{block}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("csv-from-log: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Read the whole input: a file when given, stdin otherwise.
///
/// Large files are memory-mapped rather than copied. Conversion is lossy;
/// the markers are plain ASCII, so stray invalid bytes elsewhere in the
/// output never break extraction.
fn read_input(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => {
            let metadata = std::fs::metadata(path)?;
            if metadata.len() >= MMAP_THRESHOLD_BYTES {
                let f = std::fs::File::open(path)?;
                // SAFETY: the file is opened read-only and the map is not
                // mutated. External modification during the map's lifetime
                // is the documented risk, acceptable for a finished log.
                let mmap = unsafe { memmap2::Mmap::map(&f)? };
                Ok(String::from_utf8_lossy(&mmap).into_owned())
            } else {
                let bytes = std::fs::read(path)?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
