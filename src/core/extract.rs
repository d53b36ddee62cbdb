// Grazer Launcher - core/extract.rs
//
// Extraction of the simulation CSV block from grazer log output.
// Core layer: pure text in, text out. The marker pair is fixed; this
// module serves exactly one grazer output format and nothing else.

use crate::core::model::CsvTable;
use crate::util::constants::{SIM_END_MARKER, SIM_START_MARKER};
use crate::util::error::ExtractError;
use regex::Regex;
use std::sync::OnceLock;

/// Returns the text between the simulation markers, exactly as printed.
///
/// `(?s)` lets `.` cross newlines so the whole CSV table is captured in a
/// single match. The first marker pair wins; grazer prints the pair once
/// per run. No match is an error carrying the input size for diagnostics.
pub fn extract_csv_block(input: &str) -> Result<&str, ExtractError> {
    static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    let re = BLOCK_RE.get_or_init(|| {
        // Static pattern built from escaped literals.
        let pattern = format!(
            "(?s){}(.*?){}",
            regex::escape(SIM_START_MARKER),
            regex::escape(SIM_END_MARKER)
        );
        Regex::new(&pattern).expect("extract_csv_block: invalid regex")
    });

    match re.captures(input) {
        Some(caps) => Ok(caps.get(1).map(|m| m.as_str()).unwrap_or("")),
        None => Err(ExtractError::MarkersNotFound {
            input_bytes: input.len(),
        }),
    }
}

/// Parses an extracted block into a header row plus data rows for the
/// results table. Only the GUI goes through this; the filter binary
/// prints the raw block untouched.
pub fn parse_csv_block(block: &str) -> Result<CsvTable, ExtractError> {
    let trimmed = block.trim();
    if trimmed.is_empty() {
        return Ok(CsvTable::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(trimmed.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ExtractError::CsvParse { source: e })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ExtractError::CsvParse { source: e })?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_interior_between_markers() {
        let log = "preamble\n=== simulation start ===t,p\n0,1.5\n=== simulation end ===\ntrailer";
        let block = extract_csv_block(log).unwrap();
        assert_eq!(block, "t,p\n0,1.5\n");
    }

    #[test]
    fn capture_crosses_newlines() {
        let log = format!(
            "{}\nt,p,q\n0,1.0,2.0\n1,1.1,2.1\n2,1.2,2.2\n{}",
            SIM_START_MARKER, SIM_END_MARKER
        );
        let block = extract_csv_block(&log).unwrap();
        assert_eq!(block, "\nt,p,q\n0,1.0,2.0\n1,1.1,2.1\n2,1.2,2.2\n");
    }

    #[test]
    fn interior_is_returned_verbatim_without_trimming() {
        let log = format!("{}  padded  {}", SIM_START_MARKER, SIM_END_MARKER);
        assert_eq!(extract_csv_block(&log).unwrap(), "  padded  ");
    }

    #[test]
    fn empty_interior_is_a_match() {
        let log = format!("{}{}", SIM_START_MARKER, SIM_END_MARKER);
        assert_eq!(extract_csv_block(&log).unwrap(), "");
    }

    #[test]
    fn missing_both_markers_is_an_error() {
        let err = extract_csv_block("no markers in here").unwrap_err();
        match err {
            ExtractError::MarkersNotFound { input_bytes } => {
                assert_eq!(input_bytes, "no markers in here".len());
            }
            other => panic!("expected MarkersNotFound, got {other:?}"),
        }
    }

    #[test]
    fn start_marker_alone_is_an_error() {
        let log = format!("{}\nt,p\n0,1.5\n", SIM_START_MARKER);
        assert!(matches!(
            extract_csv_block(&log),
            Err(ExtractError::MarkersNotFound { .. })
        ));
    }

    #[test]
    fn end_marker_before_start_marker_is_an_error() {
        let log = format!("{}\nt,p\n{}", SIM_END_MARKER, SIM_START_MARKER);
        assert!(matches!(
            extract_csv_block(&log),
            Err(ExtractError::MarkersNotFound { .. })
        ));
    }

    #[test]
    fn parse_splits_headers_and_rows() {
        let table = parse_csv_block("\nt,pressure,flow\n0,1.5,0.2\n1,1.6,0.3\n").unwrap();
        assert_eq!(table.headers, vec!["t", "pressure", "flow"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["0", "1.5", "0.2"]);
        assert_eq!(table.rows[1], vec!["1", "1.6", "0.3"]);
    }

    #[test]
    fn parse_of_empty_block_yields_empty_table() {
        let table = parse_csv_block("   \n  ").unwrap();
        assert!(table.is_empty());
    }
}
