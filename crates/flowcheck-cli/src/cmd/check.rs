//! Implementation of `flowcheck check <FILE>`.
//!
//! Parses a pipeline JSON document, runs the dual-algorithm DAG check, and
//! prints the validation report to stdout.
//!
//! Exit codes:
//! - 0 = the pipeline is a DAG
//! - 1 = a cycle was detected (the report has still been printed)
//! - 2 = input failure (unreadable file or not a valid pipeline document)

use flowcheck_core::{ValidateError, parse_pipeline, validate_pipeline};

use crate::OutputFormat;
use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, write_report};

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `check` command.
///
/// Parses `content` as a pipeline document, validates it, and writes the
/// report to stdout in the requested format.
///
/// # Errors
///
/// - [`CliError::ParseFailed`] — content is not a valid pipeline document.
/// - [`CliError::CycleDetected`] — the pipeline is not a DAG. The report
///   has already been printed when this is returned.
/// - [`CliError::IoError`] — stdout could not be written.
pub fn run(
    content: &str,
    format: &OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
) -> Result<(), CliError> {
    let pipeline = parse_pipeline(content).map_err(|e| CliError::ParseFailed {
        detail: e.message,
    })?;

    let report = validate_pipeline(&pipeline).map_err(|e| match e {
        ValidateError::Cancelled => CliError::ValidationAborted {
            detail: e.to_string(),
        },
    })?;

    let mode = match format {
        OutputFormat::Human => FormatMode::Human,
        OutputFormat::Json => FormatMode::Json,
    };
    let fmt_config = FormatterConfig::from_flags(no_color, quiet, verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, mode, &fmt_config).map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;

    if report.is_cyclic() {
        Err(CliError::CycleDetected)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;

    const LINEAR: &str = r#"{
        "nodes": [
            {"id": "a", "type": "customInput"},
            {"id": "b", "type": "customOutput"}
        ],
        "edges": [
            {"id": "e1", "source": "a", "target": "b"}
        ]
    }"#;

    const CYCLIC: &str = r#"{
        "nodes": [{"id": "a"}, {"id": "b"}],
        "edges": [
            {"id": "e1", "source": "a", "target": "b"},
            {"id": "e2", "source": "b", "target": "a"}
        ]
    }"#;

    #[test]
    fn acyclic_document_succeeds() {
        let result = run(LINEAR, &OutputFormat::Json, false, false, true);
        assert!(result.is_ok());
    }

    #[test]
    fn cyclic_document_returns_cycle_detected() {
        let err = run(CYCLIC, &OutputFormat::Json, false, false, true)
            .expect_err("cyclic input must fail");
        assert!(matches!(err, CliError::CycleDetected), "{err:?}");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn malformed_document_returns_parse_failed() {
        let err = run(r#"{"nodes": []}"#, &OutputFormat::Json, false, false, true)
            .expect_err("malformed input must fail");
        match err {
            CliError::ParseFailed { detail } => {
                assert!(detail.contains("line"), "detail: {detail}");
            }
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }
}
