//! Implementation of `flowcheck selftest`.
//!
//! Feeds the built-in known-cycle fixture (`A → B → C → A`) through the
//! full parse → build → analyze path and verifies the cycle is caught.
//! This is the deployment smoke test; it exercises exactly what a real
//! `check` invocation would.
//!
//! Exit codes:
//! - 0 = the fixture was flagged as cyclic (detection works)
//! - 1 = the fixture escaped detection

use std::io::Write as _;

use flowcheck_core::{ValidateError, fixture, parse_pipeline, validate_pipeline};

use crate::OutputFormat;
use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, write_report};

/// Runs the `selftest` command.
///
/// # Errors
///
/// - [`CliError::ParseFailed`] — the embedded fixture failed to parse
///   (indicates a build defect, not bad user input).
/// - [`CliError::SelfTestFailed`] — the known cycle was not detected.
pub fn run(format: &OutputFormat, no_color: bool) -> Result<(), CliError> {
    let pipeline = parse_pipeline(fixture::KNOWN_CYCLE_JSON).map_err(|e| {
        CliError::ParseFailed { detail: e.message }
    })?;

    let report = validate_pipeline(&pipeline).map_err(|e| match e {
        ValidateError::Cancelled => CliError::ValidationAborted {
            detail: e.to_string(),
        },
    })?;

    let passed = report.is_cyclic();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => {
            let fmt_config = FormatterConfig::from_flags(no_color, false, false);
            writeln!(out, "self-test fixture: A -> B -> C -> A").map_err(io_err)?;
            write_report(&mut out, &report, FormatMode::Human, &fmt_config).map_err(io_err)?;
            let outcome = if passed {
                "self-test passed"
            } else {
                "self-test FAILED"
            };
            writeln!(out, "{outcome}").map_err(io_err)?;
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "test_description": "Known cycle: A -> B -> C -> A",
                "test_passed": passed,
                "report": report,
            });
            writeln!(out, "{value}").map_err(io_err)?;
        }
    }

    if passed {
        Ok(())
    } else {
        Err(CliError::SelfTestFailed)
    }
}

fn io_err(e: std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn selftest_passes_in_json_mode() {
        assert!(run(&OutputFormat::Json, true).is_ok());
    }

    #[test]
    fn selftest_passes_in_human_mode() {
        assert!(run(&OutputFormat::Human, true).is_ok());
    }
}
