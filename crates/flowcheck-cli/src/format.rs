//! Report formatting: human-readable and JSON modes.
//!
//! Two output strategies for [`flowcheck_core::ValidationReport`]:
//!
//! - **Human mode** (default): a verdict line color-coded by outcome, a
//!   diagnostic count line, and one indented line per piece of cycle
//!   evidence. Colors are disabled when `--no-color` is set, the `NO_COLOR`
//!   environment variable is present (per <https://no-color.org>), or
//!   stdout is not a TTY.
//! - **JSON mode**: the full report serialized as a single JSON object.
//!
//! Human mode supports a **quiet** flag (verdict and evidence only) and a
//! **verbose** flag (also list every excluded edge).

use std::io::{IsTerminal as _, Write};

use flowcheck_core::ValidationReport;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stdout.
///
/// Color is off when the `--no-color` flag was passed, when the `NO_COLOR`
/// environment variable is set at all, or when stdout is not a TTY (output
/// piped to a file or another process).
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

// ---------------------------------------------------------------------------
// ANSI escape sequences
// ---------------------------------------------------------------------------

const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the report formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress the diagnostic count lines.
    pub quiet: bool,
    /// Also list every excluded edge.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Builds a [`FormatterConfig`] from the raw CLI flags, resolving the
    /// effective color setting via [`colors_enabled`].
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

/// Output mode for [`write_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Human-readable, optionally colored output.
    Human,
    /// Single-object JSON output.
    Json,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Writes a [`ValidationReport`] to `writer` in the requested format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &ValidationReport,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => write_report_human(writer, report, config),
        FormatMode::Json => write_report_json(writer, report),
    }
}

// ---------------------------------------------------------------------------
// Human-mode formatting
// ---------------------------------------------------------------------------

/// Writes the human-readable rendering of `report`.
///
/// Layout:
///
/// ```text
/// cycle detected
///   3 nodes, 3 edges (3 valid, 0 invalid)
///   - Kahn's algorithm detected cycle involving: A, B, C
///   - DFS detected cycle path: A -> B -> C -> A
/// ```
fn write_report_human<W: Write>(
    writer: &mut W,
    report: &ValidationReport,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    let (verdict, color) = if report.is_acyclic {
        ("pipeline is a DAG", ANSI_GREEN)
    } else {
        ("cycle detected", ANSI_RED)
    };

    if config.colors {
        writeln!(writer, "{color}{verdict}{ANSI_RESET}")?;
    } else {
        writeln!(writer, "{verdict}")?;
    }

    if !config.quiet {
        writeln!(
            writer,
            "  {} nodes, {} edges ({} valid, {} invalid)",
            report.node_count,
            report.edge_count,
            report.valid_edge_count,
            report.invalid_edge_count
        )?;
    }

    for line in &report.cycle_evidence {
        writeln!(writer, "  - {line}")?;
    }

    if config.verbose {
        for excluded in &report.invalid_edges {
            writeln!(writer, "  excluded edge: {excluded}")?;
        }
    }

    if report.mismatch_detected {
        let warning = "warning: analyzers disagreed; conservative cyclic verdict applied";
        if config.colors {
            writeln!(writer, "  {ANSI_YELLOW}{warning}{ANSI_RESET}")?;
        } else {
            writeln!(writer, "  {warning}")?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// JSON formatting
// ---------------------------------------------------------------------------

/// Writes `report` as a single JSON object followed by a newline.
fn write_report_json<W: Write>(writer: &mut W, report: &ValidationReport) -> std::io::Result<()> {
    let json = serde_json::to_string(report).map_err(std::io::Error::other)?;
    writeln!(writer, "{json}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use flowcheck_core::{parse_pipeline, validate_pipeline};

    use super::*;

    fn no_color_config(quiet: bool, verbose: bool) -> FormatterConfig {
        FormatterConfig {
            colors: false,
            quiet,
            verbose,
        }
    }

    fn cyclic_report() -> ValidationReport {
        let p = parse_pipeline(flowcheck_core::fixture::KNOWN_CYCLE_JSON).expect("fixture parses");
        validate_pipeline(&p).expect("validates")
    }

    fn render(report: &ValidationReport, mode: FormatMode, config: &FormatterConfig) -> String {
        let mut buf: Vec<u8> = Vec::new();
        write_report(&mut buf, report, mode, config).expect("write to Vec cannot fail");
        String::from_utf8(buf).expect("output is UTF-8")
    }

    #[test]
    fn human_output_names_the_verdict_and_counts() {
        let out = render(&cyclic_report(), FormatMode::Human, &no_color_config(false, false));
        assert!(out.starts_with("cycle detected\n"), "output: {out}");
        assert!(out.contains("3 nodes, 3 edges"), "output: {out}");
        assert!(out.contains("DFS detected cycle path:"), "output: {out}");
    }

    #[test]
    fn quiet_mode_drops_the_count_line_but_keeps_evidence() {
        let out = render(&cyclic_report(), FormatMode::Human, &no_color_config(true, false));
        assert!(!out.contains("3 nodes"), "output: {out}");
        assert!(out.contains("Kahn's algorithm"), "output: {out}");
    }

    #[test]
    fn no_color_output_has_no_escape_codes() {
        let out = render(&cyclic_report(), FormatMode::Human, &no_color_config(false, true));
        assert!(!out.contains('\x1b'), "output: {out:?}");
    }

    #[test]
    fn json_output_is_one_parseable_object() {
        let out = render(&cyclic_report(), FormatMode::Json, &no_color_config(false, false));
        assert_eq!(out.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(value["is_acyclic"], false);
        assert_eq!(value["node_count"], 3);
    }

    #[test]
    fn verbose_mode_lists_excluded_edges() {
        let p = parse_pipeline(
            r#"{"nodes": [{"id": "a"}], "edges": [{"id": "e1", "source": "a", "target": "ghost"}]}"#,
        )
        .expect("parses");
        let report = validate_pipeline(&p).expect("validates");
        let out = render(&report, FormatMode::Human, &no_color_config(false, true));
        assert!(out.contains("excluded edge: a -> ghost"), "output: {out}");
    }
}
