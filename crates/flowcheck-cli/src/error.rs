//! CLI error types with associated exit codes.
//!
//! [`CliError`] is the top-level error type for the `flowcheck` binary.
//! Every variant maps to a stable exit code via [`CliError::exit_code`]:
//!
//! - Exit code **2** — input failure: the tool could not read or parse the
//!   input at all. These errors terminate early before any graph analysis.
//! - Exit code **1** — logical failure: the tool ran to completion and the
//!   result is a well-defined negative (a cycle was found, the self-test
//!   fixture escaped detection, the engine was cancelled).

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions the `flowcheck` binary can exit with.
///
/// [`CliError::exit_code`] gives the process exit code for each variant and
/// [`CliError::message`] the string `main` prints to stderr first.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument does not exist.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A file argument exists but cannot be read by this process.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the `--max-file-size` limit.
    FileTooLarge {
        /// Label for the source: the filesystem path, or `"-"` for stdin.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes. Known for disk files; `None` for stdin,
        /// where reading stops at the cap.
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Label for the source.
        source: String,
        /// Byte offset of the first invalid sequence.
        byte_offset: usize,
    },

    /// Reading from stdin failed.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// Any other I/O failure while reading input.
    IoError {
        /// Label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input is not a valid pipeline document.
    ParseFailed {
        /// The parse failure detail, including line/column.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The pipeline contains at least one cycle.
    ///
    /// The report has already been printed; this variant exists so `main`
    /// can exit with code 1 cleanly.
    CycleDetected,

    /// The engine abandoned the run because its cancellation flag was set.
    ValidationAborted {
        /// The engine's description of the abort.
        detail: String,
    },

    /// The built-in known-cycle fixture was not flagged as cyclic.
    SelfTestFailed,
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2` — input failure (file not found, parse error, etc.).
    /// - `1` — logical failure (cycle detected, self-test failed, etc.).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. } => 2,

            Self::CycleDetected | Self::ValidationAborted { .. } | Self::SelfTestFailed => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::ParseFailed { detail } => {
                format!("error: not a valid pipeline document: {detail}")
            }
            Self::CycleDetected => "error: pipeline contains a cycle".to_owned(),
            Self::ValidationAborted { detail } => {
                format!("error: validation aborted: {detail}")
            }
            Self::SelfTestFailed => {
                "error: self-test failed: the known-cycle fixture was not detected".to_owned()
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
