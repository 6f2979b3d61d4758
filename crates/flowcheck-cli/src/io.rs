//! Input reading for the `flowcheck` binary.
//!
//! Everything that touches the filesystem or stdin lives here;
//! `flowcheck-core` only ever sees an already-read string. Disk files have
//! their length checked against the size limit before any bytes are read,
//! stdin is capped with `Read::take`, and non-UTF-8 input is rejected with
//! the byte offset of the first bad sequence. Every failure maps to a
//! [`CliError`] variant carrying exit code 2.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use crate::PathOrStdin;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads the entire contents of `source` into a `String`.
///
/// Disk files are length-checked via `std::fs::metadata` before any bytes
/// are read; stdin is read through a `Read::take` cap so the allocation is
/// bounded either way.
///
/// # Errors
///
/// Returns a [`CliError`] with exit code 2 when the source is missing or
/// unreadable, exceeds `max_size`, or is not valid UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

/// Reads a disk file, enforcing the size limit and UTF-8 requirement.
fn read_file(path: &PathBuf, max_size: u64) -> Result<String, CliError> {
    // Metadata first: nothing is allocated until the input is known to fit.
    let file_size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => return Err(io_error_to_cli(&e, path)),
    };

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => return Err(io_error_to_cli(&e, path)),
    };

    bytes_to_string(&bytes, &path.display().to_string())
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    if e.kind() == std::io::ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if e.kind() == std::io::ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads the entire stdin stream, capped at `max_size` bytes.
///
/// The lock is wrapped in `Read::take` so the buffer never grows past the
/// cap. Reading exactly `max_size` bytes is ambiguous (at the limit, or over
/// it?), so a one-byte probe is read past the cap through the same lock.
/// `Stdin`'s mutex is not reentrant; taking a second lock here would
/// deadlock.
fn read_stdin(max_size: u64) -> Result<String, CliError> {
    let stdin = std::io::stdin();
    let mut limited = stdin.lock().take(max_size);
    let mut buf: Vec<u8> = Vec::new();

    limited
        .read_to_end(&mut buf)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;

    if buf.len() as u64 == max_size {
        let mut probe = [0u8; 1];
        let extra = limited
            .get_mut()
            .read(&mut probe)
            .map_err(|e| CliError::StdinReadError {
                detail: e.to_string(),
            })?;
        if extra > 0 {
            return Err(CliError::FileTooLarge {
                source: "-".to_owned(),
                limit: max_size,
                actual: None,
            });
        }
    }

    bytes_to_string(&buf, "-")
}

// ---------------------------------------------------------------------------
// UTF-8 conversion
// ---------------------------------------------------------------------------

/// Converts a byte buffer to a `String`, returning a [`CliError`] with the
/// byte offset of the first invalid sequence on failure.
fn bytes_to_string(bytes: &[u8], source_label: &str) -> Result<String, CliError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => Err(CliError::InvalidUtf8 {
            source: source_label.to_owned(),
            byte_offset: e.valid_up_to(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
