//! Validation entry point: the single function the transport boundary calls.
//!
//! One call is a pure function of its input pipeline: it allocates its own
//! working graph, runs both analyzers over it, and discards everything with
//! the returned [`ValidationReport`]. No state survives a call and nothing
//! is shared between concurrent calls, so the engine is safely invokable
//! from multiple threads without locks.
//!
//! Every path is terminal in one pass:
//! short-circuit checks → build → both analyzers → compile. A hosting
//! service that imposes a deadline can pass a [`CancelFlag`]; it is checked
//! between the major phases and never changes output semantics when unset.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::graph::{build_graph, dfs_check, kahn_check};
use crate::pipeline::Pipeline;
use crate::report::{self, ValidationReport};

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// A cloneable stop flag for abandoning a validation call between phases.
///
/// All clones share one underlying flag; any of them can cancel. The flag is
/// a defensive measure for adversarially large inputs — the algorithms
/// themselves are O(V+E) and need no timeout.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Takes effect at the next phase boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`][CancelFlag::cancel] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for one validation call.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Optional cancellation signal, checked between phases.
    pub cancel: Option<CancelFlag>,
}

/// Failures of a validation call on an already-parsed pipeline.
///
/// Malformed input never reaches this layer — the typed [`Pipeline`]
/// already proves structure — so cancellation is the only runtime failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateError {
    /// The caller's [`CancelFlag`] was set before the call completed.
    Cancelled,
}

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("validation cancelled"),
        }
    }
}

impl std::error::Error for ValidateError {}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validates `pipeline` with default options (no cancellation signal).
///
/// # Errors
///
/// Never fails in practice; the `Result` exists so both entry points share
/// a signature. See [`validate_pipeline_with`].
pub fn validate_pipeline(pipeline: &Pipeline) -> Result<ValidationReport, ValidateError> {
    validate_pipeline_with(pipeline, &ValidateOptions::default())
}

/// Validates `pipeline`, checking `options.cancel` between phases.
///
/// Dangling edge references and self-loops are data conditions captured in
/// the report, never errors.
///
/// # Errors
///
/// Returns [`ValidateError::Cancelled`] if the cancellation flag is set at
/// any phase boundary.
pub fn validate_pipeline_with(
    pipeline: &Pipeline,
    options: &ValidateOptions,
) -> Result<ValidationReport, ValidateError> {
    check_cancelled(options)?;

    let node_count = pipeline.nodes.len();
    let edge_count = pipeline.edges.len();

    // A graph with no edges cannot have a cycle; skip building entirely.
    // This also covers the empty document.
    if edge_count == 0 {
        return Ok(report::compile_trivial(node_count, 0, None));
    }

    let build = build_graph(pipeline);
    check_cancelled(options)?;

    // The partition is complete at this point, so the reported counts are
    // exact even on the short-circuit paths below.
    if let Some(self_loop) = build.partition.first_self_loop() {
        return Ok(report::compile_self_loop(
            node_count,
            edge_count,
            &build.partition,
            self_loop,
        ));
    }

    if build.partition.valid_count == 0 {
        // Every edge was dangling (including the degenerate no-nodes case);
        // with nothing to traverse the graph is acyclic by construction.
        return Ok(report::compile_trivial(
            node_count,
            edge_count,
            Some(&build.partition),
        ));
    }

    let kahn = kahn_check(&build.graph);
    check_cancelled(options)?;

    let dfs = dfs_check(&build.graph);
    check_cancelled(options)?;

    Ok(report::compile(
        node_count,
        edge_count,
        &build.partition,
        &kahn,
        &dfs,
    ))
}

fn check_cancelled(options: &ValidateOptions) -> Result<(), ValidateError> {
    if options.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
        Err(ValidateError::Cancelled)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
