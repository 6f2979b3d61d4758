//! The terminal value of a validation call, and the cross-check that
//! produces it.
//!
//! [`ValidationReport`] is immutable once compiled and has no lifecycle
//! beyond the call that produced it. The compiler reconciles the two
//! analyzer verdicts: on disagreement it sets the `mismatch_detected` flag
//! and forces the final verdict to cyclic — a missed cycle is worse than a
//! false alarm in this domain. Disagreement is a consistency guard for
//! malformed internal state, not an expected operating mode; hitting it
//! logs a warning, and the test suite asserts it stays unreachable for
//! well-formed graphs.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::graph::{DfsOutcome, EdgePartition, KahnOutcome, SelfLoop};

// ---------------------------------------------------------------------------
// ValidationReport
// ---------------------------------------------------------------------------

/// The structured result of validating one pipeline.
///
/// `is_acyclic` is the reconciled verdict; the per-analyzer verdicts and the
/// counts are diagnostics for observability, never correctness inputs.
/// `valid_edge_count + invalid_edge_count` always equals `edge_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `true` when the pipeline is a DAG.
    pub is_acyclic: bool,
    /// Human-readable cycle findings, in order; empty for acyclic graphs.
    pub cycle_evidence: Vec<String>,
    /// Total nodes in the input document.
    pub node_count: usize,
    /// Total edges in the input document.
    pub edge_count: usize,
    /// Edges that entered the working graph.
    pub valid_edge_count: usize,
    /// Edges excluded from the working graph (dangling or self-loop).
    pub invalid_edge_count: usize,
    /// Descriptions of every excluded edge: dangling first, then self-loops.
    pub invalid_edges: Vec<String>,
    /// The Kahn analyzer's verdict (`true` = acyclic).
    pub kahn_verdict: bool,
    /// The DFS analyzer's verdict (`true` = acyclic).
    pub dfs_verdict: bool,
    /// `true` when the analyzers disagreed and the conservative tie-break
    /// was applied.
    pub mismatch_detected: bool,
}

impl ValidationReport {
    /// Returns `true` when the pipeline contains at least one cycle.
    pub fn is_cyclic(&self) -> bool {
        !self.is_acyclic
    }
}

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

/// Reconciles the two analyzer verdicts into `(final_verdict, mismatch)`.
///
/// On disagreement the final verdict is forced to cyclic: an "acyclic"
/// claim disputed by either analyzer is never trusted.
pub(crate) fn reconcile(kahn_acyclic: bool, dfs_acyclic: bool) -> (bool, bool) {
    if kahn_acyclic == dfs_acyclic {
        (kahn_acyclic, false)
    } else {
        warn!(
            kahn = kahn_acyclic,
            dfs = dfs_acyclic,
            "cycle analyzers disagree; forcing cyclic verdict"
        );
        (false, true)
    }
}

/// Compiles the report for a graph both analyzers ran over.
pub(crate) fn compile(
    node_count: usize,
    edge_count: usize,
    partition: &EdgePartition,
    kahn: &KahnOutcome,
    dfs: &DfsOutcome,
) -> ValidationReport {
    let (is_acyclic, mismatch_detected) = reconcile(kahn.is_acyclic, dfs.is_acyclic);

    let mut cycle_evidence = Vec::new();
    if !is_acyclic {
        if !kahn.implicated.is_empty() {
            cycle_evidence.push(format!(
                "Kahn's algorithm detected cycle involving: {}",
                kahn.implicated.join(", ")
            ));
        }
        if !dfs.cycle_path.is_empty() {
            cycle_evidence.push(format!(
                "DFS detected cycle path: {}",
                dfs.cycle_path.join(" -> ")
            ));
        }
        if cycle_evidence.is_empty() {
            cycle_evidence.push("Cycle detected but specific path unclear".to_owned());
        }
    }

    ValidationReport {
        is_acyclic,
        cycle_evidence,
        node_count,
        edge_count,
        valid_edge_count: partition.valid_count,
        invalid_edge_count: partition.invalid_count(),
        invalid_edges: partition.invalid_descriptions(),
        kahn_verdict: kahn.is_acyclic,
        dfs_verdict: dfs.is_acyclic,
        mismatch_detected,
    }
}

/// Compiles the short-circuit report for a pipeline containing a self-loop.
///
/// Neither analyzer runs; the evidence is exactly the first self-loop's
/// description, and both per-analyzer verdicts are recorded as cyclic (a
/// self-loop is a cycle either algorithm would report).
pub(crate) fn compile_self_loop(
    node_count: usize,
    edge_count: usize,
    partition: &EdgePartition,
    self_loop: &SelfLoop,
) -> ValidationReport {
    ValidationReport {
        is_acyclic: false,
        cycle_evidence: vec![self_loop.evidence()],
        node_count,
        edge_count,
        valid_edge_count: partition.valid_count,
        invalid_edge_count: partition.invalid_count(),
        invalid_edges: partition.invalid_descriptions(),
        kahn_verdict: false,
        dfs_verdict: false,
        mismatch_detected: false,
    }
}

/// Compiles the report for a pipeline that is acyclic without analysis:
/// no edges at all, or no edges that survived the partition.
pub(crate) fn compile_trivial(
    node_count: usize,
    edge_count: usize,
    partition: Option<&EdgePartition>,
) -> ValidationReport {
    let (valid, invalid, descriptions) = match partition {
        Some(p) => (p.valid_count, p.invalid_count(), p.invalid_descriptions()),
        None => (0, 0, Vec::new()),
    };
    ValidationReport {
        is_acyclic: true,
        cycle_evidence: Vec::new(),
        node_count,
        edge_count,
        valid_edge_count: valid,
        invalid_edge_count: invalid,
        invalid_edges: descriptions,
        kahn_verdict: true,
        dfs_verdict: true,
        mismatch_detected: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
