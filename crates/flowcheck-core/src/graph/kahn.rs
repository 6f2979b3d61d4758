//! Acyclicity check via Kahn's algorithm (BFS-based topological sort).
//!
//! The analyzer computes an in-degree table for every node, seeds a FIFO
//! queue with all zero-in-degree nodes, then repeatedly removes a node and
//! decrements the in-degrees of its successors, enqueueing any that reach
//! zero. The graph is acyclic iff every node gets processed; nodes whose
//! in-degree never reaches zero are left behind by one or more cycles.
//!
//! The in-degree table is a private scratch copy built at entry, so the
//! analyzer never mutates the shared [`PipelineGraph`] and concurrent or
//! repeated runs over the same graph are independent.

use std::collections::{HashMap, VecDeque};

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::graph::PipelineGraph;

/// The outcome of one Kahn-analyzer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KahnOutcome {
    /// `true` when topological reduction consumed every node.
    pub is_acyclic: bool,
    /// Ids of nodes whose scratch in-degree stayed positive, in input order.
    ///
    /// A superset hint of the nodes participating in cycles, not an exact
    /// cycle path; empty when the graph is acyclic.
    pub implicated: Vec<String>,
}

/// Runs Kahn's algorithm over `graph`.
///
/// Queue order among simultaneously-free nodes is FIFO in node-insertion
/// order; only the count of processed nodes affects the verdict.
pub fn kahn_check(graph: &PipelineGraph) -> KahnOutcome {
    let g = graph.graph();

    // Scratch in-degree table: zero for every node (so isolated nodes are
    // consumed immediately), then one increment per incoming edge. Parallel
    // edges each contribute.
    let mut in_degree: HashMap<NodeIndex, usize> = HashMap::with_capacity(g.node_count());
    for node_idx in g.node_indices() {
        in_degree.insert(node_idx, 0);
    }
    for edge_ref in g.edge_references() {
        *in_degree.entry(edge_ref.target()).or_insert(0) += 1;
    }

    let mut queue: VecDeque<NodeIndex> = g
        .node_indices()
        .filter(|idx| in_degree.get(idx) == Some(&0))
        .collect();

    let mut processed: usize = 0;

    while let Some(node) = queue.pop_front() {
        processed += 1;

        for edge_ref in g.edges(node) {
            let target = edge_ref.target();
            if let Some(deg) = in_degree.get_mut(&target) {
                if *deg > 0 {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(target);
                    }
                }
            }
        }
    }

    let is_acyclic = processed == g.node_count();

    let implicated: Vec<String> = g
        .node_indices()
        .filter(|idx| in_degree.get(idx).is_some_and(|deg| *deg > 0))
        .filter_map(|idx| graph.node_id(idx).map(str::to_owned))
        .collect();

    KahnOutcome {
        is_acyclic,
        implicated,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
