//! Working-graph construction from a [`Pipeline`] using `petgraph`.
//!
//! [`build_graph`] turns the wire document into the in-memory form the two
//! analyzers run over: a `StableDiGraph` with typed node and edge weights,
//! an `id → NodeIndex` map, and an [`EdgePartition`] recording which input
//! edges were usable.
//!
//! # Two-Pass Construction
//!
//! 1. **Node pass** — inserts every node into the `StableDiGraph` and records
//!    the `id → NodeIndex` mapping. Every node starts with in-degree zero, so
//!    isolated nodes are representable and trivially acyclic. A duplicate id
//!    collapses onto its first occurrence (set semantics; uniqueness is the
//!    producing front-end's invariant).
//! 2. **Edge pass** — classifies each edge in input order. An edge whose
//!    endpoint is unknown is recorded as dangling; an edge from a node to
//!    itself is recorded as a self-loop. Neither enters the graph. Everything
//!    else is inserted and counted valid.
//!
//! Construction never fails: dangling references and self-loops are data
//! conditions surfaced through the partition, not errors.
//!
//! # Analyzers
//!
//! See the [`kahn`] and [`dfs`] submodules for the two independent
//! acyclicity checks that consume the built graph.

pub mod dfs;
pub mod kahn;

pub use dfs::{DfsOutcome, dfs_check};
pub use kahn::{KahnOutcome, kahn_check};

use std::collections::HashMap;
use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::pipeline::Pipeline;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Weight stored inline on each petgraph node.
///
/// Kept small so traversal loops stay cache-friendly; full node data is
/// reachable via `data_index` into the originating [`Pipeline::nodes`].
#[derive(Debug, Clone)]
pub struct NodeWeight {
    /// Identifier copied from the pipeline node's `id` field.
    pub local_id: String,
    /// Index into the `Pipeline::nodes` vector for the full node.
    pub data_index: usize,
}

/// Weight stored inline on each petgraph edge.
#[derive(Debug, Clone)]
pub struct EdgeWeight {
    /// Identifier copied from the pipeline edge's `id` field.
    pub local_id: String,
    /// Index into the `Pipeline::edges` vector for the full edge.
    pub data_index: usize,
}

// ---------------------------------------------------------------------------
// Edge partition
// ---------------------------------------------------------------------------

/// An edge excluded from the working graph because an endpoint is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingEdge {
    /// The id of the offending edge.
    pub edge_id: String,
    /// The edge's declared source node id.
    pub source: String,
    /// The edge's declared target node id.
    pub target: String,
}

impl fmt::Display for DanglingEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// An edge from a node to itself.
///
/// A self-loop is an unconditional cycle; the validation entry point
/// short-circuits on the first one rather than running either analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfLoop {
    /// The id of the offending edge.
    pub edge_id: String,
    /// The node that loops onto itself.
    pub node_id: String,
}

impl SelfLoop {
    /// Returns the canonical evidence line for this self-loop.
    pub fn evidence(&self) -> String {
        format!("Self-loop detected: {} -> {}", self.node_id, self.node_id)
    }
}

impl fmt::Display for SelfLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.node_id, self.node_id)
    }
}

/// Validity classification of every input edge.
///
/// The partition is always complete: it is computed for the whole edge list
/// before any verdict short-circuits, so
/// `valid_count + invalid_count() == Pipeline::edges.len()` holds for every
/// report the engine produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgePartition {
    /// Number of edges inserted into the working graph.
    pub valid_count: usize,
    /// Edges referencing at least one unknown endpoint, in input order.
    pub dangling: Vec<DanglingEdge>,
    /// Edges from a node to itself, in input order.
    pub self_loops: Vec<SelfLoop>,
}

impl EdgePartition {
    /// Number of edges excluded from the working graph.
    pub fn invalid_count(&self) -> usize {
        self.dangling.len() + self.self_loops.len()
    }

    /// The first self-loop in input order, if any.
    pub fn first_self_loop(&self) -> Option<&SelfLoop> {
        self.self_loops.first()
    }

    /// Descriptions of every excluded edge: dangling edges first, then
    /// self-loops, each in input order.
    pub fn invalid_descriptions(&self) -> Vec<String> {
        self.dangling
            .iter()
            .map(ToString::to_string)
            .chain(self.self_loops.iter().map(ToString::to_string))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// PipelineGraph
// ---------------------------------------------------------------------------

/// The working graph for one validation call.
///
/// Wraps a petgraph [`StableDiGraph`] with typed [`NodeWeight`] and
/// [`EdgeWeight`] structs plus a `HashMap<String, NodeIndex>` for O(1)
/// lookup by node id. Built fresh per call by [`build_graph`], owned
/// exclusively by that call, and discarded with it; the analyzers receive it
/// by shared reference and copy anything they mutate.
#[derive(Debug)]
pub struct PipelineGraph {
    graph: StableDiGraph<NodeWeight, EdgeWeight>,
    id_to_index: HashMap<String, NodeIndex>,
}

impl PipelineGraph {
    /// Returns the number of distinct nodes in the working graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of valid edges in the working graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Looks up the [`NodeIndex`] for a node id string.
    pub fn node_index(&self, id: &str) -> Option<&NodeIndex> {
        self.id_to_index.get(id)
    }

    /// Returns the node id for the given index, or `None` if the index is
    /// out of bounds.
    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|w| w.local_id.as_str())
    }

    /// Returns a reference to the underlying [`StableDiGraph`] for use by
    /// the traversal algorithms.
    pub fn graph(&self) -> &StableDiGraph<NodeWeight, EdgeWeight> {
        &self.graph
    }
}

/// The result of building a working graph: the graph itself plus the
/// validity partition of the input edge list.
#[derive(Debug)]
pub struct PipelineBuild {
    /// The working graph over valid edges only.
    pub graph: PipelineGraph,
    /// Classification of every input edge.
    pub partition: EdgePartition,
}

/// Constructs a [`PipelineBuild`] from a [`Pipeline`].
///
/// Construction is O(N + E) and infallible; see the module docs for the
/// two-pass process and the handling of duplicates, dangling references,
/// and self-loops.
pub fn build_graph(pipeline: &Pipeline) -> PipelineBuild {
    let node_count = pipeline.nodes.len();
    let edge_count = pipeline.edges.len();

    let mut graph: StableDiGraph<NodeWeight, EdgeWeight> =
        StableDiGraph::with_capacity(node_count, edge_count);
    let mut id_to_index: HashMap<String, NodeIndex> = HashMap::with_capacity(node_count);

    for (data_index, node) in pipeline.nodes.iter().enumerate() {
        if id_to_index.contains_key(node.id.as_str()) {
            continue;
        }

        let local_id = node.id.to_string();
        let weight = NodeWeight {
            local_id: local_id.clone(),
            data_index,
        };
        let idx = graph.add_node(weight);
        id_to_index.insert(local_id, idx);
    }

    let mut partition = EdgePartition::default();

    for (data_index, edge) in pipeline.edges.iter().enumerate() {
        let source_idx = id_to_index.get(edge.source.as_str()).copied();
        let target_idx = id_to_index.get(edge.target.as_str()).copied();

        let (Some(source_idx), Some(target_idx)) = (source_idx, target_idx) else {
            partition.dangling.push(DanglingEdge {
                edge_id: edge.id.to_string(),
                source: edge.source.to_string(),
                target: edge.target.to_string(),
            });
            continue;
        };

        if source_idx == target_idx {
            partition.self_loops.push(SelfLoop {
                edge_id: edge.id.to_string(),
                node_id: edge.source.to_string(),
            });
            continue;
        }

        let weight = EdgeWeight {
            local_id: edge.id.to_string(),
            data_index,
        };
        graph.add_edge(source_idx, target_idx, weight);
        partition.valid_count += 1;
    }

    PipelineBuild {
        graph: PipelineGraph { graph, id_to_index },
        partition,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
