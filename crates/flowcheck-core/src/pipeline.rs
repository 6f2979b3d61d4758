//! Wire data model for a visual pipeline document.
//!
//! A pipeline is the JSON shape produced by flow-diagram front-ends: a
//! `nodes` array and an `edges` array, where nodes carry presentation
//! attributes (type tag, canvas position, free-form data payload) and edges
//! connect nodes by identifier, optionally naming the specific handles they
//! attach to.
//!
//! Only `id`, `source`, and `target` matter to cycle detection. Everything
//! else is passthrough: unknown JSON fields are preserved via
//! `#[serde(flatten)] pub extra` on every struct so a document round-trips
//! without data loss. Do **not** add `#[serde(deny_unknown_fields)]` here or
//! on any child struct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::newtypes::{EdgeId, NodeId};

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A 2-D canvas position. Presentation-only; never inspected by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal canvas coordinate.
    pub x: f64,
    /// Vertical canvas coordinate.
    pub y: f64,
}

/// A single node in a pipeline graph.
///
/// Only [`Node::id`] participates in validation; the remaining fields are
/// carried through untouched so a caller can echo the document back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node within the document.
    pub id: NodeId,

    /// Node subtype as assigned by the front-end (e.g. `"customInput"`,
    /// `"llm"`, `"customOutput"`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    /// Canvas position of the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Free-form node payload (prompt text, configuration, etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Unknown JSON fields preserved for round-trip fidelity.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A directed connection between two nodes.
///
/// Edges are directed `source → target`. Parallel edges between the same
/// ordered pair are permitted; they inflate adjacency and in-degree counts
/// but are not otherwise special.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge within the document.
    pub id: EdgeId,

    /// Identifier of the node this edge leaves.
    pub source: NodeId,

    /// Identifier of the node this edge enters.
    pub target: NodeId,

    /// Handle label on the source node, if the front-end distinguishes ports.
    #[serde(rename = "sourceHandle", skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,

    /// Handle label on the target node, if the front-end distinguishes ports.
    #[serde(rename = "targetHandle", skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,

    /// Unknown JSON fields preserved for round-trip fidelity.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// The top-level pipeline document.
///
/// Both collections are required; a JSON object missing either is malformed
/// input and fails at [`parse_pipeline`] rather than producing a report.
/// Empty collections are valid (and trivially acyclic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Ordered list of all pipeline nodes.
    pub nodes: Vec<Node>,

    /// Ordered list of all pipeline edges.
    pub edges: Vec<Edge>,

    /// Unknown top-level JSON fields preserved for round-trip fidelity.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A parse-level failure: the input is not a valid pipeline document.
///
/// Parse errors prevent validation from running entirely. This is the only
/// failure mode for malformed input; dangling edge references and self-loops
/// are data conditions captured in the [`crate::report::ValidationReport`],
/// never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineParseError {
    /// Human-readable description of the parse failure, including the
    /// line/column where the document first deviated from the schema.
    pub message: String,
}

impl PipelineParseError {
    /// Constructs a [`PipelineParseError`] from a message string.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PipelineParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: {}", self.message)
    }
}

impl std::error::Error for PipelineParseError {}

/// Parses a JSON string into a [`Pipeline`].
///
/// # Errors
///
/// Returns [`PipelineParseError`] when the document is not valid JSON, is
/// missing the `nodes` or `edges` array, or contains an element whose
/// required identifier fields are absent or empty.
pub fn parse_pipeline(content: &str) -> Result<Pipeline, PipelineParseError> {
    serde_json::from_str(content).map_err(|e| {
        PipelineParseError::new(format!("line {}, column {}: {e}", e.line(), e.column()))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
