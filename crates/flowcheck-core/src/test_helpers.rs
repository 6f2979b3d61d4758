//! Shared test helper constructors for pipeline fixtures.
//!
//! Compiled only in test builds. Integration tests under
//! `crates/flowcheck-core/tests/` define their own local helpers because
//! they link against the non-test library build where this module is not
//! available.
#![allow(clippy::expect_used)]

use serde_json::Map;

use crate::newtypes::{EdgeId, NodeId};
use crate::pipeline::{Edge, Node, Pipeline, Position};

/// Creates a [`NodeId`] from a string slice, panicking on invalid input.
pub fn node_id(s: &str) -> NodeId {
    NodeId::try_from(s).expect("valid NodeId")
}

/// Creates an [`EdgeId`] from a string slice, panicking on invalid input.
pub fn edge_id(s: &str) -> EdgeId {
    EdgeId::try_from(s).expect("valid EdgeId")
}

/// Creates a test [`Node`] with the given id and minimal attributes.
pub fn node(id: &str) -> Node {
    Node {
        id: node_id(id),
        node_type: Some("test".to_owned()),
        position: Some(Position { x: 0.0, y: 0.0 }),
        data: None,
        extra: Map::new(),
    }
}

/// Creates a test [`Edge`] with the given id and endpoints, no handles.
pub fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge {
        id: edge_id(id),
        source: node_id(source),
        target: node_id(target),
        source_handle: None,
        target_handle: None,
        extra: Map::new(),
    }
}

/// Builds a [`Pipeline`] from the given nodes and edges.
pub fn pipeline(nodes: Vec<Node>, edges: Vec<Edge>) -> Pipeline {
    Pipeline {
        nodes,
        edges,
        extra: Map::new(),
    }
}
