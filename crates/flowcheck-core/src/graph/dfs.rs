//! Cycle detection via three-color depth-first search.
//!
//! Every node starts White (unvisited), turns Gray while it sits on the
//! current traversal path, and turns Black once all of its descendants are
//! finished. Meeting a Gray successor is a back-edge: the edge closes a loop
//! onto the path currently being explored, and the cycle is the path suffix
//! from that successor's first occurrence through the current node.
//!
//! The traversal is iterative with an explicit frame stack, so pipelines
//! hundreds of nodes deep cannot overflow the call stack. It runs from every
//! unvisited root to cover disconnected components and stops at the first
//! cycle found.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

use crate::graph::{EdgeWeight, NodeWeight, PipelineGraph};

/// Traversal state of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet visited.
    White,
    /// On the current traversal path.
    Gray,
    /// Fully explored.
    Black,
}

/// The outcome of one DFS-analyzer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfsOutcome {
    /// `true` when no back-edge was found from any root.
    pub is_acyclic: bool,
    /// The first cycle found, as node ids in traversal order with the
    /// starting node repeated at the end (`first == last`). Empty when the
    /// graph is acyclic.
    pub cycle_path: Vec<String>,
}

/// Runs three-color DFS cycle detection over `graph`.
pub fn dfs_check(graph: &PipelineGraph) -> DfsOutcome {
    let g = graph.graph();

    let mut colors: HashMap<NodeIndex, Color> =
        g.node_indices().map(|idx| (idx, Color::White)).collect();

    for root in g.node_indices() {
        if colors.get(&root).copied() != Some(Color::White) {
            continue;
        }

        // Explicit DFS. Each stack frame is (node, pre-computed successors,
        // next child index); `path` mirrors the Gray chain for cycle
        // reconstruction.
        let mut path: Vec<NodeIndex> = Vec::new();
        let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();

        colors.insert(root, Color::Gray);
        path.push(root);
        stack.push((root, successors(g, root), 0));

        while let Some(frame) = stack.last_mut() {
            let (node, children, child_idx) = frame;
            let node = *node;

            if *child_idx >= children.len() {
                // All children explored: backtrack.
                stack.pop();
                path.pop();
                colors.insert(node, Color::Black);
                continue;
            }

            let child = children[*child_idx];
            *child_idx += 1;

            match colors.get(&child).copied().unwrap_or(Color::White) {
                Color::Gray => {
                    // Back-edge: the cycle runs from the child's first
                    // occurrence on the path through the current node.
                    if let Some(start) = path.iter().position(|&n| n == child) {
                        let mut cycle: Vec<NodeIndex> = path[start..].to_vec();
                        cycle.push(child);
                        return DfsOutcome {
                            is_acyclic: false,
                            cycle_path: to_ids(graph, &cycle),
                        };
                    }
                }
                Color::White => {
                    colors.insert(child, Color::Gray);
                    path.push(child);
                    let children = successors(g, child);
                    stack.push((child, children, 0));
                }
                Color::Black => {}
            }
        }
    }

    DfsOutcome {
        is_acyclic: true,
        cycle_path: Vec::new(),
    }
}

/// Returns the successors of `node` in adjacency order. Parallel edges yield
/// the target once per edge; revisits are filtered by color.
fn successors(g: &StableDiGraph<NodeWeight, EdgeWeight>, node: NodeIndex) -> Vec<NodeIndex> {
    g.edges(node).map(|e| e.target()).collect()
}

/// Resolves a sequence of node indices to their id strings.
fn to_ids(graph: &PipelineGraph, indices: &[NodeIndex]) -> Vec<String> {
    indices
        .iter()
        .filter_map(|&idx| graph.node_id(idx).map(str::to_owned))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
