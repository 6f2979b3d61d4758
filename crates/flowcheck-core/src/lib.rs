#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod fixture;
pub mod graph;
pub mod newtypes;
pub mod pipeline;
pub mod report;
pub mod validate;

#[cfg(test)]
mod test_helpers;

pub use graph::{
    DanglingEdge, DfsOutcome, EdgePartition, EdgeWeight, KahnOutcome, NodeWeight, PipelineBuild,
    PipelineGraph, SelfLoop, build_graph, dfs_check, kahn_check,
};
pub use newtypes::{EdgeId, NewtypeError, NodeId};
pub use pipeline::{Edge, Node, Pipeline, PipelineParseError, Position, parse_pipeline};
pub use report::ValidationReport;
pub use validate::{
    CancelFlag, ValidateError, ValidateOptions, validate_pipeline, validate_pipeline_with,
};

/// Returns the current version of the flowcheck-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
