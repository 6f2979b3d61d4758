//! Built-in smoke-test fixture: three nodes wired into a deliberate cycle.
//!
//! The fixture exercises the full parse → build → analyze path end to end
//! and is what `flowcheck selftest` runs. It is a deployment sanity check,
//! not part of the validation contract.

use crate::pipeline::{Pipeline, PipelineParseError, parse_pipeline};

/// A pipeline document with a known cycle: `A → B → C → A`.
///
/// Kept as JSON rather than constructed structs so the self-test also covers
/// the deserialization path a real caller goes through.
pub const KNOWN_CYCLE_JSON: &str = r#"{
    "nodes": [
        {"id": "A", "type": "customInput", "position": {"x": 0, "y": 0}, "data": {}},
        {"id": "B", "type": "llm", "position": {"x": 100, "y": 0}, "data": {}},
        {"id": "C", "type": "customOutput", "position": {"x": 200, "y": 0}, "data": {}}
    ],
    "edges": [
        {"id": "e1", "source": "A", "target": "B"},
        {"id": "e2", "source": "B", "target": "C"},
        {"id": "e3", "source": "C", "target": "A"}
    ]
}"#;

/// Parses [`KNOWN_CYCLE_JSON`] into a [`Pipeline`].
///
/// # Errors
///
/// Returns [`PipelineParseError`] only if the embedded fixture itself is
/// edited into an invalid state; the tests below pin it as parseable.
pub fn known_cycle() -> Result<Pipeline, PipelineParseError> {
    parse_pipeline(KNOWN_CYCLE_JSON)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn fixture_parses() {
        let p = known_cycle().expect("embedded fixture must parse");
        assert_eq!(p.nodes.len(), 3);
        assert_eq!(p.edges.len(), 3);
    }

    #[test]
    fn fixture_contains_the_closing_edge() {
        let p = known_cycle().expect("embedded fixture must parse");
        assert!(
            p.edges
                .iter()
                .any(|e| e.source.as_str() == "C" && e.target.as_str() == "A"),
            "edge C -> A closes the cycle"
        );
    }
}
