//! Static workflow topology
//!
//! The graph is a fixed adjacency list over [`NodeKind`]: four source nodes
//! (manager plus the three tag extractors) fan out from the start, the tag
//! branch fans in at the aggregator, the content branch fans in at the
//! reviewer. A rejected review re-enters the content branch only; the tag
//! branch runs exactly once per draft.

use drafter_nodes::NodeKind;

/// Upstream dependencies of a node
///
/// A node is runnable once every kind listed here has completed.
#[must_use]
pub fn dependencies(kind: NodeKind) -> &'static [NodeKind] {
    match kind {
        NodeKind::Manager
        | NodeKind::LlmTagExtractor
        | NodeKind::NerTagExtractor
        | NodeKind::GazetteerTagExtractor => &[],
        NodeKind::TitleGenerator
        | NodeKind::SummaryGenerator
        | NodeKind::ReferenceQueryGenerator => &[NodeKind::Manager],
        NodeKind::ReferenceResolver => &[NodeKind::ReferenceQueryGenerator],
        NodeKind::ReferenceSelector => &[NodeKind::ReferenceResolver],
        NodeKind::TagTypeAssigner => &[NodeKind::NerTagExtractor],
        NodeKind::TagAggregator => &[
            NodeKind::LlmTagExtractor,
            NodeKind::TagTypeAssigner,
            NodeKind::GazetteerTagExtractor,
        ],
        NodeKind::TagSelector => &[NodeKind::TagAggregator],
        NodeKind::Reviewer => &[
            NodeKind::TitleGenerator,
            NodeKind::SummaryGenerator,
            NodeKind::ReferenceSelector,
        ],
    }
}

/// Nodes re-run when the reviewer requests a revision
///
/// The reviewer itself is included so the next verdict closes the loop.
pub const REVISION_SUBGRAPH: [NodeKind; 6] = [
    NodeKind::TitleGenerator,
    NodeKind::SummaryGenerator,
    NodeKind::ReferenceQueryGenerator,
    NodeKind::ReferenceResolver,
    NodeKind::ReferenceSelector,
    NodeKind::Reviewer,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_dependency_is_a_known_node() {
        for kind in NodeKind::ALL {
            for dep in dependencies(kind) {
                assert!(NodeKind::ALL.contains(dep), "{kind} depends on unknown {dep}");
            }
        }
    }

    #[test]
    fn graph_is_acyclic() {
        // Kahn-style check: repeatedly peel nodes whose deps are all peeled.
        let mut done: HashSet<NodeKind> = HashSet::new();
        loop {
            let before = done.len();
            for kind in NodeKind::ALL {
                if !done.contains(&kind)
                    && dependencies(kind).iter().all(|dep| done.contains(dep))
                {
                    done.insert(kind);
                }
            }
            if done.len() == NodeKind::ALL.len() {
                return;
            }
            assert!(done.len() > before, "cycle detected in topology");
        }
    }

    #[test]
    fn tag_branch_is_outside_the_revision_subgraph() {
        for kind in [
            NodeKind::LlmTagExtractor,
            NodeKind::NerTagExtractor,
            NodeKind::TagTypeAssigner,
            NodeKind::GazetteerTagExtractor,
            NodeKind::TagAggregator,
            NodeKind::TagSelector,
        ] {
            assert!(!REVISION_SUBGRAPH.contains(&kind));
        }
    }

    #[test]
    fn reviewer_closes_the_revision_loop() {
        assert!(REVISION_SUBGRAPH.contains(&NodeKind::Reviewer));
        assert!(!REVISION_SUBGRAPH.contains(&NodeKind::Manager));
    }
}
