//! Fan-in point for the three tag extractors

use crate::node::{NodeKind, WorkflowNode};
use drafter_state::{StatePatch, Tag, WorkflowError, WorkflowState};
use std::collections::HashSet;

/// Merge extractor outputs into a deduplicated candidate list
///
/// Tags are normalized (lowercased, trimmed) before comparison; identity is
/// the `(name, type)` pair, so the same name under two types survives twice.
/// Entries whose name or type normalizes to empty are dropped. First
/// occurrence wins, and input order is preserved.
#[must_use]
pub fn aggregate_tags(sources: &[&[Tag]]) -> Vec<Tag> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for source in sources {
        for tag in *source {
            let normalized = Tag::normalized(&tag.name, &tag.kind);
            if normalized.name.is_empty() || normalized.kind.is_empty() {
                continue;
            }
            if seen.insert(normalized.identity()) {
                merged.push(normalized);
            }
        }
    }
    merged
}

/// Joins the LLM, NER, and gazetteer extractor outputs
pub struct TagAggregatorNode;

#[async_trait::async_trait]
impl WorkflowNode for TagAggregatorNode {
    fn kind(&self) -> NodeKind {
        NodeKind::TagAggregator
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let candidates = aggregate_tags(&[
            &state.llm_tags,
            &state.ner_tags,
            &state.gazetteer_tags,
        ]);
        tracing::info!(
            run_id = %state.run_id,
            llm = state.llm_tags.len(),
            ner = state.ner_tags.len(),
            gazetteer = state.gazetteer_tags.len(),
            candidates = candidates.len(),
            "aggregated candidate tags"
        );
        Ok(StatePatch::empty().with_candidate_tags(candidates))
    }
}
