//! Draft review and the revision round counter

use crate::context::format_references;
use crate::node::{NodeKind, WorkflowNode};
use drafter_capability::{parse_payload, Message, ReviewPayload, TextGenerator};
use drafter_state::{StatePatch, WorkflowError, WorkflowState};
use std::sync::Arc;

/// Reviews the drafted title, summary, and references in one pass
///
/// Once the round counter reaches the cap, approval is forced without a
/// generation call so the workflow always terminates.
pub struct ReviewerNode {
    generator: Arc<dyn TextGenerator>,
    system: Vec<Message>,
}

impl ReviewerNode {
    /// Create the reviewer with its system messages
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, system: Vec<Message>) -> Self {
        Self { generator, system }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for ReviewerNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Reviewer
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        if state.revision_round >= state.max_revisions {
            tracing::warn!(
                run_id = %state.run_id,
                round = state.revision_round,
                cap = state.max_revisions,
                "revision cap reached, forcing approval"
            );
            return Ok(StatePatch {
                needs_revision: Some(false),
                title_approved: Some(true),
                summary_approved: Some(true),
                references_approved: Some(true),
                ..StatePatch::default()
            });
        }

        tracing::info!(run_id = %state.run_id, round = state.revision_round, "reviewing draft");
        // A generator may normalize a null backend response to an empty
        // string; the evaluator still gets a readable placeholder.
        let title = state
            .title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("No title provided");
        let summary = state
            .summary
            .as_deref()
            .filter(|summary| !summary.trim().is_empty())
            .unwrap_or("No summary provided");
        let references = format_references(&state.selected_references);

        let mut messages = self.system.clone();
        messages.push(Message::human(format!(
            "Here is the draft to review.\n\nTitle:\n{title}\n\nSummary:\n{summary}\n\n\
             Selected references:\n{references}"
        )));

        let value = self
            .generator
            .invoke_structured(&messages)
            .await
            .map_err(|e| WorkflowError::capability(self.kind().name(), e))?;
        let review: ReviewPayload =
            parse_payload(value).map_err(|e| WorkflowError::capability(self.kind().name(), e))?;

        let all_approved =
            review.title_approved && review.summary_approved && review.references_approved;
        Ok(StatePatch {
            revision_round: Some(state.revision_round + 1),
            needs_revision: Some(!all_approved),
            title_approved: Some(review.title_approved),
            summary_approved: Some(review.summary_approved),
            references_approved: Some(review.references_approved),
            title_feedback: Some(review.title_feedback),
            summary_feedback: Some(review.summary_feedback),
            references_feedback: Some(review.references_feedback),
            ..StatePatch::default()
        })
    }
}
