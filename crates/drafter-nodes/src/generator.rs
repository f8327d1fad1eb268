//! Brief, title, and summary generators
//!
//! The manager turns the input text into a directive brief; the title and
//! summary generators consume the brief (plus any reviewer feedback) and
//! produce one artifact each. Title and summary share one implementation
//! differing only in which component they draft.

use crate::context::{begin_task_message, brief_message, feedback_message, input_text_message};
use crate::node::{NodeKind, WorkflowNode};
use drafter_capability::{Message, TextGenerator};
use drafter_state::{Component, StatePatch, WorkflowError, WorkflowState};
use std::sync::Arc;

/// Brief generator gating all downstream content generators
pub struct ManagerNode {
    generator: Arc<dyn TextGenerator>,
    system: Vec<Message>,
}

impl ManagerNode {
    /// Create the manager with its system messages
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, system: Vec<Message>) -> Self {
        Self { generator, system }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for ManagerNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Manager
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let input = input_text_message(state)?;

        tracing::info!(run_id = %state.run_id, "manager: drafting brief");
        let mut messages = self.system.clone();
        messages.push(input);
        messages.push(begin_task_message());

        let response = self
            .generator
            .invoke(&messages)
            .await
            .map_err(|e| WorkflowError::capability(NodeKind::Manager.name(), e))?;

        Ok(StatePatch::empty().with_brief(response.trim()))
    }
}

/// Title or summary generator
///
/// Skips itself (empty patch, zero external calls) once its component is
/// approved; producing new output clears the component's stale feedback.
pub struct DraftGenerator {
    component: Component,
    kind: NodeKind,
    generator: Arc<dyn TextGenerator>,
    system: Vec<Message>,
}

impl DraftGenerator {
    /// Title generator
    #[must_use]
    pub fn title(generator: Arc<dyn TextGenerator>, system: Vec<Message>) -> Self {
        Self {
            component: Component::Title,
            kind: NodeKind::TitleGenerator,
            generator,
            system,
        }
    }

    /// Summary generator
    #[must_use]
    pub fn summary(generator: Arc<dyn TextGenerator>, system: Vec<Message>) -> Self {
        Self {
            component: Component::Summary,
            kind: NodeKind::SummaryGenerator,
            generator,
            system,
        }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for DraftGenerator {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let input = input_text_message(state)?;

        if state.is_approved(self.component) {
            tracing::debug!(run_id = %state.run_id, node = %self.kind, "already approved, skipping");
            return Ok(StatePatch::empty());
        }

        tracing::info!(run_id = %state.run_id, node = %self.kind, "generating");
        let mut messages = self.system.clone();
        messages.push(brief_message(state));
        messages.push(feedback_message(&state.review(self.component).feedback));
        messages.push(input);
        messages.push(begin_task_message());

        let response = self
            .generator
            .invoke(&messages)
            .await
            .map_err(|e| WorkflowError::capability(self.kind.name(), e))?;
        let content = response.trim();

        let patch = match self.component {
            Component::Title => StatePatch::empty().with_title(content),
            Component::Summary => StatePatch::empty().with_summary(content),
            Component::References => return Err(WorkflowError::MissingField("component")),
        };
        Ok(patch)
    }
}
