//! Reference chain: query generation, resolution, selection

use crate::context::{
    begin_task_message, brief_message, feedback_message, format_references, input_text_message,
};
use crate::node::{NodeKind, WorkflowNode};
use drafter_capability::{
    parse_payload, Message, ReferenceList, SearchProvider, SearchQueryList, TextGenerator,
};
use drafter_state::{Component, Reference, StatePatch, WorkflowError, WorkflowState};
use std::collections::HashSet;
use std::sync::Arc;

/// Proposes reference search queries from the brief and input text
pub struct ReferenceQueryGeneratorNode {
    generator: Arc<dyn TextGenerator>,
    system: Vec<Message>,
    max_queries: usize,
}

impl ReferenceQueryGeneratorNode {
    /// Create the query generator
    #[must_use]
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        system: Vec<Message>,
        max_queries: usize,
    ) -> Self {
        Self {
            generator,
            system,
            max_queries,
        }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for ReferenceQueryGeneratorNode {
    fn kind(&self) -> NodeKind {
        NodeKind::ReferenceQueryGenerator
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let input = input_text_message(state)?;

        if state.is_approved(Component::References) {
            tracing::debug!(run_id = %state.run_id, "references approved, skipping query generation");
            return Ok(StatePatch::empty());
        }

        tracing::info!(run_id = %state.run_id, "generating reference search queries");
        let mut messages = self.system.clone();
        messages.push(brief_message(state));
        messages.push(feedback_message(&state.references_review.feedback));
        messages.push(input);
        messages.push(begin_task_message());

        let value = self
            .generator
            .invoke_structured(&messages)
            .await
            .map_err(|e| WorkflowError::capability(self.kind().name(), e))?;
        let payload: SearchQueryList =
            parse_payload(value).map_err(|e| WorkflowError::capability(self.kind().name(), e))?;

        let mut queries = payload.queries;
        queries.truncate(self.max_queries);

        Ok(StatePatch::empty().with_reference_queries(queries))
    }
}

/// Executes the proposed queries against the search capability
///
/// Per-query failures drop that query's contribution and continue; results
/// without content are discarded. Output order is query order, then
/// per-query result order.
pub struct ReferenceResolverNode {
    search: Arc<dyn SearchProvider>,
    results_per_query: usize,
}

impl ReferenceResolverNode {
    /// Create the resolver
    #[must_use]
    pub fn new(search: Arc<dyn SearchProvider>, results_per_query: usize) -> Self {
        Self {
            search,
            results_per_query,
        }
    }

    async fn resolve(&self, queries: &[String]) -> Vec<Reference> {
        let valid: Vec<&str> = queries
            .iter()
            .map(String::as_str)
            .filter(|query| !query.trim().is_empty())
            .collect();
        if valid.is_empty() {
            return Vec::new();
        }

        let mut references = Vec::new();
        for query in valid {
            match self.search.search(query, self.results_per_query).await {
                Ok(hits) => {
                    for hit in hits {
                        if hit.content.is_empty() {
                            continue;
                        }
                        references.push(Reference::new(hit.url, hit.title, hit.content));
                    }
                }
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "query failed, dropping its results");
                }
            }
        }
        references
    }
}

#[async_trait::async_trait]
impl WorkflowNode for ReferenceResolverNode {
    fn kind(&self) -> NodeKind {
        NodeKind::ReferenceResolver
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        if state.is_approved(Component::References) {
            tracing::debug!(run_id = %state.run_id, "references approved, skipping resolution");
            return Ok(StatePatch::empty());
        }

        let queries = state.reference_queries.as_deref().unwrap_or(&[]);
        let references = self.resolve(queries).await;
        tracing::info!(run_id = %state.run_id, candidates = references.len(), "resolved references");
        Ok(StatePatch::empty().with_candidate_references(references))
    }
}

/// Filters candidate references down to at most `max_references`
pub struct ReferenceSelectorNode {
    generator: Arc<dyn TextGenerator>,
    system: Vec<Message>,
    max_references: usize,
}

impl ReferenceSelectorNode {
    /// Create the selector
    #[must_use]
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        system: Vec<Message>,
        max_references: usize,
    ) -> Self {
        Self {
            generator,
            system,
            max_references,
        }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for ReferenceSelectorNode {
    fn kind(&self) -> NodeKind {
        NodeKind::ReferenceSelector
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let input = input_text_message(state)?;

        if state.is_approved(Component::References) {
            tracing::debug!(run_id = %state.run_id, "references approved, skipping selection");
            return Ok(StatePatch::empty());
        }

        let candidates = &state.candidate_references;
        if candidates.is_empty() {
            tracing::warn!(run_id = %state.run_id, "no candidate references to select from");
            return Ok(StatePatch::empty());
        }
        if self.max_references == 0 {
            return Ok(StatePatch::empty().with_selected_references(Vec::new()));
        }

        tracing::info!(run_id = %state.run_id, candidates = candidates.len(), "selecting references");
        let mut messages = self.system.clone();
        messages.push(brief_message(state));
        messages.push(feedback_message(&state.references_review.feedback));
        messages.push(input);
        messages.push(Message::human(format!(
            "Here are your candidate references to select from:\n\n{}",
            format_references(candidates)
        )));
        messages.push(begin_task_message());

        let value = self
            .generator
            .invoke_structured(&messages)
            .await
            .map_err(|e| WorkflowError::capability(self.kind().name(), e))?;
        let payload: ReferenceList =
            parse_payload(value).map_err(|e| WorkflowError::capability(self.kind().name(), e))?;

        // Selected references must come from the candidate pool; anything
        // else the capability invents is dropped.
        let candidate_urls: HashSet<&str> =
            candidates.iter().map(|r| r.url.as_str()).collect();
        let mut selected: Vec<Reference> = payload
            .references
            .into_iter()
            .map(|r| Reference::new(r.url, r.title, r.content))
            .filter(|r| !r.is_incomplete() && candidate_urls.contains(r.url.as_str()))
            .collect();
        selected.truncate(self.max_references);

        Ok(StatePatch::empty().with_selected_references(selected))
    }
}
