//! Workflow state and patches
//!
//! `WorkflowState` is the single mutable record threaded through every node.
//! Nodes never mutate it directly: each returns a `StatePatch` (a partial
//! update) that the scheduler merges in. Concurrently-running nodes write
//! disjoint fields, so merges never conflict.

use crate::config::DraftConfig;
use crate::error::WorkflowError;
use crate::reference::Reference;
use crate::tag::Tag;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique workflow-run identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub Ulid);

impl RunId {
    /// Generate new run ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The reviewable components of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// Publication title
    Title,
    /// Publication summary
    Summary,
    /// Selected references
    References,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::Title => write!(f, "title"),
            Component::Summary => write!(f, "summary"),
            Component::References => write!(f, "references"),
        }
    }
}

/// Per-component approval and reviewer feedback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentReview {
    /// Whether the reviewer (or forced termination) approved this component
    pub approved: bool,
    /// Latest reviewer feedback; reset to empty when the generator reruns
    pub feedback: String,
}

/// The workflow state for one input document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Run identifier, tagged onto every log line
    pub run_id: RunId,
    /// The document being drafted for
    pub input_text: String,

    /// Manager's directive brief; gates all content generators
    pub brief: Option<String>,
    /// Proposed title
    pub title: Option<String>,
    /// Proposed summary
    pub summary: Option<String>,

    /// Search queries proposed by the reference-query generator
    pub reference_queries: Option<Vec<String>>,
    /// Raw search results, pre-selection
    pub candidate_references: Vec<Reference>,
    /// References after selection (capped, subset of candidates by URL)
    pub selected_references: Vec<Reference>,

    /// Tags from the LLM extractor
    pub llm_tags: Vec<Tag>,
    /// Tags from the named-entity extractor (re-typed by the assigner)
    pub ner_tags: Vec<Tag>,
    /// Tags from the gazetteer extractor
    pub gazetteer_tags: Vec<Tag>,
    /// Deduplicated union of the three sources
    pub candidate_tags: Vec<Tag>,
    /// Tags after selection (capped)
    pub selected_tags: Vec<Tag>,

    /// Completed revision rounds; monotone non-decreasing
    pub revision_round: u32,
    /// Round cap; once reached, approval is forced
    pub max_revisions: u32,
    /// Whether the reviewer asked for another round
    pub needs_revision: bool,

    /// Title approval/feedback
    pub title_review: ComponentReview,
    /// Summary approval/feedback
    pub summary_review: ComponentReview,
    /// References approval/feedback
    pub references_review: ComponentReview,
}

impl WorkflowState {
    /// Create the state for a new document run
    #[must_use]
    pub fn new(input_text: impl Into<String>, config: &DraftConfig) -> Self {
        Self {
            run_id: RunId::new(),
            input_text: input_text.into(),
            brief: None,
            title: None,
            summary: None,
            reference_queries: None,
            candidate_references: Vec::new(),
            selected_references: Vec::new(),
            llm_tags: Vec::new(),
            ner_tags: Vec::new(),
            gazetteer_tags: Vec::new(),
            candidate_tags: Vec::new(),
            selected_tags: Vec::new(),
            revision_round: 0,
            max_revisions: config.max_revisions,
            needs_revision: false,
            title_review: ComponentReview::default(),
            summary_review: ComponentReview::default(),
            references_review: ComponentReview::default(),
        }
    }

    /// Read the input text, enforcing the non-blank invariant
    ///
    /// # Errors
    /// `WorkflowError::InvalidInput` when the text is empty or whitespace.
    pub fn input_text(&self) -> Result<&str, WorkflowError> {
        if self.input_text.trim().is_empty() {
            return Err(WorkflowError::InvalidInput(
                "input text cannot be empty or blank".to_string(),
            ));
        }
        Ok(&self.input_text)
    }

    /// Review record for a component
    #[inline]
    #[must_use]
    pub fn review(&self, component: Component) -> &ComponentReview {
        match component {
            Component::Title => &self.title_review,
            Component::Summary => &self.summary_review,
            Component::References => &self.references_review,
        }
    }

    /// Whether a component is already approved
    #[inline]
    #[must_use]
    pub fn is_approved(&self, component: Component) -> bool {
        self.review(component).approved
    }

    /// Merge a node's patch into the state
    pub fn apply(&mut self, patch: StatePatch) {
        let StatePatch {
            brief,
            title,
            summary,
            reference_queries,
            candidate_references,
            selected_references,
            llm_tags,
            ner_tags,
            gazetteer_tags,
            candidate_tags,
            selected_tags,
            revision_round,
            needs_revision,
            title_approved,
            summary_approved,
            references_approved,
            title_feedback,
            summary_feedback,
            references_feedback,
        } = patch;

        if let Some(value) = brief {
            self.brief = Some(value);
        }
        if let Some(value) = title {
            self.title = Some(value);
        }
        if let Some(value) = summary {
            self.summary = Some(value);
        }
        if let Some(value) = reference_queries {
            self.reference_queries = Some(value);
        }
        if let Some(value) = candidate_references {
            self.candidate_references = value;
        }
        if let Some(value) = selected_references {
            self.selected_references = value;
        }
        if let Some(value) = llm_tags {
            self.llm_tags = value;
        }
        if let Some(value) = ner_tags {
            self.ner_tags = value;
        }
        if let Some(value) = gazetteer_tags {
            self.gazetteer_tags = value;
        }
        if let Some(value) = candidate_tags {
            self.candidate_tags = value;
        }
        if let Some(value) = selected_tags {
            self.selected_tags = value;
        }
        if let Some(value) = revision_round {
            // Monotone: merging never winds the round counter back.
            self.revision_round = self.revision_round.max(value);
        }
        if let Some(value) = needs_revision {
            self.needs_revision = value;
        }
        if let Some(value) = title_approved {
            self.title_review.approved = value;
        }
        if let Some(value) = summary_approved {
            self.summary_review.approved = value;
        }
        if let Some(value) = references_approved {
            self.references_review.approved = value;
        }
        if let Some(value) = title_feedback {
            self.title_review.feedback = value;
        }
        if let Some(value) = summary_feedback {
            self.summary_review.feedback = value;
        }
        if let Some(value) = references_feedback {
            self.references_review.feedback = value;
        }
    }
}

/// Partial state update produced by one node
///
/// `None` means "leave the field alone". Builders cover the fields nodes
/// actually write; the scheduler applies patches in wave order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub brief: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub reference_queries: Option<Vec<String>>,
    pub candidate_references: Option<Vec<Reference>>,
    pub selected_references: Option<Vec<Reference>>,
    pub llm_tags: Option<Vec<Tag>>,
    pub ner_tags: Option<Vec<Tag>>,
    pub gazetteer_tags: Option<Vec<Tag>>,
    pub candidate_tags: Option<Vec<Tag>>,
    pub selected_tags: Option<Vec<Tag>>,
    pub revision_round: Option<u32>,
    pub needs_revision: Option<bool>,
    pub title_approved: Option<bool>,
    pub summary_approved: Option<bool>,
    pub references_approved: Option<bool>,
    pub title_feedback: Option<String>,
    pub summary_feedback: Option<String>,
    pub references_feedback: Option<String>,
}

impl StatePatch {
    /// Empty patch (the skip-rule result)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// With manager brief
    #[inline]
    #[must_use]
    pub fn with_brief(mut self, brief: impl Into<String>) -> Self {
        self.brief = Some(brief.into());
        self
    }

    /// With generated title (clears stale title feedback)
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.title_feedback = Some(String::new());
        self
    }

    /// With generated summary (clears stale summary feedback)
    #[inline]
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self.summary_feedback = Some(String::new());
        self
    }

    /// With reference search queries
    #[inline]
    #[must_use]
    pub fn with_reference_queries(mut self, queries: Vec<String>) -> Self {
        self.reference_queries = Some(queries);
        self
    }

    /// With candidate references
    #[inline]
    #[must_use]
    pub fn with_candidate_references(mut self, references: Vec<Reference>) -> Self {
        self.candidate_references = Some(references);
        self
    }

    /// With selected references
    #[inline]
    #[must_use]
    pub fn with_selected_references(mut self, references: Vec<Reference>) -> Self {
        self.selected_references = Some(references);
        self
    }

    /// With LLM extractor tags
    #[inline]
    #[must_use]
    pub fn with_llm_tags(mut self, tags: Vec<Tag>) -> Self {
        self.llm_tags = Some(tags);
        self
    }

    /// With NER extractor tags
    #[inline]
    #[must_use]
    pub fn with_ner_tags(mut self, tags: Vec<Tag>) -> Self {
        self.ner_tags = Some(tags);
        self
    }

    /// With gazetteer extractor tags
    #[inline]
    #[must_use]
    pub fn with_gazetteer_tags(mut self, tags: Vec<Tag>) -> Self {
        self.gazetteer_tags = Some(tags);
        self
    }

    /// With aggregated candidate tags
    #[inline]
    #[must_use]
    pub fn with_candidate_tags(mut self, tags: Vec<Tag>) -> Self {
        self.candidate_tags = Some(tags);
        self
    }

    /// With selected tags
    #[inline]
    #[must_use]
    pub fn with_selected_tags(mut self, tags: Vec<Tag>) -> Self {
        self.selected_tags = Some(tags);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_state() -> WorkflowState {
        WorkflowState::new("A paper about GANs.", &DraftConfig::default())
    }

    #[test]
    fn input_text_rejects_blank() {
        let state = WorkflowState::new("   ", &DraftConfig::default());
        assert!(state.input_text().is_err());
    }

    #[test]
    fn input_text_accepts_content() {
        let state = test_state();
        assert_eq!(state.input_text().unwrap(), "A paper about GANs.");
    }

    #[test]
    fn apply_merges_disjoint_patches() {
        let mut state = test_state();
        state.apply(StatePatch::empty().with_title("Title A"));
        state.apply(StatePatch::empty().with_summary("Summary B"));

        assert_eq!(state.title.as_deref(), Some("Title A"));
        assert_eq!(state.summary.as_deref(), Some("Summary B"));
    }

    #[test]
    fn apply_empty_patch_changes_nothing() {
        let mut state = test_state();
        let before = state.clone();
        state.apply(StatePatch::empty());

        assert_eq!(state.title, before.title);
        assert_eq!(state.revision_round, before.revision_round);
        assert_eq!(state.needs_revision, before.needs_revision);
    }

    #[test]
    fn with_title_resets_feedback() {
        let mut state = test_state();
        state.title_review.feedback = "too vague".to_string();

        state.apply(StatePatch::empty().with_title("A Sharper Title"));

        assert_eq!(state.title_review.feedback, "");
        assert_eq!(state.title.as_deref(), Some("A Sharper Title"));
    }

    #[test]
    fn revision_round_is_monotone() {
        let mut state = test_state();
        state.apply(StatePatch {
            revision_round: Some(2),
            ..StatePatch::default()
        });
        state.apply(StatePatch {
            revision_round: Some(1),
            ..StatePatch::default()
        });
        assert_eq!(state.revision_round, 2);
    }

    #[test]
    fn review_accessor_matches_component() {
        let mut state = test_state();
        state.summary_review.approved = true;

        assert!(state.is_approved(Component::Summary));
        assert!(!state.is_approved(Component::Title));
        assert!(!state.is_approved(Component::References));
    }

    #[test]
    fn patch_is_empty_detects_changes() {
        assert!(StatePatch::empty().is_empty());
        assert!(!StatePatch::empty().with_brief("brief").is_empty());
    }
}
