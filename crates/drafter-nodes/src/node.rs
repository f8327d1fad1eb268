//! Node contract and graph vocabulary

use drafter_state::{StatePatch, WorkflowError, WorkflowState};

/// Every node of the drafting graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Brief generator gating the content generators
    Manager,
    /// Title generator
    TitleGenerator,
    /// Summary generator
    SummaryGenerator,
    /// Proposes reference search queries
    ReferenceQueryGenerator,
    /// Executes queries against the search capability
    ReferenceResolver,
    /// Filters candidates down to at most `max_references`
    ReferenceSelector,
    /// LLM-driven tag extractor
    LlmTagExtractor,
    /// Named-entity tag extractor
    NerTagExtractor,
    /// Re-types the NER extractor's output
    TagTypeAssigner,
    /// Dictionary-driven tag extractor
    GazetteerTagExtractor,
    /// Merges the three tag sources
    TagAggregator,
    /// Filters candidates down to at most `max_tags`
    TagSelector,
    /// Evaluates title, summary, and references together
    Reviewer,
}

impl NodeKind {
    /// All nodes, in deterministic scheduling order
    pub const ALL: [NodeKind; 13] = [
        NodeKind::Manager,
        NodeKind::LlmTagExtractor,
        NodeKind::NerTagExtractor,
        NodeKind::GazetteerTagExtractor,
        NodeKind::TagTypeAssigner,
        NodeKind::TagAggregator,
        NodeKind::TagSelector,
        NodeKind::TitleGenerator,
        NodeKind::SummaryGenerator,
        NodeKind::ReferenceQueryGenerator,
        NodeKind::ReferenceResolver,
        NodeKind::ReferenceSelector,
        NodeKind::Reviewer,
    ];

    /// Stable snake_case name used in logs and error stages
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Manager => "manager",
            NodeKind::TitleGenerator => "title_generator",
            NodeKind::SummaryGenerator => "summary_generator",
            NodeKind::ReferenceQueryGenerator => "reference_query_generator",
            NodeKind::ReferenceResolver => "reference_resolver",
            NodeKind::ReferenceSelector => "reference_selector",
            NodeKind::LlmTagExtractor => "llm_tag_extractor",
            NodeKind::NerTagExtractor => "ner_tag_extractor",
            NodeKind::TagTypeAssigner => "tag_type_assigner",
            NodeKind::GazetteerTagExtractor => "gazetteer_tag_extractor",
            NodeKind::TagAggregator => "tag_aggregator",
            NodeKind::TagSelector => "tag_selector",
            NodeKind::Reviewer => "reviewer",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Uniform node contract
///
/// A node reads the state and returns a partial update. Nodes never mutate
/// the state directly; the scheduler merges patches after each wave, so
/// concurrently-running nodes must write disjoint fields.
#[async_trait::async_trait]
pub trait WorkflowNode: Send + Sync {
    /// Which node this is
    fn kind(&self) -> NodeKind;

    /// Execute the node against a read-only state view
    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError>;
}
