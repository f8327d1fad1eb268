//! Assembled drafting system
//!
//! Wires the full node set to one capability bundle and drives the
//! scheduler over a fresh state per draft.

use crate::prompts;
use crate::scheduler::Scheduler;
use drafter_capability::{
    EntityExtractor, Gazetteer, ReasoningStrategies, SearchProvider, TextGenerator,
};
use drafter_nodes::{
    DraftGenerator, GazetteerTagExtractorNode, LlmTagExtractorNode, ManagerNode,
    NerTagExtractorNode, ReferenceQueryGeneratorNode, ReferenceResolverNode,
    ReferenceSelectorNode, ReviewerNode, TagAggregatorNode, TagSelectorNode, TagTypeAssignerNode,
    WorkflowNode,
};
use drafter_state::{DraftConfig, Reference, Tag, WorkflowError, WorkflowState};
use std::sync::Arc;

/// External capabilities the workflow draws on
#[derive(Clone)]
pub struct Capabilities {
    /// Text and structured generation backend
    pub generator: Arc<dyn TextGenerator>,
    /// Named-entity model
    pub entity_extractor: Arc<dyn EntityExtractor>,
    /// Web-search backend
    pub search: Arc<dyn SearchProvider>,
    /// Dictionary for the gazetteer extractor
    pub gazetteer: Gazetteer,
}

/// Final output of one drafting run
#[derive(Debug, Clone, PartialEq)]
pub struct DraftResult {
    /// Approved title
    pub title: String,
    /// Approved summary
    pub summary: String,
    /// Selected tags
    pub selected_tags: Vec<Tag>,
    /// Selected references
    pub selected_references: Vec<Reference>,
    /// Review rounds consumed before the draft settled
    pub revision_rounds: u32,
}

/// The complete drafting workflow behind one entry point
pub struct DraftingSystem {
    scheduler: Scheduler,
    config: DraftConfig,
}

impl DraftingSystem {
    /// Assemble the workflow from capabilities and configuration
    ///
    /// # Errors
    /// `WorkflowError::Capability` if any default prompt fails to build.
    pub fn new(
        capabilities: Capabilities,
        config: DraftConfig,
        strategies: &ReasoningStrategies,
    ) -> Result<Self, WorkflowError> {
        let generator = &capabilities.generator;
        let system = |spec| prompts::system_messages(&spec, strategies);

        let nodes: Vec<Arc<dyn WorkflowNode>> = vec![
            Arc::new(ManagerNode::new(
                Arc::clone(generator),
                system(prompts::manager_spec())?,
            )),
            Arc::new(DraftGenerator::title(
                Arc::clone(generator),
                system(prompts::title_spec())?,
            )),
            Arc::new(DraftGenerator::summary(
                Arc::clone(generator),
                system(prompts::summary_spec())?,
            )),
            Arc::new(ReferenceQueryGeneratorNode::new(
                Arc::clone(generator),
                system(prompts::query_spec(&config))?,
                config.max_search_queries,
            )),
            Arc::new(ReferenceResolverNode::new(
                Arc::clone(&capabilities.search),
                config.search_results_per_query,
            )),
            Arc::new(ReferenceSelectorNode::new(
                Arc::clone(generator),
                system(prompts::reference_selector_spec(&config))?,
                config.max_references,
            )),
            Arc::new(LlmTagExtractorNode::new(
                Arc::clone(generator),
                system(prompts::llm_tag_spec(&config))?,
            )),
            Arc::new(NerTagExtractorNode::new(
                Arc::clone(&capabilities.entity_extractor),
                config.excluded_entity_labels.clone(),
            )),
            Arc::new(TagTypeAssignerNode::new(
                Arc::clone(generator),
                system(prompts::assigner_spec(&config))?,
            )),
            Arc::new(GazetteerTagExtractorNode::new(
                capabilities.gazetteer.clone(),
            )),
            Arc::new(TagAggregatorNode),
            Arc::new(TagSelectorNode::new(
                Arc::clone(generator),
                system(prompts::tag_selector_spec(&config))?,
                config.max_tags,
            )),
            Arc::new(ReviewerNode::new(
                Arc::clone(generator),
                system(prompts::reviewer_spec())?,
            )),
        ];

        Ok(Self {
            scheduler: Scheduler::new(nodes),
            config,
        })
    }

    /// Draft metadata for one input text
    ///
    /// # Errors
    /// `WorkflowError::InvalidInput` for blank input; capability failures
    /// propagate with their stage name.
    pub async fn draft(&self, input_text: &str) -> Result<DraftResult, WorkflowError> {
        let mut state = WorkflowState::new(input_text, &self.config);
        state.input_text()?;

        tracing::info!(run_id = %state.run_id, "starting drafting run");
        self.scheduler.run(&mut state).await?;
        tracing::info!(
            run_id = %state.run_id,
            rounds = state.revision_round,
            tags = state.selected_tags.len(),
            references = state.selected_references.len(),
            "drafting run finished"
        );

        Ok(DraftResult {
            title: state.title.unwrap_or_default(),
            summary: state.summary.unwrap_or_default(),
            selected_tags: state.selected_tags,
            selected_references: state.selected_references,
            revision_rounds: state.revision_round,
        })
    }
}
