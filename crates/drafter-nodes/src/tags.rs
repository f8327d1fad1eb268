//! Tag extraction, type assignment, and selection
//!
//! Three mutually independent extractors feed the aggregator: an LLM
//! extractor, a named-entity extractor (whose output the type assigner
//! re-labels), and a gazetteer scan. The selector then caps the merged
//! candidate set.

use crate::context::{begin_task_message, input_text_message};
use crate::node::{NodeKind, WorkflowNode};
use drafter_capability::{parse_payload, EntityExtractor, EntityList, Gazetteer, Message, TextGenerator};
use drafter_state::{StatePatch, Tag, WorkflowError, WorkflowState};
use std::collections::HashSet;
use std::sync::Arc;

/// Normalize a structured entity payload into tags
///
/// Entries without a name are dropped; a missing type is coerced to the
/// empty string rather than raised.
fn clean_entities(payload: EntityList) -> Vec<Tag> {
    payload
        .entities
        .into_iter()
        .filter_map(|entity| {
            let name = entity.name?.trim().to_lowercase();
            if name.is_empty() {
                return None;
            }
            let kind = entity
                .kind
                .unwrap_or_default()
                .trim()
                .to_lowercase();
            Some(Tag::new(name, kind))
        })
        .collect()
}

/// LLM-driven tag extractor
pub struct LlmTagExtractorNode {
    generator: Arc<dyn TextGenerator>,
    system: Vec<Message>,
}

impl LlmTagExtractorNode {
    /// Create the extractor with its system messages (tag-type listing included)
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, system: Vec<Message>) -> Self {
        Self { generator, system }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for LlmTagExtractorNode {
    fn kind(&self) -> NodeKind {
        NodeKind::LlmTagExtractor
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let input = input_text_message(state)?;

        tracing::info!(run_id = %state.run_id, "extracting tags via generation");
        let mut messages = self.system.clone();
        messages.push(input);
        messages.push(begin_task_message());

        let value = self
            .generator
            .invoke_structured(&messages)
            .await
            .map_err(|e| WorkflowError::capability(self.kind().name(), e))?;
        let payload: EntityList =
            parse_payload(value).map_err(|e| WorkflowError::capability(self.kind().name(), e))?;

        Ok(StatePatch::empty().with_llm_tags(clean_entities(payload)))
    }
}

/// Named-entity tag extractor
///
/// Deduplicates by `(lowercase(text), label)` and drops excluded labels
/// (dates and bare numbers by default). Labels are kept verbatim here; the
/// type assigner re-labels them downstream.
pub struct NerTagExtractorNode {
    extractor: Arc<dyn EntityExtractor>,
    excluded_labels: HashSet<String>,
}

impl NerTagExtractorNode {
    /// Create the extractor with its label exclusion set
    #[must_use]
    pub fn new(extractor: Arc<dyn EntityExtractor>, excluded_labels: Vec<String>) -> Self {
        Self {
            extractor,
            excluded_labels: excluded_labels.into_iter().collect(),
        }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for NerTagExtractorNode {
    fn kind(&self) -> NodeKind {
        NodeKind::NerTagExtractor
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let text = state.input_text()?;

        tracing::info!(run_id = %state.run_id, "extracting named entities");
        let entities = self
            .extractor
            .extract(text)
            .await
            .map_err(|e| WorkflowError::capability(self.kind().name(), e))?;

        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for entity in entities {
            if self.excluded_labels.contains(&entity.label) {
                continue;
            }
            let key = (entity.text.to_lowercase(), entity.label.clone());
            if seen.insert(key) {
                tags.push(Tag::new(
                    entity.text.trim().to_lowercase(),
                    entity.label.trim(),
                ));
            }
        }

        Ok(StatePatch::empty().with_ner_tags(tags))
    }
}

/// Re-labels the NER extractor's output via structured generation
pub struct TagTypeAssignerNode {
    generator: Arc<dyn TextGenerator>,
    system: Vec<Message>,
}

impl TagTypeAssignerNode {
    /// Create the assigner with its system messages (tag-type listing included)
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, system: Vec<Message>) -> Self {
        Self { generator, system }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for TagTypeAssignerNode {
    fn kind(&self) -> NodeKind {
        NodeKind::TagTypeAssigner
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let names: Vec<&str> = state
            .ner_tags
            .iter()
            .map(|tag| tag.name.trim())
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            tracing::debug!(run_id = %state.run_id, "no entities to type, skipping assigner");
            return Ok(StatePatch::empty().with_ner_tags(Vec::new()));
        }

        tracing::info!(run_id = %state.run_id, count = names.len(), "assigning tag types");
        let mut messages = self.system.clone();
        messages.push(Message::human(format!(
            "Assign tag types to the following tags:\n {}",
            names.join(", ")
        )));

        let value = self
            .generator
            .invoke_structured(&messages)
            .await
            .map_err(|e| WorkflowError::capability(self.kind().name(), e))?;
        let payload: EntityList =
            parse_payload(value).map_err(|e| WorkflowError::capability(self.kind().name(), e))?;

        Ok(StatePatch::empty().with_ner_tags(clean_entities(payload)))
    }
}

/// Dictionary-driven tag extractor
pub struct GazetteerTagExtractorNode {
    gazetteer: Gazetteer,
}

impl GazetteerTagExtractorNode {
    /// Create the extractor over an immutable gazetteer table
    #[must_use]
    pub fn new(gazetteer: Gazetteer) -> Self {
        Self { gazetteer }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for GazetteerTagExtractorNode {
    fn kind(&self) -> NodeKind {
        NodeKind::GazetteerTagExtractor
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let text = state.input_text()?;
        let tags = self.gazetteer.matches(text);
        tracing::info!(run_id = %state.run_id, matches = tags.len(), "scanned gazetteer");
        Ok(StatePatch::empty().with_gazetteer_tags(tags))
    }
}

/// Filters candidate tags down to at most `max_tags`
pub struct TagSelectorNode {
    generator: Arc<dyn TextGenerator>,
    system: Vec<Message>,
    max_tags: usize,
}

impl TagSelectorNode {
    /// Create the selector
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, system: Vec<Message>, max_tags: usize) -> Self {
        Self {
            generator,
            system,
            max_tags,
        }
    }
}

#[async_trait::async_trait]
impl WorkflowNode for TagSelectorNode {
    fn kind(&self) -> NodeKind {
        NodeKind::TagSelector
    }

    async fn run(&self, state: &WorkflowState) -> Result<StatePatch, WorkflowError> {
        let candidates = &state.candidate_tags;
        if candidates.is_empty() || self.max_tags == 0 {
            return Ok(StatePatch::empty().with_selected_tags(Vec::new()));
        }

        tracing::info!(run_id = %state.run_id, candidates = candidates.len(), "selecting tags");
        let listing = candidates
            .iter()
            .map(|tag| format!("- {} ({})", tag.name, tag.kind))
            .collect::<Vec<_>>()
            .join("\n");
        let mut messages = self.system.clone();
        messages.push(Message::human(format!(
            "Here is the list of candidate tags (name and type):\n{listing}\n\n\
             Please return a refined list of the most important tags (maximum {}).",
            self.max_tags
        )));

        let value = self
            .generator
            .invoke_structured(&messages)
            .await
            .map_err(|e| WorkflowError::capability(self.kind().name(), e))?;
        let payload: EntityList =
            parse_payload(value).map_err(|e| WorkflowError::capability(self.kind().name(), e))?;

        let mut selected = clean_entities(payload);
        selected.truncate(self.max_tags);
        Ok(StatePatch::empty().with_selected_tags(selected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drafter_capability::ExtractedEntity;
    use drafter_state::DraftConfig;
    use drafter_test_utils::{ScriptedGenerator, StaticEntityExtractor};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn state() -> WorkflowState {
        WorkflowState::new("We trained a GAN with PyTorch.", &DraftConfig::default())
    }

    fn system() -> Vec<Message> {
        vec![Message::system("You are a tag agent.")]
    }

    #[tokio::test]
    async fn llm_extractor_normalizes_and_drops_nameless() {
        let generator = Arc::new(ScriptedGenerator::with_structured(vec![json!({
            "entities": [
                {"name": " GAN ", "type": " Algorithm "},
                {"name": "", "type": "tool"},
                {"name": "PyTorch"}
            ]
        })]));
        let node = LlmTagExtractorNode::new(generator, system());

        let patch = node.run(&state()).await.unwrap();

        assert_eq!(
            patch.llm_tags,
            Some(vec![Tag::new("gan", "algorithm"), Tag::new("pytorch", "")])
        );
    }

    #[tokio::test]
    async fn ner_extractor_excludes_labels_and_dedups() {
        let extractor = Arc::new(StaticEntityExtractor::new(vec![
            ExtractedEntity::new("OpenAI", "ORG"),
            ExtractedEntity::new("openai", "ORG"),
            ExtractedEntity::new("2024", "DATE"),
            ExtractedEntity::new("three", "CARDINAL"),
        ]));
        let node = NerTagExtractorNode::new(
            extractor,
            vec!["DATE".to_string(), "CARDINAL".to_string()],
        );

        let patch = node.run(&state()).await.unwrap();

        assert_eq!(patch.ner_tags, Some(vec![Tag::new("openai", "ORG")]));
    }

    #[tokio::test]
    async fn assigner_skips_without_entities() {
        let generator = Arc::new(ScriptedGenerator::with_structured(vec![json!({})]));
        let node = TagTypeAssignerNode::new(generator.clone(), system());

        let patch = node.run(&state()).await.unwrap();

        assert_eq!(patch.ner_tags, Some(Vec::new()));
        assert_eq!(generator.structured_calls(), 0);
    }

    #[tokio::test]
    async fn assigner_relabels_ner_tags() {
        let generator = Arc::new(ScriptedGenerator::with_structured(vec![json!({
            "entities": [{"name": "openai", "type": "Organization"}]
        })]));
        let node = TagTypeAssignerNode::new(generator, system());
        let mut state = state();
        state.ner_tags = vec![Tag::new("openai", "ORG")];

        let patch = node.run(&state).await.unwrap();

        assert_eq!(patch.ner_tags, Some(vec![Tag::new("openai", "organization")]));
    }

    #[tokio::test]
    async fn gazetteer_extractor_tags_matches() {
        let gazetteer = Gazetteer::new(vec![("GAN", "algorithm"), ("PyTorch", "tool")]);
        let node = GazetteerTagExtractorNode::new(gazetteer);

        let patch = node.run(&state()).await.unwrap();

        assert_eq!(
            patch.gazetteer_tags,
            Some(vec![Tag::new("gan", "algorithm"), Tag::new("pytorch", "tool")])
        );
    }

    #[tokio::test]
    async fn selector_short_circuits_on_empty_candidates() {
        let generator = Arc::new(ScriptedGenerator::with_structured(vec![json!({})]));
        let node = TagSelectorNode::new(generator.clone(), system(), 5);

        let patch = node.run(&state()).await.unwrap();

        assert_eq!(patch.selected_tags, Some(Vec::new()));
        assert_eq!(generator.structured_calls(), 0);
    }

    #[tokio::test]
    async fn selector_caps_results() {
        let generator = Arc::new(ScriptedGenerator::with_structured(vec![json!({
            "entities": [
                {"name": "gan", "type": "algorithm"},
                {"name": "pytorch", "type": "tool"},
                {"name": "bert", "type": "model"}
            ]
        })]));
        let node = TagSelectorNode::new(generator, system(), 2);
        let mut state = state();
        state.candidate_tags = vec![
            Tag::new("gan", "algorithm"),
            Tag::new("pytorch", "tool"),
            Tag::new("bert", "model"),
        ];

        let patch = node.run(&state).await.unwrap();

        assert_eq!(patch.selected_tags.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn selector_zero_cap_returns_empty_without_calls() {
        let generator = Arc::new(ScriptedGenerator::with_structured(vec![json!({})]));
        let node = TagSelectorNode::new(generator.clone(), system(), 0);
        let mut state = state();
        state.candidate_tags = vec![Tag::new("gan", "algorithm")];

        let patch = node.run(&state).await.unwrap();

        assert_eq!(patch.selected_tags, Some(Vec::new()));
        assert_eq!(generator.structured_calls(), 0);
    }
}
