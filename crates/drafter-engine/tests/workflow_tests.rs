//! End-to-end drafting runs over scripted capabilities

use drafter_capability::{ExtractedEntity, Gazetteer, ReasoningStrategies, SearchHit};
use drafter_engine::{Capabilities, DraftingSystem};
use drafter_state::{DraftConfig, Tag, TagType, WorkflowError};
use drafter_test_utils::{RoutedGenerator, ScriptedSearchProvider, StaticEntityExtractor};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

const INPUT: &str = "We evaluate GAN image synthesis with PyTorch on new benchmarks.";

fn config() -> DraftConfig {
    DraftConfig::default().with_tag_types(vec![
        TagType::new("algorithm", "A named method or model family"),
        TagType::new("tool", "A software package or framework"),
        TagType::new("task", "A problem being solved"),
    ])
}

/// Routes for every agent except the reviewer
fn base_routes(generator: RoutedGenerator) -> RoutedGenerator {
    generator
        .route_text("editorial manager", "Focus on the evaluation angle.")
        .route_text("precise, engaging titles", "GANs Under the Microscope")
        .route_text("distills long texts", "A careful look at GAN evaluation.")
        .route_json(
            "Propose web search queries",
            json!({"queries": ["gan evaluation benchmarks"]}),
        )
        .route_json(
            "Select the most relevant references",
            json!({"references": [{
                "url": "https://example.org/gan-eval",
                "title": "GAN Evaluation",
                "content": "A survey of GAN evaluation metrics."
            }]}),
        )
        .route_json(
            "Extract domain tags",
            json!({"entities": [
                {"name": "GAN", "type": "Algorithm"},
                {"name": "image synthesis", "type": "task"}
            ]}),
        )
        .route_json(
            "Assign each given tag",
            json!({"entities": [{"name": "pytorch", "type": "tool"}]}),
        )
        .route_json(
            "Select the most important tags",
            json!({"entities": [
                {"name": "gan", "type": "algorithm"},
                {"name": "image synthesis", "type": "task"},
                {"name": "pytorch", "type": "tool"}
            ]}),
        )
}

fn capabilities(generator: RoutedGenerator) -> Capabilities {
    Capabilities {
        generator: Arc::new(generator),
        entity_extractor: Arc::new(StaticEntityExtractor::new(vec![
            ExtractedEntity::new("PyTorch", "PRODUCT"),
            ExtractedEntity::new("2024", "DATE"),
        ])),
        search: Arc::new(ScriptedSearchProvider::with_results(vec![(
            "gan evaluation benchmarks",
            vec![SearchHit::new(
                "https://example.org/gan-eval",
                "GAN Evaluation",
                "A survey of GAN evaluation metrics.",
            )],
        )])),
        gazetteer: Gazetteer::new(vec![("GAN", "algorithm"), ("PyTorch", "tool")]),
    }
}

fn system(generator: RoutedGenerator, config: DraftConfig) -> DraftingSystem {
    DraftingSystem::new(capabilities(generator), config, &ReasoningStrategies::empty()).unwrap()
}

#[tokio::test]
async fn happy_path_drafts_every_component() {
    let generator = base_routes(RoutedGenerator::new()).route_json(
        "Review the drafted title",
        json!({
            "title_approved": true,
            "summary_approved": true,
            "references_approved": true
        }),
    );
    let system = system(generator, config());

    let result = system.draft(INPUT).await.unwrap();

    assert_eq!(result.title, "GANs Under the Microscope");
    assert_eq!(result.summary, "A careful look at GAN evaluation.");
    assert_eq!(result.revision_rounds, 1);
    assert_eq!(
        result.selected_tags,
        vec![
            Tag::new("gan", "algorithm"),
            Tag::new("image synthesis", "task"),
            Tag::new("pytorch", "tool"),
        ]
    );
    assert_eq!(result.selected_references.len(), 1);
    assert_eq!(result.selected_references[0].url, "https://example.org/gan-eval");
}

#[tokio::test]
async fn duplicate_tags_collapse_across_sources() {
    // The gazetteer repeats what the LLM and NER branches already found;
    // the candidate set offered to the selector holds each identity once.
    let generator = base_routes(RoutedGenerator::new()).route_json(
        "Review the drafted title",
        json!({
            "title_approved": true,
            "summary_approved": true,
            "references_approved": true
        }),
    );
    let system = system(generator, config());

    let result = system.draft(INPUT).await.unwrap();

    let mut identities: Vec<_> = result.selected_tags.iter().map(Tag::identity).collect();
    let total = identities.len();
    identities.sort();
    identities.dedup();
    assert_eq!(identities.len(), total);
    // DATE entities never survive the NER branch.
    assert!(result.selected_tags.iter().all(|tag| tag.name != "2024"));
}

#[tokio::test]
async fn rejected_title_is_revised_once() {
    let generator = RoutedGenerator::new()
        // Revision round only: the title generator sees this feedback.
        .route_text("Mention the dataset", "GANs Under the Microscope, Revisited")
        // Second review sees the revised title and approves.
        .route_json(
            "Revisited",
            json!({
                "title_approved": true,
                "summary_approved": true,
                "references_approved": true
            }),
        );
    let generator = base_routes(generator).route_json(
        "Review the drafted title",
        json!({
            "title_approved": false,
            "title_feedback": "Mention the dataset",
            "summary_approved": true,
            "references_approved": true
        }),
    );
    let system = system(generator, config());

    let result = system.draft(INPUT).await.unwrap();

    assert_eq!(result.title, "GANs Under the Microscope, Revisited");
    assert_eq!(result.summary, "A careful look at GAN evaluation.");
    assert_eq!(result.revision_rounds, 2);
}

#[tokio::test]
async fn perpetual_rejection_is_cut_off_at_the_cap() {
    let generator = base_routes(RoutedGenerator::new()).route_json(
        "Review the drafted title",
        json!({
            "title_approved": false,
            "title_feedback": "Still not good enough.",
            "summary_approved": false,
            "summary_feedback": "Still not good enough.",
            "references_approved": false,
            "references_feedback": "Still not good enough."
        }),
    );
    let system = system(generator, config().with_max_revisions(2));

    let result = system.draft(INPUT).await.unwrap();

    // Two counted rounds, then the forced pass ends the loop without
    // another verdict.
    assert_eq!(result.revision_rounds, 2);
    assert_eq!(result.title, "GANs Under the Microscope");
}

#[tokio::test]
async fn blank_input_fails_before_any_capability_call() {
    let generator = RoutedGenerator::new();
    let system = system(generator, config());

    let err = system.draft("   \n  ").await.unwrap_err();

    assert!(matches!(err, WorkflowError::InvalidInput(_)));
}

#[tokio::test]
async fn search_failure_still_produces_a_draft() {
    let generator = base_routes(RoutedGenerator::new()).route_json(
        "Review the drafted title",
        json!({
            "title_approved": true,
            "summary_approved": true,
            "references_approved": true
        }),
    );
    let mut capabilities = capabilities(generator);
    capabilities.search = Arc::new(
        ScriptedSearchProvider::empty().failing_on("gan evaluation benchmarks"),
    );
    let system =
        DraftingSystem::new(capabilities, config(), &ReasoningStrategies::empty()).unwrap();

    let result = system.draft(INPUT).await.unwrap();

    assert_eq!(result.title, "GANs Under the Microscope");
    assert!(result.selected_references.is_empty());
}
