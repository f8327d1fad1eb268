//! Default prompt specs for every agent in the workflow
//!
//! Each function returns the system messages one node is constructed with.
//! Specs are assembled through `PromptSpec` so callers can swap in their own
//! without touching the nodes.

use drafter_capability::{Message, PromptSpec, ReasoningStrategies};
use drafter_state::{DraftConfig, TagType, WorkflowError};

/// Render the configured tag categories as a prompt section
#[must_use]
pub fn tag_type_listing(tag_types: &[TagType]) -> String {
    if tag_types.is_empty() {
        return "No tag types provided.".to_string();
    }
    tag_types
        .iter()
        .map(|tag_type| format!("- **{}**: {}", tag_type.name, tag_type.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the system messages for one agent spec
pub fn system_messages(
    spec: &PromptSpec,
    strategies: &ReasoningStrategies,
) -> Result<Vec<Message>, WorkflowError> {
    let prompt = spec
        .build_system_prompt(strategies)
        .map_err(|e| WorkflowError::capability("prompt_assembly", e))?;
    Ok(vec![Message::system(prompt)])
}

/// Manager brief spec
#[must_use]
pub fn manager_spec() -> PromptSpec {
    PromptSpec::new(
        "Read the input text and write a short brief for the drafting agents: \
         the subject matter, the intended audience, and the angle the title and \
         summary should take.",
    )
    .with_role("An editorial manager coordinating a metadata drafting team")
    .with_goal("A brief the drafting agents can follow without reading the full text.")
}

/// Title generator spec
#[must_use]
pub fn title_spec() -> PromptSpec {
    PromptSpec::new("Write a single title for the input text.")
        .with_role("A copywriter who writes precise, engaging titles")
        .with_output_constraints(vec![
            "Return only the title, with no surrounding quotes or markup.".to_string(),
            "Stay faithful to the input text; do not invent claims.".to_string(),
        ])
}

/// Summary generator spec
#[must_use]
pub fn summary_spec() -> PromptSpec {
    PromptSpec::new("Write a one-paragraph summary of the input text.")
        .with_role("A technical editor who distills long texts")
        .with_output_constraints(vec![
            "Return only the summary paragraph.".to_string(),
            "Cover the main contribution and the key results.".to_string(),
        ])
}

/// Reference query generator spec
pub fn query_spec(config: &DraftConfig) -> PromptSpec {
    PromptSpec::new(
        "Propose web search queries that would surface good supporting \
         references for the input text.",
    )
    .with_role("A research librarian")
    .with_output_constraints(vec![format!(
        "Return at most {} queries as a JSON object with a \"queries\" array of strings.",
        config.max_search_queries
    )])
}

/// Reference selector spec
pub fn reference_selector_spec(config: &DraftConfig) -> PromptSpec {
    PromptSpec::new("Select the most relevant references from the candidate list.")
        .with_role("A research librarian curating citations")
        .with_output_constraints(vec![
            format!(
                "Select at most {} references, only from the candidates given.",
                config.max_references
            ),
            "Return a JSON object with a \"references\" array; each item has \
             \"url\", \"title\", and \"content\"."
                .to_string(),
        ])
}

/// LLM tag extractor spec, with the tag-type catalog embedded
pub fn llm_tag_spec(config: &DraftConfig) -> PromptSpec {
    PromptSpec::new("Extract domain tags from the input text.")
        .with_role("An indexing specialist")
        .with_context(format!(
            "Assign each tag one of these types:\n{}",
            tag_type_listing(&config.tag_types)
        ))
        .with_output_constraints(vec![
            "Return a JSON object with an \"entities\" array; each item has \
             \"name\" and \"type\"."
                .to_string(),
            "Tag names must appear in the input text.".to_string(),
        ])
}

/// Tag type assigner spec, with the tag-type catalog embedded
pub fn assigner_spec(config: &DraftConfig) -> PromptSpec {
    PromptSpec::new("Assign each given tag the best matching tag type.")
        .with_role("An indexing specialist")
        .with_context(format!(
            "Choose types from this catalog:\n{}",
            tag_type_listing(&config.tag_types)
        ))
        .with_output_constraints(vec![
            "Return a JSON object with an \"entities\" array; each item has \
             \"name\" and \"type\"."
                .to_string(),
            "Keep every tag name unchanged.".to_string(),
        ])
}

/// Tag selector spec
pub fn tag_selector_spec(config: &DraftConfig) -> PromptSpec {
    PromptSpec::new("Select the most important tags from the candidate list.")
        .with_role("An indexing specialist curating a tag set")
        .with_output_constraints(vec![
            format!("Select at most {} tags.", config.max_tags),
            "Return a JSON object with an \"entities\" array; each item has \
             \"name\" and \"type\"."
                .to_string(),
        ])
}

/// Reviewer spec
#[must_use]
pub fn reviewer_spec() -> PromptSpec {
    PromptSpec::new(
        "Review the drafted title, summary, and selected references against \
         the input text.",
    )
    .with_role("A demanding editor-in-chief")
    .with_output_constraints(vec![
        "Return a JSON object with \"title_approved\", \"summary_approved\", and \
         \"references_approved\" booleans, plus \"title_feedback\", \
         \"summary_feedback\", and \"references_feedback\" strings."
            .to_string(),
        "Give concrete, actionable feedback for anything you reject.".to_string(),
    ])
}
