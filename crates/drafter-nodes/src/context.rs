//! Message assembly shared across the LLM-backed nodes

use drafter_capability::Message;
use drafter_state::{Reference, WorkflowError, WorkflowState};

/// Longest slice of reference content embedded into a prompt
const REFERENCE_CONTENT_LIMIT: usize = 5000;

/// The input text as a human message
///
/// # Errors
/// `WorkflowError::InvalidInput` when the text is blank; every generator
/// validates this before touching an external capability.
pub fn input_text_message(state: &WorkflowState) -> Result<Message, WorkflowError> {
    let input_text = state.input_text()?;
    Ok(Message::human(format!(
        "Here's your input text:\n\n{input_text}\n\n"
    )))
}

/// The manager brief as a human message, with a readable placeholder
#[must_use]
pub fn brief_message(state: &WorkflowState) -> Message {
    match state.brief.as_deref() {
        Some(brief) if !brief.trim().is_empty() => Message::human(format!(
            "This is your manager's brief for your review:\n\n{brief}\n\n"
        )),
        _ => Message::human("No manager brief available."),
    }
}

/// Reviewer feedback as a human message, with a readable placeholder
#[must_use]
pub fn feedback_message(feedback: &str) -> Message {
    if feedback.trim().is_empty() {
        Message::human("No reviewer feedback available.\n\n")
    } else {
        Message::human(format!(
            "Following is the review from your reviewer:\n\n{feedback}\n\n"
        ))
    }
}

/// The cue closing every prompt sequence
#[must_use]
pub fn begin_task_message() -> Message {
    Message::human("Now perform your task.\n\n")
}

/// Render references for inclusion in a prompt
///
/// Content is truncated so a long page cannot crowd out the rest of the
/// prompt.
#[must_use]
pub fn format_references(references: &[Reference]) -> String {
    references
        .iter()
        .map(|reference| {
            let content: String = reference.content.chars().take(REFERENCE_CONTENT_LIMIT).collect();
            format!(
                "- Title: {}\n  URL: {}\n  Content:\n{}",
                reference.title, reference.url, content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use drafter_state::DraftConfig;

    fn state_with(brief: Option<&str>) -> WorkflowState {
        let mut state = WorkflowState::new("Some document.", &DraftConfig::default());
        state.brief = brief.map(String::from);
        state
    }

    #[test]
    fn input_text_message_rejects_blank() {
        let state = WorkflowState::new("  ", &DraftConfig::default());
        assert!(input_text_message(&state).is_err());
    }

    #[test]
    fn brief_message_uses_placeholder_when_missing() {
        let message = brief_message(&state_with(None));
        assert_eq!(message.content, "No manager brief available.");

        let message = brief_message(&state_with(Some("   ")));
        assert_eq!(message.content, "No manager brief available.");
    }

    #[test]
    fn brief_message_embeds_brief() {
        let message = brief_message(&state_with(Some("Cover the GAN results.")));
        assert!(message.content.contains("Cover the GAN results."));
    }

    #[test]
    fn feedback_message_uses_placeholder_when_empty() {
        assert!(feedback_message("").content.contains("No reviewer feedback"));
        assert!(feedback_message("tighten the title")
            .content
            .contains("tighten the title"));
    }

    #[test]
    fn format_references_truncates_long_content() {
        let long = "x".repeat(REFERENCE_CONTENT_LIMIT + 100);
        let rendered = format_references(&[Reference::new("https://a", "A", long)]);
        assert!(rendered.len() < REFERENCE_CONTENT_LIMIT + 200);
        assert!(rendered.contains("- Title: A"));
    }
}
