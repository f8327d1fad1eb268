//! Modular prompt construction
//!
//! Prompts are assembled from a typed `PromptSpec` instead of string
//! templates scattered through the nodes. Reasoning-strategy templates are
//! loaded once into an immutable `ReasoningStrategies` map and passed in
//! explicitly; there is no ambient global lookup.

use drafter_state::CapabilityError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named reasoning-strategy templates appended to prompts on request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningStrategies {
    /// Strategy name to template text
    #[serde(default)]
    pub reasoning_strategies: HashMap<String, String>,
}

impl ReasoningStrategies {
    /// Empty strategy map
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load strategies from YAML (`reasoning_strategies:` mapping)
    ///
    /// # Errors
    /// `CapabilityError::MalformedResponse` on parse failure.
    pub fn from_yaml(yaml: &str) -> Result<Self, CapabilityError> {
        serde_yaml::from_str(yaml).map_err(|e| CapabilityError::MalformedResponse(e.to_string()))
    }

    /// Look up a strategy template by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.reasoning_strategies.get(name).map(String::as_str)
    }
}

/// Modular prompt components for one agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSpec {
    /// Persona ("You are ...")
    #[serde(default)]
    pub role: Option<String>,
    /// Task statement; the one required component
    #[serde(default)]
    pub instruction: Vec<String>,
    /// Background context
    #[serde(default)]
    pub context: Option<String>,
    /// Hard rules the response must follow
    #[serde(default)]
    pub output_constraints: Vec<String>,
    /// Style and tone guidance
    #[serde(default)]
    pub style_or_tone: Vec<String>,
    /// Response structure guidance
    #[serde(default)]
    pub output_format: Vec<String>,
    /// Few-shot examples
    #[serde(default)]
    pub examples: Vec<String>,
    /// Outcome statement
    #[serde(default)]
    pub goal: Option<String>,
    /// Name of a reasoning-strategy template to append
    #[serde(default)]
    pub reasoning_strategy: Option<String>,
}

impl PromptSpec {
    /// Create a spec with the required instruction
    #[must_use]
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: vec![instruction.into()],
            ..Self::default()
        }
    }

    /// With persona
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// With background context
    #[inline]
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// With response rules
    #[inline]
    #[must_use]
    pub fn with_output_constraints(mut self, constraints: Vec<String>) -> Self {
        self.output_constraints = constraints;
        self
    }

    /// With goal statement
    #[inline]
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// With a reasoning-strategy name
    #[inline]
    #[must_use]
    pub fn with_reasoning_strategy(mut self, name: impl Into<String>) -> Self {
        self.reasoning_strategy = Some(name.into());
        self
    }

    /// Build the system-prompt text (no trailing task cue)
    ///
    /// # Errors
    /// `CapabilityError::Prompt` when the instruction is missing.
    pub fn build_system_prompt(
        &self,
        strategies: &ReasoningStrategies,
    ) -> Result<String, CapabilityError> {
        self.build_body(strategies, None, false)
    }

    /// Build a one-shot prompt embedding the input content
    ///
    /// # Errors
    /// `CapabilityError::Prompt` when the instruction is missing.
    pub fn build_one_shot(
        &self,
        input_data: &str,
        strategies: &ReasoningStrategies,
    ) -> Result<String, CapabilityError> {
        self.build_body(strategies, Some(input_data), true)
    }

    fn build_body(
        &self,
        strategies: &ReasoningStrategies,
        input_data: Option<&str>,
        finalize: bool,
    ) -> Result<String, CapabilityError> {
        if self.instruction.iter().all(|line| line.trim().is_empty()) {
            return Err(CapabilityError::Prompt(
                "missing required field: 'instruction'".to_string(),
            ));
        }

        let mut parts = Vec::new();

        if let Some(role) = &self.role {
            parts.push(format!("You are {}.", lowercase_first_char(role.trim())));
        }

        parts.push(format_section(
            "Your task is as follows:",
            &self.instruction,
        ));

        if let Some(context) = &self.context {
            parts.push(format!(
                "Here's some background that may help you:\n{context}"
            ));
        }

        if !self.output_constraints.is_empty() {
            parts.push(format_section(
                "Ensure your response follows these rules:",
                &self.output_constraints,
            ));
        }

        if !self.style_or_tone.is_empty() {
            parts.push(format_section(
                "Follow these style and tone guidelines in your response:",
                &self.style_or_tone,
            ));
        }

        if !self.output_format.is_empty() {
            parts.push(format_section(
                "Structure your response as follows:",
                &self.output_format,
            ));
        }

        if !self.examples.is_empty() {
            parts.push("Here are some examples to guide your response:".to_string());
            for (i, example) in self.examples.iter().enumerate() {
                parts.push(format!("Example {}:\n{example}", i + 1));
            }
        }

        if let Some(goal) = &self.goal {
            parts.push(format!(
                "Your goal is to achieve the following outcome:\n{goal}"
            ));
        }

        if let Some(input) = input_data {
            if !input.is_empty() {
                parts.push(format!(
                    "Here is the content you need to work with:\n<<<BEGIN CONTENT>>>\n```\n{}\n```\n<<<END CONTENT>>>",
                    input.trim()
                ));
            }
        }

        if let Some(name) = &self.reasoning_strategy {
            if let Some(template) = strategies.get(name) {
                parts.push(template.trim().to_string());
            }
        }

        if finalize {
            parts.push("Now perform the task as instructed above.".to_string());
        }

        Ok(parts.join("\n\n"))
    }
}

/// Lowercase the first character of a string
#[must_use]
fn lowercase_first_char(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join a lead-in with content; multiple items become a bullet list
#[must_use]
fn format_section(lead_in: &str, items: &[String]) -> String {
    let formatted = if items.len() == 1 {
        items[0].clone()
    } else {
        items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("{lead_in}\n{formatted}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_includes_role_and_instruction() {
        let spec = PromptSpec::new("Summarize the document.")
            .with_role("An experienced technical editor");
        let prompt = spec.build_system_prompt(&ReasoningStrategies::empty()).unwrap();

        assert!(prompt.starts_with("You are an experienced technical editor."));
        assert!(prompt.contains("Your task is as follows:\nSummarize the document."));
        assert!(!prompt.contains("Now perform the task"));
    }

    #[test]
    fn one_shot_prompt_embeds_content_and_cue() {
        let spec = PromptSpec::new("Summarize the document.");
        let prompt = spec
            .build_one_shot("Some text.", &ReasoningStrategies::empty())
            .unwrap();

        assert!(prompt.contains("<<<BEGIN CONTENT>>>"));
        assert!(prompt.contains("Some text."));
        assert!(prompt.ends_with("Now perform the task as instructed above."));
    }

    #[test]
    fn missing_instruction_is_an_error() {
        let spec = PromptSpec::default();
        assert!(matches!(
            spec.build_system_prompt(&ReasoningStrategies::empty()),
            Err(CapabilityError::Prompt(_))
        ));
    }

    #[test]
    fn multiple_constraints_become_bullets() {
        let spec = PromptSpec::new("Do the task.").with_output_constraints(vec![
            "Be brief".to_string(),
            "Be precise".to_string(),
        ]);
        let prompt = spec.build_system_prompt(&ReasoningStrategies::empty()).unwrap();
        assert!(prompt.contains("- Be brief\n- Be precise"));
    }

    #[test]
    fn reasoning_strategy_appended_when_known() {
        let strategies = ReasoningStrategies::from_yaml(
            "reasoning_strategies:\n  cot: \"Think step by step.\"\n",
        )
        .unwrap();
        let spec = PromptSpec::new("Do the task.").with_reasoning_strategy("cot");
        let prompt = spec.build_system_prompt(&strategies).unwrap();
        assert!(prompt.ends_with("Think step by step."));
    }

    #[test]
    fn unknown_reasoning_strategy_is_ignored() {
        let spec = PromptSpec::new("Do the task.").with_reasoning_strategy("nope");
        let prompt = spec.build_system_prompt(&ReasoningStrategies::empty()).unwrap();
        assert!(prompt.ends_with("Do the task."));
    }
}
