//! Structured payloads returned by the text-generation capability
//!
//! Mirrors of the schemas the structured `invoke` variant is asked to fill.
//! Fields the backend may omit are optional here and normalized at the node
//! boundary (a missing tag type becomes the empty string, never an error).

use drafter_state::CapabilityError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Deserialize a structured response into a payload type
///
/// # Errors
/// `CapabilityError::MalformedResponse` when the JSON does not match.
pub fn parse_payload<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, CapabilityError> {
    serde_json::from_value(value).map_err(|e| CapabilityError::MalformedResponse(e.to_string()))
}

/// One extracted or selected tag entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPayload {
    /// Entity name; entries without one are dropped
    #[serde(default)]
    pub name: Option<String>,
    /// Entity type; missing types are coerced to empty
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Entity list wrapper (`{"entities": [...]}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityList {
    /// Extracted entities; may be empty
    #[serde(default)]
    pub entities: Vec<EntityPayload>,
}

/// Search query list wrapper (`{"queries": [...]}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQueryList {
    /// Proposed search queries
    #[serde(default)]
    pub queries: Vec<String>,
}

/// One selected reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePayload {
    /// Reference URL
    #[serde(default)]
    pub url: String,
    /// Reference title
    #[serde(default)]
    pub title: String,
    /// Reference page content
    #[serde(default)]
    pub content: String,
}

/// Reference list wrapper (`{"references": [...]}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceList {
    /// Selected references
    #[serde(default)]
    pub references: Vec<ReferencePayload>,
}

/// Reviewer verdict: per-component approval plus feedback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPayload {
    /// Whether the title is approved
    pub title_approved: bool,
    /// Specific feedback for the title
    #[serde(default)]
    pub title_feedback: String,
    /// Whether the summary is approved
    pub summary_approved: bool,
    /// Specific feedback for the summary
    #[serde(default)]
    pub summary_feedback: String,
    /// Whether the references are approved
    pub references_approved: bool,
    /// Specific feedback for the references
    #[serde(default)]
    pub references_feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_list_tolerates_missing_type() {
        let parsed: EntityList =
            parse_payload(json!({"entities": [{"name": "gan"}, {"name": "bert", "type": null}]}))
                .unwrap();
        assert_eq!(parsed.entities.len(), 2);
        assert_eq!(parsed.entities[0].kind, None);
    }

    #[test]
    fn entity_list_defaults_to_empty() {
        let parsed: EntityList = parse_payload(json!({})).unwrap();
        assert!(parsed.entities.is_empty());
    }

    #[test]
    fn review_payload_round_trips() {
        let parsed: ReviewPayload = parse_payload(json!({
            "title_approved": true,
            "title_feedback": "",
            "summary_approved": false,
            "summary_feedback": "too long",
            "references_approved": true,
            "references_feedback": ""
        }))
        .unwrap();
        assert!(parsed.title_approved);
        assert!(!parsed.summary_approved);
        assert_eq!(parsed.summary_feedback, "too long");
    }

    #[test]
    fn parse_payload_reports_malformed_json() {
        let result: Result<ReviewPayload, _> = parse_payload(json!({"title_approved": "yes"}));
        assert!(matches!(
            result,
            Err(CapabilityError::MalformedResponse(_))
        ));
    }
}
