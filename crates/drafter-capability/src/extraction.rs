//! Named-entity extraction capability contract

use drafter_state::CapabilityError;
use serde::{Deserialize, Serialize};

/// One entity span reported by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    /// Surface text of the entity
    pub text: String,
    /// Model label (e.g. ORG, PERSON, DATE)
    pub label: String,
}

impl ExtractedEntity {
    /// Create a new entity span
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// External named-entity model
///
/// Label exclusions (dates, bare numbers) are applied by the caller after
/// extraction, not inside the capability.
#[async_trait::async_trait]
pub trait EntityExtractor: Send + Sync {
    /// Extract entity spans from text
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>, CapabilityError>;
}
