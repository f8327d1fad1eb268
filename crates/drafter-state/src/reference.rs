//! Reference domain type

use serde::{Deserialize, Serialize};

/// A candidate or selected reference document
///
/// Identity is the `url`; title and content exist for review and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Source URL (identity)
    pub url: String,
    /// Document title
    pub title: String,
    /// Retrieved page content
    pub content: String,
}

impl Reference {
    /// Create a new reference
    #[inline]
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Whether any required field is empty
    #[inline]
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.url.is_empty() || self.title.is_empty() || self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_incomplete_when_content_missing() {
        let reference = Reference::new("https://example.com", "Example", "");
        assert!(reference.is_incomplete());
    }

    #[test]
    fn reference_complete_with_all_fields() {
        let reference = Reference::new("https://example.com", "Example", "body");
        assert!(!reference.is_incomplete());
    }
}
