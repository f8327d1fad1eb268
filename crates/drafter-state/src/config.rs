//! Workflow configuration
//!
//! Immutable once constructed; passed explicitly into nodes at build time
//! rather than looked up ambiently.

use serde::{Deserialize, Serialize};

/// A tag category offered to the tag extractors and the type assigner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagType {
    /// Category name (e.g. "algorithm")
    pub name: String,
    /// Human-readable description rendered into extractor prompts
    pub description: String,
}

impl TagType {
    /// Create a new tag type
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Drafting workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Cap on selected tags
    pub max_tags: usize,
    /// Cap on selected references
    pub max_references: usize,
    /// Cap on reference search queries per round
    pub max_search_queries: usize,
    /// Revision rounds before approval is forced
    pub max_revisions: u32,
    /// Results requested from the search provider per query
    pub search_results_per_query: usize,
    /// Entity labels dropped from NER output (dates, bare numbers)
    pub excluded_entity_labels: Vec<String>,
    /// Tag categories available to the extractors
    pub tag_types: Vec<TagType>,
}

impl DraftConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With tag cap
    #[inline]
    #[must_use]
    pub fn with_max_tags(mut self, max: usize) -> Self {
        self.max_tags = max;
        self
    }

    /// With reference cap
    #[inline]
    #[must_use]
    pub fn with_max_references(mut self, max: usize) -> Self {
        self.max_references = max;
        self
    }

    /// With search query cap
    #[inline]
    #[must_use]
    pub fn with_max_search_queries(mut self, max: usize) -> Self {
        self.max_search_queries = max;
        self
    }

    /// With revision round cap
    #[inline]
    #[must_use]
    pub fn with_max_revisions(mut self, max: u32) -> Self {
        self.max_revisions = max;
        self
    }

    /// With tag categories
    #[inline]
    #[must_use]
    pub fn with_tag_types(mut self, tag_types: Vec<TagType>) -> Self {
        self.tag_types = tag_types;
        self
    }

    /// With NER label exclusions
    #[inline]
    #[must_use]
    pub fn with_excluded_entity_labels(mut self, labels: Vec<String>) -> Self {
        self.excluded_entity_labels = labels;
        self
    }
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            max_tags: 10,
            max_references: 3,
            max_search_queries: 3,
            max_revisions: 3,
            search_results_per_query: 3,
            excluded_entity_labels: vec!["DATE".to_string(), "CARDINAL".to_string()],
            tag_types: Vec::new(),
        }
    }
}
