//! Web-search capability contract

use drafter_state::CapabilityError;
use serde::{Deserialize, Serialize};

/// One raw search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result URL
    pub url: String,
    /// Result title
    pub title: String,
    /// Retrieved page content (may be empty; empty hits are dropped downstream)
    pub content: String,
}

impl SearchHit {
    /// Create a new search hit
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
}

/// External web-search capability
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one query, returning at most `max_results` hits
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, CapabilityError>;
}
