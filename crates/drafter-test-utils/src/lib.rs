//! Drafter Test Utils - Scripted capability fakes
//!
//! Deterministic in-memory implementations of the capability contracts:
//! - `ScriptedGenerator` replays queued responses and counts calls
//! - `RoutedGenerator` answers by substring match, for multi-node runs
//! - `ScriptedSearchProvider` maps queries to canned hits
//! - `StaticEntityExtractor` returns a fixed entity list
//!
//! All fakes return `CapabilityError` when their script runs out, so a test
//! that makes one call too many fails loudly instead of hanging.

#![allow(missing_docs)]

use drafter_capability::{
    EntityExtractor, ExtractedEntity, Message, SearchHit, SearchProvider, TextGenerator,
};
use drafter_state::CapabilityError;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Generator that replays a fixed queue of responses
///
/// Text and structured queues are independent; each call pops the front of
/// its queue. An exhausted queue yields `CapabilityError::Generation`.
#[derive(Default)]
pub struct ScriptedGenerator {
    text: Mutex<VecDeque<String>>,
    structured: Mutex<VecDeque<serde_json::Value>>,
    invoke_calls: AtomicUsize,
    structured_calls: AtomicUsize,
    fail: bool,
}

impl ScriptedGenerator {
    /// Queue free-text responses
    #[must_use]
    pub fn with_text(responses: Vec<&str>) -> Self {
        Self {
            text: Mutex::new(responses.into_iter().map(String::from).collect()),
            ..Self::default()
        }
    }

    /// Queue structured responses
    #[must_use]
    pub fn with_structured(responses: Vec<serde_json::Value>) -> Self {
        Self {
            structured: Mutex::new(responses.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Generator whose every call fails
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of free-text calls made so far
    #[must_use]
    pub fn invoke_calls(&self) -> usize {
        self.invoke_calls.load(Ordering::SeqCst)
    }

    /// Number of structured calls made so far
    #[must_use]
    pub fn structured_calls(&self) -> usize {
        self.structured_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn invoke(&self, _messages: &[Message]) -> Result<String, CapabilityError> {
        self.invoke_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CapabilityError::Generation("scripted failure".to_string()));
        }
        self.text
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CapabilityError::Generation("text script exhausted".to_string()))
    }

    async fn invoke_structured(
        &self,
        _messages: &[Message],
    ) -> Result<serde_json::Value, CapabilityError> {
        self.structured_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CapabilityError::Generation("scripted failure".to_string()));
        }
        self.structured
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CapabilityError::Generation("structured script exhausted".to_string()))
    }
}

enum Routed {
    Text(String),
    Json(serde_json::Value),
}

/// Generator that answers by matching a substring of the prompt
///
/// Routes are checked in registration order against the concatenated message
/// contents; the first match wins and is NOT consumed, so the same route can
/// serve every revision round. No match yields `CapabilityError::Generation`.
#[derive(Default)]
pub struct RoutedGenerator {
    routes: Vec<(String, Routed)>,
    invoke_calls: AtomicUsize,
    structured_calls: AtomicUsize,
}

impl RoutedGenerator {
    /// Empty router
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer free-text calls whose prompt contains `pattern`
    #[must_use]
    pub fn route_text(mut self, pattern: &str, response: &str) -> Self {
        self.routes
            .push((pattern.to_string(), Routed::Text(response.to_string())));
        self
    }

    /// Answer structured calls whose prompt contains `pattern`
    #[must_use]
    pub fn route_json(mut self, pattern: &str, response: serde_json::Value) -> Self {
        self.routes.push((pattern.to_string(), Routed::Json(response)));
        self
    }

    /// Total calls made so far (both kinds)
    #[must_use]
    pub fn calls(&self) -> usize {
        self.invoke_calls.load(Ordering::SeqCst) + self.structured_calls.load(Ordering::SeqCst)
    }

    fn find(&self, messages: &[Message]) -> Option<&Routed> {
        let haystack = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.routes
            .iter()
            .find(|(pattern, _)| haystack.contains(pattern))
            .map(|(_, routed)| routed)
    }
}

#[async_trait::async_trait]
impl TextGenerator for RoutedGenerator {
    async fn invoke(&self, messages: &[Message]) -> Result<String, CapabilityError> {
        self.invoke_calls.fetch_add(1, Ordering::SeqCst);
        match self.find(messages) {
            Some(Routed::Text(text)) => Ok(text.clone()),
            _ => Err(CapabilityError::Generation(
                "no text route matched".to_string(),
            )),
        }
    }

    async fn invoke_structured(
        &self,
        messages: &[Message],
    ) -> Result<serde_json::Value, CapabilityError> {
        self.structured_calls.fetch_add(1, Ordering::SeqCst);
        match self.find(messages) {
            Some(Routed::Json(value)) => Ok(value.clone()),
            _ => Err(CapabilityError::Generation(
                "no structured route matched".to_string(),
            )),
        }
    }
}

/// Search provider backed by a query-to-hits table
#[derive(Default)]
pub struct ScriptedSearchProvider {
    results: HashMap<String, Vec<SearchHit>>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl ScriptedSearchProvider {
    /// Provider that returns no hits for any query
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Provider backed by canned results per query
    #[must_use]
    pub fn with_results(results: Vec<(&str, Vec<SearchHit>)>) -> Self {
        Self {
            results: results
                .into_iter()
                .map(|(query, hits)| (query.to_string(), hits))
                .collect(),
            ..Self::default()
        }
    }

    /// Make one query fail while others keep working
    #[must_use]
    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    /// Number of search calls made so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SearchProvider for ScriptedSearchProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(query) {
            return Err(CapabilityError::Search(format!(
                "scripted failure for '{query}'"
            )));
        }
        let mut hits = self.results.get(query).cloned().unwrap_or_default();
        hits.truncate(max_results);
        Ok(hits)
    }
}

/// Extractor that returns the same entity list for every text
#[derive(Default)]
pub struct StaticEntityExtractor {
    entities: Vec<ExtractedEntity>,
    calls: AtomicUsize,
}

impl StaticEntityExtractor {
    /// Create the extractor with its fixed output
    #[must_use]
    pub fn new(entities: Vec<ExtractedEntity>) -> Self {
        Self {
            entities,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of extraction calls made so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EntityExtractor for StaticEntityExtractor {
    async fn extract(&self, _text: &str) -> Result<Vec<ExtractedEntity>, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entities.clone())
    }
}
