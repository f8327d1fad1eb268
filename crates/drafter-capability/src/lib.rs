//! Drafter Capability - External collaborator contracts
//!
//! Everything the workflow consumes from the outside world, specified only
//! at its boundary:
//! - `TextGenerator` - free-text and structured generation
//! - `EntityExtractor` - named-entity recognition
//! - `SearchProvider` - web search
//! - `Gazetteer` - word-boundary dictionary matching (in-process, data-driven)
//! - Chat messages, structured payloads, and the modular prompt builder

#![allow(missing_docs)]

pub mod extraction;
pub mod gazetteer;
pub mod generation;
pub mod message;
pub mod payload;
pub mod prompt;
pub mod search;

pub use extraction::{EntityExtractor, ExtractedEntity};
pub use gazetteer::Gazetteer;
pub use generation::TextGenerator;
pub use message::{Message, Role};
pub use payload::{
    parse_payload, EntityList, EntityPayload, ReferenceList, ReferencePayload, ReviewPayload,
    SearchQueryList,
};
pub use prompt::{PromptSpec, ReasoningStrategies};
pub use search::{SearchHit, SearchProvider};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
