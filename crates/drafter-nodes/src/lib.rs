//! Drafter Nodes - The steps of the drafting workflow
//!
//! Every node reads a `WorkflowState` and returns a `StatePatch`:
//! - Manager (brief generator) gating the content generators
//! - Title and summary generators
//! - Reference query generator, resolver, and selector
//! - Three independent tag extractors, the type assigner, aggregator, selector
//! - Reviewer with the forced-approval round cap

#![allow(missing_docs)]

pub mod aggregator;
pub mod context;
pub mod generator;
pub mod node;
pub mod references;
pub mod reviewer;
pub mod tags;

pub use aggregator::{aggregate_tags, TagAggregatorNode};
pub use generator::{DraftGenerator, ManagerNode};
pub use node::{NodeKind, WorkflowNode};
pub use references::{ReferenceQueryGeneratorNode, ReferenceResolverNode, ReferenceSelectorNode};
pub use reviewer::ReviewerNode;
pub use tags::{
    GazetteerTagExtractorNode, LlmTagExtractorNode, NerTagExtractorNode, TagSelectorNode,
    TagTypeAssignerNode,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
