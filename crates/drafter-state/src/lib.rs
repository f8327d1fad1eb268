//! Drafter State - Workflow state and domain types
//!
//! The single mutable record threaded through every workflow node:
//! - `WorkflowState` and the disjoint-field `StatePatch` merged by the scheduler
//! - `Tag` and `Reference` domain types with their identity rules
//! - Per-component review/approval bookkeeping
//! - Workflow configuration and the error taxonomy

#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod reference;
pub mod state;
pub mod tag;

pub use config::{DraftConfig, TagType};
pub use error::{CapabilityError, WorkflowError};
pub use reference::Reference;
pub use state::{Component, ComponentReview, RunId, StatePatch, WorkflowState};
pub use tag::Tag;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
