//! Drafter Engine - Workflow assembly and execution
//!
//! Drives the drafting graph to completion:
//! - `topology` - the static dependency graph over node kinds
//! - `scheduler` - wave execution with the revision re-entry rule
//! - `prompts` - default prompt specs for every agent
//! - `system` - the `DraftingSystem` facade tying capabilities to nodes
//! - `telemetry` - tracing subscriber setup for hosts

#![allow(missing_docs)]

pub mod prompts;
pub mod scheduler;
pub mod system;
pub mod telemetry;
pub mod topology;

pub use scheduler::Scheduler;
pub use telemetry::init_tracing;
pub use system::{Capabilities, DraftResult, DraftingSystem};
pub use topology::{dependencies, REVISION_SUBGRAPH};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
