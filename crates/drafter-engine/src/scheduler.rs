//! Wave scheduler over the static topology
//!
//! Each wave runs every runnable node concurrently, then merges the
//! resulting patches into the shared state in a fixed order. After a wave
//! containing the reviewer, a revision verdict re-opens the content branch
//! by un-completing the revision subgraph. The reviewer's round cap
//! guarantees the loop is bounded, so a stalled run can only mean an
//! inconsistent topology.

use crate::topology::{dependencies, REVISION_SUBGRAPH};
use drafter_nodes::{NodeKind, WorkflowNode};
use drafter_state::{WorkflowError, WorkflowState};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Executes a node set to completion over one workflow state
pub struct Scheduler {
    nodes: HashMap<NodeKind, Arc<dyn WorkflowNode>>,
}

impl Scheduler {
    /// Build a scheduler from the full node set
    ///
    /// Every kind in [`NodeKind::ALL`] must be present; a partial set would
    /// stall at the first missing dependency.
    #[must_use]
    pub fn new(nodes: Vec<Arc<dyn WorkflowNode>>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|node| (node.kind(), node)).collect(),
        }
    }

    /// Kinds runnable now: not yet completed, with all dependencies completed
    fn ready(&self, completed: &HashSet<NodeKind>) -> Vec<NodeKind> {
        NodeKind::ALL
            .into_iter()
            .filter(|kind| {
                self.nodes.contains_key(kind)
                    && !completed.contains(kind)
                    && dependencies(*kind).iter().all(|dep| completed.contains(dep))
            })
            .collect()
    }

    /// Drive the workflow until every node has completed and no revision is pending
    pub async fn run(&self, state: &mut WorkflowState) -> Result<(), WorkflowError> {
        let mut completed: HashSet<NodeKind> = HashSet::new();

        while completed.len() < self.nodes.len() {
            let wave = self.ready(&completed);
            if wave.is_empty() {
                return Err(WorkflowError::Stalled(format!(
                    "no runnable node with {} of {} completed",
                    completed.len(),
                    self.nodes.len()
                )));
            }

            tracing::debug!(run_id = %state.run_id, nodes = ?wave, "running wave");
            let snapshot: &WorkflowState = state;
            let running = wave.iter().map(|kind| {
                let node = Arc::clone(&self.nodes[kind]);
                async move { node.run(snapshot).await }
            });
            let patches = futures::future::try_join_all(running).await?;

            // Patches touch disjoint fields except the monotone round
            // counter, so merge order within a wave is immaterial.
            for patch in patches {
                state.apply(patch);
            }
            completed.extend(wave.iter().copied());

            if wave.contains(&NodeKind::Reviewer) && state.needs_revision {
                tracing::info!(
                    run_id = %state.run_id,
                    round = state.revision_round,
                    "revision requested, re-opening content branch"
                );
                for kind in REVISION_SUBGRAPH {
                    completed.remove(&kind);
                }
            }
        }

        Ok(())
    }
}
