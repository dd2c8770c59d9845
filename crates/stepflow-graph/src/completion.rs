use serde::Serialize;

use crate::availability::pending_predecessors;
use crate::graph::Graph;
use crate::id::NodeId;

/// Why a node could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "pending", rename_all = "snake_case")]
pub enum Blocker {
  AlreadyCompleted,
  PendingPredecessors(Vec<NodeId>),
}

/// Result of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
  /// The node is now completed.
  Completed,
  /// Nothing to do (un-completing a node that was never completed).
  Unchanged,
  /// The node is not available; nothing was committed.
  NotAvailable { blocker: Blocker },
}

impl CompletionOutcome {
  pub fn is_completed(&self) -> bool {
    matches!(self, Self::Completed)
  }
}

/// Check whether `node_id` may be completed right now.
///
/// The caller must already know the node exists.
pub fn completion_gate(graph: &Graph, node_id: NodeId) -> Result<(), Blocker> {
  if graph.node(node_id).is_some_and(|node| node.is_completed()) {
    return Err(Blocker::AlreadyCompleted);
  }

  let pending = pending_predecessors(graph, node_id);
  if !pending.is_empty() {
    return Err(Blocker::PendingPredecessors(pending));
  }

  Ok(())
}

/// Apply the completion transition if the gate allows it.
pub(crate) fn apply_completion(graph: &mut Graph, node_id: NodeId) -> CompletionOutcome {
  if let Err(blocker) = completion_gate(graph, node_id) {
    return CompletionOutcome::NotAvailable { blocker };
  }

  match graph.node_mut(node_id) {
    Some(node) => {
      node.completed = true;
      CompletionOutcome::Completed
    }
    None => CompletionOutcome::Unchanged,
  }
}
