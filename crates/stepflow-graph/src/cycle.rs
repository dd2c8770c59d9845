//! Connection admissibility.
//!
//! A connection `source -> target` is refused when it is a self-loop, or when
//! `source` is already reachable from `target`: adding the edge would close
//! the cycle `source -> target -> ... -> source`. Reachability is a plain
//! traversal over every outgoing edge, so parallel paths and diamonds are
//! handled the same as chains.

use tracing::debug;

use crate::adjacency::Adjacency;
use crate::error::InvalidConnection;
use crate::graph::Graph;
use crate::id::NodeId;

/// Decide whether `source -> target` may be added to `graph`.
pub fn check_connection(
  graph: &Graph,
  source: NodeId,
  target: NodeId,
) -> Result<(), InvalidConnection> {
  if source == target {
    debug!(%source, %target, "rejected self-loop");
    return Err(InvalidConnection::SelfLoop);
  }

  if Adjacency::new(graph).reaches(target, source) {
    debug!(%source, %target, "rejected connection closing a cycle");
    return Err(InvalidConnection::WouldCreateCycle);
  }

  Ok(())
}

/// Boolean form of [`check_connection`].
pub fn is_valid_connection(graph: &Graph, source: NodeId, target: NodeId) -> bool {
  check_connection(graph, source, target).is_ok()
}
