use serde::Serialize;
use thiserror::Error;

use crate::id::NodeId;

/// Why a proposed connection was refused.
///
/// This is an expected outcome of drawing a connection, carried by
/// [`Connection::Rejected`](crate::Connection::Rejected) rather than returned as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum InvalidConnection {
  /// Source and target are the same node.
  #[error("a node cannot depend on itself")]
  SelfLoop,

  /// The source is already reachable from the target.
  #[error("connection would create a cycle")]
  WouldCreateCycle,
}

/// Errors returned by graph store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  /// An operation referenced a node id that is not in the store.
  #[error("unknown node: {0}")]
  UnknownNode(NodeId),

  /// Attempted to mark a completed node as not completed.
  #[error("node {0} is completed; completion cannot be revoked")]
  CompletionIrreversible(NodeId),

  /// Two configured nodes share a key.
  #[error("duplicate node key in config: {0}")]
  DuplicateNodeKey(String),

  /// A configured edge names a key no configured node has.
  #[error("edge references unknown node key: {0}")]
  UnknownNodeKey(String),

  /// A configured edge was refused by the connection check.
  #[error("invalid edge '{from}' -> '{to}': {reason}")]
  SeedConnectionRejected {
    from: String,
    to: String,
    reason: InvalidConnection,
  },

  /// A configured node starts completed but its predecessors do not.
  #[error("node '{key}' cannot start completed: predecessors {pending:?} are not completed")]
  SeedNotAvailable { key: String, pending: Vec<NodeId> },
}
