//! Change events and observers.
//!
//! Every committed mutation produces a [`GraphEvent`]. After the commit the
//! store captures a fresh [`GraphSnapshot`] and passes both to each
//! subscribed [`GraphObserver`]. Requests that change nothing (rejected
//! connections, unavailable completions) notify nobody.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::info;

use crate::edge::Edge;
use crate::id::NodeId;
use crate::snapshot::GraphSnapshot;

/// A committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GraphEvent {
  /// A node was created.
  NodeAdded { node_id: NodeId, label: String },

  /// A node's label changed.
  NodeRenamed { node_id: NodeId, label: String },

  /// An edge was added by an explicit connection.
  EdgeAdded { edge: Edge },

  /// An edge was removed explicitly.
  EdgeRemoved { edge: Edge },

  /// A node was deleted. `dropped` touched it, `synthesized` bridge its
  /// predecessors to its successors.
  NodeRemoved {
    node_id: NodeId,
    dropped: Vec<Edge>,
    synthesized: Vec<Edge>,
  },

  /// A node was marked completed.
  NodeCompleted { node_id: NodeId },
}

/// An event together with the state it produced.
#[derive(Debug, Clone, Serialize)]
pub struct GraphUpdate {
  pub event: GraphEvent,
  pub snapshot: GraphSnapshot,
}

/// Receives committed graph changes.
///
/// The store calls `notify` once per commit, after the commit is visible.
pub trait GraphObserver: Send + Sync {
  fn notify(&self, update: GraphUpdate);
}

/// Discards every update.
#[derive(Debug, Clone, Default)]
pub struct NoopObserver;

impl GraphObserver for NoopObserver {
  fn notify(&self, _update: GraphUpdate) {}
}

/// Forwards updates to an unbounded channel, e.g. for a UI task to re-render from.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
  sender: mpsc::UnboundedSender<GraphUpdate>,
}

impl ChannelObserver {
  pub fn new(sender: mpsc::UnboundedSender<GraphUpdate>) -> Self {
    Self { sender }
  }

  /// Create an observer and the receiving end of its channel.
  pub fn channel() -> (Self, mpsc::UnboundedReceiver<GraphUpdate>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self::new(sender), receiver)
  }
}

impl GraphObserver for ChannelObserver {
  fn notify(&self, update: GraphUpdate) {
    // Receiver may have been dropped
    let _ = self.sender.send(update);
  }
}

/// Emits one tracing event per update.
#[derive(Debug, Clone, Default)]
pub struct LogObserver;

impl GraphObserver for LogObserver {
  fn notify(&self, update: GraphUpdate) {
    info!(
      event = ?update.event,
      nodes = update.snapshot.nodes.len(),
      edges = update.snapshot.edges.len(),
      "graph updated"
    );
  }
}
