use std::collections::HashMap;

use stepflow_config::GraphConfig;
use tracing::info;

use crate::completion::{Blocker, CompletionOutcome};
use crate::error::GraphError;
use crate::id::NodeId;
use crate::store::{Connection, GraphStore};

impl GraphStore {
  /// Build a store from a configured initial graph.
  ///
  /// Nodes are created in declaration order (ids from 1), then edges are
  /// added through the connection check, then declared completions are
  /// applied in declaration order. Anything the live API would refuse is
  /// an error here.
  pub fn from_config(config: &GraphConfig) -> Result<Self, GraphError> {
    let mut store = GraphStore::with_label_prefix(config.label_prefix.clone());
    let mut keys: HashMap<&str, NodeId> = HashMap::with_capacity(config.nodes.len());

    for node_def in &config.nodes {
      if keys.contains_key(node_def.key.as_str()) {
        return Err(GraphError::DuplicateNodeKey(node_def.key.clone()));
      }
      let node_id = store.add_node(node_def.label.clone());
      keys.insert(node_def.key.as_str(), node_id);
    }

    let lookup = |key: &str| {
      keys
        .get(key)
        .copied()
        .ok_or_else(|| GraphError::UnknownNodeKey(key.to_string()))
    };

    for edge_def in &config.edges {
      let source = lookup(&edge_def.from)?;
      let target = lookup(&edge_def.to)?;
      if let Connection::Rejected(reason) = store.add_edge(source, target)? {
        return Err(GraphError::SeedConnectionRejected {
          from: edge_def.from.clone(),
          to: edge_def.to.clone(),
          reason,
        });
      }
    }

    for node_def in config.nodes.iter().filter(|def| def.completed) {
      let node_id = lookup(&node_def.key)?;
      if let CompletionOutcome::NotAvailable {
        blocker: Blocker::PendingPredecessors(pending),
      } = store.complete(node_id)?
      {
        return Err(GraphError::SeedNotAvailable {
          key: node_def.key.clone(),
          pending,
        });
      }
    }

    info!(
      nodes = store.graph().node_count(),
      edges = store.graph().edge_count(),
      "graph seeded"
    );
    Ok(store)
  }
}
