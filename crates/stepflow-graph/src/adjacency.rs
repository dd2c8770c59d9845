use std::collections::{BTreeSet, HashMap};

use crate::graph::Graph;
use crate::id::NodeId;

/// Adjacency lists built from a committed [`Graph`] for traversal.
///
/// Built fresh for each derivation; nothing here is cached between reads.
#[derive(Debug, Clone)]
pub struct Adjacency {
  /// node_id -> downstream node_ids (successors).
  downstream: HashMap<NodeId, Vec<NodeId>>,
  /// node_id -> upstream node_ids (predecessors).
  upstream: HashMap<NodeId, Vec<NodeId>>,
}

impl Adjacency {
  pub fn new(graph: &Graph) -> Self {
    let mut downstream: HashMap<NodeId, Vec<NodeId>> = HashMap::with_capacity(graph.node_count());
    let mut upstream: HashMap<NodeId, Vec<NodeId>> = HashMap::with_capacity(graph.node_count());

    for node_id in graph.node_ids() {
      downstream.entry(node_id).or_default();
      upstream.entry(node_id).or_default();
    }

    for edge in graph.edges() {
      downstream.entry(edge.source).or_default().push(edge.target);
      upstream.entry(edge.target).or_default().push(edge.source);
    }

    Self {
      downstream,
      upstream,
    }
  }

  /// Successors of a node.
  pub fn downstream(&self, node_id: NodeId) -> &[NodeId] {
    self
      .downstream
      .get(&node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Predecessors of a node.
  pub fn upstream(&self, node_id: NodeId) -> &[NodeId] {
    self
      .upstream
      .get(&node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Whether `to` can be reached from `from` by following edges forward.
  ///
  /// Iterative depth-first search; each node is expanded at most once.
  pub fn reaches(&self, from: NodeId, to: NodeId) -> bool {
    let mut visited = BTreeSet::new();
    let mut stack = vec![from];

    while let Some(current) = stack.pop() {
      if current == to {
        return true;
      }
      if !visited.insert(current) {
        continue;
      }
      stack.extend(
        self
          .downstream(current)
          .iter()
          .filter(|next| !visited.contains(*next)),
      );
    }

    false
  }
}
