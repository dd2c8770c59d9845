use std::collections::{BTreeMap, BTreeSet};

use crate::edge::Edge;
use crate::id::NodeId;
use crate::node::Node;

/// The committed node and edge sets.
///
/// Nodes iterate in id order, edges in `(source, target)` order. Each
/// ordered pair appears at most once because the edge set is keyed by it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
  nodes: BTreeMap<NodeId, Node>,
  edges: BTreeSet<Edge>,
}

impl Graph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Get a node by ID.
  pub fn node(&self, node_id: NodeId) -> Option<&Node> {
    self.nodes.get(&node_id)
  }

  pub fn nodes(&self) -> impl Iterator<Item = &Node> {
    self.nodes.values()
  }

  pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
    self.nodes.keys().copied()
  }

  pub fn edges(&self) -> impl Iterator<Item = &Edge> {
    self.edges.iter()
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn edge_count(&self) -> usize {
    self.edges.len()
  }

  pub fn contains_node(&self, node_id: NodeId) -> bool {
    self.nodes.contains_key(&node_id)
  }

  pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
    self.edges.contains(&Edge::new(source, target))
  }

  /// Direct predecessors: sources of edges pointing at `node_id`.
  pub fn predecessors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    self
      .edges
      .iter()
      .filter(move |edge| edge.target == node_id)
      .map(|edge| edge.source)
  }

  /// Direct successors: targets of edges leaving `node_id`.
  pub fn successors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    self
      .edges
      .iter()
      .filter(move |edge| edge.source == node_id)
      .map(|edge| edge.target)
  }

  pub(crate) fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
    self.nodes.get_mut(&node_id)
  }

  pub(crate) fn insert_node(&mut self, node: Node) {
    self.nodes.insert(node.id, node);
  }

  pub(crate) fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
    self.nodes.remove(&node_id)
  }

  /// Returns false if the edge was already present.
  pub(crate) fn insert_edge(&mut self, edge: Edge) -> bool {
    self.edges.insert(edge)
  }

  pub(crate) fn remove_edge(&mut self, edge: &Edge) -> bool {
    self.edges.remove(edge)
  }

  /// Swap in a whole new edge set at once.
  pub(crate) fn replace_edges(&mut self, edges: BTreeSet<Edge>) -> BTreeSet<Edge> {
    std::mem::replace(&mut self.edges, edges)
  }
}
