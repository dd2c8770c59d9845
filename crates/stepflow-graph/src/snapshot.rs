use serde::Serialize;

use crate::availability::derive_availability;
use crate::edge::Edge;
use crate::graph::Graph;
use crate::id::NodeId;

/// A node as the view layer sees it, with derived availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
  pub id: NodeId,
  pub label: String,
  pub completed: bool,
  pub available: bool,
}

/// Read-only copy of the committed graph plus derived state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot {
  pub nodes: Vec<NodeView>,
  pub edges: Vec<Edge>,
}

impl GraphSnapshot {
  pub fn capture(graph: &Graph) -> Self {
    let availability = derive_availability(graph);
    let nodes = graph
      .nodes()
      .map(|node| NodeView {
        id: node.id(),
        label: node.label().to_string(),
        completed: node.is_completed(),
        available: availability.get(&node.id()).copied().unwrap_or(false),
      })
      .collect();

    Self {
      nodes,
      edges: graph.edges().copied().collect(),
    }
  }

  pub fn node(&self, node_id: NodeId) -> Option<&NodeView> {
    self.nodes.iter().find(|node| node.id == node_id)
  }
}
