//! Edge rewiring for node deletion.
//!
//! Removing a node `x` drops every edge touching `x` and, for each predecessor
//! `p` and successor `s` of `x`, adds `p -> s` so that "p before s" still holds.
//! Self-loops are never synthesized and an edge that already exists is not
//! duplicated.

use std::collections::BTreeSet;

use crate::edge::Edge;
use crate::graph::Graph;
use crate::id::NodeId;

/// The edge set that results from removing one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewire {
  /// The complete edge set after removal.
  pub edges: BTreeSet<Edge>,
  /// Edges that touched the removed node.
  pub dropped: Vec<Edge>,
  /// Edges added to bridge predecessors to successors.
  pub synthesized: Vec<Edge>,
}

/// Compute the edge set of `graph` once `removed` is gone.
pub fn rewire_without(graph: &Graph, removed: NodeId) -> Rewire {
  let predecessors: BTreeSet<NodeId> = graph.predecessors(removed).collect();
  let successors: BTreeSet<NodeId> = graph.successors(removed).collect();

  let mut edges = BTreeSet::new();
  let mut dropped = Vec::new();
  for edge in graph.edges() {
    if edge.touches(removed) {
      dropped.push(*edge);
    } else {
      edges.insert(*edge);
    }
  }

  let mut synthesized = Vec::new();
  for p in &predecessors {
    for s in &successors {
      if p == s {
        continue;
      }
      let bridge = Edge::new(*p, *s);
      if edges.insert(bridge) {
        synthesized.push(bridge);
      }
    }
  }

  Rewire {
    edges,
    dropped,
    synthesized,
  }
}
