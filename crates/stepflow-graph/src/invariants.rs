//! Structural checks over a whole graph.
//!
//! The store keeps these true by construction; this module verifies them
//! after the fact (debug builds re-check after every commit).

use std::collections::HashMap;

use serde::Serialize;

use crate::adjacency::Adjacency;
use crate::edge::Edge;
use crate::graph::Graph;
use crate::id::NodeId;

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum InvariantViolation {
  /// An edge endpoint is not a node in the graph.
  UnknownNodeReference { edge: Edge, missing_node_id: NodeId },
  /// An edge whose source and target are the same node.
  SelfLoop { node_id: NodeId },
  /// The edge relation contains a directed cycle through `node_id`.
  CycleDetected { node_id: NodeId },
}

pub fn invariant_violations(graph: &Graph) -> Vec<InvariantViolation> {
  let mut violations = Vec::new();

  for edge in graph.edges() {
    for endpoint in [edge.source, edge.target] {
      if !graph.contains_node(endpoint) {
        violations.push(InvariantViolation::UnknownNodeReference {
          edge: *edge,
          missing_node_id: endpoint,
        });
      }
    }
    if edge.source == edge.target {
      violations.push(InvariantViolation::SelfLoop {
        node_id: edge.source,
      });
    }
  }

  if let Some(node_id) = find_cycle(graph) {
    violations.push(InvariantViolation::CycleDetected { node_id });
  }

  violations
}

pub fn is_consistent(graph: &Graph) -> bool {
  invariant_violations(graph).is_empty()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
  White,
  Gray,
  Black,
}

/// Find a node that lies on a directed cycle, if any.
///
/// Three-color depth-first search with an explicit stack; a gray node seen
/// again is a back edge.
pub fn find_cycle(graph: &Graph) -> Option<NodeId> {
  let adjacency = Adjacency::new(graph);
  let mut color: HashMap<NodeId, Color> = graph.node_ids().map(|id| (id, Color::White)).collect();

  for root in graph.node_ids() {
    if color.get(&root) != Some(&Color::White) {
      continue;
    }

    // (node, index of the next child to visit)
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
    color.insert(root, Color::Gray);

    while let Some((node, next_child)) = stack.last_mut() {
      let children = adjacency.downstream(*node);
      if let Some(child) = children.get(*next_child).copied() {
        *next_child += 1;
        match color.get(&child) {
          Some(Color::Gray) => return Some(child),
          Some(Color::White) => {
            color.insert(child, Color::Gray);
            stack.push((child, 0));
          }
          _ => {}
        }
      } else {
        color.insert(*node, Color::Black);
        stack.pop();
      }
    }
  }

  None
}
