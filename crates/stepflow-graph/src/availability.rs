//! Derived "available to complete" state.
//!
//! A node is available when it is not completed and every direct predecessor
//! is completed. A node with no predecessors is available until completed.
//! Everything here recomputes from the committed graph on each call.

use std::collections::BTreeMap;

use crate::adjacency::Adjacency;
use crate::graph::Graph;
use crate::id::NodeId;

/// Availability of every node in `graph`, keyed by node id.
pub fn derive_availability(graph: &Graph) -> BTreeMap<NodeId, bool> {
  let adjacency = Adjacency::new(graph);
  graph
    .nodes()
    .map(|node| {
      let available = !node.is_completed()
        && adjacency
          .upstream(node.id())
          .iter()
          .all(|pred| is_completed(graph, *pred));
      (node.id(), available)
    })
    .collect()
}

/// Availability of a single node. Unknown nodes are never available.
pub fn is_available(graph: &Graph, node_id: NodeId) -> bool {
  match graph.node(node_id) {
    Some(node) => !node.is_completed() && pending_predecessors(graph, node_id).is_empty(),
    None => false,
  }
}

/// Direct predecessors of `node_id` that are not completed yet, in id order.
pub fn pending_predecessors(graph: &Graph, node_id: NodeId) -> Vec<NodeId> {
  let mut pending: Vec<NodeId> = graph
    .predecessors(node_id)
    .filter(|pred| !is_completed(graph, *pred))
    .collect();
  pending.sort();
  pending.dedup();
  pending
}

fn is_completed(graph: &Graph, node_id: NodeId) -> bool {
  graph.node(node_id).is_some_and(|node| node.is_completed())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::edge::Edge;
  use crate::node::Node;

  fn n(raw: u64) -> NodeId {
    NodeId::new(raw)
  }

  fn join_graph() -> Graph {
    let mut graph = Graph::new();
    for raw in 1..=3 {
      graph.insert_node(Node::new(n(raw), format!("Node {raw}")));
    }
    graph.insert_edge(Edge::new(n(1), n(3)));
    graph.insert_edge(Edge::new(n(2), n(3)));
    graph
  }

  fn mark_completed(graph: &mut Graph, raw: u64) {
    graph.node_mut(n(raw)).unwrap().completed = true;
  }

  #[test]
  fn test_roots_are_available() {
    let graph = join_graph();
    let availability = derive_availability(&graph);
    assert!(availability[&n(1)]);
    assert!(availability[&n(2)]);
    assert!(!availability[&n(3)]);
  }

  #[test]
  fn test_join_needs_every_predecessor() {
    let mut graph = join_graph();
    mark_completed(&mut graph, 1);
    assert!(!is_available(&graph, n(3)));
    assert_eq!(pending_predecessors(&graph, n(3)), vec![n(2)]);

    mark_completed(&mut graph, 2);
    assert!(is_available(&graph, n(3)));
    assert!(pending_predecessors(&graph, n(3)).is_empty());
  }

  #[test]
  fn test_completed_nodes_are_not_available() {
    let mut graph = join_graph();
    mark_completed(&mut graph, 1);
    assert!(!is_available(&graph, n(1)));
    assert!(!derive_availability(&graph)[&n(1)]);
  }

  #[test]
  fn test_unknown_node_is_not_available() {
    assert!(!is_available(&join_graph(), n(9)));
  }

  #[test]
  fn test_derivation_is_repeatable() {
    let mut graph = join_graph();
    mark_completed(&mut graph, 2);
    assert_eq!(derive_availability(&graph), derive_availability(&graph));
  }
}
