//! End-to-end behavior of the graph store on small workflows.

use stepflow_graph::{
  Blocker, CompletionOutcome, Connection, Edge, GraphStore, InvalidConnection, NodeId,
};

fn n(raw: u64) -> NodeId {
  NodeId::new(raw)
}

fn edges(store: &GraphStore) -> Vec<(u64, u64)> {
  store
    .edges()
    .map(|edge| (edge.source.get(), edge.target.get()))
    .collect()
}

/// Nodes 1..=count connected by `pairs`, every connection accepted.
fn build(count: usize, pairs: &[(u64, u64)]) -> GraphStore {
  let mut store = GraphStore::new();
  for _ in 0..count {
    store.add_node(None);
  }
  for (from, to) in pairs {
    let connection = store.add_edge(n(*from), n(*to)).expect("known nodes");
    assert!(
      matches!(connection, Connection::Connected(_)),
      "{from} -> {to} was not accepted: {connection:?}"
    );
  }
  store
}

fn join_workflow() -> GraphStore {
  build(3, &[(1, 3), (2, 3)])
}

#[test]
fn connecting_back_to_a_predecessor_is_rejected() {
  let mut store = join_workflow();

  let connection = store.add_edge(n(3), n(1)).unwrap();

  assert_eq!(
    connection,
    Connection::Rejected(InvalidConnection::WouldCreateCycle)
  );
  assert_eq!(edges(&store), vec![(1, 3), (2, 3)]);
}

#[test]
fn connecting_a_node_to_itself_is_rejected() {
  let mut store = join_workflow();

  let connection = store.add_edge(n(2), n(2)).unwrap();

  assert_eq!(connection, Connection::Rejected(InvalidConnection::SelfLoop));
  assert_eq!(edges(&store), vec![(1, 3), (2, 3)]);
}

#[test]
fn join_becomes_available_once_every_predecessor_completes() {
  let mut store = join_workflow();
  store.complete(n(1)).unwrap();
  store.complete(n(2)).unwrap();

  assert!(store.is_available(n(3)).unwrap());
  assert_eq!(store.complete(n(3)).unwrap(), CompletionOutcome::Completed);
  assert!(store.node(n(3)).unwrap().is_completed());
  assert!(!store.is_available(n(3)).unwrap());
}

#[test]
fn join_stays_blocked_while_a_predecessor_is_pending() {
  let mut store = join_workflow();
  store.complete(n(1)).unwrap();

  assert!(!store.is_available(n(3)).unwrap());
  assert_eq!(
    store.complete(n(3)).unwrap(),
    CompletionOutcome::NotAvailable {
      blocker: Blocker::PendingPredecessors(vec![n(2)])
    }
  );
  assert!(!store.node(n(3)).unwrap().is_completed());
}

#[test]
fn deleting_middle_of_chain_bridges_its_neighbours() {
  let mut store = build(3, &[(1, 2), (2, 3)]);

  store.remove_node(n(2)).unwrap();

  assert_eq!(edges(&store), vec![(1, 3)]);
  assert!(!store.contains_edge(n(1), n(2)));
  assert!(!store.contains_edge(n(2), n(3)));
  assert!(!store.contains_node(n(2)));
}

#[test]
fn deleting_middle_of_chain_keeps_existing_shortcut_single() {
  let mut store = build(3, &[(1, 2), (2, 3), (1, 3)]);

  let removal = store.remove_node(n(2)).unwrap();

  assert_eq!(edges(&store), vec![(1, 3)]);
  assert!(removal.synthesized.is_empty());
}

#[test]
fn deleting_a_completed_predecessor_keeps_dependents_available() {
  let mut store = build(3, &[(1, 2), (2, 3)]);
  store.complete(n(1)).unwrap();
  store.complete(n(2)).unwrap();

  store.remove_node(n(2)).unwrap();

  assert!(store.is_available(n(3)).unwrap());
}

#[test]
fn deleting_a_pending_node_keeps_dependents_blocked_by_its_predecessors() {
  let mut store = build(3, &[(1, 2), (2, 3)]);

  store.remove_node(n(2)).unwrap();

  assert!(!store.is_available(n(3)).unwrap());
  assert!(store.complete(n(1)).unwrap().is_completed());
  assert!(store.is_available(n(3)).unwrap());
}

#[test]
fn new_nodes_start_available_and_get_fresh_ids() {
  let mut store = join_workflow();
  store.remove_node(n(3)).unwrap();

  let added = store.add_node(None);

  assert_eq!(added, n(4));
  assert_eq!(store.node(added).unwrap().label(), "Node 4");
  assert!(store.is_available(added).unwrap());
}

#[test]
fn snapshot_reports_derived_availability() {
  let mut store = join_workflow();
  store.complete(n(1)).unwrap();

  let snapshot = store.snapshot();

  let availability: Vec<(u64, bool, bool)> = snapshot
    .nodes
    .iter()
    .map(|node| (node.id.get(), node.completed, node.available))
    .collect();
  assert_eq!(
    availability,
    vec![(1, true, false), (2, false, true), (3, false, false)]
  );
  assert_eq!(
    snapshot.edges,
    vec![Edge::new(n(1), n(3)), Edge::new(n(2), n(3))]
  );
}

#[test]
fn snapshot_serializes_for_the_view_layer() {
  let store = build(2, &[(1, 2)]);

  let value = serde_json::to_value(store.snapshot()).unwrap();

  assert_eq!(
    value,
    serde_json::json!({
      "nodes": [
        { "id": 1, "label": "Node 1", "completed": false, "available": true },
        { "id": 2, "label": "Node 2", "completed": false, "available": false }
      ],
      "edges": [{ "id": "e1-2", "source": 1, "target": 2 }]
    })
  );
}
