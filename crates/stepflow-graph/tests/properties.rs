//! Randomized checks of the graph invariants.

use std::collections::BTreeSet;

use proptest::prelude::*;
use stepflow_graph::{
  Connection, GraphStore, NodeId, derive_availability, find_cycle, invariant_violations,
};

fn n(raw: u64) -> NodeId {
  NodeId::new(raw)
}

/// A store with `count` nodes after attempting every candidate connection.
fn store_from(count: u64, candidates: &[(u64, u64)]) -> GraphStore {
  let mut store = GraphStore::new();
  for _ in 0..count {
    store.add_node(None);
  }
  for (from, to) in candidates {
    store
      .add_edge(n(*from), n(*to))
      .unwrap_or_else(|e| panic!("candidate {from} -> {to} used an unknown node: {e}"));
  }
  store
}

fn graph_strategy() -> impl Strategy<Value = (u64, Vec<(u64, u64)>)> {
  (1u64..9).prop_flat_map(|count| {
    let pair = (1..=count, 1..=count);
    (Just(count), prop::collection::vec(pair, 0..24))
  })
}

proptest! {
  #[test]
  fn accepted_connections_keep_the_graph_acyclic((count, candidates) in graph_strategy()) {
    let mut store = GraphStore::new();
    for _ in 0..count {
      store.add_node(None);
    }
    for (from, to) in candidates {
      let connection = store.add_edge(n(from), n(to)).unwrap();
      if let Connection::Connected(_) = connection {
        prop_assert_eq!(find_cycle(store.graph()), None);
      }
      prop_assert!(invariant_violations(store.graph()).is_empty());
    }
  }

  #[test]
  fn available_nodes_have_only_completed_predecessors(
    (count, candidates) in graph_strategy(),
    attempts in prop::collection::vec(1u64..9, 0..16),
  ) {
    let mut store = store_from(count, &candidates);
    for raw in attempts.into_iter().filter(|raw| *raw <= count) {
      store.complete(n(raw)).unwrap();
    }

    let availability = derive_availability(store.graph());
    prop_assert_eq!(&availability, &derive_availability(store.graph()));

    for (node_id, available) in availability {
      let node = store.node(node_id).unwrap();
      let preds_completed = store
        .predecessors(node_id)
        .unwrap()
        .into_iter()
        .all(|pred| store.node(pred).unwrap().is_completed());
      prop_assert_eq!(available, !node.is_completed() && preds_completed);
    }
  }

  #[test]
  fn completed_nodes_had_completed_predecessors(
    (count, candidates) in graph_strategy(),
    attempts in prop::collection::vec(1u64..9, 0..16),
  ) {
    let mut store = store_from(count, &candidates);
    for raw in attempts.into_iter().filter(|raw| *raw <= count) {
      let node_id = n(raw);
      let preds_completed = store
        .predecessors(node_id)
        .unwrap()
        .into_iter()
        .all(|pred| store.node(pred).unwrap().is_completed());
      let was_completed = store.node(node_id).unwrap().is_completed();

      let outcome = store.complete(node_id).unwrap();

      prop_assert_eq!(outcome.is_completed(), !was_completed && preds_completed);
      prop_assert_eq!(
        store.node(node_id).unwrap().is_completed(),
        was_completed || preds_completed
      );
    }
  }

  #[test]
  fn deletion_bridges_predecessors_to_successors(
    (count, candidates) in graph_strategy(),
    victim in 1u64..9,
  ) {
    prop_assume!(victim <= count);
    let mut store = store_from(count, &candidates);
    let victim = n(victim);
    let predecessors = store.predecessors(victim).unwrap();
    let successors = store.successors(victim).unwrap();
    let untouched: BTreeSet<_> = store
      .edges()
      .filter(|edge| !edge.touches(victim))
      .copied()
      .collect();

    store.remove_node(victim).unwrap();

    for p in &predecessors {
      for s in &successors {
        prop_assert!(p != s);
        prop_assert!(store.contains_edge(*p, *s));
      }
    }
    for edge in &untouched {
      prop_assert!(store.contains_edge(edge.source, edge.target));
    }
    let ids: Vec<String> = store.edges().map(|edge| edge.id().to_string()).collect();
    let unique: BTreeSet<&String> = ids.iter().collect();
    prop_assert_eq!(unique.len(), ids.len());
    prop_assert!(store.edges().all(|edge| !edge.touches(victim) && edge.source != edge.target));
    prop_assert!(invariant_violations(store.graph()).is_empty());
  }
}
