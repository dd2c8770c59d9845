use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use stepflow_config::DEFAULT_LABEL_PREFIX;
use tracing::{debug, info, instrument};

use crate::availability::{derive_availability, is_available};
use crate::completion::{CompletionOutcome, apply_completion};
use crate::cycle::check_connection;
use crate::edge::Edge;
use crate::error::{GraphError, InvalidConnection};
use crate::events::{GraphEvent, GraphObserver, GraphUpdate};
use crate::graph::Graph;
use crate::id::{EdgeId, IdAllocator, NodeId};
use crate::invariants::is_consistent;
use crate::node::Node;
use crate::rewrite::rewire_without;
use crate::snapshot::GraphSnapshot;

/// Result of a connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Connection {
  /// A new edge was committed.
  Connected(EdgeId),
  /// The edge already existed; nothing changed.
  AlreadyConnected(EdgeId),
  /// The edge was refused; nothing changed.
  Rejected(InvalidConnection),
}

impl Connection {
  pub fn is_accepted(&self) -> bool {
    !matches!(self, Self::Rejected(_))
  }
}

/// What a node deletion changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
  pub node: Node,
  pub dropped: Vec<Edge>,
  pub synthesized: Vec<Edge>,
}

/// Owns the workflow graph and applies every mutation to it.
///
/// Each mutating call validates against the committed graph, commits in one
/// step, then notifies observers. Callers never see a half-applied change.
pub struct GraphStore {
  graph: Graph,
  ids: IdAllocator,
  label_prefix: String,
  observers: Vec<Box<dyn GraphObserver>>,
}

impl GraphStore {
  /// Create an empty store. Node ids start at 1.
  pub fn new() -> Self {
    Self::with_label_prefix(DEFAULT_LABEL_PREFIX)
  }

  /// Create an empty store whose unlabeled nodes are named `"{prefix} {id}"`.
  pub fn with_label_prefix(prefix: impl Into<String>) -> Self {
    Self {
      graph: Graph::new(),
      ids: IdAllocator::new(),
      label_prefix: prefix.into(),
      observers: Vec::new(),
    }
  }

  /// Register an observer for all later commits.
  pub fn subscribe(&mut self, observer: impl GraphObserver + 'static) {
    self.observers.push(Box::new(observer));
  }

  /// The committed graph.
  pub fn graph(&self) -> &Graph {
    &self.graph
  }

  pub fn node(&self, node_id: NodeId) -> Option<&Node> {
    self.graph.node(node_id)
  }

  pub fn nodes(&self) -> impl Iterator<Item = &Node> {
    self.graph.nodes()
  }

  pub fn edges(&self) -> impl Iterator<Item = &Edge> {
    self.graph.edges()
  }

  pub fn contains_node(&self, node_id: NodeId) -> bool {
    self.graph.contains_node(node_id)
  }

  pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
    self.graph.contains_edge(source, target)
  }

  pub fn predecessors(&self, node_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
    self.require(node_id)?;
    Ok(self.graph.predecessors(node_id).collect())
  }

  pub fn successors(&self, node_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
    self.require(node_id)?;
    Ok(self.graph.successors(node_id).collect())
  }

  pub fn is_available(&self, node_id: NodeId) -> Result<bool, GraphError> {
    self.require(node_id)?;
    Ok(is_available(&self.graph, node_id))
  }

  /// Availability of every node, derived from the committed graph.
  pub fn availability(&self) -> BTreeMap<NodeId, bool> {
    derive_availability(&self.graph)
  }

  pub fn snapshot(&self) -> GraphSnapshot {
    GraphSnapshot::capture(&self.graph)
  }

  /// Add a node. Without a label it is named from the prefix and its id.
  pub fn add_node(&mut self, label: Option<String>) -> NodeId {
    let node_id = self.ids.allocate();
    let label = label.unwrap_or_else(|| format!("{} {}", self.label_prefix, node_id));
    self.graph.insert_node(Node::new(node_id, label.clone()));

    info!(%node_id, %label, "node added");
    self.commit(GraphEvent::NodeAdded { node_id, label });
    node_id
  }

  /// Connect `source -> target` ("target depends on source").
  ///
  /// Self-loops and connections that would close a cycle come back as
  /// [`Connection::Rejected`] with the store unchanged.
  pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<Connection, GraphError> {
    self.require(source)?;
    self.require(target)?;

    let edge = Edge::new(source, target);
    if self.graph.contains_edge(source, target) {
      return Ok(Connection::AlreadyConnected(edge.id()));
    }

    if let Err(reason) = check_connection(&self.graph, source, target) {
      return Ok(Connection::Rejected(reason));
    }

    self.graph.insert_edge(edge);
    info!(edge_id = %edge.id(), "edge added");
    self.commit(GraphEvent::EdgeAdded { edge });
    Ok(Connection::Connected(edge.id()))
  }

  /// Remove the edge `source -> target`. Returns false if there was none.
  pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> Result<bool, GraphError> {
    self.require(source)?;
    self.require(target)?;

    let edge = Edge::new(source, target);
    if !self.graph.remove_edge(&edge) {
      return Ok(false);
    }

    info!(edge_id = %edge.id(), "edge removed");
    self.commit(GraphEvent::EdgeRemoved { edge });
    Ok(true)
  }

  /// Delete a node, bridging each predecessor to each successor.
  #[instrument(skip(self))]
  pub fn remove_node(&mut self, node_id: NodeId) -> Result<Removal, GraphError> {
    self.require(node_id)?;

    let rewire = rewire_without(&self.graph, node_id);
    self.graph.replace_edges(rewire.edges);
    let node = self
      .graph
      .remove_node(node_id)
      .ok_or(GraphError::UnknownNode(node_id))?;

    info!(
      dropped = rewire.dropped.len(),
      synthesized = rewire.synthesized.len(),
      "node removed"
    );
    self.commit(GraphEvent::NodeRemoved {
      node_id,
      dropped: rewire.dropped.clone(),
      synthesized: rewire.synthesized.clone(),
    });

    Ok(Removal {
      node,
      dropped: rewire.dropped,
      synthesized: rewire.synthesized,
    })
  }

  /// Delete several nodes in order. Every id is checked before any is
  /// removed; repeated ids are removed once.
  pub fn remove_nodes(&mut self, node_ids: &[NodeId]) -> Result<Vec<Removal>, GraphError> {
    for node_id in node_ids {
      self.require(*node_id)?;
    }

    let mut removals = Vec::with_capacity(node_ids.len());
    for (index, node_id) in node_ids.iter().enumerate() {
      if node_ids[..index].contains(node_id) {
        continue;
      }
      removals.push(self.remove_node(*node_id)?);
    }
    Ok(removals)
  }

  pub fn set_label(&mut self, node_id: NodeId, label: impl Into<String>) -> Result<(), GraphError> {
    let label = label.into();
    let node = self
      .graph
      .node_mut(node_id)
      .ok_or(GraphError::UnknownNode(node_id))?;
    node.label = label.clone();

    info!(%node_id, %label, "node renamed");
    self.commit(GraphEvent::NodeRenamed { node_id, label });
    Ok(())
  }

  /// Mark a node completed if it is available.
  ///
  /// An unavailable node is left untouched and the outcome says why.
  pub fn complete(&mut self, node_id: NodeId) -> Result<CompletionOutcome, GraphError> {
    self.require(node_id)?;

    let outcome = apply_completion(&mut self.graph, node_id);
    match &outcome {
      CompletionOutcome::Completed => {
        info!(%node_id, "node completed");
        self.commit(GraphEvent::NodeCompleted { node_id });
      }
      CompletionOutcome::NotAvailable { blocker } => {
        debug!(%node_id, ?blocker, "completion refused");
      }
      CompletionOutcome::Unchanged => {}
    }
    Ok(outcome)
  }

  /// Set the completion flag. Completion only moves forward: `true` goes
  /// through [`complete`](Self::complete), `false` is refused for a
  /// completed node and a no-op otherwise.
  pub fn set_completed(
    &mut self,
    node_id: NodeId,
    completed: bool,
  ) -> Result<CompletionOutcome, GraphError> {
    if completed {
      return self.complete(node_id);
    }

    match self.graph.node(node_id) {
      None => Err(GraphError::UnknownNode(node_id)),
      Some(node) if node.is_completed() => Err(GraphError::CompletionIrreversible(node_id)),
      Some(_) => Ok(CompletionOutcome::Unchanged),
    }
  }

  fn require(&self, node_id: NodeId) -> Result<(), GraphError> {
    if self.graph.contains_node(node_id) {
      Ok(())
    } else {
      Err(GraphError::UnknownNode(node_id))
    }
  }

  fn commit(&self, event: GraphEvent) {
    debug_assert!(
      is_consistent(&self.graph),
      "graph invariants broken after {event:?}"
    );

    if self.observers.is_empty() {
      return;
    }

    let snapshot = GraphSnapshot::capture(&self.graph);
    for observer in &self.observers {
      observer.notify(GraphUpdate {
        event: event.clone(),
        snapshot: snapshot.clone(),
      });
    }
  }
}

impl Default for GraphStore {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for GraphStore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GraphStore")
      .field("graph", &self.graph)
      .field("ids", &self.ids)
      .field("label_prefix", &self.label_prefix)
      .field("observers", &self.observers.len())
      .finish()
  }
}
