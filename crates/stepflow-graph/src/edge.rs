use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::id::{EdgeId, NodeId};

/// A dependency: `target` cannot complete until `source` is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
  pub source: NodeId,
  pub target: NodeId,
}

impl Edge {
  pub const fn new(source: NodeId, target: NodeId) -> Self {
    Self { source, target }
  }

  pub const fn id(&self) -> EdgeId {
    EdgeId::new(self.source, self.target)
  }

  /// Whether either endpoint is `node_id`.
  pub fn touches(&self, node_id: NodeId) -> bool {
    self.source == node_id || self.target == node_id
  }
}

impl Serialize for Edge {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Edge", 3)?;
    state.serialize_field("id", &self.id())?;
    state.serialize_field("source", &self.source)?;
    state.serialize_field("target", &self.target)?;
    state.end()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_edge_serializes_with_id() {
    let edge = Edge::new(NodeId::new(2), NodeId::new(3));
    assert_eq!(
      serde_json::to_value(edge).unwrap(),
      serde_json::json!({ "id": "e2-3", "source": 2, "target": 3 })
    );
  }

  #[test]
  fn test_touches() {
    let edge = Edge::new(NodeId::new(1), NodeId::new(2));
    assert!(edge.touches(NodeId::new(1)));
    assert!(edge.touches(NodeId::new(2)));
    assert!(!edge.touches(NodeId::new(3)));
  }
}
