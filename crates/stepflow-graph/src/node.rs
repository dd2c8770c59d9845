use serde::Serialize;

use crate::id::NodeId;

/// A workflow step.
///
/// Only the store mutates nodes. `completed` moves from false to true once
/// and never back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
  pub(crate) id: NodeId,
  pub(crate) label: String,
  pub(crate) completed: bool,
}

impl Node {
  pub(crate) fn new(id: NodeId, label: String) -> Self {
    Self {
      id,
      label,
      completed: false,
    }
  }

  pub fn id(&self) -> NodeId {
    self.id
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn is_completed(&self) -> bool {
    self.completed
  }
}
