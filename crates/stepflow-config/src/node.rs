use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDef {
  /// Config-local key used by edges to refer to this node.
  pub key: String,

  /// Display text. When absent the store derives one from the label prefix
  /// and the allocated node id, e.g. "Node 3".
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,

  /// Whether the node starts completed. Completions are applied after all
  /// edges exist, so every predecessor of a completed node must be completed too.
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub completed: bool,
}

impl NodeDef {
  pub fn new(key: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      label: None,
      completed: false,
    }
  }

  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  pub fn completed(mut self) -> Self {
    self.completed = true;
    self
  }
}
