use serde::{Deserialize, Serialize};

use crate::edge::EdgeDef;
use crate::node::NodeDef;

/// Label prefix used for nodes created without an explicit label.
pub const DEFAULT_LABEL_PREFIX: &str = "Node";

fn default_label_prefix() -> String {
  DEFAULT_LABEL_PREFIX.to_string()
}

/// The initial shape of a workflow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
  #[serde(default = "default_label_prefix")]
  pub label_prefix: String,
  #[serde(default)]
  pub nodes: Vec<NodeDef>,
  #[serde(default)]
  pub edges: Vec<EdgeDef>,
}

impl GraphConfig {
  /// The starting workflow: two independent steps feeding a third.
  pub fn sample() -> Self {
    Self {
      label_prefix: default_label_prefix(),
      nodes: vec![NodeDef::new("1"), NodeDef::new("2"), NodeDef::new("3")],
      edges: vec![EdgeDef::new("1", "3"), EdgeDef::new("2", "3")],
    }
  }
}

impl Default for GraphConfig {
  fn default() -> Self {
    Self {
      label_prefix: default_label_prefix(),
      nodes: Vec::new(),
      edges: Vec::new(),
    }
  }
}
