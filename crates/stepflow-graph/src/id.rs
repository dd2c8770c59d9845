//! Node and edge identities.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Stable identity of a node within one graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
  pub const fn new(raw: u64) -> Self {
    Self(raw)
  }

  pub const fn get(self) -> u64 {
    self.0
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<u64> for NodeId {
  fn from(raw: u64) -> Self {
    Self(raw)
  }
}

impl FromStr for NodeId {
  type Err = ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.trim().parse().map(Self)
  }
}

/// Identity of an edge, derived from its ordered `(source, target)` pair.
///
/// Displays as `e{source}-{target}`, so `1 -> 3` is `e1-3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
  source: NodeId,
  target: NodeId,
}

impl EdgeId {
  pub const fn new(source: NodeId, target: NodeId) -> Self {
    Self { source, target }
  }
}

impl fmt::Display for EdgeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "e{}-{}", self.source, self.target)
  }
}

impl Serialize for EdgeId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// Hands out node ids for a single store.
///
/// Starts at 1 when the store is created and only moves forward, so an id
/// is never reused after its node is deleted.
#[derive(Debug, Clone)]
pub struct IdAllocator {
  next: u64,
}

impl IdAllocator {
  pub fn new() -> Self {
    Self { next: 1 }
  }

  /// Allocate the next node id.
  pub fn allocate(&mut self) -> NodeId {
    let id = NodeId(self.next);
    self.next += 1;
    id
  }
}

impl Default for IdAllocator {
  fn default() -> Self {
    Self::new()
  }
}
