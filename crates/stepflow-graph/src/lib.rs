//! Stepflow Graph
//!
//! This crate holds the consistency engine behind a visual workflow builder:
//! a directed graph of steps where an edge `a -> b` means "b depends on a".
//!
//! Three behaviors carry the invariants:
//! - [`check_connection`] refuses self-loops and any edge that would close a cycle
//! - [`derive_availability`] decides which steps may be completed now
//! - [`rewire_without`] keeps "p before s" relationships alive when a step in
//!   between is deleted
//!
//! The [`GraphStore`] owns the nodes and edges, runs every request through
//! those checks, commits, and then notifies [`GraphObserver`]s with the event
//! and a fresh [`GraphSnapshot`].
//!
//! # Usage
//!
//! ```
//! use stepflow_graph::{Connection, GraphStore};
//!
//! let mut store = GraphStore::new();
//! let fetch = store.add_node(None);
//! let build = store.add_node(Some("Build".to_string()));
//!
//! assert!(matches!(store.add_edge(fetch, build)?, Connection::Connected(_)));
//! assert!(!store.add_edge(build, fetch)?.is_accepted());
//!
//! assert!(!store.complete(build)?.is_completed());
//! assert!(store.complete(fetch)?.is_completed());
//! assert!(store.is_available(build)?);
//! # Ok::<(), stepflow_graph::GraphError>(())
//! ```

mod adjacency;
mod availability;
mod completion;
mod cycle;
mod edge;
mod error;
mod events;
mod graph;
mod id;
mod invariants;
mod node;
mod rewrite;
mod seed;
mod snapshot;
mod store;

pub use adjacency::Adjacency;
pub use availability::{derive_availability, is_available, pending_predecessors};
pub use completion::{Blocker, CompletionOutcome, completion_gate};
pub use cycle::{check_connection, is_valid_connection};
pub use edge::Edge;
pub use error::{GraphError, InvalidConnection};
pub use events::{
  ChannelObserver, GraphEvent, GraphObserver, GraphUpdate, LogObserver, NoopObserver,
};
pub use graph::Graph;
pub use id::{EdgeId, IdAllocator, NodeId};
pub use invariants::{InvariantViolation, find_cycle, invariant_violations, is_consistent};
pub use node::Node;
pub use rewrite::{Rewire, rewire_without};
pub use snapshot::{GraphSnapshot, NodeView};
pub use store::{Connection, GraphStore, Removal};
