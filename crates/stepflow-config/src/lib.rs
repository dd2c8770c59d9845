//! Stepflow Config
//!
//! This crate contains the serializable configuration types for Stepflow.
//! They describe the graph a store starts from before any user action is
//! applied: the initial steps, their dependency edges and which steps begin
//! completed.
//!
//! Configuration is loaded from JSON files (via the CLI with `--config=graph.json`).
//! Nodes are referred to by a config-local `key`; the graph store allocates
//! the real node ids when it seeds itself from a [`GraphConfig`].
//!
//! # Example
//!
//! ```json
//! {
//!   "label_prefix": "Step",
//!   "nodes": [
//!     { "key": "fetch", "label": "Fetch sources", "completed": true },
//!     { "key": "build" }
//!   ],
//!   "edges": [{ "from": "fetch", "to": "build" }]
//! }
//! ```

mod edge;
mod graph;
mod node;

pub use edge::EdgeDef;
pub use graph::{DEFAULT_LABEL_PREFIX, GraphConfig};
pub use node::NodeDef;
