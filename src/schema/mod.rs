//! Incremental JSON Schema inference.
//!
//! The inference tree: a [`SchemaBuilder`] owns a root [`SchemaNode`],
//! each node dispatches observations to type strategies, and `to_schema`
//! emits the merged result.

pub mod builder;
pub mod format;
pub mod node;
pub mod strategy;

pub use builder::{infer_canonical_schema, SchemaBuilder, DEFAULT_SCHEMA_URI};
pub use node::SchemaNode;
