//! # Crucible - JSON Schema Inference & Canonicalization
//!
//! A library for inferring a minimal, deterministic JSON Schema from
//! concrete JSON documents and/or partial schema fragments, and for
//! transforming the result into a canonical, path-addressable form
//! suitable for stable diffing and publishing.
//!
//! ## Modules
//!
//! - **schema**: the inference tree (builder, nodes, type strategies)
//! - **canonical**: post-processing (structural ids, key ordering,
//!   title/description enrichment, path-addressable views)
//!
//! ## Quick Start
//!
//! ```rust
//! use crucible::SchemaBuilder;
//! use serde_json::json;
//!
//! # fn main() -> crucible::Result<()> {
//! let mut builder = SchemaBuilder::default();
//! builder.add_object(&json!({"a": 1, "b": 2}));
//! builder.add_object(&json!({"a": 3}));
//!
//! let schema = builder.to_canonical_schema()?;
//! // {"$schema": ..., "type": "object", "required": ["a"], "properties": {...}}
//! assert_eq!(schema.get("required"), Some(&json!(["a"])));
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod error;
pub mod schema;

// Re-export commonly used types for convenience
pub use canonical::{
    annotate_properties, assign_structural_ids, canonical_order, canonicalize, EmptyCatalog,
    MapCatalog, NestedDict, PropertyCatalog,
};
pub use error::{Result, SchemaError};
pub use schema::{infer_canonical_schema, SchemaBuilder, SchemaNode, DEFAULT_SCHEMA_URI};
