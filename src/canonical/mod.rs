//! Canonicalization: post-processing of a finished schema document.
//!
//! The pipeline assigns a structural `$id` to every subtree, optionally
//! enriches property schemas with titles and descriptions, and reorders
//! keys deterministically so two equivalent schemas serialize identically.

pub mod enrich;
pub mod ids;
pub mod nested;
pub mod order;

use serde_json::Value;

use crate::error::Result;

pub use enrich::{annotate_properties, CatalogEntry, EmptyCatalog, MapCatalog, PropertyCatalog};
pub use ids::assign_structural_ids;
pub use nested::NestedDict;
pub use order::{canonical_order, KEY_PRIORITY};

/// Run the full pipeline: structural ids, then canonical key order.
pub fn canonicalize(schema: &Value) -> Result<Value> {
    let decorated = assign_structural_ids(schema)?;
    canonical_order(&decorated.into_value())
}
