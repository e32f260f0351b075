//! SchemaBuilder: root orchestrator of one inference request.
//!
//! Owns a single SchemaNode tree, accepts a stream of observations
//! (concrete JSON values and/or schema fragments), and emits the final
//! schema document. Build one per request and discard it afterwards; no
//! state crosses invocations.

use serde_json::Value;

use crate::canonical::{annotate_properties, canonicalize, PropertyCatalog};
use crate::error::{Result, SchemaError};
use crate::schema::node::SchemaNode;

/// Default `$schema` metadata URI for emitted documents.
pub const DEFAULT_SCHEMA_URI: &str = "http://json-schema.org/draft-06/schema#";

#[derive(Debug)]
pub struct SchemaBuilder {
    schema_uri: String,
    root: SchemaNode,
}

impl SchemaBuilder {
    pub fn new(schema_uri: impl Into<String>) -> Self {
        SchemaBuilder {
            schema_uri: schema_uri.into(),
            root: SchemaNode::new(),
        }
    }

    /// Merge a JSON-Schema-shaped fragment into the tree.
    pub fn add_schema(&mut self, fragment: &Value) -> Result<()> {
        let fragment = fragment.as_object().ok_or_else(|| {
            SchemaError::MalformedFragment("schema fragment is not a mapping".to_string())
        })?;
        self.root.add_schema(fragment)
    }

    /// Observe one concrete JSON value.
    pub fn add_object(&mut self, value: &Value) {
        self.root.add_object(value);
    }

    /// Emit the raw inferred schema with the `$schema` URI merged in.
    pub fn to_schema(&self) -> Value {
        let mut schema = self.root.to_schema();
        // The builder's declared URI wins over any merged-in `$schema`
        schema.insert(
            "$schema".to_string(),
            Value::String(self.schema_uri.clone()),
        );
        Value::Object(schema)
    }

    /// Emit the canonical schema: structural ids assigned, keys in
    /// deterministic order.
    pub fn to_canonical_schema(&self) -> Result<Value> {
        canonicalize(&self.to_schema())
    }

    /// Like [`to_canonical_schema`](Self::to_canonical_schema), but first
    /// stamps `title`/`description` on every property schema from the
    /// given catalog.
    pub fn to_canonical_schema_with(&self, catalog: &dyn PropertyCatalog) -> Result<Value> {
        let mut schema = self.to_schema();
        annotate_properties(&mut schema, catalog);
        canonicalize(&schema)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        SchemaBuilder::new(DEFAULT_SCHEMA_URI)
    }
}

/// Convenience: infer the canonical schema for a set of example values.
pub fn infer_canonical_schema(examples: &[Value]) -> Result<Value> {
    let mut builder = SchemaBuilder::default();
    for example in examples {
        builder.add_object(example);
    }
    builder.to_canonical_schema()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_builder_emits_uri_only() {
        let builder = SchemaBuilder::new("http://example.com/schema#");
        assert_eq!(
            builder.to_schema(),
            json!({"$schema": "http://example.com/schema#"})
        );
    }

    #[test]
    fn test_merged_instances_intersect_required() {
        let mut builder = SchemaBuilder::default();
        builder.add_object(&json!({"a": 1, "b": 2}));
        builder.add_object(&json!({"a": 3}));
        let schema = builder.to_schema();

        assert_eq!(schema.get("required"), Some(&json!(["a"])));
        let properties = schema.get("properties").unwrap();
        assert_eq!(properties.get("a"), Some(&json!({"type": "integer"})));
        assert_eq!(properties.get("b"), Some(&json!({"type": "integer"})));
    }

    #[test]
    fn test_fragment_and_instance_merge() {
        let mut builder = SchemaBuilder::default();
        builder
            .add_schema(&json!({
                "type": "object",
                "properties": {"name": {"type": "string"}},
                "required": ["name"]
            }))
            .unwrap();
        builder.add_object(&json!({"name": "Alice", "age": 30}));
        let schema = builder.to_schema();

        assert_eq!(schema.get("required"), Some(&json!(["name"])));
        let properties = schema.get("properties").unwrap();
        assert_eq!(properties.get("age"), Some(&json!({"type": "integer"})));
    }

    #[test]
    fn test_non_mapping_fragment_is_rejected() {
        let mut builder = SchemaBuilder::default();
        assert!(builder.add_schema(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_builder_uri_wins_over_fragment_uri() {
        let mut builder = SchemaBuilder::new("http://mine/schema#");
        builder
            .add_schema(&json!({"$schema": "http://other/schema#", "type": "boolean"}))
            .unwrap();
        let schema = builder.to_schema();
        assert_eq!(schema.get("$schema"), Some(&json!("http://mine/schema#")));
    }

    #[test]
    fn test_idempotent_against_own_output() {
        let mut builder = SchemaBuilder::default();
        builder.add_object(&json!({"a": [1, 2], "b": "2021-01-01"}));
        let emitted = builder.to_schema();
        builder.add_schema(&emitted).unwrap();
        assert_eq!(builder.to_schema(), emitted);
    }

    #[test]
    fn test_canonical_order_reaches_union_alternatives() {
        let mut builder = SchemaBuilder::default();
        builder.add_object(&json!({"v": "s"}));
        builder.add_object(&json!({"v": {"b": 1, "a": 2}}));
        let canonical = builder.to_canonical_schema().unwrap();

        let alternatives = canonical["properties"]["v"]["anyOf"].as_array().unwrap();
        let keys: Vec<&String> = alternatives[1].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["type", "required", "properties"]);
        // property name order inside the alternative is still preserved
        let names: Vec<&String> = alternatives[1]["properties"].as_object().unwrap().keys().collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_canonical_schema_orders_keys() {
        let mut builder = SchemaBuilder::default();
        builder.add_object(&json!({"x": 1}));
        let canonical = builder.to_canonical_schema().unwrap();
        let keys: Vec<&String> = canonical.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["$schema", "type", "required", "properties"]);
    }
}
