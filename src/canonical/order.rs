//! Deterministic key ordering for emitted schema documents.
//!
//! Every mapping in the document is reordered by a fixed priority list,
//! recursively, with one exception: the direct value of a `properties` or
//! `patternProperties` key holds schema-defined names, whose order is
//! preserved (their values are still reordered). The priority list is
//! exhaustive for everything this engine emits; an unlisted key is a
//! contract error, not a recoverable condition.

use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};

/// Priority order for schema keys, highest first.
pub const KEY_PRIORITY: [&str; 12] = [
    "$schema",
    "$id",
    "type",
    "const",
    "format",
    "anyOf",
    "title",
    "description",
    "required",
    "items",
    "patternProperties",
    "properties",
];

fn rank(key: &str) -> Result<usize> {
    KEY_PRIORITY
        .iter()
        .position(|candidate| *candidate == key)
        .ok_or_else(|| SchemaError::UnrankedKey(key.to_string()))
}

/// Reorder `schema` into canonical key order.
pub fn canonical_order(schema: &Value) -> Result<Value> {
    order_value(schema, false)
}

fn order_value(value: &Value, preserve_names: bool) -> Result<Value> {
    match value {
        Value::Object(map) => Ok(Value::Object(order_map(map, preserve_names)?)),
        // Mappings inside arrays (e.g. `anyOf` alternatives) are ordered too
        Value::Array(items) => items
            .iter()
            .map(|item| order_value(item, false))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

fn order_map(map: &Map<String, Value>, preserve_names: bool) -> Result<Map<String, Value>> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    if !preserve_names {
        let mut ranked = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            ranked.push((rank(key)?, key, value));
        }
        ranked.sort_by_key(|(rank, _, _)| *rank);
        entries = ranked.into_iter().map(|(_, k, v)| (k, v)).collect();
    }

    let mut ordered = Map::new();
    for (key, value) in entries {
        let names = !preserve_names && (key == "properties" || key == "patternProperties");
        ordered.insert(key.clone(), order_value(value, names)?);
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_top_level_priority_order() {
        let schema = json!({"type": "object", "required": ["x"], "$schema": "s"});
        let ordered = canonical_order(&schema).unwrap();
        assert_eq!(keys(&ordered), ["$schema", "type", "required"]);
    }

    #[test]
    fn test_property_names_keep_their_order() {
        let schema = json!({
            "type": "object",
            "properties": {
                "zeta": {"required": [], "type": "object"},
                "alpha": {"type": "string"}
            }
        });
        let ordered = canonical_order(&schema).unwrap();
        let properties = ordered.get("properties").unwrap();
        assert_eq!(keys(properties), ["zeta", "alpha"]);
        // ...but each property schema is itself reordered
        assert_eq!(keys(properties.get("zeta").unwrap()), ["type", "required"]);
    }

    #[test]
    fn test_pattern_sources_keep_their_order() {
        let schema = json!({
            "type": "object",
            "patternProperties": {
                "^z": {"type": "string"},
                "^a": {"type": "string"}
            }
        });
        let ordered = canonical_order(&schema).unwrap();
        assert_eq!(keys(ordered.get("patternProperties").unwrap()), ["^z", "^a"]);
    }

    #[test]
    fn test_any_of_alternatives_are_reordered() {
        // A value that varied in type emits a union; the object
        // alternative sits inside an array but must still come out in
        // canonical key order.
        let schema = json!({
            "type": "object",
            "properties": {
                "v": {
                    "anyOf": [
                        {"type": "string"},
                        {
                            "type": "object",
                            "properties": {"a": {"type": "integer"}},
                            "required": ["a"]
                        }
                    ]
                }
            }
        });
        let ordered = canonical_order(&schema).unwrap();
        let alternatives = ordered["properties"]["v"]["anyOf"].as_array().unwrap();
        assert_eq!(keys(&alternatives[0]), ["type"]);
        assert_eq!(keys(&alternatives[1]), ["type", "required", "properties"]);
    }

    #[test]
    fn test_unranked_key_fails_fast() {
        let schema = json!({"type": "object", "bogus": 1});
        let err = canonical_order(&schema).unwrap_err();
        assert!(matches!(err, SchemaError::UnrankedKey(k) if k == "bogus"));
    }

    #[test]
    fn test_property_named_like_container_is_still_ranked() {
        // A schema-defined property literally called "properties": its own
        // schema map must still be reordered, not name-preserved.
        let schema = json!({
            "type": "object",
            "properties": {
                "properties": {"required": ["a"], "type": "object"}
            }
        });
        let ordered = canonical_order(&schema).unwrap();
        let inner = ordered.get("properties").unwrap().get("properties").unwrap();
        assert_eq!(keys(inner), ["type", "required"]);
    }

    #[test]
    fn test_every_emitted_key_is_ranked() {
        let schema = json!({
            "$schema": "s",
            "$id": "#/x",
            "type": "object",
            "const": 1,
            "format": "date",
            "anyOf": [],
            "title": "t",
            "description": "d",
            "required": [],
            "items": {"type": "string"},
            "patternProperties": {},
            "properties": {}
        });
        assert!(canonical_order(&schema).is_ok());
    }
}
