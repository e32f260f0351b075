//! Structural identifier assignment.
//!
//! Depth-first walk over a finished schema document that stamps a
//! synthetic `$id` of the form `#/<segments>` onto every subschema of a
//! parallel [`NestedDict`] copy. Segments are the property names, pattern
//! sources, and `items` steps taken to reach the subschema; the container
//! keywords `properties` / `patternProperties` are omitted from the id,
//! and the root document itself carries none. The id path is threaded
//! explicitly through the recursion, pushed before each descent and
//! popped right after it.

use serde_json::{json, Map, Value};

use crate::canonical::nested::NestedDict;
use crate::error::{Result, SchemaError};

/// Produce a copy of `schema` with structural ids assigned.
pub fn assign_structural_ids(schema: &Value) -> Result<NestedDict> {
    let root = schema.as_object().ok_or_else(|| {
        SchemaError::MalformedFragment("schema document is not a mapping".to_string())
    })?;
    let mut out = NestedDict::new(root.clone());
    let mut raw_path = Vec::new();
    let mut id_path = Vec::new();
    stamp(root, &mut raw_path, &mut id_path, &mut out)?;
    Ok(out)
}

fn stamp(
    node: &Map<String, Value>,
    raw_path: &mut Vec<String>,
    id_path: &mut Vec<String>,
    out: &mut NestedDict,
) -> Result<()> {
    if !id_path.is_empty() {
        let mut target = raw_path.clone();
        target.push("$id".to_string());
        out.set(&target, json!(format!("#/{}", id_path.join("/"))))?;
    }

    for container in ["properties", "patternProperties"] {
        if let Some(Value::Object(entries)) = node.get(container) {
            for (name, subschema) in entries {
                if let Value::Object(sub) = subschema {
                    raw_path.push(container.to_string());
                    raw_path.push(name.clone());
                    id_path.push(name.clone());
                    stamp(sub, raw_path, id_path, out)?;
                    id_path.pop();
                    raw_path.pop();
                    raw_path.pop();
                }
            }
        }
    }

    if let Some(Value::Object(sub)) = node.get("items") {
        raw_path.push("items".to_string());
        id_path.push("items".to_string());
        stamp(sub, raw_path, id_path, out)?;
        id_path.pop();
        raw_path.pop();
    }

    Ok(())
}
