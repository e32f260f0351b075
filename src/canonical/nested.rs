//! NestedDict: a path-addressable view over a nested JSON mapping.
//!
//! A path is an ordered sequence of keys identifying a value at arbitrary
//! depth. `get` follows successive lookups, `set` creates missing
//! intermediate mappings, and `find` reports every path at which a key
//! occurs anywhere in the tree.

use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedDict {
    root: Map<String, Value>,
}

impl NestedDict {
    pub fn new(root: Map<String, Value>) -> Self {
        NestedDict { root }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value.as_object().cloned().ok_or_else(|| {
            SchemaError::MalformedFragment("nested view requires a mapping".to_string())
        })?;
        Ok(NestedDict { root })
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Look up the value at `path` by successive key lookups.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Result<&Value> {
        let (first, rest) = path.split_first().ok_or(SchemaError::EmptyPath)?;
        let mut current = self
            .root
            .get(first.as_ref())
            .ok_or_else(|| SchemaError::MissingSegment(first.as_ref().to_string()))?;
        let mut reached = first.as_ref();
        for segment in rest {
            let map = current
                .as_object()
                .ok_or_else(|| SchemaError::NotAnObject(reached.to_string()))?;
            current = map
                .get(segment.as_ref())
                .ok_or_else(|| SchemaError::MissingSegment(segment.as_ref().to_string()))?;
            reached = segment.as_ref();
        }
        Ok(current)
    }

    /// Assign `value` at `path`, creating intermediate mappings for any
    /// missing segment. Fails if an existing intermediate is not a mapping.
    pub fn set<S: AsRef<str>>(&mut self, path: &[S], value: Value) -> Result<()> {
        let (last, intermediate) = path.split_last().ok_or(SchemaError::EmptyPath)?;
        let mut current = &mut self.root;
        for segment in intermediate {
            let entry = current
                .entry(segment.as_ref().to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            current = entry
                .as_object_mut()
                .ok_or_else(|| SchemaError::NotAnObject(segment.as_ref().to_string()))?;
        }
        current.insert(last.as_ref().to_string(), value);
        Ok(())
    }

    /// Every path at which `key` appears as a mapping key, in pre-order,
    /// descending into mapping values only (never into arrays).
    pub fn find(&self, key: &str) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        let mut scratch = Vec::new();
        find_in(&self.root, key, &mut scratch, &mut paths);
        paths
    }
}

impl From<Map<String, Value>> for NestedDict {
    fn from(root: Map<String, Value>) -> Self {
        NestedDict::new(root)
    }
}

// The scratch path is pushed before visiting a sibling and popped on every
// exit, match or not, so recursion never leaks state between branches.
fn find_in(map: &Map<String, Value>, key: &str, scratch: &mut Vec<String>, paths: &mut Vec<Vec<String>>) {
    for (name, value) in map {
        scratch.push(name.clone());
        if name == key {
            paths.push(scratch.clone());
        }
        if let Value::Object(child) = value {
            find_in(child, key, scratch, paths);
        }
        scratch.pop();
    }
}
