//! Object strategy: the most involved strategy in the set.
//!
//! Tracks literal properties, pattern properties (regex-keyed), and the
//! monotonically narrowing `required` set. A key that has (or gains) a
//! literal entry is never pattern-matched; pattern matching is attempted
//! only for keys the literal table does not know.

use std::collections::BTreeSet;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::schema::node::SchemaNode;

#[derive(Debug)]
struct PatternProperty {
    source: String,
    regex: Regex,
    node: SchemaNode,
}

#[derive(Debug)]
pub struct ObjectStrategy {
    /// Literal properties in insertion order (preserved for display).
    properties: Vec<(String, SchemaNode)>,
    /// Pattern properties in registration order; the first matching
    /// pattern wins when routing an unrecognized key.
    pattern_properties: Vec<PatternProperty>,
    /// `None` means unconstrained (no object observed yet). Once set it
    /// only narrows: every further observation intersects in place, so an
    /// empty set stays empty for the life of the node.
    required: Option<BTreeSet<String>>,
    /// A merged fragment explicitly declared `required: []`; forces the
    /// empty list to appear in output.
    include_empty_required: bool,
}

impl ObjectStrategy {
    pub fn new() -> Self {
        ObjectStrategy {
            properties: Vec::new(),
            pattern_properties: Vec::new(),
            required: None,
            include_empty_required: false,
        }
    }

    /// Merge a JSON-Schema-shaped fragment describing an object.
    pub fn add_fragment(&mut self, fragment: &Map<String, Value>) -> Result<()> {
        if let Some(value) = fragment.get("properties") {
            let entries = value.as_object().ok_or_else(|| {
                SchemaError::MalformedFragment("`properties` is not a mapping".to_string())
            })?;
            for (name, subfragment) in entries {
                let child = self.literal_entry(name);
                merge_subfragment(child, name, subfragment)?;
            }
        }

        if let Some(value) = fragment.get("patternProperties") {
            let entries = value.as_object().ok_or_else(|| {
                SchemaError::MalformedFragment("`patternProperties` is not a mapping".to_string())
            })?;
            for (pattern, subfragment) in entries {
                let child = self.pattern_entry(pattern)?;
                merge_subfragment(child, pattern, subfragment)?;
            }
        }

        if let Some(value) = fragment.get("required") {
            let names = value.as_array().ok_or_else(|| {
                SchemaError::MalformedFragment("`required` is not an array".to_string())
            })?;
            let mut declared = BTreeSet::new();
            for name in names {
                let name = name.as_str().ok_or_else(|| {
                    SchemaError::MalformedFragment(
                        "`required` entries must be strings".to_string(),
                    )
                })?;
                declared.insert(name.to_string());
            }
            if declared.is_empty() {
                self.include_empty_required = true;
            }
            self.intersect_required(declared);
        }

        Ok(())
    }

    /// Absorb one concrete object instance.
    pub fn add_value(&mut self, value: &Value) {
        let Some(instance) = value.as_object() else {
            return;
        };

        let mut literal_keys = BTreeSet::new();
        for (key, subvalue) in instance {
            if !self.has_literal(key) {
                if let Some(index) = self.matching_pattern(key) {
                    self.pattern_properties[index].node.add_object(subvalue);
                    continue;
                }
            }
            literal_keys.insert(key.clone());
            self.literal_entry(key).add_object(subvalue);
        }

        self.intersect_required(literal_keys);
    }

    pub fn to_schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));

        if !self.properties.is_empty() {
            let mut emitted = Map::new();
            for (name, node) in &self.properties {
                emitted.insert(name.clone(), Value::Object(node.to_schema()));
            }
            schema.insert("properties".to_string(), Value::Object(emitted));
        }

        if !self.pattern_properties.is_empty() {
            let mut emitted = Map::new();
            for pattern in &self.pattern_properties {
                emitted.insert(pattern.source.clone(), Value::Object(pattern.node.to_schema()));
            }
            schema.insert("patternProperties".to_string(), Value::Object(emitted));
        }

        let non_empty = self.required.as_ref().is_some_and(|r| !r.is_empty());
        if non_empty || self.include_empty_required {
            let names = self
                .required
                .iter()
                .flatten()
                .map(|name| Value::String(name.clone()))
                .collect();
            schema.insert("required".to_string(), Value::Array(names));
        }

        schema
    }

    fn has_literal(&self, name: &str) -> bool {
        self.properties.iter().any(|(existing, _)| existing == name)
    }

    fn literal_entry(&mut self, name: &str) -> &mut SchemaNode {
        if let Some(index) = self.properties.iter().position(|(existing, _)| existing == name) {
            return &mut self.properties[index].1;
        }
        self.properties.push((name.to_string(), SchemaNode::new()));
        &mut self.properties.last_mut().unwrap().1
    }

    fn pattern_entry(&mut self, source: &str) -> Result<&mut SchemaNode> {
        if let Some(index) = self
            .pattern_properties
            .iter()
            .position(|p| p.source == source)
        {
            return Ok(&mut self.pattern_properties[index].node);
        }
        let regex = Regex::new(source).map_err(|e| SchemaError::InvalidPattern {
            pattern: source.to_string(),
            source: Box::new(e),
        })?;
        self.pattern_properties.push(PatternProperty {
            source: source.to_string(),
            regex,
            node: SchemaNode::new(),
        });
        Ok(&mut self.pattern_properties.last_mut().unwrap().node)
    }

    /// First registered pattern whose regex search matches the key.
    fn matching_pattern(&self, key: &str) -> Option<usize> {
        self.pattern_properties
            .iter()
            .position(|p| p.regex.is_match(key))
    }

    fn intersect_required(&mut self, seen: BTreeSet<String>) {
        self.required = Some(match self.required.take() {
            None => seen,
            Some(current) => current.intersection(&seen).cloned().collect(),
        });
    }
}

fn merge_subfragment(child: &mut SchemaNode, name: &str, subfragment: &Value) -> Result<()> {
    match subfragment {
        Value::Object(sub) => child.add_schema(sub),
        // An explicit null still registers the property, with no shape
        Value::Null => Ok(()),
        _ => Err(SchemaError::MalformedFragment(format!(
            "property `{name}` is not a mapping"
        ))),
    }
}
