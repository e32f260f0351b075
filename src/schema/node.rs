//! SchemaNode: one point in the inference tree.
//!
//! A node dispatches every observation to the strategies whose predicate
//! accepts it, activating them on first match. A node whose value has
//! varied in type across observations carries several active strategies
//! and unions their outputs under `anyOf`. Keywords no strategy consumes
//! (`title`, `description`, `$id`, `const`, ...) pass through a
//! node-level annotation map and are merged back into the emitted schema.

use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::schema::strategy::{Strategy, StrategyKind};

/// Keywords consumed by the strategies or the node itself; everything else
/// in a fragment is a passthrough annotation.
const CONSUMED_KEYWORDS: [&str; 7] = [
    "type",
    "properties",
    "patternProperties",
    "required",
    "items",
    "format",
    "anyOf",
];

#[derive(Debug, Default)]
pub struct SchemaNode {
    /// Active strategies in activation order. Owned exclusively by this
    /// node; strategies never outlive it.
    active: Vec<Strategy>,
    annotations: Map<String, Value>,
}

impl SchemaNode {
    pub fn new() -> Self {
        SchemaNode {
            active: Vec::new(),
            annotations: Map::new(),
        }
    }

    /// True while nothing has been observed at this position.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.annotations.is_empty()
    }

    /// Merge a JSON-Schema-shaped fragment into this node.
    pub fn add_schema(&mut self, fragment: &Map<String, Value>) -> Result<()> {
        // Union alternatives re-dispatch individually, so merging a schema
        // we emitted ourselves reproduces the per-type strategies.
        if let Some(value) = fragment.get("anyOf") {
            let alternatives = value.as_array().ok_or_else(|| {
                SchemaError::MalformedFragment("`anyOf` is not an array".to_string())
            })?;
            for alternative in alternatives {
                let sub = alternative.as_object().ok_or_else(|| {
                    SchemaError::MalformedFragment(
                        "`anyOf` alternative is not a mapping".to_string(),
                    )
                })?;
                self.add_schema(sub)?;
            }
        }

        for (key, value) in fragment {
            if !CONSUMED_KEYWORDS.contains(&key.as_str()) {
                self.annotations.insert(key.clone(), value.clone());
            }
        }

        let mut matched = false;
        for kind in StrategyKind::TYPED {
            if kind.matches_fragment(fragment) {
                self.strategy_mut(kind).add_schema(fragment)?;
                matched = true;
            }
        }
        if !matched && !fragment.contains_key("anyOf") {
            self.strategy_mut(StrategyKind::Base);
        }
        Ok(())
    }

    /// Absorb one concrete JSON value observed at this position.
    pub fn add_object(&mut self, value: &Value) {
        for kind in StrategyKind::TYPED {
            if kind.matches_value(value) {
                self.strategy_mut(kind).add_object(value);
            }
        }
    }

    /// Emit the schema for everything observed at this position.
    pub fn to_schema(&self) -> Map<String, Value> {
        let typed: Vec<&Strategy> = self
            .active
            .iter()
            .filter(|s| s.kind() != StrategyKind::Base)
            .collect();

        let mut schema = match typed.len() {
            0 => Map::new(),
            1 => typed[0].to_schema(),
            _ => {
                let alternatives = typed
                    .iter()
                    .map(|s| Value::Object(s.to_schema()))
                    .collect();
                let mut union = Map::new();
                union.insert("anyOf".to_string(), Value::Array(alternatives));
                union
            }
        };

        for (key, value) in &self.annotations {
            schema.insert(key.clone(), value.clone());
        }
        schema
    }

    /// Get the active strategy of the given kind, activating it first if
    /// this is its first match.
    fn strategy_mut(&mut self, kind: StrategyKind) -> &mut Strategy {
        if let Some(index) = self.active.iter().position(|s| s.kind() == kind) {
            return &mut self.active[index];
        }
        self.active.push(kind.instantiate());
        self.active.last_mut().unwrap()
    }
}
