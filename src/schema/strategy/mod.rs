//! Type strategies for the inference tree.
//!
//! Each strategy owns the state needed to describe one JSON type shape and
//! knows how to absorb observed values, merge schema fragments, and emit a
//! schema. The set is closed: a node dispatches an observation to every
//! strategy whose predicate matches it, in a fixed registration order.

pub mod array;
pub mod object;
pub mod scalar;

use serde_json::{Map, Value};

use crate::error::Result;

pub use array::ArrayStrategy;
pub use object::ObjectStrategy;
pub use scalar::{BooleanStrategy, NullStrategy, NumberStrategy, StringStrategy};

/// Discriminant for the closed strategy set.
///
/// `Base` is the fallback activated when a fragment matches no typed
/// strategy; it never matches a concrete value (every JSON value matches
/// exactly one typed strategy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Base,
}

impl StrategyKind {
    /// Typed strategies in registration order. Dispatch tries these in
    /// order; activation order is therefore deterministic.
    pub const TYPED: [StrategyKind; 6] = [
        StrategyKind::Null,
        StrategyKind::Boolean,
        StrategyKind::Number,
        StrategyKind::String,
        StrategyKind::Array,
        StrategyKind::Object,
    ];

    pub fn matches_value(self, value: &Value) -> bool {
        match self {
            StrategyKind::Null => value.is_null(),
            StrategyKind::Boolean => value.is_boolean(),
            StrategyKind::Number => value.is_number(),
            StrategyKind::String => value.is_string(),
            StrategyKind::Array => value.is_array(),
            StrategyKind::Object => value.is_object(),
            StrategyKind::Base => false,
        }
    }

    pub fn matches_fragment(self, fragment: &Map<String, Value>) -> bool {
        let types = fragment_types(fragment);
        match self {
            StrategyKind::Null => types.contains(&"null"),
            StrategyKind::Boolean => types.contains(&"boolean"),
            StrategyKind::Number => types.contains(&"integer") || types.contains(&"number"),
            StrategyKind::String => types.contains(&"string"),
            StrategyKind::Array => types.contains(&"array"),
            StrategyKind::Object => types.contains(&"object"),
            StrategyKind::Base => types.is_empty(),
        }
    }

    pub fn instantiate(self) -> Strategy {
        match self {
            StrategyKind::Null => Strategy::Null(NullStrategy),
            StrategyKind::Boolean => Strategy::Boolean(BooleanStrategy),
            StrategyKind::Number => Strategy::Number(NumberStrategy::new()),
            StrategyKind::String => Strategy::String(StringStrategy::new()),
            StrategyKind::Array => Strategy::Array(ArrayStrategy::new()),
            StrategyKind::Object => Strategy::Object(ObjectStrategy::new()),
            StrategyKind::Base => Strategy::Base,
        }
    }
}

/// The `type` names a fragment declares, whether as a single string or an
/// array of alternatives. An absent or malformed `type` yields none.
fn fragment_types(fragment: &Map<String, Value>) -> Vec<&str> {
    match fragment.get("type") {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// One active strategy instance, exclusively owned by its node.
#[derive(Debug)]
pub enum Strategy {
    Null(NullStrategy),
    Boolean(BooleanStrategy),
    Number(NumberStrategy),
    String(StringStrategy),
    Array(ArrayStrategy),
    Object(ObjectStrategy),
    Base,
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Null(_) => StrategyKind::Null,
            Strategy::Boolean(_) => StrategyKind::Boolean,
            Strategy::Number(_) => StrategyKind::Number,
            Strategy::String(_) => StrategyKind::String,
            Strategy::Array(_) => StrategyKind::Array,
            Strategy::Object(_) => StrategyKind::Object,
            Strategy::Base => StrategyKind::Base,
        }
    }

    /// Absorb a concrete value that matched this strategy's predicate.
    pub fn add_object(&mut self, value: &Value) {
        match self {
            Strategy::Number(s) => s.add_value(value),
            Strategy::String(s) => s.add_value(value),
            Strategy::Array(s) => s.add_value(value),
            Strategy::Object(s) => s.add_value(value),
            Strategy::Null(_) | Strategy::Boolean(_) | Strategy::Base => {}
        }
    }

    /// Merge a schema fragment that matched this strategy's predicate.
    pub fn add_schema(&mut self, fragment: &Map<String, Value>) -> Result<()> {
        match self {
            Strategy::Number(s) => {
                s.add_fragment(fragment);
                Ok(())
            }
            Strategy::String(s) => {
                s.add_fragment(fragment);
                Ok(())
            }
            Strategy::Array(s) => s.add_fragment(fragment),
            Strategy::Object(s) => s.add_fragment(fragment),
            Strategy::Null(_) | Strategy::Boolean(_) | Strategy::Base => Ok(()),
        }
    }

    /// Emit the schema describing everything this strategy has absorbed.
    pub fn to_schema(&self) -> Map<String, Value> {
        match self {
            Strategy::Null(s) => s.to_schema(),
            Strategy::Boolean(s) => s.to_schema(),
            Strategy::Number(s) => s.to_schema(),
            Strategy::String(s) => s.to_schema(),
            Strategy::Array(s) => s.to_schema(),
            Strategy::Object(s) => s.to_schema(),
            Strategy::Base => Map::new(),
        }
    }
}
