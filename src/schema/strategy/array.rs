//! Array strategy: single-schema `items` merged across every element seen.

use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::schema::node::SchemaNode;

#[derive(Debug)]
pub struct ArrayStrategy {
    items: Box<SchemaNode>,
}

impl ArrayStrategy {
    pub fn new() -> Self {
        ArrayStrategy {
            items: Box::new(SchemaNode::new()),
        }
    }

    pub fn add_value(&mut self, value: &Value) {
        if let Some(elements) = value.as_array() {
            for element in elements {
                self.items.add_object(element);
            }
        }
    }

    pub fn add_fragment(&mut self, fragment: &Map<String, Value>) -> Result<()> {
        match fragment.get("items") {
            Some(Value::Object(sub)) => self.items.add_schema(sub),
            Some(Value::Null) | None => Ok(()),
            Some(_) => Err(SchemaError::MalformedFragment(
                "`items` is not a mapping".to_string(),
            )),
        }
    }

    pub fn to_schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("array".to_string()));
        // Only emitted once at least one element (or fragment) was seen
        if !self.items.is_empty() {
            schema.insert("items".to_string(), Value::Object(self.items.to_schema()));
        }
        schema
    }
}
