//! Scalar strategies: string, number, boolean, null.
//!
//! These follow the same absorb/emit contract as the object strategy but
//! carry little or no state. The string strategy additionally tracks
//! format uniformity; the number strategy widens from `integer` to
//! `number` once any non-integral value (or a `number` fragment) arrives.

use serde_json::{Map, Value};

use crate::schema::format::{detect_format, FormatState};

#[derive(Debug)]
pub struct StringStrategy {
    format: FormatState,
}

impl StringStrategy {
    pub fn new() -> Self {
        StringStrategy {
            format: FormatState::Unset,
        }
    }

    pub fn add_value(&mut self, value: &Value) {
        if let Some(s) = value.as_str() {
            self.format.observe(detect_format(s));
        }
    }

    /// A fragment without a `format` keyword carries no format constraint,
    /// which degrades the state to mixed; this keeps re-merging our own
    /// emitted schema a no-op.
    pub fn add_fragment(&mut self, fragment: &Map<String, Value>) {
        self.format.observe(fragment.get("format").and_then(Value::as_str));
    }

    pub fn to_schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("string".to_string()));
        if let Some(format) = self.format.as_uniform() {
            schema.insert("format".to_string(), Value::String(format.to_string()));
        }
        schema
    }
}

#[derive(Debug)]
pub struct NumberStrategy {
    saw_float: bool,
}

impl NumberStrategy {
    pub fn new() -> Self {
        NumberStrategy { saw_float: false }
    }

    pub fn add_value(&mut self, value: &Value) {
        if let Some(n) = value.as_number() {
            if n.is_f64() {
                self.saw_float = true;
            }
        }
    }

    pub fn add_fragment(&mut self, fragment: &Map<String, Value>) {
        let declares_number = match fragment.get("type") {
            Some(Value::String(s)) => s == "number",
            Some(Value::Array(items)) => items.iter().any(|t| t == "number"),
            _ => false,
        };
        if declares_number {
            self.saw_float = true;
        }
    }

    pub fn to_schema(&self) -> Map<String, Value> {
        let type_name = if self.saw_float { "number" } else { "integer" };
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String(type_name.to_string()));
        schema
    }
}

#[derive(Debug)]
pub struct BooleanStrategy;

impl BooleanStrategy {
    pub fn to_schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("boolean".to_string()));
        schema
    }
}

#[derive(Debug)]
pub struct NullStrategy;

impl NullStrategy {
    pub fn to_schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("null".to_string()));
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_uniform_format() {
        let mut s = StringStrategy::new();
        s.add_value(&json!("alice@example.com"));
        s.add_value(&json!("bob@example.com"));
        let schema = s.to_schema();
        assert_eq!(schema.get("format").and_then(Value::as_str), Some("email"));
    }

    #[test]
    fn test_string_mixed_format_dropped() {
        let mut s = StringStrategy::new();
        s.add_value(&json!("alice@example.com"));
        s.add_value(&json!("not an email"));
        assert!(s.to_schema().get("format").is_none());
    }

    #[test]
    fn test_string_format_survives_own_output() {
        let mut s = StringStrategy::new();
        s.add_value(&json!("2021-01-01"));
        let emitted = s.to_schema();
        s.add_fragment(&emitted);
        assert_eq!(s.to_schema(), emitted);
    }

    #[test]
    fn test_integer_widens_to_number() {
        let mut n = NumberStrategy::new();
        n.add_value(&json!(1));
        assert_eq!(n.to_schema().get("type"), Some(&json!("integer")));
        n.add_value(&json!(1.5));
        assert_eq!(n.to_schema().get("type"), Some(&json!("number")));
    }

    #[test]
    fn test_number_fragment_widens() {
        let mut n = NumberStrategy::new();
        n.add_value(&json!(1));
        let fragment = json!({"type": "number"});
        n.add_fragment(fragment.as_object().unwrap());
        assert_eq!(n.to_schema().get("type"), Some(&json!("number")));
    }
}
