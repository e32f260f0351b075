//! Property title/description enrichment.
//!
//! The lookup source (an ontology graph in the original deployment) is an
//! external collaborator; here it is abstracted behind [`PropertyCatalog`],
//! a total lookup that never fails. A miss yields two empty strings, and
//! enrichment never aborts schema emission.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property-name -> (title, description) lookup.
pub trait PropertyCatalog {
    /// Title and description for a property name; empty strings on miss.
    fn annotate(&self, name: &str) -> (String, String);
}

/// Catalog with no entries; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl PropertyCatalog for EmptyCatalog {
    fn annotate(&self, _name: &str) -> (String, String) {
        (String::new(), String::new())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// In-memory catalog, loadable from a JSON mapping of
/// `name -> {title, description}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl MapCatalog {
    pub fn new() -> Self {
        MapCatalog::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.entries.insert(
            name.into(),
            CatalogEntry {
                title: title.into(),
                description: description.into(),
            },
        );
    }
}

impl PropertyCatalog for MapCatalog {
    fn annotate(&self, name: &str) -> (String, String) {
        match self.entries.get(name) {
            Some(entry) => (entry.title.clone(), entry.description.clone()),
            None => (String::new(), String::new()),
        }
    }
}

/// Stamp `title`/`description` on every property and pattern-property
/// schema in the document, recursively.
pub fn annotate_properties(schema: &mut Value, catalog: &dyn PropertyCatalog) {
    if let Value::Object(map) = schema {
        annotate_map(map, catalog);
    }
}

fn annotate_map(map: &mut Map<String, Value>, catalog: &dyn PropertyCatalog) {
    for container in ["properties", "patternProperties"] {
        if let Some(Value::Object(entries)) = map.get_mut(container) {
            for (name, subschema) in entries.iter_mut() {
                if let Value::Object(sub) = subschema {
                    let (title, description) = catalog.annotate(name);
                    sub.insert("title".to_string(), Value::String(title));
                    sub.insert("description".to_string(), Value::String(description));
                    annotate_map(sub, catalog);
                }
            }
        }
    }
    if let Some(Value::Object(sub)) = map.get_mut("items") {
        annotate_map(sub, catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_miss_yields_empty_strings() {
        let mut schema = json!({
            "type": "object",
            "properties": {"name": {"type": "string"}}
        });
        annotate_properties(&mut schema, &EmptyCatalog);
        let name = schema.get("properties").unwrap().get("name").unwrap();
        assert_eq!(name.get("title"), Some(&json!("")));
        assert_eq!(name.get("description"), Some(&json!("")));
    }

    #[test]
    fn test_catalog_hit() {
        let mut catalog = MapCatalog::new();
        catalog.insert("name", "Name", "The name of the thing");

        let mut schema = json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "user": {
                    "type": "object",
                    "properties": {"name": {"type": "string"}}
                }
            }
        });
        annotate_properties(&mut schema, &catalog);

        let properties = schema.get("properties").unwrap();
        assert_eq!(
            properties.get("name").unwrap().get("title"),
            Some(&json!("Name"))
        );
        // nested lookups use the same catalog
        let nested = properties.get("user").unwrap().get("properties").unwrap();
        assert_eq!(nested.get("name").unwrap().get("title"), Some(&json!("Name")));
        // the intermediate object property itself misses
        assert_eq!(properties.get("user").unwrap().get("title"), Some(&json!("")));
    }

    #[test]
    fn test_items_subtree_is_annotated() {
        let mut schema = json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {"id": {"type": "integer"}}
            }
        });
        annotate_properties(&mut schema, &EmptyCatalog);
        let id = schema
            .get("items")
            .unwrap()
            .get("properties")
            .unwrap()
            .get("id")
            .unwrap();
        assert_eq!(id.get("title"), Some(&json!("")));
    }

    #[test]
    fn test_catalog_loads_from_json() {
        let catalog: MapCatalog = serde_json::from_value(json!({
            "name": {"title": "Name"},
            "age": {"description": "Age in years"}
        }))
        .unwrap();
        assert_eq!(catalog.annotate("name"), ("Name".to_string(), String::new()));
        assert_eq!(
            catalog.annotate("age"),
            (String::new(), "Age in years".to_string())
        );
        assert_eq!(catalog.annotate("missing"), (String::new(), String::new()));
    }
}
