//! Reusable schema definitions and schema documents.
//!
//! Named schemas can be referenced from any schema document with a JSON
//! `$ref` style object. References are resolved on the raw document before
//! it is parsed, so a referenced schema may itself contain references.
//!
//! ## Example Schema Definition
//!
//! ```yaml
//! name: Address
//! description: Postal address
//! schema:
//!   type: object
//!   properties:
//!     street:
//!       type: address
//!     zip:
//!       type: string
//!       options: ["10115", "80331"]
//! ```
//!
//! ## Example Schema Document
//!
//! ```yaml
//! schemas:
//!   - name: Tag
//!     schema:
//!       type: string
//!       options: [new, sale, popular]
//! schema:
//!   type: object
//!   properties:
//!     shipping:
//!       $ref: Address
//!     tags:
//!       type: array
//!       items:
//!         $ref: Tag
//! ```
//!
//! A file without a top-level `schema` key is read as a bare schema.

use crate::domain::{Schema, SchemaError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Configuration for a reusable schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Unique name for this schema (used in $ref references)
    pub name: String,
    /// Human-readable description of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags for categorization and filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// The schema definition in document form
    pub schema: Value,
}

/// A schema file with inline definitions and a root schema.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub schemas: Vec<SchemaConfig>,
    pub schema: Value,
}

/// Named schemas available for `$ref` resolution.
#[derive(Debug, Clone, Default)]
pub struct SchemaLibrary {
    entries: Vec<SchemaConfig>,
}

impl SchemaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema, rejecting names that already exist.
    pub fn insert(&mut self, config: SchemaConfig) -> Result<(), SchemaError> {
        if self.get(&config.name).is_some() {
            return Err(SchemaError::Duplicate(config.name));
        }
        self.entries.push(config);
        Ok(())
    }

    /// Add a schema, replacing an existing entry of the same name.
    pub fn upsert(&mut self, config: SchemaConfig) {
        match self.entries.iter_mut().find(|e| e.name == config.name) {
            Some(existing) => {
                tracing::debug!("Schema '{}' overrides an existing definition", config.name);
                *existing = config;
            }
            None => self.entries.push(config),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaConfig> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load every `*.json`, `*.yaml` and `*.yml` file in `dir` as a [`SchemaConfig`].
    ///
    /// A missing directory is not an error. Returns the number of schemas loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, SchemaError> {
        if !dir.is_dir() {
            tracing::debug!("Schema library directory {} does not exist", dir.display());
            return Ok(0);
        }

        let pattern = format!("{}/*", dir.display());
        let mut paths = Vec::new();
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if matches!(extension(&path), Some("json" | "yaml" | "yml")) {
                        paths.push(path);
                    }
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }
        paths.sort();

        let count = paths.len();
        for path in paths {
            let config: SchemaConfig = serde_json::from_value(read_value(&path)?)?;
            tracing::debug!("Loaded schema '{}' from {}", config.name, path.display());
            self.insert(config)?;
        }
        Ok(count)
    }

    /// Replace every `$ref` in `value` with the referenced definition.
    pub fn resolve(&self, value: &Value) -> Result<Value, SchemaError> {
        resolve_schema_refs(value, &self.entries)
    }

    /// Resolve and parse the named schema.
    pub fn schema(&self, name: &str) -> Result<Schema, SchemaError> {
        let config = self
            .get(name)
            .ok_or_else(|| SchemaError::RefNotFound(name.to_string()))?;
        let resolved = self.resolve(&config.schema)?;
        Ok(Schema::from_value(resolved)?)
    }
}

/// Resolve schema references in a JSON value.
///
/// Every `{"$ref": "SchemaName"}` object is replaced with the definition of
/// that schema, recursively. Unknown names and reference cycles are errors.
pub fn resolve_schema_refs(value: &Value, schemas: &[SchemaConfig]) -> Result<Value, SchemaError> {
    let mut stack = Vec::new();
    resolve_with_stack(value, schemas, &mut stack)
}

fn resolve_with_stack(
    value: &Value,
    schemas: &[SchemaConfig],
    stack: &mut Vec<String>,
) -> Result<Value, SchemaError> {
    match value {
        Value::Object(map) => {
            if let Some(ref_name) = get_ref_name(value) {
                if stack.contains(&ref_name) {
                    let mut chain = stack.clone();
                    chain.push(ref_name);
                    return Err(SchemaError::RefCycle(chain));
                }
                let schema = schemas
                    .iter()
                    .find(|s| s.name == ref_name)
                    .ok_or_else(|| SchemaError::RefNotFound(ref_name.clone()))?;

                stack.push(ref_name);
                let resolved = resolve_with_stack(&schema.schema, schemas, stack);
                stack.pop();
                return resolved;
            }

            let mut resolved = serde_json::Map::new();
            for (key, val) in map {
                resolved.insert(key.clone(), resolve_with_stack(val, schemas, stack)?);
            }
            Ok(Value::Object(resolved))
        }
        Value::Array(arr) => arr
            .iter()
            .map(|v| resolve_with_stack(v, schemas, stack))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        _ => Ok(value.clone()),
    }
}

/// Extract the schema name from a $ref value
pub fn get_ref_name(value: &Value) -> Option<String> {
    if let Value::Object(map) = value {
        if map.len() == 1 {
            if let Some(Value::String(name)) = map.get("$ref") {
                return Some(name.clone());
            }
        }
    }
    None
}

/// Parse a schema document value against `library`.
///
/// Inline `schemas` entries override library entries of the same name.
pub fn parse_document(value: Value, library: &SchemaLibrary) -> Result<Schema, SchemaError> {
    if !is_document(&value) {
        return Ok(Schema::from_value(library.resolve(&value)?)?);
    }

    let document: SchemaDocument = serde_json::from_value(value)?;
    let mut scope = library.clone();
    for config in document.schemas {
        scope.upsert(config);
    }
    Ok(Schema::from_value(scope.resolve(&document.schema)?)?)
}

/// Read a JSON or YAML schema file and resolve it against `library`.
pub fn load_schema_file(path: &Path, library: &SchemaLibrary) -> Result<Schema, SchemaError> {
    let value = read_value(path)?;
    parse_document(value, library)
}

fn is_document(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            map.contains_key("schema") && !map.contains_key("type") && !map.contains_key("kind")
        }
        _ => false,
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

fn read_value(path: &Path) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match extension(path) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
        _ => Err(SchemaError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SchemaKind, Semantic};
    use serde_json::json;

    fn sample_schemas() -> Vec<SchemaConfig> {
        vec![
            SchemaConfig {
                name: "User".to_string(),
                description: Some("User information".to_string()),
                tags: vec![],
                schema: json!({
                    "type": "object",
                    "properties": {
                        "name": { "type": "name" },
                        "email": { "type": "string", "pattern": "email" },
                        "address": { "$ref": "Address" }
                    }
                }),
            },
            SchemaConfig {
                name: "Address".to_string(),
                description: None,
                tags: vec!["location".to_string()],
                schema: json!({
                    "type": "object",
                    "properties": {
                        "street": { "type": "address" },
                        "city": { "type": "string" }
                    }
                }),
            },
        ]
    }

    fn sample_library() -> SchemaLibrary {
        let mut library = SchemaLibrary::new();
        for config in sample_schemas() {
            library.insert(config).unwrap();
        }
        library
    }

    #[test]
    fn test_resolve_simple_ref() {
        let schemas = sample_schemas();
        let value = json!({ "$ref": "Address" });

        let resolved = resolve_schema_refs(&value, &schemas).unwrap();

        assert_eq!(resolved["type"], "object");
        assert!(resolved["properties"]["street"].is_object());
    }

    #[test]
    fn test_resolve_transitive_ref() {
        let schemas = sample_schemas();
        let value = json!({
            "type": "array",
            "items": { "$ref": "User" }
        });

        let resolved = resolve_schema_refs(&value, &schemas).unwrap();

        let address = &resolved["items"]["properties"]["address"];
        assert_eq!(address["type"], "object");
        assert_eq!(address["properties"]["street"]["type"], "address");
    }

    #[test]
    fn test_resolve_missing_ref() {
        let schemas = sample_schemas();
        let value = json!({ "$ref": "NonExistent" });

        let result = resolve_schema_refs(&value, &schemas);

        assert!(matches!(result, Err(SchemaError::RefNotFound(name)) if name == "NonExistent"));
    }

    #[test]
    fn test_resolve_cycle() {
        let schemas = vec![
            SchemaConfig {
                name: "Node".to_string(),
                description: None,
                tags: vec![],
                schema: json!({
                    "type": "object",
                    "properties": { "next": { "$ref": "Next" } }
                }),
            },
            SchemaConfig {
                name: "Next".to_string(),
                description: None,
                tags: vec![],
                schema: json!({ "$ref": "Node" }),
            },
        ];

        let err = resolve_schema_refs(&json!({ "$ref": "Node" }), &schemas).unwrap_err();
        match err {
            SchemaError::RefCycle(chain) => assert_eq!(chain, vec!["Node", "Next", "Node"]),
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_same_ref_twice_is_not_a_cycle() {
        let schemas = sample_schemas();
        let value = json!({
            "type": "object",
            "properties": {
                "home": { "$ref": "Address" },
                "work": { "$ref": "Address" }
            }
        });
        let resolved = resolve_schema_refs(&value, &schemas).unwrap();
        assert_eq!(resolved["properties"]["home"], resolved["properties"]["work"]);
    }

    #[test]
    fn test_ref_with_siblings_is_not_a_ref() {
        assert_eq!(get_ref_name(&json!({ "$ref": "Test", "extra": true })), None);
        assert_eq!(get_ref_name(&json!({ "$ref": 3 })), None);
        assert_eq!(get_ref_name(&json!({ "type": "string" })), None);
        assert_eq!(get_ref_name(&json!("string")), None);
        assert_eq!(get_ref_name(&json!({ "$ref": "Test" })), Some("Test".to_string()));
    }

    #[test]
    fn test_library_rejects_duplicates() {
        let mut library = sample_library();
        let result = library.insert(sample_schemas().remove(1));
        assert!(matches!(result, Err(SchemaError::Duplicate(name)) if name == "Address"));
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_library_named_schema() {
        let library = sample_library();
        let schema = library.schema("User").unwrap();
        let SchemaKind::Object(object) = schema.kind else {
            panic!("expected object");
        };
        let properties = object.properties.unwrap();
        assert_eq!(properties[0].1.kind, SchemaKind::Semantic(Semantic::Name));
        assert!(matches!(properties[2].1.kind, SchemaKind::Object(_)));
    }

    #[test]
    fn test_parse_document_with_inline_schemas() {
        let library = sample_library();
        let document = json!({
            "schemas": [
                {
                    "name": "Address",
                    "schema": { "type": "string", "pattern": "address" }
                }
            ],
            "schema": {
                "type": "object",
                "properties": { "shipping": { "$ref": "Address" } }
            }
        });

        let schema = parse_document(document, &library).unwrap();
        assert_eq!(
            schema,
            Schema::object([("shipping", Schema::pattern(Semantic::Address))])
        );
        // The caller's library is untouched
        assert!(matches!(
            library.get("Address").unwrap().schema["type"].as_str(),
            Some("object")
        ));
    }

    #[test]
    fn test_parse_bare_schema() {
        let schema = parse_document(json!({ "type": "boolean" }), &SchemaLibrary::new()).unwrap();
        assert_eq!(schema, Schema::boolean());
    }

    #[test]
    fn test_object_property_named_schema_is_not_a_document() {
        let value = json!({
            "type": "object",
            "schema": "ignored",
            "properties": { "schema": { "type": "string" } }
        });
        let schema = parse_document(value, &SchemaLibrary::new()).unwrap();
        assert_eq!(schema, Schema::object([("schema", Schema::string())]));
    }
}
