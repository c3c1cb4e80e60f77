//! Schema loading error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading schema documents and resolving references.
///
/// Generation itself cannot fail; these only occur before a [`Schema`] exists.
///
/// [`Schema`]: crate::domain::schema::Schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// File could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not json, yaml or yml
    #[error("Unsupported schema file '{0}': expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid glob pattern for a library directory
    #[error("Invalid library path: {0}")]
    Glob(#[from] glob::PatternError),

    /// `$ref` names a schema that is not in the library
    #[error("Schema reference '{0}' not found")]
    RefNotFound(String),

    /// `$ref` chain leads back to a schema being resolved
    #[error("Schema reference cycle: {}", .0.join(" -> "))]
    RefCycle(Vec<String>),

    /// Two library entries share a name
    #[error("Duplicate schema name '{0}'")]
    Duplicate(String),
}
