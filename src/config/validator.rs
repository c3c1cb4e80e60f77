use thiserror::Error;

use crate::adapters::generator::{DEFAULT_ARRAY_MAX, DEFAULT_ARRAY_MIN, MAX_ARRAY_LEN};
use crate::config::Settings;
use crate::domain::{ArraySchema, Bounds, Pattern, Schema, SchemaKind};

/// Longest accepted recency window for generated dates.
const MAX_RECENT_DAYS: u32 = 36_500;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if settings.generate.recent_days == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "generate.recent_days".to_string(),
                reason: "Recency window must be at least one day".to_string(),
            });
        } else if settings.generate.recent_days > MAX_RECENT_DAYS {
            errors.push(ValidationError::InvalidValue {
                field: "generate.recent_days".to_string(),
                reason: format!("Recency window must be at most {} days", MAX_RECENT_DAYS),
            });
        }

        if settings.library.dir.as_os_str().is_empty() {
            errors.push(ValidationError::MissingField("library.dir".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A schema construct that generates a degraded default instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaWarning {
    #[error("{path}: unknown kind '{kind}' always generates null")]
    UnknownKind { path: String, kind: String },

    #[error("{path}: unknown pattern '{pattern}' falls back to a single word")]
    UnknownPattern { path: String, pattern: String },

    #[error("{path}: options list is empty and is ignored")]
    EmptyOptions { path: String },

    #[error("{path}: pattern '{pattern}' is ignored because options are set")]
    ShadowedPattern { path: String, pattern: String },

    #[error("{path}: min {min} is greater than max {max}, bounds are swapped")]
    InvertedBounds { path: String, min: i64, max: i64 },

    #[error("{path}: range holds no integer, generates fractional numbers")]
    NoIntegerInRange { path: String },

    #[error("{path}: array length {len} is capped at {cap}")]
    ArrayTooLong { path: String, len: i64, cap: usize },

    #[error("{path}: object has no properties and generates {{}}")]
    MissingProperties { path: String },

    #[error("{path}: array has no items and generates nulls")]
    MissingItems { path: String },
}

impl SchemaWarning {
    pub fn path(&self) -> &str {
        match self {
            Self::UnknownKind { path, .. }
            | Self::UnknownPattern { path, .. }
            | Self::EmptyOptions { path }
            | Self::ShadowedPattern { path, .. }
            | Self::InvertedBounds { path, .. }
            | Self::NoIntegerInRange { path }
            | Self::ArrayTooLong { path, .. }
            | Self::MissingProperties { path }
            | Self::MissingItems { path } => path,
        }
    }
}

/// Reports schema constructs that silently degrade during generation.
///
/// Paths start at `$`; object fields append `.name` and array items append `[]`.
pub struct SchemaLinter;

impl SchemaLinter {
    pub fn lint(schema: &Schema) -> Vec<SchemaWarning> {
        let mut warnings = Vec::new();
        Self::lint_node(schema, "$", &mut warnings);
        warnings
    }

    fn lint_node(schema: &Schema, path: &str, warnings: &mut Vec<SchemaWarning>) {
        match &schema.kind {
            SchemaKind::String(string) => {
                let pattern = match &string.pattern {
                    Some(Pattern::Semantic(s)) => Some(s.as_str().to_string()),
                    Some(Pattern::Unknown(tag)) => Some(tag.clone()),
                    None => None,
                };

                match string.options.as_deref() {
                    Some([]) => warnings.push(SchemaWarning::EmptyOptions {
                        path: path.to_string(),
                    }),
                    Some(_) => {
                        if let Some(pattern) = pattern {
                            warnings.push(SchemaWarning::ShadowedPattern {
                                path: path.to_string(),
                                pattern,
                            });
                        }
                        return;
                    }
                    None => {}
                }

                if let Some(Pattern::Unknown(tag)) = &string.pattern {
                    warnings.push(SchemaWarning::UnknownPattern {
                        path: path.to_string(),
                        pattern: tag.clone(),
                    });
                }
            }
            SchemaKind::Number(bounds) => Self::lint_bounds(bounds, path, warnings),
            SchemaKind::Fraction { .. } => warnings.push(SchemaWarning::NoIntegerInRange {
                path: path.to_string(),
            }),
            SchemaKind::Object(object) => match &object.properties {
                Some(properties) => {
                    for (name, child) in properties {
                        Self::lint_node(child, &format!("{}.{}", path, name), warnings);
                    }
                }
                None => warnings.push(SchemaWarning::MissingProperties {
                    path: path.to_string(),
                }),
            },
            SchemaKind::Array(array) => {
                Self::lint_bounds(&array.length, path, warnings);
                Self::lint_length(array, path, warnings);
                match &array.items {
                    Some(items) => Self::lint_node(items, &format!("{}[]", path), warnings),
                    None => warnings.push(SchemaWarning::MissingItems {
                        path: path.to_string(),
                    }),
                }
            }
            SchemaKind::Unknown(kind) => warnings.push(SchemaWarning::UnknownKind {
                path: path.to_string(),
                kind: kind.clone(),
            }),
            SchemaKind::Boolean | SchemaKind::Date | SchemaKind::Semantic(_) => {}
        }
    }

    fn lint_length(array: &ArraySchema, path: &str, warnings: &mut Vec<SchemaWarning>) {
        if !array.length.is_set() {
            return;
        }
        let (_, len) = array.length.resolve(DEFAULT_ARRAY_MIN, DEFAULT_ARRAY_MAX);
        if len > MAX_ARRAY_LEN as i64 {
            warnings.push(SchemaWarning::ArrayTooLong {
                path: path.to_string(),
                len,
                cap: MAX_ARRAY_LEN,
            });
        }
    }

    fn lint_bounds(bounds: &Bounds, path: &str, warnings: &mut Vec<SchemaWarning>) {
        if bounds.is_inverted() {
            warnings.push(SchemaWarning::InvertedBounds {
                path: path.to_string(),
                min: bounds.min.unwrap_or_default(),
                max: bounds.max.unwrap_or_default(),
            });
        }
    }
}
