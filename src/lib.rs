//! # Schemock - Schema-Driven Mock Data
//!
//! Schemock turns a declarative schema (kinds, nesting, ranges, semantic
//! patterns) into randomized values that conform to it. It is meant for
//! fixtures and test data that nobody wants to write by hand.
//!
//! ## Features
//!
//! - **Scalar kinds**: string, number, boolean, date
//! - **Semantic values**: uuid, email, url, phone, name, address, and more,
//!   either as their own kind or as a string `pattern`
//! - **Structure**: objects with ordered properties and arrays with length bounds
//! - **Modifiers**: `optional` fields are sometimes omitted, `nullable` ones are sometimes `null`
//! - **Reproducible**: seed the generator to get identical output across runs
//! - **Schema library**: reuse named schemas through `$ref`
//!
//! ## Quick Start
//!
//! ```rust
//! use schemock::{Generator, Schema, Semantic};
//!
//! let schema = Schema::object([
//!     ("id", Schema::semantic(Semantic::Uuid)),
//!     ("age", Schema::number_range(18, 80)),
//! ]);
//!
//! let mut generator = Generator::seeded(42);
//! let user = generator.generate(&schema).unwrap();
//! assert!(user["age"].as_i64().unwrap() >= 18);
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: the schema model and its error type
//! - **Adapters**: value generation and the realistic-value providers
//! - **Config**: settings, schema documents and the schema library

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

pub use adapters::generator::{generate, generate_multiple, Generator, GeneratorOptions};
pub use domain::{Schema, SchemaError, SchemaKind, Semantic};

use crate::config::{load_schema_file, OutputFormat, SchemaLibrary, SchemaLinter, Settings};
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::path::Path;

/// Load `schema_path`, generate values as configured and render them.
pub fn run(settings: &Settings, schema_path: &Path) -> anyhow::Result<String> {
    let mut library = SchemaLibrary::new();
    let loaded = library
        .load_dir(&settings.library.dir)
        .with_context(|| format!("Failed to load schema library {}", settings.library.dir.display()))?;
    if loaded > 0 {
        tracing::info!("Loaded {} schemas from {}", loaded, settings.library.dir.display());
    }

    let schema = load_schema_file(schema_path, &library)
        .with_context(|| format!("Failed to load schema {}", schema_path.display()))?;

    for warning in SchemaLinter::lint(&schema) {
        tracing::warn!("{}", warning);
    }

    let seed = settings.generate.seed.unwrap_or_else(rand::random);
    tracing::info!("Generating with seed {}", seed);

    let mut generator = Generator::with_rng(StdRng::seed_from_u64(seed))
        .with_options(settings.generator_options());

    let output = match settings.generate.count {
        Some(count) => Value::Array(
            generator
                .generate_multiple(&schema, count)
                .into_iter()
                .map(|v| v.unwrap_or(Value::Null))
                .collect(),
        ),
        None => generator.generate(&schema).unwrap_or(Value::Null),
    };

    render(&output, settings.output.format, settings.output.pretty)
}

/// Serialize generated output in the requested format.
pub fn render(value: &Value, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(text)
}
