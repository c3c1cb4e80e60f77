//! Schema-driven value generation.
//!
//! [`Generator`] walks a [`Schema`] depth-first and synthesizes a
//! `serde_json::Value` of the same shape. Generation never fails: malformed
//! or contradictory schemas degrade to defaults (`null`, `{}`, a lorem word).

use crate::adapters::semantic;
use crate::domain::schema::{ArraySchema, Pattern, Schema, SchemaKind, StringSchema};
use chrono::{Duration, SecondsFormat, Utc};
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

/// An optional node is omitted when the draw exceeds this (about 30% of the time).
pub const OPTIONAL_THRESHOLD: f64 = 0.7;
/// A nullable node is `null` when the draw exceeds this (about 10% of the time).
pub const NULLABLE_THRESHOLD: f64 = 0.9;

/// Lower bound of a `number` node without `min`.
pub const DEFAULT_NUMBER_MIN: i64 = 0;
/// Upper bound of a `number` node without `max`.
pub const DEFAULT_NUMBER_MAX: i64 = 100;

/// Array length when neither `min` nor `max` is given.
pub const DEFAULT_ARRAY_LEN: usize = 3;
/// Shortest array when only `max` is given.
pub const DEFAULT_ARRAY_MIN: i64 = 0;
/// Longest array when only `min` is given.
pub const DEFAULT_ARRAY_MAX: i64 = 5;
/// Array lengths are capped here regardless of the declared bounds.
pub const MAX_ARRAY_LEN: usize = 10_000;

/// Number of values produced by [`Generator::generate_multiple`] when no count is given.
pub const DEFAULT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Dates fall within this many days before now.
    pub recent_days: u32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { recent_days: 1 }
    }
}

/// Generates values from schemas using an owned random source.
pub struct Generator<R = ThreadRng> {
    rng: R,
    options: GeneratorOptions,
}

impl Generator<ThreadRng> {
    /// A generator drawing from the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for Generator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<StdRng> {
    /// A reproducible generator. Equal seeds yield equal output for the same
    /// schema, apart from `date` values which are relative to the current time.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            options: GeneratorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Generate one value.
    ///
    /// Returns `None` when the schema is optional and the value was omitted.
    /// A nullable schema that drew `null` returns `Some(Value::Null)`.
    pub fn generate(&mut self, schema: &Schema) -> Option<Value> {
        // Optional is checked before nullable; an omitted value never becomes null
        if schema.optional && self.rng.gen::<f64>() > OPTIONAL_THRESHOLD {
            return None;
        }
        if schema.nullable && self.rng.gen::<f64>() > NULLABLE_THRESHOLD {
            return Some(Value::Null);
        }

        Some(self.generate_kind(&schema.kind))
    }

    /// Generate `count` independent values in order.
    pub fn generate_multiple(&mut self, schema: &Schema, count: usize) -> Vec<Option<Value>> {
        (0..count).map(|_| self.generate(schema)).collect()
    }

    fn generate_kind(&mut self, kind: &SchemaKind) -> Value {
        match kind {
            SchemaKind::String(string) => self.generate_string(string),
            SchemaKind::Number(bounds) => {
                let (min, max) = bounds.resolve(DEFAULT_NUMBER_MIN, DEFAULT_NUMBER_MAX);
                Value::from(self.rng.gen_range(min..=max))
            }
            SchemaKind::Fraction { min, max } => Value::from(self.rng.gen_range(*min..=*max)),
            SchemaKind::Boolean => Value::Bool(self.rng.gen()),
            SchemaKind::Date => self.generate_date(),
            SchemaKind::Semantic(s) => Value::String(semantic::generate(*s, &mut self.rng)),
            SchemaKind::Object(object) => {
                let mut result = Map::new();
                if let Some(properties) = &object.properties {
                    for (name, child) in properties {
                        if let Some(value) = self.generate(child) {
                            result.insert(name.clone(), value);
                        }
                    }
                }
                Value::Object(result)
            }
            SchemaKind::Array(array) => self.generate_array(array),
            SchemaKind::Unknown(tag) => {
                tracing::debug!("Unknown schema kind '{}', generating null", tag);
                Value::Null
            }
        }
    }

    fn generate_string(&mut self, string: &StringSchema) -> Value {
        let options = string.options.as_deref().unwrap_or_default();
        if let Some(option) = options.choose(&mut self.rng) {
            return option.clone();
        }

        let text = match &string.pattern {
            Some(Pattern::Semantic(s)) => semantic::generate(*s, &mut self.rng),
            Some(Pattern::Unknown(tag)) => {
                tracing::debug!("Unknown string pattern '{}', falling back to a word", tag);
                semantic::word(&mut self.rng)
            }
            None => semantic::word(&mut self.rng),
        };
        Value::String(text)
    }

    fn generate_array(&mut self, array: &ArraySchema) -> Value {
        let len = if array.length.is_set() {
            let (min, max) = array.length.resolve(DEFAULT_ARRAY_MIN, DEFAULT_ARRAY_MAX);
            let cap = MAX_ARRAY_LEN as i64;
            self.rng.gen_range(min.clamp(0, cap)..=max.clamp(0, cap)) as usize
        } else {
            DEFAULT_ARRAY_LEN
        };

        let elements = (0..len)
            .map(|_| match &array.items {
                Some(items) => self.generate(items).unwrap_or(Value::Null),
                None => Value::Null,
            })
            .collect();
        Value::Array(elements)
    }

    fn generate_date(&mut self) -> Value {
        let window_ms = i64::from(self.options.recent_days) * 86_400_000;
        let offset = Duration::milliseconds(self.rng.gen_range(0..=window_ms));
        let now = Utc::now();
        // Windows reaching past the earliest representable date fall back to now
        let date = now.checked_sub_signed(offset).unwrap_or(now);
        Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Generate one value using the thread-local RNG.
pub fn generate(schema: &Schema) -> Option<Value> {
    Generator::new().generate(schema)
}

/// Generate `count` values using the thread-local RNG.
pub fn generate_multiple(schema: &Schema, count: usize) -> Vec<Option<Value>> {
    Generator::new().generate_multiple(schema, count)
}
