//! Schema model for mock data generation.
//!
//! A schema is a tree of nodes. Each node has a kind, optional/nullable
//! modifiers, and only the fields that make sense for that kind.
//!
//! ## Example Schema Document
//!
//! ```yaml
//! type: object
//! properties:
//!   id:
//!     type: uuid
//!   username:
//!     type: string
//!     pattern: name
//!   age:
//!     type: number
//!     min: 18
//!     max: 80
//!   tags:
//!     type: array
//!     min: 1
//!     max: 4
//!     items:
//!       type: string
//!       options: [admin, staff, guest]
//!   nickname:
//!     type: string
//!     optional: true
//! ```
//!
//! Documents use a flat record per node. Fields that do not apply to the
//! node's kind (for example `properties` on a `number`) are dropped when the
//! document is converted into a [`Schema`].

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// A single node of a schema tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSchema")]
pub struct Schema {
    pub kind: SchemaKind,
    /// Omit the value roughly 30% of the time.
    pub optional: bool,
    /// Produce `null` roughly 10% of the time.
    pub nullable: bool,
}

/// The kind of a schema node together with the fields relevant to it.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String(StringSchema),
    /// Integer range. Fractional document bounds round inward.
    Number(Bounds),
    /// A `number` node whose declared range holds no integer, such as
    /// `min: 1.2, max: 1.8`. Generates a fractional value inside the range.
    Fraction { min: f64, max: f64 },
    Boolean,
    Date,
    /// Shortcut kinds such as `uuid` or `email`.
    Semantic(Semantic),
    Object(ObjectSchema),
    Array(ArraySchema),
    /// A kind tag that is not recognized. Generates `null`.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringSchema {
    /// Literal values to sample from. Takes precedence over `pattern` when non-empty.
    pub options: Option<Vec<Value>>,
    pub pattern: Option<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Fields in output order. `None` when the document omitted `properties`.
    pub properties: Option<Vec<(String, Schema)>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArraySchema {
    pub items: Option<Box<Schema>>,
    pub length: Bounds,
}

/// Optional inclusive integer bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Bounds {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Integer bounds for a possibly fractional document range.
    ///
    /// `min` rounds up and `max` rounds down so every integer in the result
    /// lies inside the declared range. Inverted ranges keep their orientation.
    /// Returns `None` when the range holds no integer.
    pub fn from_fractional(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        let inverted = matches!((min, max), (Some(a), Some(b)) if a > b);
        let (low, high) = if inverted { (max, min) } else { (min, max) };
        let low = low.map(f64::ceil);
        let high = high.map(f64::floor);

        if let (Some(low), Some(high)) = (low, high) {
            if low > high {
                return None;
            }
        }

        // Casts saturate, so infinite bounds become i64::MIN / i64::MAX
        let (low, high) = (low.map(|v| v as i64), high.map(|v| v as i64));
        Some(if inverted {
            Self::new(high, low)
        } else {
            Self::new(low, high)
        })
    }

    /// Whether either bound was given explicitly.
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }

    /// Fill missing bounds with defaults and return an ordered `(low, high)` pair.
    pub fn resolve(&self, default_min: i64, default_max: i64) -> (i64, i64) {
        let min = self.min.unwrap_or(default_min);
        let max = self.max.unwrap_or(default_max);
        if min <= max {
            (min, max)
        } else {
            (max, min)
        }
    }
}

/// The `pattern` tag of a string node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Semantic(Semantic),
    /// Unrecognized tag; generation falls back to a single lorem word.
    Unknown(String),
}

impl Pattern {
    pub fn parse(tag: &str) -> Self {
        Semantic::from_pattern(tag)
            .map(Pattern::Semantic)
            .unwrap_or_else(|| Pattern::Unknown(tag.to_string()))
    }
}

/// Realistic-value generator families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantic {
    Email,
    Uuid,
    Url,
    Phone,
    Name,
    Address,
    Paragraph,
    Image,
    Ipv4,
    Mac,
    HexColor,
    Currency,
    CreditCard,
    JobTitle,
    Word,
    Sentence,
    Company,
    ProductName,
    Price,
}

impl Semantic {
    /// Families that can be used directly as a node kind.
    pub const SHORTCUT_KINDS: [Semantic; 14] = [
        Semantic::Uuid,
        Semantic::Email,
        Semantic::Url,
        Semantic::Phone,
        Semantic::Name,
        Semantic::Address,
        Semantic::Paragraph,
        Semantic::Image,
        Semantic::Ipv4,
        Semantic::Mac,
        Semantic::HexColor,
        Semantic::Currency,
        Semantic::CreditCard,
        Semantic::JobTitle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Semantic::Email => "email",
            Semantic::Uuid => "uuid",
            Semantic::Url => "url",
            Semantic::Phone => "phone",
            Semantic::Name => "name",
            Semantic::Address => "address",
            Semantic::Paragraph => "paragraph",
            Semantic::Image => "image",
            Semantic::Ipv4 => "ipv4",
            Semantic::Mac => "mac",
            Semantic::HexColor => "hexColor",
            Semantic::Currency => "currency",
            Semantic::CreditCard => "creditCard",
            Semantic::JobTitle => "jobTitle",
            Semantic::Word => "word",
            Semantic::Sentence => "sentence",
            Semantic::Company => "company",
            Semantic::ProductName => "productName",
            Semantic::Price => "price",
        }
    }

    /// Look up a string `pattern` tag. `avatar` is an alias of `image`.
    pub fn from_pattern(tag: &str) -> Option<Self> {
        match tag {
            "email" => Some(Semantic::Email),
            "uuid" => Some(Semantic::Uuid),
            "url" => Some(Semantic::Url),
            "phone" => Some(Semantic::Phone),
            "name" => Some(Semantic::Name),
            "address" => Some(Semantic::Address),
            "paragraph" => Some(Semantic::Paragraph),
            "image" | "avatar" => Some(Semantic::Image),
            "ipv4" => Some(Semantic::Ipv4),
            "mac" => Some(Semantic::Mac),
            "hexColor" => Some(Semantic::HexColor),
            "currency" => Some(Semantic::Currency),
            "creditCard" => Some(Semantic::CreditCard),
            "jobTitle" => Some(Semantic::JobTitle),
            "word" => Some(Semantic::Word),
            "sentence" => Some(Semantic::Sentence),
            "company" => Some(Semantic::Company),
            "productName" => Some(Semantic::ProductName),
            "price" => Some(Semantic::Price),
            _ => None,
        }
    }

    /// Look up a shortcut node kind.
    pub fn from_kind(tag: &str) -> Option<Self> {
        Self::SHORTCUT_KINDS
            .iter()
            .copied()
            .find(|s| s.as_str() == tag)
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            optional: false,
            nullable: false,
        }
    }

    /// Parse a schema from an already-resolved JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// A plain string node (lorem word).
    pub fn string() -> Self {
        Self::new(SchemaKind::String(StringSchema::default()))
    }

    /// A string node using the given semantic pattern.
    pub fn pattern(semantic: Semantic) -> Self {
        Self::new(SchemaKind::String(StringSchema {
            options: None,
            pattern: Some(Pattern::Semantic(semantic)),
        }))
    }

    /// A string node that samples one of the given literals.
    pub fn one_of<I, V>(options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(SchemaKind::String(StringSchema {
            options: Some(options.into_iter().map(Into::into).collect()),
            pattern: None,
        }))
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number(Bounds::default()))
    }

    pub fn number_range(min: i64, max: i64) -> Self {
        Self::new(SchemaKind::Number(Bounds::new(Some(min), Some(max))))
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn date() -> Self {
        Self::new(SchemaKind::Date)
    }

    /// A shortcut node such as `{type: email}`.
    pub fn semantic(semantic: Semantic) -> Self {
        Self::new(SchemaKind::Semantic(semantic))
    }

    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self::new(SchemaKind::Object(ObjectSchema {
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.into(), schema))
                    .collect(),
            ),
        }))
    }

    /// An array of `items` with the default length.
    pub fn array(items: Schema) -> Self {
        Self::new(SchemaKind::Array(ArraySchema {
            items: Some(Box::new(items)),
            length: Bounds::default(),
        }))
    }

    /// An array of `items` whose length is drawn from `[min, max]`.
    pub fn array_range(items: Schema, min: i64, max: i64) -> Self {
        Self::new(SchemaKind::Array(ArraySchema {
            items: Some(Box::new(items)),
            length: Bounds::new(Some(min), Some(max)),
        }))
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Flat document form of a schema node.
#[derive(Deserialize)]
struct RawSchema {
    #[serde(rename = "type", alias = "kind")]
    kind: String,
    properties: Option<Properties>,
    items: Option<Box<Schema>>,
    min: Option<f64>,
    max: Option<f64>,
    options: Option<Vec<Value>>,
    pattern: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    nullable: bool,
}

impl From<RawSchema> for Schema {
    fn from(raw: RawSchema) -> Self {
        let bounds = Bounds::from_fractional(raw.min, raw.max);

        let kind = match raw.kind.as_str() {
            "string" => SchemaKind::String(StringSchema {
                options: raw.options,
                pattern: raw.pattern.as_deref().map(Pattern::parse),
            }),
            "number" => match bounds {
                Some(bounds) => SchemaKind::Number(bounds),
                None => {
                    let (min, max) = (raw.min.unwrap_or_default(), raw.max.unwrap_or_default());
                    SchemaKind::Fraction {
                        min: min.min(max),
                        max: min.max(max),
                    }
                }
            },
            "boolean" => SchemaKind::Boolean,
            "date" => SchemaKind::Date,
            "object" => SchemaKind::Object(ObjectSchema {
                properties: raw.properties.map(|p| p.0),
            }),
            "array" => SchemaKind::Array(ArraySchema {
                items: raw.items,
                // No whole length fits the range, so the default length applies
                length: bounds.unwrap_or_default(),
            }),
            other => match Semantic::from_kind(other) {
                Some(semantic) => SchemaKind::Semantic(semantic),
                None => SchemaKind::Unknown(other.to_string()),
            },
        };

        Schema {
            kind,
            optional: raw.optional,
            nullable: raw.nullable,
        }
    }
}

/// Object properties in document order.
struct Properties(Vec<(String, Schema)>);

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field names to schemas")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Properties, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields: Vec<(String, Schema)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, schema)) = map.next_entry::<String, Schema>()? {
                    // A repeated key keeps its first position and its last value
                    match fields.iter_mut().find(|(existing, _)| *existing == name) {
                        Some(slot) => slot.1 = schema,
                        None => fields.push((name, schema)),
                    }
                }
                Ok(Properties(fields))
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}
