pub mod error;
pub mod schema;

pub use error::SchemaError;
pub use schema::{
    ArraySchema, Bounds, ObjectSchema, Pattern, Schema, SchemaKind, Semantic, StringSchema,
};
