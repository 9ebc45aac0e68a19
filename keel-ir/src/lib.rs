//! Intermediate representation types for the keel schema compiler.
//!
//! This crate provides the typed tree every backend consumes. A raw schema
//! document is lowered into a [`SchemaDocument`] once per run and then only
//! read.
//!
//! # Architecture
//!
//! ```text
//! schema.yaml → keel-schema (load, validate) → keel-ir (typed tree) → backends
//! ```
//!
//! The IR types are designed to be:
//! - Target agnostic (no SQL/TypeScript concerns)
//! - Reference-by-name (a `$ref` is stored as the definition name, never inlined),
//!   so cyclic definition graphs are representable without recursion
//! - Immutable once built

mod document;
mod types;

pub use document::{DefinitionTable, Export, ExportTable, SchemaDocument};
pub use types::{
    AdditionalProperties, Kind, KindTag, ObjectType, Primitive, Property, StringFormat, TypeDef,
};
