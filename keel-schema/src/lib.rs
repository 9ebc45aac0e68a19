// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Schema document loading, validation and classification.
//!
//! This crate turns a schema file into a [`Schema`]: the raw, order-preserving
//! JSON tree plus the source text for error reporting. It also owns the two
//! questions every later stage asks of a raw node:
//!
//! - [`classify`] - which syntactic category a definition belongs to
//! - [`resolve_ref`] - which local definition a `$ref` points at
//!
//! Meta-schema validation is performed by a [`SchemaValidator`] that callers
//! construct and pass in explicitly.

mod classify;
mod error;
mod resolve;
mod schema;
mod validate;

pub use classify::classify;
pub use error::{Error, Result, SourceContext, Violation};
pub use resolve::{LOCAL_REF_PREFIX, ResolutionError, ref_name, resolve_ref};
pub use schema::{Schema, SchemaFormat};
pub use validate::{MetaSchemaValidator, NoValidation, SchemaValidator};
