//! Compilation pipeline for code generation.
//!
//! This module provides a [`Pipeline`] orchestrator that turns a loaded
//! [`Schema`](keel_schema::Schema) into a lowered
//! [`SchemaDocument`](keel_ir::SchemaDocument):
//!
//! - Explicit phase boundaries (validate → lower → analyze)
//! - Unified diagnostics collection
//! - Fatal errors stop the run before any backend sees the document
//!
//! # Example
//!
//! ```ignore
//! use keel_codegen::pipeline::Pipeline;
//! use keel_schema::{MetaSchemaValidator, Schema};
//!
//! let pipeline = Pipeline::new(MetaSchemaValidator::new()?);
//! let ctx = pipeline.run(Schema::from_file("schema.yaml")?)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//!
//! let sql = PostgresGenerator::new().render(&ctx.into_document()?)?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
