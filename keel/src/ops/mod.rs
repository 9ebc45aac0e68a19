//! Core operations.
//!
//! This module contains the business logic for keel commands,
//! separated from CLI argument parsing and output rendering.

pub mod build;
pub mod check;

use std::path::Path;

use eyre::Result;
use keel_codegen::pipeline::{CompilationContext, Diagnostic, Pipeline};
use keel_schema::{MetaSchemaValidator, NoValidation, Schema};

pub use build::{Job, build};
pub use check::check;

/// Load a schema file and run the compilation pipeline over it.
///
/// Every call builds its own validator and pipeline.
pub fn compile(path: &Path, validate: bool) -> Result<CompilationContext> {
    let schema = Schema::from_file(path).map_err(|e| eyre::Report::new(*e))?;
    let pipeline = if validate {
        Pipeline::new(MetaSchemaValidator::new().map_err(|e| eyre::Report::new(*e))?)
    } else {
        Pipeline::new(NoValidation)
    };
    pipeline.run(schema)
}

/// A diagnostic message followed by its location, if any.
pub fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}
