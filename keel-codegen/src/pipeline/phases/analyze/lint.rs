//! Lint trait for document analysis.

use keel_ir::SchemaDocument;

use crate::pipeline::Diagnostic;

/// A lint that checks the lowered document for lossy constructs.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this lint checks.
    fn description(&self) -> &'static str;

    /// Check the document and add any diagnostics.
    fn check(&self, document: &SchemaDocument, diagnostics: &mut Vec<Diagnostic>);
}
