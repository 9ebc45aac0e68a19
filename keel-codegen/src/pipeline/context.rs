//! Compilation context passed through pipeline phases.

use eyre::{Result, eyre};
use keel_ir::SchemaDocument;
use keel_schema::Schema;

use super::diagnostic::{Diagnostic, Severity};

/// Context passed through all pipeline phases.
///
/// Each run owns its context; nothing is shared between runs.
#[derive(Debug)]
pub struct CompilationContext {
    /// The loaded schema being compiled.
    pub schema: Schema,
    /// The lowered document (populated by LowerPhase).
    pub document: Option<SchemaDocument>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context from a schema.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            document: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Add a warning diagnostic.
    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    /// Add a diagnostic built elsewhere.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the lowered document, consuming the context.
    ///
    /// Fails if LowerPhase has not run.
    pub fn into_document(self) -> Result<SchemaDocument> {
        self.document
            .ok_or_else(|| eyre!("document not lowered - did LowerPhase run?"))
    }
}
