//! Check command report data structures.

use std::path::PathBuf;

use keel_codegen::pipeline::{Diagnostic, Severity};
use serde::Serialize;

use super::output::{Output, Report};
use crate::ops::describe;

/// Report data from schema validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the checked schema.
    pub schema: PathBuf,
    /// Number of named definitions.
    pub definitions: usize,
    /// Number of top-level exports.
    pub exports: usize,
    /// Everything the pipeline reported.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in &self.diagnostics {
            match diag.severity {
                Severity::Error => out.error(&describe(diag)),
                Severity::Warning => out.warning(&describe(diag)),
            }
        }

        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid ({} definitions, {} exports)",
                self.schema.display(),
                self.definitions,
                self.exports
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_valid_with_warning() {
        let report = CheckReport {
            schema: "model.yaml".into(),
            definitions: 2,
            exports: 1,
            diagnostics: vec![
                Diagnostic::warning("analyze", "object 'Blob' has no properties").at("$defs.Blob"),
            ],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "warning: object 'Blob' has no properties\n  --> $defs.Blob",
                "",
                "✓ model.yaml is valid (2 definitions, 1 exports)",
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let report = CheckReport {
            schema: "model.yaml".into(),
            definitions: 0,
            exports: 0,
            diagnostics: vec![Diagnostic::warning("analyze", "odd")],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["diagnostics"][0]["severity"], "warning");
        assert!(json["diagnostics"][0].get("location").is_none());
    }
}
