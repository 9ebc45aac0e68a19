//! Lint for inline exports named like a definition.

use keel_ir::{Export, SchemaDocument};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Warns when an inline export has the same name as a definition.
///
/// Both are emitted, producing two declarations of one name.
pub struct ExportShadowLint;

impl Lint for ExportShadowLint {
    fn name(&self) -> &'static str {
        "export-shadows-definition"
    }

    fn description(&self) -> &'static str {
        "Inline exports should not reuse a definition name"
    }

    fn check(&self, document: &SchemaDocument, diagnostics: &mut Vec<Diagnostic>) {
        for (name, export) in document.exports.iter() {
            if matches!(export, Export::Inline(_)) && document.definitions.contains(name) {
                diagnostics.push(
                    Diagnostic::warning(
                        "analyze",
                        format!("inline export '{name}' shadows the definition of the same name"),
                    )
                    .at(name),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use keel_ir::{Kind, Primitive, TypeDef};

    use super::*;

    #[test]
    fn test_export_shadow() {
        let string = TypeDef::new(Kind::Primitive(Primitive::String(None)));
        let doc = SchemaDocument::new("schema.yaml")
            .with_definition("Status", string.clone())
            .with_export("Status", Export::Inline(string.clone()))
            .with_export("Other", Export::Inline(string))
            .with_export("Alias", Export::Alias("Status".into()));

        let mut diagnostics = Vec::new();
        ExportShadowLint.check(&doc, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("Status"));
    }
}
