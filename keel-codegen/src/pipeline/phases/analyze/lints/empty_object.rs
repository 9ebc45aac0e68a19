//! Lint for object definitions without properties.

use keel_ir::{Kind, SchemaDocument};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Warns about named object definitions that declare no properties.
///
/// Such a table only gets a single `jsonb` column.
pub struct EmptyObjectLint;

impl Lint for EmptyObjectLint {
    fn name(&self) -> &'static str {
        "empty-object"
    }

    fn description(&self) -> &'static str {
        "Object definitions should declare at least one property"
    }

    fn check(&self, document: &SchemaDocument, diagnostics: &mut Vec<Diagnostic>) {
        for (name, def) in document.definitions.iter() {
            if let Kind::Object(object) = &def.kind
                && object.is_empty()
            {
                diagnostics.push(
                    Diagnostic::warning("analyze", format!("object '{name}' has no properties"))
                        .at(format!("$defs.{name}")),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use keel_ir::{ObjectType, Primitive, Property, TypeDef};

    use super::*;

    #[test]
    fn test_empty_object() {
        let doc = SchemaDocument::new("schema.yaml")
            .with_definition("Blob", TypeDef::new(Kind::Object(ObjectType::default())))
            .with_definition(
                "User",
                TypeDef::new(Kind::Object(ObjectType {
                    properties: vec![Property::new(
                        "id",
                        TypeDef::new(Kind::Primitive(Primitive::Integer)),
                    )],
                    ..ObjectType::default()
                })),
            );

        let mut diagnostics = Vec::new();
        EmptyObjectLint.check(&doc, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("Blob"));
        assert!(diagnostics[0].severity.is_warning());
    }
}
