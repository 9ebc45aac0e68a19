//! Lint for unions whose members are of different kinds.

use std::collections::BTreeSet;

use keel_ir::{Kind, SchemaDocument};

use super::super::{Lint, for_each_node};
use crate::pipeline::Diagnostic;

/// Warns about `oneOf` unions mixing member kinds.
///
/// Unions are stored as `jsonb` columns, so mixed members lose all column
/// typing on the SQL side.
pub struct MixedUnionLint;

impl Lint for MixedUnionLint {
    fn name(&self) -> &'static str {
        "mixed-union"
    }

    fn description(&self) -> &'static str {
        "Union members should share a kind"
    }

    fn check(&self, document: &SchemaDocument, diagnostics: &mut Vec<Diagnostic>) {
        for_each_node(document, &mut |location, def| {
            let Kind::OneOf(variants) = &def.kind else {
                return;
            };
            let kinds: BTreeSet<&str> = variants.iter().map(|v| v.tag().as_str()).collect();
            if kinds.len() > 1 {
                let kinds: Vec<&str> = kinds.into_iter().collect();
                diagnostics.push(
                    Diagnostic::warning(
                        "analyze",
                        format!("union mixes member kinds: {}", kinds.join(", ")),
                    )
                    .at(location),
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use keel_ir::{Primitive, TypeDef};

    use super::*;

    fn primitive(p: Primitive) -> TypeDef {
        TypeDef::new(Kind::Primitive(p))
    }

    #[test]
    fn test_mixed_union() {
        let doc = SchemaDocument::new("schema.yaml")
            .with_definition(
                "Mixed",
                TypeDef::new(Kind::OneOf(vec![
                    primitive(Primitive::Integer),
                    TypeDef::new(Kind::Ref("User".into())),
                ])),
            )
            .with_definition(
                "Scalar",
                TypeDef::new(Kind::OneOf(vec![
                    primitive(Primitive::Integer),
                    primitive(Primitive::String(None)),
                ])),
            );

        let mut diagnostics = Vec::new();
        MixedUnionLint.check(&doc, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("$defs.Mixed"));
        assert!(diagnostics[0].message.ends_with("primitive, ref"));
    }
}
