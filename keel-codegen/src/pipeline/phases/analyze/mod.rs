//! Analyze phase - structural lints over the lowered document.
//!
//! Every finding here is a warning: the backends already degrade the
//! affected nodes to their most permissive mapping.

mod lint;
mod lints;

use eyre::{Result, bail};
use keel_ir::{AdditionalProperties, Export, Kind, SchemaDocument, TypeDef};
pub use lint::Lint;
pub use lints::{EmptyObjectLint, ExportShadowLint, MixedUnionLint, UnknownKindLint};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that runs lints over the lowered document.
pub struct AnalyzePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl AnalyzePhase {
    /// Create a new analyze phase with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(EmptyObjectLint),
                Box::new(UnknownKindLint),
                Box::new(MixedUnionLint),
                Box::new(ExportShadowLint),
            ],
        }
    }

    /// Create an analyze phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }
}

impl Default for AnalyzePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Run structural lints over the lowered document"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let Some(document) = ctx.document.as_ref() else {
            bail!("analyze requires a lowered document - did LowerPhase run?");
        };

        let mut diagnostics = Vec::new();
        for lint in &self.lints {
            lint.check(document, &mut diagnostics);
        }
        for diagnostic in &diagnostics {
            tracing::debug!(location = diagnostic.location.as_deref(), "{}", diagnostic.message);
        }
        ctx.diagnostics.extend(diagnostics);

        if ctx.has_errors() {
            bail!("Analysis failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

/// Visit every named and inline node with a dotted location.
///
/// Named nodes are located at `$defs.<Name>` or, for inline exports, at the
/// export name; nested nodes extend that path.
pub(crate) fn for_each_node<'a>(
    document: &'a SchemaDocument,
    f: &mut impl FnMut(&str, &'a TypeDef),
) {
    for (name, export) in document.exports.iter() {
        if let Export::Inline(def) = export {
            walk_located(def, name.to_string(), f);
        }
    }
    for (name, def) in document.definitions.iter() {
        walk_located(def, format!("$defs.{name}"), f);
    }
}

fn walk_located<'a>(def: &'a TypeDef, location: String, f: &mut impl FnMut(&str, &'a TypeDef)) {
    f(&location, def);
    match &def.kind {
        Kind::OneOf(variants) => {
            for (i, variant) in variants.iter().enumerate() {
                walk_located(variant, format!("{location}.oneOf[{i}]"), f);
            }
        }
        Kind::Object(object) => {
            for property in &object.properties {
                walk_located(
                    &property.ty,
                    format!("{location}.properties.{}", property.name),
                    f,
                );
            }
            if let AdditionalProperties::Typed(values) = &object.additional {
                walk_located(values, format!("{location}.additionalProperties"), f);
            }
        }
        Kind::Array(items) => walk_located(items, format!("{location}.items"), f),
        Kind::Ref(_) | Kind::Const(_) | Kind::Enum(_) | Kind::Primitive(_) | Kind::Unknown => {}
    }
}

#[cfg(test)]
mod tests {
    use keel_ir::{ObjectType, Primitive, Property};

    use super::*;
    use crate::pipeline::{Diagnostic, phases::lower_schema};

    #[test]
    fn test_collects_warnings_without_failing() {
        let schema = "$defs:\n  Blob:\n    type: object\n".parse().unwrap();
        let mut ctx = CompilationContext::new(schema);
        ctx.document = Some(lower_schema(&ctx.schema).unwrap());

        AnalyzePhase::new().run(&mut ctx).unwrap();
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.diagnostics[0].location.as_deref(), Some("$defs.Blob"));
    }

    #[test]
    fn test_error_lint_fails_phase() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn description(&self) -> &'static str {
                "Always produces an error"
            }
            fn check(&self, _document: &SchemaDocument, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::error("analyze", "forced error"));
            }
        }

        let mut ctx = CompilationContext::new("{}".parse().unwrap());
        ctx.document = Some(SchemaDocument::new("schema.yaml"));

        let phase = AnalyzePhase::empty().with_lint(AlwaysErrorLint);
        assert_eq!(phase.lint_names(), ["always-error"]);
        assert!(phase.run(&mut ctx).is_err());
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_requires_document() {
        let mut ctx = CompilationContext::new("{}".parse().unwrap());
        assert!(AnalyzePhase::new().run(&mut ctx).is_err());
    }

    #[test]
    fn test_for_each_node_locations() {
        let object = ObjectType {
            properties: vec![Property::new(
                "tags",
                TypeDef::new(Kind::Array(Box::new(TypeDef::new(Kind::Primitive(
                    Primitive::String(None),
                ))))),
            )],
            additional: AdditionalProperties::Typed(Box::new(TypeDef::unknown())),
        };
        let doc = SchemaDocument::new("schema.yaml")
            .with_definition("User", TypeDef::new(Kind::Object(object)))
            .with_export("Status", Export::Inline(TypeDef::unknown()));

        let mut locations = Vec::new();
        for_each_node(&doc, &mut |location, _| locations.push(location.to_string()));
        assert_eq!(
            locations,
            [
                "Status",
                "$defs.User",
                "$defs.User.properties.tags",
                "$defs.User.properties.tags.items",
                "$defs.User.additionalProperties",
            ]
        );
    }
}
