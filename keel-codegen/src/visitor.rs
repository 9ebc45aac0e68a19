//! Per-kind dispatch over a lowered document.
//!
//! [`visit_root`] drives a full pass: exports first, then every definition,
//! both in document order. Each named node is handed to exactly one
//! [`SchemaVisitor`] method chosen by its kind. Backends implement every
//! method, so a new kind is a compile error in each backend until handled.

use eyre::Result;
use keel_ir::{Export, Kind, ObjectType, Primitive, SchemaDocument, TypeDef};
use serde_json::Value;

/// Handler table a backend implements, one method per kind.
pub trait SchemaVisitor {
    /// An export that points at a differently named definition.
    fn visit_export_alias(&mut self, name: &str, target: &str) -> Result<()>;

    /// A named node that is itself a reference.
    fn visit_ref_alias(&mut self, name: &str, target: &str, def: &TypeDef) -> Result<()>;

    /// A named `enum`, or a `const` as a single-value enum.
    fn visit_enum_alias(&mut self, name: &str, values: &[Value], def: &TypeDef) -> Result<()>;

    /// A named `oneOf`.
    fn visit_union_alias(&mut self, name: &str, variants: &[TypeDef], def: &TypeDef)
    -> Result<()>;

    fn visit_object(&mut self, name: &str, object: &ObjectType, def: &TypeDef) -> Result<()>;

    fn visit_array(&mut self, name: &str, items: &TypeDef, def: &TypeDef) -> Result<()>;

    fn visit_primitive_alias(
        &mut self,
        name: &str,
        primitive: &Primitive,
        def: &TypeDef,
    ) -> Result<()>;

    /// A node no other category claimed.
    fn visit_unknown_alias(&mut self, name: &str, def: &TypeDef) -> Result<()>;
}

/// Visit every export and then every definition of `doc`.
///
/// An export aliasing a definition of the same name is skipped; the
/// definition pass emits that name once.
pub fn visit_root<V: SchemaVisitor + ?Sized>(visitor: &mut V, doc: &SchemaDocument) -> Result<()> {
    for (name, export) in doc.exports.iter() {
        match export {
            Export::Alias(target) if target == name => {
                tracing::debug!(name, "skipping self-alias export");
            }
            Export::Alias(target) => {
                tracing::debug!(name, definition = target.as_str(), "visit export alias");
                visitor.visit_export_alias(name, target)?;
            }
            Export::Inline(def) => visit_type(visitor, name, def)?,
        }
    }

    for (name, def) in doc.definitions.iter() {
        visit_type(visitor, name, def)?;
    }

    Ok(())
}

/// Dispatch a single named node to the method for its kind.
pub fn visit_type<V: SchemaVisitor + ?Sized>(
    visitor: &mut V,
    name: &str,
    def: &TypeDef,
) -> Result<()> {
    tracing::debug!(name, kind = %def.tag(), "visit type");
    match &def.kind {
        Kind::Ref(target) => visitor.visit_ref_alias(name, target, def),
        Kind::Const(value) => visitor.visit_enum_alias(name, std::slice::from_ref(value), def),
        Kind::Enum(values) => visitor.visit_enum_alias(name, values, def),
        Kind::OneOf(variants) => visitor.visit_union_alias(name, variants, def),
        Kind::Object(object) => visitor.visit_object(name, object, def),
        Kind::Array(items) => visitor.visit_array(name, items, def),
        Kind::Primitive(primitive) => visitor.visit_primitive_alias(name, primitive, def),
        Kind::Unknown => visitor.visit_unknown_alias(name, def),
    }
}

#[cfg(test)]
mod tests {
    use keel_ir::{Property, StringFormat};
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl SchemaVisitor for Recorder {
        fn visit_export_alias(&mut self, name: &str, target: &str) -> Result<()> {
            self.calls.push(format!("export {name} -> {target}"));
            Ok(())
        }

        fn visit_ref_alias(&mut self, name: &str, target: &str, _def: &TypeDef) -> Result<()> {
            self.calls.push(format!("ref {name} -> {target}"));
            Ok(())
        }

        fn visit_enum_alias(&mut self, name: &str, values: &[Value], _def: &TypeDef) -> Result<()> {
            self.calls.push(format!("enum {name} {}", values.len()));
            Ok(())
        }

        fn visit_union_alias(
            &mut self,
            name: &str,
            variants: &[TypeDef],
            _def: &TypeDef,
        ) -> Result<()> {
            self.calls.push(format!("union {name} {}", variants.len()));
            Ok(())
        }

        fn visit_object(&mut self, name: &str, object: &ObjectType, _def: &TypeDef) -> Result<()> {
            self.calls
                .push(format!("object {name} {}", object.properties.len()));
            Ok(())
        }

        fn visit_array(&mut self, name: &str, _items: &TypeDef, _def: &TypeDef) -> Result<()> {
            self.calls.push(format!("array {name}"));
            Ok(())
        }

        fn visit_primitive_alias(
            &mut self,
            name: &str,
            _primitive: &Primitive,
            _def: &TypeDef,
        ) -> Result<()> {
            self.calls.push(format!("primitive {name}"));
            Ok(())
        }

        fn visit_unknown_alias(&mut self, name: &str, _def: &TypeDef) -> Result<()> {
            self.calls.push(format!("unknown {name}"));
            Ok(())
        }
    }

    fn uuid() -> TypeDef {
        TypeDef::new(Kind::Primitive(Primitive::String(Some(StringFormat::Uuid))))
    }

    #[test]
    fn test_visit_root_order_and_dispatch() {
        let user = TypeDef::new(Kind::Object(ObjectType {
            properties: vec![Property::new("id", uuid()).required().primary_key()],
            ..ObjectType::default()
        }));
        let doc = SchemaDocument::new("schema.yaml")
            .with_definition("User", user)
            .with_definition("Color", TypeDef::new(Kind::Enum(vec![json!("a"), json!("b")])))
            .with_definition("Only", TypeDef::new(Kind::Const(json!("x"))))
            .with_definition(
                "Shape",
                TypeDef::new(Kind::OneOf(vec![uuid(), TypeDef::unknown()])),
            )
            .with_definition("Ids", TypeDef::new(Kind::Array(Box::new(uuid()))))
            .with_definition("Id", uuid())
            .with_definition("Owner", TypeDef::new(Kind::Ref("User".into())))
            .with_definition("Blob", TypeDef::unknown())
            .with_export("Account", Export::Alias("User".into()))
            .with_export("User", Export::Alias("User".into()))
            .with_export("Status", Export::Inline(uuid()));

        let mut recorder = Recorder::default();
        visit_root(&mut recorder, &doc).unwrap();

        assert_eq!(
            recorder.calls,
            vec![
                "export Account -> User",
                "primitive Status",
                "object User 1",
                "enum Color 2",
                "enum Only 1",
                "union Shape 2",
                "array Ids",
                "primitive Id",
                "ref Owner -> User",
                "unknown Blob",
            ]
        );
    }

    #[test]
    fn test_visitor_errors_propagate() {
        struct Failing;

        impl SchemaVisitor for Failing {
            fn visit_export_alias(&mut self, _: &str, _: &str) -> Result<()> {
                Ok(())
            }
            fn visit_ref_alias(&mut self, _: &str, _: &str, _: &TypeDef) -> Result<()> {
                Ok(())
            }
            fn visit_enum_alias(&mut self, _: &str, _: &[Value], _: &TypeDef) -> Result<()> {
                Ok(())
            }
            fn visit_union_alias(&mut self, _: &str, _: &[TypeDef], _: &TypeDef) -> Result<()> {
                Ok(())
            }
            fn visit_object(&mut self, name: &str, _: &ObjectType, _: &TypeDef) -> Result<()> {
                eyre::bail!("cannot emit {name}")
            }
            fn visit_array(&mut self, _: &str, _: &TypeDef, _: &TypeDef) -> Result<()> {
                Ok(())
            }
            fn visit_primitive_alias(&mut self, _: &str, _: &Primitive, _: &TypeDef) -> Result<()> {
                Ok(())
            }
            fn visit_unknown_alias(&mut self, _: &str, _: &TypeDef) -> Result<()> {
                Ok(())
            }
        }

        let doc = SchemaDocument::new("schema.yaml")
            .with_definition("User", TypeDef::new(Kind::Object(ObjectType::default())));
        let err = visit_root(&mut Failing, &doc).unwrap_err();
        assert_eq!(err.to_string(), "cannot emit User");
    }
}
