//! TypeScript type expressions for IR nodes.

use keel_ir::{AdditionalProperties, Kind, ObjectType, Primitive, TypeDef};
use serde_json::Value;

use crate::{
    ast::{Interface, InterfaceField},
    imports::UUID_TYPE,
};

/// Index value type for `additionalProperties: true`.
const OPEN_INDEX: &str = "unknown | undefined";

/// Maps IR nodes to TypeScript type expressions.
///
/// Expressions for object literals span several lines; continuation lines
/// are indented relative to the opening brace only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTypeMapper;

impl TypeScriptTypeMapper {
    pub fn new() -> Self {
        Self
    }

    /// The type expression for a node.
    pub fn type_expr(&self, def: &TypeDef) -> String {
        match &def.kind {
            Kind::Ref(target) => target.clone(),
            Kind::Const(value) => literal(value),
            Kind::Enum(values) => union(values.iter().map(literal)),
            Kind::OneOf(variants) => union(variants.iter().map(|v| self.type_expr(v))),
            Kind::Object(object) => self.object_literal(object),
            Kind::Array(items) => self.array(items),
            Kind::Primitive(primitive) => primitive_type(primitive).to_string(),
            Kind::Unknown => "any".to_string(),
        }
    }

    /// `T[]`, parenthesising union element types.
    pub fn array(&self, items: &TypeDef) -> String {
        let item = self.type_expr(items);
        if is_union(items) {
            format!("({item})[]")
        } else {
            format!("{item}[]")
        }
    }

    /// One member per property, in declaration order.
    pub fn fields(&self, object: &ObjectType) -> Vec<InterfaceField> {
        object
            .properties
            .iter()
            .map(|property| {
                let mut doc = property.ty.doc_line();
                if property.primary_key
                    && let Some(doc) = doc.as_mut()
                {
                    doc.push_str(" — Primary key");
                }
                InterfaceField::new(&property.name, self.type_expr(&property.ty))
                    .doc(doc)
                    .optional(!property.required)
            })
            .collect()
    }

    /// Index signature value type, if the object admits extra keys.
    pub fn index_signature(&self, object: &ObjectType) -> Option<String> {
        match &object.additional {
            AdditionalProperties::Unspecified | AdditionalProperties::Denied => None,
            AdditionalProperties::Allowed => Some(OPEN_INDEX.to_string()),
            AdditionalProperties::Typed(values) => Some(self.type_expr(values)),
        }
    }

    /// Populate an interface builder with the members of an object.
    pub fn interface(&self, name: &str, object: &ObjectType) -> Interface {
        self.fields(object)
            .into_iter()
            .fold(Interface::new(name), Interface::field)
            .index_signature(self.index_signature(object))
    }

    fn object_literal(&self, object: &ObjectType) -> String {
        self.interface("", object).literal()
    }
}

/// Built-in scalar type for a primitive.
pub fn primitive_type(primitive: &Primitive) -> &'static str {
    match primitive {
        Primitive::String(_) if primitive.is_uuid() => UUID_TYPE,
        Primitive::String(_) => "string",
        Primitive::Integer | Primitive::Number => "number",
        Primitive::Boolean => "boolean",
        Primitive::Null => "null",
    }
}

/// A JSON value in TypeScript literal type syntax.
pub fn literal(value: &Value) -> String {
    value.to_string()
}

fn union(members: impl Iterator<Item = String>) -> String {
    let members: Vec<String> = members.collect();
    if members.is_empty() {
        "never".to_string()
    } else {
        members.join(" | ")
    }
}

fn is_union(def: &TypeDef) -> bool {
    match &def.kind {
        Kind::Enum(values) => values.len() > 1,
        Kind::OneOf(variants) => variants.len() > 1,
        _ => false,
    }
}
