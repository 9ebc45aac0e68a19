//! Schema type to PostgreSQL column type mapping.

use std::collections::HashSet;

use keel_ir::{DefinitionTable, Kind, Primitive, StringFormat, TypeDef};

/// Column type for anything without a scalar mapping.
pub const JSONB: &str = "jsonb";

/// Maps schema nodes to PostgreSQL column types.
///
/// Nested structure is never normalized into extra tables: arrays, objects
/// and unions are stored as `jsonb`, enums as `text`.
#[derive(Debug, Clone, Copy)]
pub struct PostgresTypeMapper<'a> {
    definitions: &'a DefinitionTable,
}

impl<'a> PostgresTypeMapper<'a> {
    pub fn new(definitions: &'a DefinitionTable) -> Self {
        Self { definitions }
    }

    /// Map a primitive to its column type.
    pub fn primitive(primitive: &Primitive) -> &'static str {
        match primitive {
            Primitive::Integer => "integer",
            Primitive::Number => "double precision",
            Primitive::Boolean => "boolean",
            Primitive::Null => JSONB,
            Primitive::String(Some(StringFormat::Uuid)) => "uuid",
            Primitive::String(Some(StringFormat::DateTime)) => "timestamptz",
            Primitive::String(_) => "text",
        }
    }

    /// Map a node to its column type.
    ///
    /// References are followed through the definition table until a
    /// non-reference is reached. A reference cycle maps to `jsonb`.
    pub fn column_type(&self, def: &TypeDef) -> &'static str {
        let mut visited = HashSet::new();
        let mut current = def;
        loop {
            match &current.kind {
                Kind::Ref(target) => {
                    if !visited.insert(target.as_str()) {
                        tracing::debug!(definition = target.as_str(), "reference cycle, using jsonb");
                        return JSONB;
                    }
                    match self.definitions.get(target) {
                        Some(next) => current = next,
                        None => return JSONB,
                    }
                }
                Kind::Const(_) | Kind::Enum(_) => return "text",
                Kind::Primitive(primitive) => return Self::primitive(primitive),
                Kind::OneOf(_) | Kind::Object(_) | Kind::Array(_) | Kind::Unknown => return JSONB,
            }
        }
    }
}
