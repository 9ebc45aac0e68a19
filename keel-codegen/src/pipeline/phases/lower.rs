//! Lower phase - transforms the raw schema tree into a `SchemaDocument`.
//!
//! Every `$ref` in the document is resolved here, so a dangling or
//! non-local reference aborts the run before any backend sees the document.
//! Malformed payloads for a claimed kind degrade (absent maps are empty,
//! odd `items` become unknown) rather than fail.

use std::collections::HashSet;

use eyre::Result;
use keel_ir::{
    AdditionalProperties, Export, Kind, KindTag, ObjectType, Primitive, Property, SchemaDocument,
    TypeDef,
};
use keel_schema::{ResolutionError, Schema, classify};
use serde_json::Value;

use crate::pipeline::{CompilationContext, Phase};

/// Phase that lowers the raw tree into the shared IR.
pub struct LowerPhase;

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Transform the raw schema tree into a SchemaDocument"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let document = lower_schema(&ctx.schema).map_err(|err| eyre::Report::new(*err))?;
        tracing::debug!(
            definitions = document.definitions.len(),
            exports = document.exports.len(),
            "lowered"
        );
        ctx.document = Some(document);
        Ok(())
    }
}

/// Lower a loaded schema into a document.
pub fn lower_schema(schema: &Schema) -> keel_schema::Result<SchemaDocument> {
    let lowerer = Lowerer { schema };
    let mut document = SchemaDocument::new(schema.filename());

    for (name, raw) in schema.definitions() {
        let def = lowerer.lower_type(raw, &format!("$defs.{name}"))?;
        document.definitions.insert(name, def);
    }

    for (name, raw) in schema.exports() {
        let export = match raw.get("$ref") {
            Some(reference) => Export::Alias(lowerer.resolve(reference, name)?),
            None => Export::Inline(lowerer.lower_type(raw, name)?),
        };
        document.exports.insert(name, export);
    }

    Ok(document)
}

struct Lowerer<'a> {
    schema: &'a Schema,
}

impl Lowerer<'_> {
    fn lower_type(&self, raw: &Value, location: &str) -> keel_schema::Result<TypeDef> {
        let kind = match classify(raw) {
            KindTag::Ref => Kind::Ref(self.resolve(&raw["$ref"], location)?),
            KindTag::Const => Kind::Const(raw["const"].clone()),
            KindTag::Enum => Kind::Enum(match &raw["enum"] {
                Value::Array(values) => values.clone(),
                single => vec![single.clone()],
            }),
            KindTag::OneOf => Kind::OneOf(match &raw["oneOf"] {
                Value::Array(variants) => variants
                    .iter()
                    .enumerate()
                    .map(|(i, v)| self.lower_type(v, &format!("{location}.oneOf[{i}]")))
                    .collect::<keel_schema::Result<_>>()?,
                _ => Vec::new(),
            }),
            KindTag::Object => Kind::Object(self.lower_object(raw, location)?),
            KindTag::Array => Kind::Array(Box::new(self.lower_items(raw, location)?)),
            KindTag::Primitive => raw["type"]
                .as_str()
                .and_then(|t| Primitive::from_type_name(t, raw["format"].as_str()))
                .map_or(Kind::Unknown, Kind::Primitive),
            KindTag::Unknown => Kind::Unknown,
        };

        Ok(TypeDef {
            title: raw["title"].as_str().map(str::to_string),
            description: raw["description"].as_str().map(str::to_string),
            kind,
        })
    }

    fn lower_object(&self, raw: &Value, location: &str) -> keel_schema::Result<ObjectType> {
        let required: HashSet<&str> = raw["required"]
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut properties = Vec::new();
        if let Some(map) = raw["properties"].as_object() {
            for (name, prop) in map {
                let ty = self.lower_type(prop, &format!("{location}.properties.{name}"))?;
                properties.push(Property {
                    name: name.clone(),
                    ty,
                    required: required.contains(name.as_str()),
                    primary_key: prop["x-primary-key"].as_bool().unwrap_or(false),
                });
            }
        }

        let additional = match raw.get("additionalProperties") {
            Some(Value::Bool(true)) => AdditionalProperties::Allowed,
            Some(Value::Bool(false)) => AdditionalProperties::Denied,
            Some(schema @ Value::Object(_)) => AdditionalProperties::Typed(Box::new(
                self.lower_type(schema, &format!("{location}.additionalProperties"))?,
            )),
            _ => AdditionalProperties::Unspecified,
        };

        Ok(ObjectType {
            properties,
            additional,
        })
    }

    /// Element type of an array. The positional tuple form keeps its first item.
    fn lower_items(&self, raw: &Value, location: &str) -> keel_schema::Result<TypeDef> {
        let location = format!("{location}.items");
        match &raw["items"] {
            Value::Array(items) => match items.first() {
                Some(first) => self.lower_type(first, &format!("{location}[0]")),
                None => Ok(TypeDef::unknown()),
            },
            Value::Null => Ok(TypeDef::unknown()),
            items => self.lower_type(items, &location),
        }
    }

    fn resolve(&self, reference: &Value, location: &str) -> keel_schema::Result<String> {
        let source = self.schema.source();
        let reference = reference
            .as_str()
            .ok_or_else(|| source.resolution_error(location, ResolutionError::NotAString))?;
        self.schema
            .resolve_ref(reference)
            .map_err(|err| source.resolution_error(location, err))
    }
}
