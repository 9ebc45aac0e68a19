//! Syntactic classification of raw type definitions.

use keel_ir::KindTag;
use serde_json::Value;

const PRIMITIVE_TYPES: [&str; 5] = ["string", "integer", "number", "boolean", "null"];

/// Determine the category of a raw definition.
///
/// Keywords are checked in precedence order and the first match wins, so a
/// node carrying both `enum` and `type` is an enum. Anything that is not a
/// JSON object, or whose `type` is missing or unrecognised, is
/// [`KindTag::Unknown`].
pub fn classify(def: &Value) -> KindTag {
    let Some(map) = def.as_object() else {
        return KindTag::Unknown;
    };

    if map.contains_key("$ref") {
        return KindTag::Ref;
    }
    if map.contains_key("const") {
        return KindTag::Const;
    }
    if map.contains_key("enum") {
        return KindTag::Enum;
    }
    if map.contains_key("oneOf") {
        return KindTag::OneOf;
    }

    match map.get("type").and_then(Value::as_str) {
        Some("object") => KindTag::Object,
        Some("array") => KindTag::Array,
        Some(t) if PRIMITIVE_TYPES.contains(&t) => KindTag::Primitive,
        _ => KindTag::Unknown,
    }
}
