//! Core type definitions.

use serde_json::Value;

/// Syntactic category of a type definition.
///
/// Variants are listed in classification precedence order: a definition that
/// matches several categories belongs to the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Ref,
    Const,
    Enum,
    OneOf,
    Object,
    Array,
    Primitive,
    Unknown,
}

impl KindTag {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            KindTag::Ref => "ref",
            KindTag::Const => "const",
            KindTag::Enum => "enum",
            KindTag::OneOf => "oneOf",
            KindTag::Object => "object",
            KindTag::Array => "array",
            KindTag::Primitive => "primitive",
            KindTag::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for KindTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Kind,
}

impl TypeDef {
    /// Create an undocumented definition of the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            title: None,
            description: None,
            kind,
        }
    }

    /// An unconstrained definition.
    pub fn unknown() -> Self {
        Self::new(Kind::Unknown)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The category of this definition.
    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    /// Title and description joined for a one-line doc comment.
    ///
    /// Returns `None` when neither is set.
    pub fn doc_line(&self) -> Option<String> {
        let parts: Vec<&str> = [self.title.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" — "))
        }
    }

    /// Visit this node and every inline node below it, parent first.
    ///
    /// References are not followed; they are leaves holding a name.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TypeDef)) {
        f(self);
        match &self.kind {
            Kind::OneOf(variants) => {
                for variant in variants {
                    variant.walk(f);
                }
            }
            Kind::Object(object) => {
                for property in &object.properties {
                    property.ty.walk(f);
                }
                if let AdditionalProperties::Typed(values) = &object.additional {
                    values.walk(f);
                }
            }
            Kind::Array(items) => items.walk(f),
            Kind::Ref(_)
            | Kind::Const(_)
            | Kind::Enum(_)
            | Kind::Primitive(_)
            | Kind::Unknown => {}
        }
    }
}

/// Kind-specific payload of a [`TypeDef`].
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Local reference, holding the resolved definition name.
    Ref(String),
    /// A single fixed literal.
    Const(Value),
    /// Ordered set of literals.
    Enum(Vec<Value>),
    /// Ordered variants of an untagged union.
    OneOf(Vec<TypeDef>),
    Object(ObjectType),
    /// Element type. Tuple forms keep only their first item.
    Array(Box<TypeDef>),
    Primitive(Primitive),
    Unknown,
}

impl Kind {
    pub fn tag(&self) -> KindTag {
        match self {
            Kind::Ref(_) => KindTag::Ref,
            Kind::Const(_) => KindTag::Const,
            Kind::Enum(_) => KindTag::Enum,
            Kind::OneOf(_) => KindTag::OneOf,
            Kind::Object(_) => KindTag::Object,
            Kind::Array(_) => KindTag::Array,
            Kind::Primitive(_) => KindTag::Primitive,
            Kind::Unknown => KindTag::Unknown,
        }
    }

    /// Name of the referenced definition, if this is a reference.
    pub fn ref_target(&self) -> Option<&str> {
        match self {
            Kind::Ref(target) => Some(target),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Kind::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Scalar JSON types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    String(Option<StringFormat>),
    Integer,
    Number,
    Boolean,
    Null,
}

impl Primitive {
    /// Parse a JSON-Schema `type` keyword, attaching the string `format` hint.
    pub fn from_type_name(name: &str, format: Option<&str>) -> Option<Self> {
        match name {
            "string" => Some(Primitive::String(format.map(StringFormat::from))),
            "integer" => Some(Primitive::Integer),
            "number" => Some(Primitive::Number),
            "boolean" => Some(Primitive::Boolean),
            "null" => Some(Primitive::Null),
            _ => None,
        }
    }

    /// Returns true for `string` with `format: uuid`.
    pub fn is_uuid(&self) -> bool {
        matches!(self, Primitive::String(Some(StringFormat::Uuid)))
    }
}

/// Format hint carried by string primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringFormat {
    Uuid,
    DateTime,
    Other(String),
}

impl From<&str> for StringFormat {
    fn from(s: &str) -> Self {
        match s {
            "uuid" => StringFormat::Uuid,
            "date-time" => StringFormat::DateTime,
            other => StringFormat::Other(other.to_string()),
        }
    }
}

/// An object type: ordered properties plus the index-value policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectType {
    pub properties: Vec<Property>,
    pub additional: AdditionalProperties,
}

impl ObjectType {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A named member of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: TypeDef,
    /// Listed in the object's `required` set.
    pub required: bool,
    /// Marked with `x-primary-key`.
    pub primary_key: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeDef) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            primary_key: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// The `additionalProperties` keyword.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AdditionalProperties {
    /// Keyword absent.
    #[default]
    Unspecified,
    /// `true`: arbitrary extra keys.
    Allowed,
    /// `false`.
    Denied,
    /// Extra keys whose values follow a schema.
    Typed(Box<TypeDef>),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_kind_tag_as_str() {
        assert_eq!(KindTag::Ref.as_str(), "ref");
        assert_eq!(KindTag::OneOf.as_str(), "oneOf");
        assert_eq!(KindTag::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_doc_line() {
        let def = TypeDef::unknown();
        assert_eq!(def.doc_line(), None);

        let def = TypeDef::unknown().with_title("User");
        assert_eq!(def.doc_line().as_deref(), Some("User"));

        let def = TypeDef::unknown()
            .with_title("User")
            .with_description("A person");
        assert_eq!(def.doc_line().as_deref(), Some("User — A person"));
    }

    #[test]
    fn test_primitive_from_type_name() {
        assert_eq!(
            Primitive::from_type_name("string", Some("uuid")),
            Some(Primitive::String(Some(StringFormat::Uuid)))
        );
        assert_eq!(
            Primitive::from_type_name("string", Some("email")),
            Some(Primitive::String(Some(StringFormat::Other("email".into()))))
        );
        assert_eq!(Primitive::from_type_name("integer", None), Some(Primitive::Integer));
        assert_eq!(Primitive::from_type_name("object", None), None);
    }

    #[test]
    fn test_walk_visits_nested_inline_nodes() {
        let object = ObjectType {
            properties: vec![
                Property::new("id", TypeDef::new(Kind::Primitive(Primitive::Integer))),
                Property::new(
                    "tags",
                    TypeDef::new(Kind::Array(Box::new(TypeDef::new(Kind::Enum(vec![
                        json!("a"),
                    ]))))),
                ),
                Property::new("owner", TypeDef::new(Kind::Ref("User".into()))),
            ],
            additional: AdditionalProperties::Typed(Box::new(TypeDef::new(Kind::Primitive(
                Primitive::Boolean,
            )))),
        };
        let def = TypeDef::new(Kind::Object(object));

        let mut tags = Vec::new();
        def.walk(&mut |node| tags.push(node.tag()));

        assert_eq!(
            tags,
            vec![
                KindTag::Object,
                KindTag::Primitive,
                KindTag::Array,
                KindTag::Enum,
                KindTag::Ref,
                KindTag::Primitive,
            ]
        );
    }

    #[test]
    fn test_object_property_lookup() {
        let object = ObjectType {
            properties: vec![Property::new("id", TypeDef::unknown()).primary_key()],
            additional: AdditionalProperties::Unspecified,
        };
        assert!(object.property("id").is_some_and(|p| p.primary_key));
        assert!(object.property("name").is_none());
        assert!(!object.is_empty());
    }
}
