//! TypeScript type alias and union builders.

use keel_codegen::{CodeBuilder, CodeFragment, Renderable};

use super::typed_lines;

/// Builder for TypeScript type aliases.
#[derive(Debug, Clone)]
pub struct TypeAlias {
    name: String,
    doc: Option<String>,
    ty: String,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            ty: ty.into(),
        }
    }

    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    /// Build the type alias as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }

        fragments.extend(typed_lines(
            &format!("export type {} = ", self.name),
            &self.ty,
            ";",
        ));
        fragments
    }
}

/// Builder for TypeScript union types.
///
/// A union without variants renders as `never`.
#[derive(Debug, Clone)]
pub struct Union {
    name: String,
    doc: Option<String>,
    variants: Vec<String>,
}

impl Union {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            variants: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn variants(mut self, variants: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.variants.extend(variants.into_iter().map(Into::into));
        self
    }

    /// Build the union type as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Union {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let ty = if self.variants.is_empty() {
            "never".to_string()
        } else {
            self.variants.join(" | ")
        };
        TypeAlias {
            name: self.name.clone(),
            doc: self.doc.clone(),
            ty,
        }
        .to_fragments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_alias() {
        let t = TypeAlias::new("UserId", "string").build();
        assert_eq!(t, "export type UserId = string;\n");
    }

    #[test]
    fn test_type_alias_with_doc() {
        let t = TypeAlias::new("Tags", "string[]")
            .doc(Some("Free-form labels".into()))
            .build();
        assert_eq!(t, "/** Free-form labels */\nexport type Tags = string[];\n");
    }

    #[test]
    fn test_multiline_alias() {
        let t = TypeAlias::new("Points", "{\n  x: number;\n}[]").build();
        assert_eq!(t, "export type Points = {\n  x: number;\n}[];\n");
    }

    #[test]
    fn test_union() {
        let u = Union::new("Status")
            .variants(["\"pending\"", "\"active\"", "\"completed\""])
            .build();
        assert_eq!(
            u,
            "export type Status = \"pending\" | \"active\" | \"completed\";\n"
        );
    }

    #[test]
    fn test_empty_union_is_never() {
        assert_eq!(Union::new("Nothing").build(), "export type Nothing = never;\n");
    }
}
