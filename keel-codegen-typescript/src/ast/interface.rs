//! TypeScript interface builder.

use keel_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::typed_lines;

/// A member of a TypeScript interface or object literal.
#[derive(Debug, Clone)]
pub struct InterfaceField {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub optional: bool,
}

impl InterfaceField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            optional: false,
        }
    }

    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// The member name, quoted when it is not a plain identifier.
    fn key(&self) -> String {
        if is_identifier(&self.name) {
            self.name.clone()
        } else {
            serde_json::Value::from(self.name.as_str()).to_string()
        }
    }
}

impl Renderable for InterfaceField {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }
        let optional = if self.optional { "?" } else { "" };
        fragments.extend(typed_lines(
            &format!("{}{}: ", self.key(), optional),
            &self.ty,
            ";",
        ));
        fragments
    }
}

/// Builder for TypeScript interfaces and inline object literal types.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    doc: Option<String>,
    fields: Vec<InterfaceField>,
    index: Option<String>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
            index: None,
        }
    }

    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn field(mut self, field: InterfaceField) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a `[k: string]: <ty>` index signature.
    pub fn index_signature(mut self, ty: Option<String>) -> Self {
        self.index = ty;
        self
    }

    /// Build the interface as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }

    /// Render the members as an object literal type, `{ ... }`.
    ///
    /// Continuation lines carry no base indentation; embedding code indents
    /// them.
    pub fn literal(&self) -> String {
        if self.is_empty() {
            return "{}".to_string();
        }
        let mut builder = CodeBuilder::typescript();
        builder.push_line("{").push_indent();
        for fragment in self.body_fragments() {
            builder.apply_fragment(fragment);
        }
        builder.push_dedent().push_raw("}");
        builder.build()
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.index.is_none()
    }

    fn body_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> =
            self.fields.iter().flat_map(|f| f.to_fragments()).collect();
        if let Some(ty) = &self.index {
            fragments.extend(typed_lines("[k: string]: ", ty, ";"));
        }
        fragments
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }

        if self.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "export interface {} {{}}",
                self.name
            )));
        } else {
            fragments.push(CodeFragment::Block {
                header: format!("export interface {} {{", self.name),
                body: self.body_fragments(),
                close: Some("}".to_string()),
            });
        }
        fragments
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
