//! The lowered schema document.

use indexmap::IndexMap;

use crate::TypeDef;

/// Named type definitions in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionTable {
    entries: IndexMap<String, TypeDef>,
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition. A repeated name replaces the earlier entry in place.
    pub fn insert(&mut self, name: impl Into<String>, def: TypeDef) {
        self.entries.insert(name.into(), def);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDef)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, TypeDef)> for DefinitionTable {
    fn from_iter<I: IntoIterator<Item = (String, TypeDef)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A top-level published name.
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    /// Points at a definition by name.
    Alias(String),
    /// Declares its own type.
    Inline(TypeDef),
}

/// Exports in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportTable {
    entries: IndexMap<String, Export>,
}

impl ExportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, export: Export) {
        self.entries.insert(name.into(), export);
    }

    pub fn get(&self, name: &str) -> Option<&Export> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Export)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Export)> for ExportTable {
    fn from_iter<I: IntoIterator<Item = (String, Export)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A fully lowered schema: the unit every backend consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    /// Path or label of the source schema, used in provenance comments.
    pub source: String,
    pub definitions: DefinitionTable,
    pub exports: ExportTable,
}

impl SchemaDocument {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_definition(mut self, name: impl Into<String>, def: TypeDef) -> Self {
        self.definitions.insert(name, def);
        self
    }

    pub fn with_export(mut self, name: impl Into<String>, export: Export) -> Self {
        self.exports.insert(name, export);
        self
    }

    /// Visit every inline node of every export and definition.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TypeDef)) {
        for (_, export) in self.exports.iter() {
            if let Export::Inline(def) = export {
                def.walk(f);
            }
        }
        for (_, def) in self.definitions.iter() {
            def.walk(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Kind, Primitive};

    #[test]
    fn test_definition_table_preserves_order() {
        let table: DefinitionTable = ["Zeta", "Alpha", "Mid"]
            .into_iter()
            .map(|n| (n.to_string(), TypeDef::unknown()))
            .collect();

        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert!(table.contains("Alpha"));
        assert!(!table.contains("Beta"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_document_walk_covers_exports_and_definitions() {
        let doc = SchemaDocument::new("schema.yaml")
            .with_export("Root", Export::Inline(TypeDef::new(Kind::Primitive(Primitive::Null))))
            .with_export("Alias", Export::Alias("User".into()))
            .with_definition("User", TypeDef::new(Kind::Primitive(Primitive::Integer)));

        let mut count = 0;
        doc.walk(&mut |_| count += 1);
        assert_eq!(count, 2);
    }
}
