//! Import collection utilities.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks imports and deduplicates them.
///
/// Maintains module insertion order for deterministic output.
///
/// # Example
///
/// ```
/// use keel_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("uuid", "UUID");
/// imports.add("uuid", "UUID");
///
/// for (module, symbols) in imports.iter() {
///     let symbols: Vec<&str> = symbols.iter().map(|s| s.as_str()).collect();
///     assert_eq!(
///         format!("import type {{ {} }} from '{}'", symbols.join(", "), module),
///         "import type { UUID } from 'uuid'"
///     );
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportCollector {
    /// Module path -> set of symbols (sorted for deterministic output)
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Check if a module is already imported.
    pub fn has_module(&self, module: &str) -> bool {
        self.imports.contains_key(module)
    }

    /// Check if a specific symbol is imported from a module.
    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_collector_dedupes() {
        let mut imports = ImportCollector::new();
        imports.add("uuid", "UUID");
        imports.add("uuid", "UUID");
        imports.add("uuid", "v4");

        assert!(imports.has_module("uuid"));
        assert!(imports.has_symbol("uuid", "UUID"));
        assert!(!imports.has_symbol("uuid", "v7"));
        assert_eq!(imports.len(), 1);

        let symbols: Vec<&String> = imports.iter().next().unwrap().1.iter().collect();
        assert_eq!(symbols, ["UUID", "v4"]);
    }
}
