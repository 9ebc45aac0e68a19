//! TypeScript import builder.

use keel_codegen::{CodeFragment, Renderable};

/// Builder for type-only import statements.
///
/// Declaration modules only ever need types, so every import is rendered
/// as `import type { ... } from '...'`.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    named: Vec<String>,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            named: Vec::new(),
        }
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Render the import statement.
    pub fn build(&self) -> String {
        format!(
            "import type {{ {} }} from '{}'",
            self.named.join(", "),
            self.from
        )
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.build())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_import() {
        let import = Import::new("uuid").named("UUID");
        assert_eq!(import.build(), "import type { UUID } from 'uuid'");
    }

    #[test]
    fn test_multiple_named() {
        let import = Import::new("./branded").named("Email").named("Slug");
        assert_eq!(import.build(), "import type { Email, Slug } from './branded'");
    }
}
