//! Target-agnostic code generation traits.

use std::path::Path;

use eyre::Result;
use keel_core::{File, WriteResult};
use keel_ir::SchemaDocument;

/// Trait for target-specific code generators.
///
/// Implement this trait to add a new output target. A backend renders a
/// whole document into one text artifact; rendering never touches the
/// filesystem.
pub trait Backend {
    /// Backend identifier used on the command line (e.g. "postgres")
    fn name(&self) -> &'static str;

    /// File extension for the generated artifact (e.g. "sql", "ts")
    fn file_extension(&self) -> &'static str;

    /// Render the complete artifact for a document.
    fn render(&self, doc: &SchemaDocument) -> Result<String>;

    /// Render and write the artifact to `output`.
    ///
    /// Nothing is written unless rendering succeeds, and an existing file is
    /// only replaced once the new content is complete.
    fn generate(&self, doc: &SchemaDocument, output: &Path) -> Result<WriteResult> {
        let content = self.render(doc)?;
        let result = File::new(output, content).write()?;
        tracing::info!(
            backend = self.name(),
            path = %output.display(),
            ?result,
            "generated"
        );
        Ok(result)
    }
}
