use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held identical content
    Unchanged,
}

/// A generated artifact to be persisted
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file, replacing any previous content in a single rename.
    ///
    /// Readers never observe a partially written file.
    pub fn write(&self) -> Result<WriteResult> {
        if let Ok(existing) = std::fs::read_to_string(&self.path)
            && existing == self.content
        {
            tracing::debug!(path = %self.path.display(), "output unchanged");
            return Ok(WriteResult::Unchanged);
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
        }

        let staging = self.staging_path();
        std::fs::write(&staging, &self.content)
            .wrap_err_with(|| format!("failed to write '{}'", staging.display()))?;
        std::fs::rename(&staging, &self.path)
            .wrap_err_with(|| format!("failed to replace '{}'", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), bytes = self.content.len(), "output written");
        Ok(WriteResult::Written)
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!(".{name}.keel-tmp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen").join("schema.sql");

        let result = File::new(&path, "BEGIN;\n").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "BEGIN;\n");
    }

    #[test]
    fn test_write_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.d.ts");

        File::new(&path, "export type A = string;\n").write().unwrap();
        let second = File::new(&path, "export type A = string;\n").write().unwrap();

        assert_eq!(second, WriteResult::Unchanged);
    }

    #[test]
    fn test_write_replaces_content_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sql");

        File::new(&path, "old").write().unwrap();
        File::new(&path, "new").write().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
