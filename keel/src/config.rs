//! The optional `keel.toml` project file.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::Deserialize;

use crate::target::Target;

/// Default project file name.
pub const CONFIG_FILE: &str = "keel.toml";

/// A parsed `keel.toml`.
///
/// Relative paths are resolved against the directory holding the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeelToml {
    /// Schema document to compile.
    pub schema: PathBuf,
    /// Artifacts to generate, in order.
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetConfig>,
}

/// One `[[target]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub backend: Target,
    pub output: PathBuf,
}

impl KeelToml {
    /// Read and parse a project file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        let mut config: KeelToml = toml::from_str(&content)
            .wrap_err_with(|| format!("invalid config '{}'", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.schema = base.join(&config.schema);
        for target in &mut config.targets {
            target.output = base.join(&target.output);
        }
        Ok(config)
    }
}
