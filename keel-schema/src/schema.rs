//! Schema parsing from files and strings.

use std::{path::Path, str::FromStr};

use serde_json::Value;

use crate::{Error, ResolutionError, Result, error::SourceContext, resolve_ref};

/// Serialization format of a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

impl SchemaFormat {
    /// Pick the format from a file extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "json" => Some(SchemaFormat::Json),
            "yaml" | "yml" => Some(SchemaFormat::Yaml),
            _ => None,
        }
    }
}

/// A loaded schema document: the raw tree plus its source for diagnostics.
///
/// Key order of the original document is preserved, so iterating
/// definitions and exports follows document order.
#[derive(Debug, Clone)]
pub struct Schema {
    raw: Value,
    source: SourceContext,
}

impl FromStr for Schema {
    type Err = Box<Error>;

    /// Parse YAML (a superset of the JSON used in practice) labelled `schema.yaml`.
    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_format(s, "schema.yaml", SchemaFormat::Yaml)
    }
}

impl Schema {
    /// Load a schema file, choosing the parser by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = SchemaFormat::from_extension(extension).ok_or_else(|| {
            Box::new(Error::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            })
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;

        tracing::debug!(path = %path.display(), ?format, "loading schema");
        Self::from_str_with_format(&content, &path.display().to_string(), format)
    }

    /// Parse schema text with a filename used for error reporting and provenance.
    pub fn from_str_with_format(
        content: &str,
        filename: &str,
        format: SchemaFormat,
    ) -> Result<Self> {
        let source = SourceContext::new(content, filename);
        let raw: Value = match format {
            SchemaFormat::Json => {
                serde_json::from_str(content).map_err(|e| source.json_error(e))?
            }
            SchemaFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| source.yaml_error(e))?
            }
        };
        Ok(Self { raw, source })
    }

    /// Wrap an already parsed tree.
    pub fn from_value(raw: Value, filename: &str) -> Self {
        Self {
            source: SourceContext::new(String::new(), filename),
            raw,
        }
    }

    /// The raw document tree.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The filename or label given at load time.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Raw type definitions from `$defs`, in document order.
    ///
    /// A missing or null `$defs` yields nothing.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.raw
            .get("$defs")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|defs| defs.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Look up a raw definition by name.
    pub fn definition(&self, name: &str) -> Option<&Value> {
        self.raw.get("$defs").and_then(|defs| defs.get(name))
    }

    /// Top-level exports: every key that does not start with `$`.
    pub fn exports(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.raw
            .as_object()
            .into_iter()
            .flat_map(|root| root.iter())
            .filter(|(k, _)| !k.starts_with('$'))
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve a `$ref` string against this document's `$defs`.
    pub fn resolve_ref(&self, reference: &str) -> std::result::Result<String, ResolutionError> {
        resolve_ref(reference, |name| self.definition(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const USER_SCHEMA: &str = r##"
$defs:
  User:
    type: object
    properties:
      id: { type: string, format: uuid, x-primary-key: true }
      name: { type: string }
    required: [id]
  Color:
    enum: [a, b]
User:
  $ref: "#/$defs/User"
Status:
  type: string
"##;

    #[test]
    fn test_parse_yaml_preserves_order() {
        let schema: Schema = USER_SCHEMA.parse().unwrap();

        let defs: Vec<&str> = schema.definitions().map(|(k, _)| k).collect();
        assert_eq!(defs, vec!["User", "Color"]);

        let exports: Vec<&str> = schema.exports().map(|(k, _)| k).collect();
        assert_eq!(exports, vec!["User", "Status"]);
    }

    #[test]
    fn test_missing_defs_is_empty() {
        let schema: Schema = "Thing: { type: string }\n$defs: null\n".parse().unwrap();
        assert_eq!(schema.definitions().count(), 0);
        assert_eq!(schema.exports().count(), 1);
    }

    #[test]
    fn test_resolve_ref_against_document() {
        let schema: Schema = USER_SCHEMA.parse().unwrap();
        assert_eq!(schema.resolve_ref("#/$defs/Color").unwrap(), "Color");
        assert!(matches!(
            schema.resolve_ref("#/$defs/Nope"),
            Err(ResolutionError::UnknownDefinition { .. })
        ));
    }

    #[test]
    fn test_parse_json() {
        let schema = Schema::from_str_with_format(
            r#"{"$defs": {"B": {"type": "integer"}, "A": {"type": "string"}}}"#,
            "schema.json",
            SchemaFormat::Json,
        )
        .unwrap();
        let defs: Vec<&str> = schema.definitions().map(|(k, _)| k).collect();
        assert_eq!(defs, vec!["B", "A"]);
        assert_eq!(schema.filename(), "schema.json");
    }

    #[test]
    fn test_parse_errors_are_reported() {
        let err = Schema::from_str_with_format("{", "bad.json", SchemaFormat::Json).unwrap_err();
        assert!(matches!(*err, Error::ParseJson { .. }));

        let err = "a: [".parse::<Schema>().unwrap_err();
        assert!(matches!(*err, Error::ParseYaml { .. }));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(USER_SCHEMA.as_bytes()).unwrap();

        let schema = Schema::from_file(&path).unwrap();
        assert_eq!(schema.definitions().count(), 2);
        assert!(schema.filename().ends_with("model.yml"));
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        std::fs::write(&path, "").unwrap();

        let err = Schema::from_file(&path).unwrap_err();
        assert!(matches!(*err, Error::UnsupportedFormat { ref extension, .. } if extension == "toml"));
    }
}
