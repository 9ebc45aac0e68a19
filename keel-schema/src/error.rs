use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

use crate::ResolutionError;

/// Result type for keel-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a serde_json error.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = (source.line() > 0).then(|| {
            SourceSpan::new(
                SourceOffset::from_location(&self.src, source.line(), source.column()),
                0,
            )
        });
        Box::new(Error::ParseJson {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a serde_yaml error.
    pub fn yaml_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source.location().map(|loc| SourceSpan::from(loc.index()));
        Box::new(Error::ParseYaml {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error from the collected violations.
    pub fn validation_error(&self, violations: Vec<Violation>) -> Box<Error> {
        Box::new(Error::Validation {
            filename: self.filename.clone(),
            count: violations.len(),
            violations,
        })
    }

    /// Create a resolution error for a reference found at `location`.
    pub fn resolution_error(
        &self,
        location: impl Into<String>,
        source: ResolutionError,
    ) -> Box<Error> {
        Box::new(Error::Resolution {
            filename: self.filename.clone(),
            location: location.into(),
            source,
        })
    }
}

/// A single meta-schema violation.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{message}")]
pub struct Violation {
    pub message: String,
}

impl Violation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported schema file type '{extension}'")]
    #[diagnostic(
        code(keel::unsupported_format),
        help("schema files must end in .json, .yaml or .yml")
    )]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to parse JSON schema")]
    #[diagnostic(code(keel::parse_error))]
    ParseJson {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML schema")]
    #[diagnostic(code(keel::parse_error))]
    ParseYaml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("'{filename}' failed meta-schema validation with {count} violation(s)")]
    #[diagnostic(code(keel::validation_error))]
    Validation {
        filename: String,
        count: usize,
        #[related]
        violations: Vec<Violation>,
    },

    #[error("cannot resolve reference in '{filename}' at {location}")]
    #[diagnostic(
        code(keel::resolution_error),
        help("references must point into the document's own $defs, e.g. '#/$defs/User'")
    )]
    Resolution {
        filename: String,
        location: String,
        #[source]
        source: ResolutionError,
    },

    #[error("invalid meta-schema: {message}")]
    #[diagnostic(code(keel::meta_schema))]
    MetaSchema { message: String },
}

impl Error {
    /// Returns true for the fatal "document is malformed" class.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns true for unresolvable references.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Error::Resolution { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_counts_violations() {
        let ctx = SourceContext::new("{}", "schema.json");
        let err = ctx.validation_error(vec![Violation::new("a"), Violation::new("b")]);
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "'schema.json' failed meta-schema validation with 2 violation(s)"
        );
    }

    #[test]
    fn test_json_error_has_span() {
        let src = "{\n  \"a\": ,\n}";
        let ctx = SourceContext::new(src, "schema.json");
        let source = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        let err = ctx.json_error(source);
        match *err {
            Error::ParseJson { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolution_error_wraps_source() {
        let ctx = SourceContext::new("", "schema.yaml");
        let err = ctx.resolution_error(
            "$defs.User.properties.org",
            ResolutionError::UnsupportedRef("other.json#/Org".into()),
        );
        assert!(err.is_resolution());
        assert!(err.to_string().contains("$defs.User.properties.org"));
    }
}
