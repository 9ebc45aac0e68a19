//! Local `$ref` resolution.

use thiserror::Error;

/// The only reference shape accepted: a fragment pointer into `$defs`.
pub const LOCAL_REF_PREFIX: &str = "#/$defs/";

/// A `$ref` that cannot be resolved to a local definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Remote, relative, absolute or nested pointers.
    #[error("unsupported reference '{0}': only '#/$defs/<Name>' references are supported")]
    UnsupportedRef(String),

    /// Well-formed pointer to a name the definition table does not hold.
    #[error("reference '{reference}' points at undefined definition '{name}'")]
    UnknownDefinition { reference: String, name: String },

    /// `$ref` present but not a string.
    #[error("reference must be a string")]
    NotAString,
}

/// Extract the definition name from a local reference, checking its shape only.
///
/// JSON pointer escapes (`~1` for `/`, `~0` for `~`) are decoded.
pub fn ref_name(reference: &str) -> Result<String, ResolutionError> {
    let unsupported = || ResolutionError::UnsupportedRef(reference.to_string());

    let segment = reference
        .strip_prefix(LOCAL_REF_PREFIX)
        .ok_or_else(unsupported)?;
    if segment.is_empty() || segment.contains('/') {
        return Err(unsupported());
    }

    Ok(segment.replace("~1", "/").replace("~0", "~"))
}

/// Resolve a reference to a definition name present in the table.
///
/// `is_defined` answers whether a name exists in the local definition table.
pub fn resolve_ref(
    reference: &str,
    is_defined: impl Fn(&str) -> bool,
) -> Result<String, ResolutionError> {
    let name = ref_name(reference)?;
    if is_defined(&name) {
        Ok(name)
    } else {
        Err(ResolutionError::UnknownDefinition {
            reference: reference.to_string(),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined(name: &str) -> bool {
        matches!(name, "User" | "Org" | "a/b")
    }

    #[test]
    fn test_resolves_local_ref() {
        assert_eq!(resolve_ref("#/$defs/User", defined).unwrap(), "User");
    }

    #[test]
    fn test_decodes_pointer_escapes() {
        assert_eq!(ref_name("#/$defs/a~1b").unwrap(), "a/b");
        assert_eq!(ref_name("#/$defs/x~0y").unwrap(), "x~y");
        assert_eq!(resolve_ref("#/$defs/a~1b", defined).unwrap(), "a/b");
    }

    #[test]
    fn test_rejects_unsupported_shapes() {
        for reference in [
            "other.json#/$defs/User",
            "https://example.com/schema.json",
            "#/definitions/User",
            "#/$defs/",
            "#/$defs/User/properties/id",
            "User",
        ] {
            assert_eq!(
                resolve_ref(reference, defined),
                Err(ResolutionError::UnsupportedRef(reference.to_string())),
                "{reference}"
            );
        }
    }

    #[test]
    fn test_rejects_dangling_name() {
        let err = resolve_ref("#/$defs/Missing", defined).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::UnknownDefinition {
                reference: "#/$defs/Missing".into(),
                name: "Missing".into(),
            }
        );
        assert!(err.to_string().contains("Missing"));
    }
}
