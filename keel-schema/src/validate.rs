//! Meta-schema validation.

use serde_json::Value;

use crate::{Error, Result, Schema, Violation};

/// The meta-schema describing the supported keyword subset.
const META_SCHEMA: &str = include_str!("meta-schema.json");

/// Checks a loaded document before it is lowered.
///
/// Validators are constructed by the caller and handed to the pipeline;
/// nothing is cached between runs.
pub trait SchemaValidator: Send + Sync {
    /// A short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Validate the whole document, reporting every violation at once.
    fn validate(&self, schema: &Schema) -> Result<()>;
}

/// Validates documents against the built-in meta-schema using `jsonschema`.
pub struct MetaSchemaValidator {
    validator: jsonschema::Validator,
}

impl MetaSchemaValidator {
    /// Compile the built-in meta-schema.
    pub fn new() -> Result<Self> {
        let meta: Value = serde_json::from_str(META_SCHEMA).map_err(|e| {
            Box::new(Error::MetaSchema {
                message: e.to_string(),
            })
        })?;
        Self::with_meta_schema(&meta)
    }

    /// Compile a caller-provided meta-schema.
    pub fn with_meta_schema(meta: &Value) -> Result<Self> {
        let validator = jsonschema::validator_for(meta).map_err(|e| {
            Box::new(Error::MetaSchema {
                message: e.to_string(),
            })
        })?;
        Ok(Self { validator })
    }
}

impl SchemaValidator for MetaSchemaValidator {
    fn name(&self) -> &'static str {
        "meta-schema"
    }

    fn validate(&self, schema: &Schema) -> Result<()> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(schema.raw())
            .map(|e| Violation::new(e.to_string()))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = violations.len(), "meta-schema violations");
            Err(schema.source().validation_error(violations))
        }
    }
}

/// Accepts every document. For callers that validated upstream.
pub struct NoValidation;

impl SchemaValidator for NoValidation {
    fn name(&self) -> &'static str {
        "none"
    }

    fn validate(&self, _schema: &Schema) -> Result<()> {
        Ok(())
    }
}
