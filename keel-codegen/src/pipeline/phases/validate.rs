//! Validate phase - checks the raw document against the meta-schema.

use eyre::Result;
use keel_schema::SchemaValidator;

use crate::pipeline::{CompilationContext, Phase};

/// Phase that runs the caller's validator over the loaded schema.
///
/// Any violation is fatal: the error carries every violation found.
pub struct ValidatePhase<'a> {
    validator: &'a dyn SchemaValidator,
}

impl<'a> ValidatePhase<'a> {
    pub fn new(validator: &'a dyn SchemaValidator) -> Self {
        Self { validator }
    }
}

impl Phase for ValidatePhase<'_> {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check the document against the meta-schema"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        tracing::debug!(validator = self.validator.name(), "validating");
        self.validator
            .validate(&ctx.schema)
            .map_err(|err| eyre::Report::new(*err))
    }
}
