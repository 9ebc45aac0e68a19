//! Pipeline orchestrator.

use eyre::Result;
use keel_schema::{Schema, SchemaValidator};

use super::{
    CompilationContext, Phase,
    phases::{AnalyzePhase, LowerPhase, ValidatePhase},
};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (validate, lower, analyze) followed by any user
/// phases. The validator is supplied by the caller; the pipeline keeps no
/// state between runs.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(MetaSchemaValidator::new()?).phase(MyCustomPhase);
/// let ctx = pipeline.run(schema)?;
/// ```
pub struct Pipeline {
    validator: Box<dyn SchemaValidator>,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a pipeline that validates with `validator`.
    pub fn new(validator: impl SchemaValidator + 'static) -> Self {
        Self {
            validator: Box::new(validator),
            phases: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Run the pipeline on a schema.
    ///
    /// Executes all phases in order:
    /// 1. ValidatePhase - meta-schema check, fatal on any violation
    /// 2. LowerPhase - builds the document, fatal on any unresolvable `$ref`
    /// 3. AnalyzePhase - structural lints, warnings only
    /// 4. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(&self, schema: Schema) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(schema);

        let builtin_phases: Vec<Box<dyn Phase + '_>> = vec![
            Box::new(ValidatePhase::new(self.validator.as_ref())),
            Box::new(LowerPhase),
            Box::new(AnalyzePhase::new()),
        ];

        for phase in &builtin_phases {
            run_phase(phase.as_ref(), &mut ctx)?;
        }
        for phase in &self.phases {
            run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }
}

fn run_phase(phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
    let _span = tracing::debug_span!("phase", name = phase.name()).entered();
    tracing::debug!(description = phase.description(), "running");

    phase.run(ctx)?;

    tracing::debug!(diagnostics = ctx.diagnostics.len(), "done");
    Ok(())
}
