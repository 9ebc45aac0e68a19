//! Check operation - schema validation.

use std::path::Path;

use eyre::Result;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline without generating anything and returns its
/// diagnostics.
pub fn check(schema: &Path, validate: bool) -> Result<CheckReport> {
    let ctx = super::compile(schema, validate)?;
    let (definitions, exports) = ctx
        .document
        .as_ref()
        .map_or((0, 0), |d| (d.definitions.len(), d.exports.len()));

    Ok(CheckReport {
        schema: schema.to_path_buf(),
        definitions,
        exports,
        diagnostics: ctx.diagnostics,
    })
}
