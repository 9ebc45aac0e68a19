//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - checks the raw document against the meta-schema
//! - [`LowerPhase`] - transforms the raw tree into a `SchemaDocument`
//! - [`AnalyzePhase`] - runs structural lints and collects warnings

mod analyze;
mod lower;
mod validate;

pub use analyze::{
    AnalyzePhase, EmptyObjectLint, ExportShadowLint, Lint, MixedUnionLint, UnknownKindLint,
};
pub use lower::{LowerPhase, lower_schema};
pub use validate::ValidatePhase;
