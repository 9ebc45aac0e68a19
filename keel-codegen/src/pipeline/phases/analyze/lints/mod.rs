//! Built-in structural lints.

mod empty_object;
mod export_shadow;
mod mixed_union;
mod unknown_kind;

pub use empty_object::EmptyObjectLint;
pub use export_shadow::ExportShadowLint;
pub use mixed_union::MixedUnionLint;
pub use unknown_kind::UnknownKindLint;
