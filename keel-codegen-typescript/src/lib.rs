//! TypeScript declaration generator for keel.
//!
//! Emits one `export type` or `export interface` per export and definition.
//! Auxiliary imports are computed by a separate analysis pass
//! ([`collect_imports`]) before any declaration is written.

pub mod ast;
mod generator;
mod imports;
mod type_mapper;

pub use generator::TypeScriptGenerator;
pub use imports::{UUID_MODULE, UUID_TYPE, collect_imports};
pub use keel_codegen::Backend;
pub use type_mapper::TypeScriptTypeMapper;
