//! Shared code generation utilities for the keel schema compiler.
//!
//! This crate provides the target-agnostic half of code generation used by
//! the backend crates (`keel-codegen-sql`, `keel-codegen-typescript`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`generation`] - Output bookkeeping (ImportCollector)
//! - [`language`] - The [`Backend`](language::Backend) trait every target implements
//! - [`pipeline`] - Validate → lower → analyze compilation phases
//! - [`visitor`] - Per-kind dispatch over a lowered document

pub mod builder;
pub mod generation;
pub mod language;
pub mod pipeline;
pub mod visitor;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use language::Backend;
pub use visitor::{SchemaVisitor, visit_root, visit_type};
