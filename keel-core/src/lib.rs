//! Core utilities and types for the keel schema compiler.
//!
//! This crate provides the output side of a run: persisting a finished
//! artifact to disk in one step.

mod file;

pub use file::{File, WriteResult};
