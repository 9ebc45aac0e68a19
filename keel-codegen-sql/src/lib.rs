//! PostgreSQL DDL generator for keel.
//!
//! Object definitions become tables. Every statement is guarded so the
//! script can be applied on each startup against a database that already
//! holds some or all of the schema.

mod ddl;
mod generator;
mod keys;
mod type_mapper;

pub use ddl::{Column, CreateTable, ForeignKeyBlock, PrimaryKeyBlock, quote_ident, quote_literal};
pub use generator::PostgresGenerator;
pub use keel_codegen::Backend;
pub use keys::{ForeignKey, foreign_key_for, primary_key_columns};
pub use type_mapper::PostgresTypeMapper;
