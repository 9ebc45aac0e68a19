//! PostgreSQL DDL generator.

use eyre::Result;
use keel_codegen::{Backend, CodeBuilder, SchemaVisitor, visit_root};
use keel_ir::{ObjectType, Primitive, SchemaDocument, TypeDef};
use serde_json::Value;

use crate::{
    ddl::{Column, CreateTable, ForeignKeyBlock, PrimaryKeyBlock, quote_ident},
    keys::{foreign_key_for, primary_key_columns},
    type_mapper::PostgresTypeMapper,
};

/// Emits one idempotent migration script per document.
///
/// The whole script runs in a single transaction. Tables are created in
/// document order; every foreign key is added afterwards, once all tables
/// exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresGenerator;

impl PostgresGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for PostgresGenerator {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn file_extension(&self) -> &'static str {
        "sql"
    }

    fn render(&self, doc: &SchemaDocument) -> Result<String> {
        let mut emitter = DdlEmitter::new(doc);
        visit_root(&mut emitter, doc)?;
        Ok(emitter.finish())
    }
}

/// Per-run scratch state. Dropped when rendering ends.
struct DdlEmitter<'a> {
    doc: &'a SchemaDocument,
    mapper: PostgresTypeMapper<'a>,
    builder: CodeBuilder,
    foreign_keys: Vec<ForeignKeyBlock>,
}

impl<'a> DdlEmitter<'a> {
    fn new(doc: &'a SchemaDocument) -> Self {
        let mut builder = CodeBuilder::sql();
        builder
            .push_sql_comment(&format!("Auto-generated from {}", doc.source))
            .push_sql_comment("This DDL is intended to be idempotent. Apply on each startup.")
            .push_blank()
            .push_line("BEGIN;")
            .push_blank();

        Self {
            doc,
            mapper: PostgresTypeMapper::new(&doc.definitions),
            builder,
            foreign_keys: Vec::new(),
        }
    }

    fn finish(mut self) -> String {
        if !self.foreign_keys.is_empty() {
            self.builder.push_sql_comment("Foreign keys");
            for block in &self.foreign_keys {
                self.builder.emit(block);
            }
            self.builder.push_blank();
        }
        self.builder.push_line("COMMIT;");
        self.builder.build()
    }

    fn skip(&self, name: &str, what: &str) -> Result<()> {
        tracing::debug!(name, "{what} has no table of its own");
        Ok(())
    }
}

impl SchemaVisitor for DdlEmitter<'_> {
    fn visit_export_alias(&mut self, name: &str, _target: &str) -> Result<()> {
        self.skip(name, "export alias")
    }

    fn visit_ref_alias(&mut self, name: &str, _target: &str, _def: &TypeDef) -> Result<()> {
        self.skip(name, "reference alias")
    }

    fn visit_enum_alias(&mut self, name: &str, _values: &[Value], _def: &TypeDef) -> Result<()> {
        self.skip(name, "enum")
    }

    fn visit_union_alias(
        &mut self,
        name: &str,
        _variants: &[TypeDef],
        _def: &TypeDef,
    ) -> Result<()> {
        self.skip(name, "union")
    }

    fn visit_object(&mut self, name: &str, object: &ObjectType, def: &TypeDef) -> Result<()> {
        let keys = primary_key_columns(object);

        let mut table = CreateTable::new(name).primary_key(keys.iter().map(|k| k.name.as_str()));
        for property in &object.properties {
            let sql_type = match foreign_key_for(&self.doc.definitions, property) {
                Some(fk) => {
                    self.foreign_keys.push(ForeignKeyBlock::new(
                        name,
                        &property.name,
                        &fk.target_table,
                        &fk.target_column,
                    ));
                    fk.sql_type
                }
                None => self.mapper.column_type(&property.ty),
            };
            let column = Column::new(&property.name, sql_type);
            table = table.column(if property.required {
                column.not_null()
            } else {
                column
            });
        }

        if let Some(doc) = def.doc_line() {
            self.builder.push_sql_comment(&doc);
        }
        for property in &object.properties {
            let mut parts: Vec<String> = property.ty.doc_line().into_iter().collect();
            if property.primary_key {
                parts.push("Primary key".to_string());
            }
            if !parts.is_empty() {
                self.builder.push_sql_comment(&format!(
                    "{}: {}",
                    quote_ident(&property.name),
                    parts.join(" — ")
                ));
            }
        }
        self.builder
            .push_sql_comment(&format!("Table: {}", quote_ident(name)))
            .emit(&table);

        if !keys.is_empty() {
            self.builder
                .emit(&PrimaryKeyBlock::new(name, keys.iter().map(|k| k.name.as_str())));
        }
        self.builder.push_blank();

        tracing::debug!(table = name, columns = object.properties.len(), "table emitted");
        Ok(())
    }

    fn visit_array(&mut self, name: &str, _items: &TypeDef, _def: &TypeDef) -> Result<()> {
        self.skip(name, "array")
    }

    fn visit_primitive_alias(
        &mut self,
        name: &str,
        _primitive: &Primitive,
        _def: &TypeDef,
    ) -> Result<()> {
        self.skip(name, "primitive alias")
    }

    fn visit_unknown_alias(&mut self, name: &str, _def: &TypeDef) -> Result<()> {
        self.skip(name, "unknown type")
    }
}
