//! Idempotent DDL statement builders.
//!
//! Each builder renders through [`CodeBuilder`](keel_codegen::CodeBuilder)
//! as a [`Renderable`]. Constraint additions are wrapped in `DO` blocks that
//! probe the catalog first, so every statement can be re-run safely.

use keel_codegen::{CodeFragment, Renderable};

/// Quote an identifier, doubling embedded double quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a string literal, doubling embedded single quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub sql_type: &'static str,
    pub not_null: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: &'static str) -> Self {
        Self {
            name: name.into(),
            sql_type,
            not_null: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Column definition as written inside `CREATE TABLE` and `ADD COLUMN`.
    pub fn definition(&self) -> String {
        let not_null = if self.not_null { " NOT NULL" } else { "" };
        format!("{} {}{}", quote_ident(&self.name), self.sql_type, not_null)
    }
}

/// `CREATE TABLE IF NOT EXISTS` with every known column, followed by one
/// `ADD COLUMN IF NOT EXISTS` per column for tables created by an older
/// script.
#[derive(Debug, Clone)]
pub struct CreateTable {
    table: String,
    columns: Vec<Column>,
    primary_key: Vec<String>,
}

impl CreateTable {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn primary_key(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    fn create_fragments(&self) -> Vec<CodeFragment> {
        let table = quote_ident(&self.table);
        let mut fragments = vec![CodeFragment::Line(format!(
            "CREATE TABLE IF NOT EXISTS {table} ("
        ))];

        if self.columns.is_empty() {
            // A table needs at least one column.
            fragments.push(CodeFragment::indent(vec![CodeFragment::line("\"data\" jsonb")]));
        } else {
            let last = self.columns.len() - 1;
            let lines = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let separator = if i < last { "," } else { "" };
                    CodeFragment::Line(format!("{}{separator}", column.definition()))
                })
                .collect();
            fragments.push(CodeFragment::indent(lines));

            if !self.primary_key.is_empty() {
                fragments.push(CodeFragment::line(","));
                fragments.push(CodeFragment::indent(vec![CodeFragment::Line(format!(
                    "PRIMARY KEY ({})",
                    quote_list(&self.primary_key)
                ))]));
            }
        }

        fragments.push(CodeFragment::line(");"));
        fragments
    }

    fn add_column_fragments(&self) -> Vec<CodeFragment> {
        let table = quote_ident(&self.table);
        self.columns
            .iter()
            .map(|column| {
                CodeFragment::Line(format!(
                    "ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {};",
                    column.definition()
                ))
            })
            .collect()
    }
}

impl Renderable for CreateTable {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.create_fragments();
        fragments.push(CodeFragment::Blank);
        fragments.extend(self.add_column_fragments());
        fragments
    }
}

/// Adds the primary key unless the table already has one.
#[derive(Debug, Clone)]
pub struct PrimaryKeyBlock {
    table: String,
    columns: Vec<String>,
}

impl PrimaryKeyBlock {
    pub fn new(table: impl Into<String>, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Constraint name, `pk_<table>`.
    pub fn constraint_name(&self) -> String {
        format!("pk_{}", self.table.to_lowercase())
    }
}

impl Renderable for PrimaryKeyBlock {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let probe = format!(
            "IF NOT EXISTS (SELECT 1 FROM pg_constraint c JOIN pg_class t ON t.oid=c.conrelid \
             WHERE t.relname = {} AND c.contype='p') THEN",
            quote_literal(&self.table)
        );
        let add = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ({});",
            quote_ident(&self.table),
            quote_ident(&self.constraint_name()),
            quote_list(&self.columns)
        );
        do_block(probe, add)
    }
}

/// Adds a foreign key unless a constraint of the same name exists.
#[derive(Debug, Clone)]
pub struct ForeignKeyBlock {
    table: String,
    column: String,
    target_table: String,
    target_column: String,
}

impl ForeignKeyBlock {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        target_table: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            target_table: target_table.into(),
            target_column: target_column.into(),
        }
    }

    /// Constraint name, `fk_<table>_<column>_to_<target>_<target column>`.
    pub fn constraint_name(&self) -> String {
        format!(
            "fk_{}_{}_to_{}_{}",
            self.table.to_lowercase(),
            self.column,
            self.target_table.to_lowercase(),
            self.target_column
        )
    }
}

impl Renderable for ForeignKeyBlock {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let name = self.constraint_name();
        let probe = format!(
            "IF NOT EXISTS (SELECT 1 FROM pg_constraint c WHERE c.conname = {}) THEN",
            quote_literal(&name)
        );
        let add = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) \
             ON UPDATE CASCADE ON DELETE RESTRICT;",
            quote_ident(&self.table),
            quote_ident(&name),
            quote_ident(&self.column),
            quote_ident(&self.target_table),
            quote_ident(&self.target_column)
        );
        do_block(probe, add)
    }
}

fn do_block(condition: String, statement: String) -> Vec<CodeFragment> {
    vec![
        CodeFragment::line("DO $$"),
        CodeFragment::line("BEGIN"),
        CodeFragment::indent(vec![CodeFragment::block(
            condition,
            vec![CodeFragment::Line(statement)],
            Some("END IF;".to_string()),
        )]),
        CodeFragment::line("END$$;"),
    ]
}

fn quote_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| quote_ident(n))
        .collect::<Vec<_>>()
        .join(", ")
}
