//! Output targets selectable on the command line and in keel.toml.

use std::{fmt, str::FromStr};

use keel_codegen::Backend;
use keel_codegen_sql::PostgresGenerator;
use keel_codegen_typescript::TypeScriptGenerator;
use serde::{Deserialize, Serialize};

/// A code generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// PostgreSQL DDL
    #[serde(alias = "sql")]
    Postgres,
    /// TypeScript declarations
    #[serde(alias = "ts")]
    TypeScript,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Postgres => "postgres",
            Target::TypeScript => "typescript",
        }
    }

    /// A fresh backend instance. Each run gets its own.
    pub fn backend(&self) -> Box<dyn Backend> {
        match self {
            Target::Postgres => Box::new(PostgresGenerator::new()),
            Target::TypeScript => Box::new(TypeScriptGenerator::new()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "sql" => Ok(Target::Postgres),
            "typescript" | "ts" => Ok(Target::TypeScript),
            _ => Err(format!(
                "unknown target '{}', expected 'postgres' or 'typescript'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Target::from_str("postgres").unwrap(), Target::Postgres);
        assert_eq!(Target::from_str("SQL").unwrap(), Target::Postgres);
        assert_eq!(Target::from_str("TypeScript").unwrap(), Target::TypeScript);
        assert_eq!(Target::from_str("ts").unwrap(), Target::TypeScript);
        assert!(Target::from_str("mysql").is_err());
    }

    #[test]
    fn test_deserialize() {
        let t: Target = serde_json::from_str(r#""typescript""#).unwrap();
        assert_eq!(t, Target::TypeScript);
        let t: Target = serde_json::from_str(r#""sql""#).unwrap();
        assert_eq!(t, Target::Postgres);
    }

    #[test]
    fn test_backend_matches_target() {
        assert_eq!(Target::Postgres.backend().name(), "postgres");
        assert_eq!(Target::TypeScript.backend().file_extension(), "ts");
    }
}
