//! Build operation - compile a schema and generate artifacts.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use keel_core::WriteResult;

use crate::{
    reports::{BuildReport, TargetResult},
    target::Target,
};

/// One artifact to produce.
#[derive(Debug, Clone)]
pub struct Job {
    pub target: Target,
    pub output: PathBuf,
}

/// Execute the build operation.
///
/// Each job compiles the schema on its own, so no state is shared between
/// targets. Warnings are collected from the first compilation only since
/// every run sees the same document. With `dry_run` the artifacts are
/// rendered and returned instead of written.
pub fn build(schema: &Path, jobs: &[Job], validate: bool, dry_run: bool) -> Result<BuildReport> {
    let mut report = BuildReport {
        warnings: Vec::new(),
        results: Vec::new(),
    };

    for (i, job) in jobs.iter().enumerate() {
        let ctx = super::compile(schema, validate)?;
        if i == 0 {
            report.warnings = ctx.warnings().map(super::describe).collect();
        }

        let document = ctx.into_document()?;
        let backend = job.target.backend();
        let _span = tracing::info_span!("build", backend = backend.name()).entered();

        let result = if dry_run {
            TargetResult::Preview {
                target: job.target,
                path: job.output.clone(),
                content: backend.render(&document)?,
            }
        } else {
            let written = backend
                .generate(&document, &job.output)
                .wrap_err_with(|| format!("failed to generate {}", job.output.display()))?;
            TargetResult::Written {
                target: job.target,
                path: job.output.clone(),
                changed: matches!(written, WriteResult::Written),
            }
        };
        report.results.push(result);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r##"
$defs:
  User:
    type: object
    properties:
      id: { type: string, format: uuid, x-primary-key: true }
      name: { type: string }
    required: [id]
  Empty:
    type: object
User:
  $ref: "#/$defs/User"
"##;

    fn write_schema(dir: &Path) -> PathBuf {
        let path = dir.join("model.yaml");
        std::fs::write(&path, SCHEMA).unwrap();
        path
    }

    #[test]
    fn test_build_writes_every_target() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write_schema(dir.path());
        let jobs = [
            Job {
                target: Target::Postgres,
                output: dir.path().join("gen/schema.sql"),
            },
            Job {
                target: Target::TypeScript,
                output: dir.path().join("web/schema.ts"),
            },
        ];

        let report = build(&schema, &jobs, true, false).unwrap();
        assert_eq!(report.results.len(), 2);
        assert!(report.warnings.iter().any(|w| w.contains("Empty")));

        let sql = std::fs::read_to_string(dir.path().join("gen/schema.sql")).unwrap();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS \"User\""));
        let ts = std::fs::read_to_string(dir.path().join("web/schema.ts")).unwrap();
        assert!(ts.contains("export interface User {"));

        // A second build over the same schema leaves the files alone.
        let report = build(&schema, &jobs, true, false).unwrap();
        assert!(report.results.iter().all(|r| matches!(
            r,
            TargetResult::Written { changed: false, .. }
        )));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write_schema(dir.path());
        let output = dir.path().join("schema.sql");
        let jobs = [Job {
            target: Target::Postgres,
            output: output.clone(),
        }];

        let report = build(&schema, &jobs, true, true).unwrap();
        assert!(!output.exists());
        match &report.results[0] {
            TargetResult::Preview { content, .. } => assert!(content.starts_with("-- Auto-generated")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_dangling_reference_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("model.yaml");
        std::fs::write(
            &schema,
            "$defs:\n  Post:\n    type: object\n    properties:\n      author: { $ref: \"#/$defs/User\" }\n",
        )
        .unwrap();
        let output = dir.path().join("schema.sql");
        let jobs = [Job {
            target: Target::Postgres,
            output: output.clone(),
        }];

        let err = build(&schema, &jobs, true, false).unwrap_err();
        assert!(err.downcast_ref::<keel_schema::Error>().is_some());
        assert!(!output.exists());
    }
}
