use std::path::PathBuf;

use clap::Args;
use eyre::{Result, bail};

use super::UnwrapOrExit;
use crate::{
    config::{CONFIG_FILE, KeelToml},
    ops::{self, Job},
    reports::{Report, TerminalOutput},
    target::Target,
};

#[derive(Args)]
pub struct BuildCommand {
    /// Schema file (.json, .yaml or .yml). Without it, targets come from keel.toml
    pub schema: Option<PathBuf>,

    /// Backend to run: postgres or typescript
    #[arg(short, long)]
    pub target: Option<Target>,

    /// Output file (defaults to the schema path with the backend's extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to keel.toml, used when no schema is given
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Print generated code instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Skip meta-schema validation
    #[arg(long)]
    pub no_validate: bool,
}

impl BuildCommand {
    /// Run the build command
    pub fn run(&self) -> Result<()> {
        let (schema, jobs) = self.plan()?;
        if jobs.is_empty() {
            bail!("nothing to build: no targets selected");
        }

        let report = ops::build(&schema, &jobs, !self.no_validate, self.dry_run).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    /// Decide the schema and the jobs, from flags or from keel.toml.
    fn plan(&self) -> Result<(PathBuf, Vec<Job>)> {
        if let Some(schema) = &self.schema {
            let Some(target) = self.target else {
                bail!("--target is required when a schema path is given");
            };
            let output = self.output.clone().unwrap_or_else(|| {
                schema.with_extension(target.backend().file_extension())
            });
            return Ok((schema.clone(), vec![Job { target, output }]));
        }

        if self.output.is_some() {
            bail!("--output needs an explicit schema path; keel.toml sets outputs per target");
        }

        let config = KeelToml::open(&self.config)?;
        let jobs = config
            .targets
            .into_iter()
            .filter(|t| self.target.is_none_or(|only| only == t.backend))
            .map(|t| Job {
                target: t.backend,
                output: t.output,
            })
            .collect();
        Ok((config.schema, jobs))
    }
}
