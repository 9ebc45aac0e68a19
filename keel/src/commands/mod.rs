mod build;
mod check;

use build::BuildCommand;
use check::CheckCommand;
use clap::{Parser, Subcommand};
use eyre::Result;

/// Extension trait for exiting on schema errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(report) => match report.downcast::<keel_schema::Error>() {
                Ok(e) => {
                    eprintln!("{:?}", miette::Report::new(e));
                    std::process::exit(1);
                }
                Err(report) => {
                    eprintln!("Error: {:?}", report);
                    std::process::exit(1);
                }
            },
        }
    }
}

#[derive(Parser)]
#[command(name = "keel")]
#[command(version)]
#[command(about = "Compile a JSON-Schema document into Postgres DDL and TypeScript declarations")]
pub(crate) struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Build(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate DDL or declarations from a schema
    Build(BuildCommand),

    /// Validate a schema without generating anything
    Check(CheckCommand),
}
