//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod build;
mod check;
mod output;

pub use build::{BuildReport, TargetResult};
pub use check::CheckReport;
pub use output::{Report, TerminalOutput};
