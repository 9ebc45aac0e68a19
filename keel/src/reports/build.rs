//! Build command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};
use crate::target::Target;

/// Outcome of one target.
#[derive(Debug)]
pub enum TargetResult {
    /// The artifact was written, or left alone when its content was current.
    Written {
        target: Target,
        path: PathBuf,
        changed: bool,
    },
    /// The artifact was rendered for preview only.
    Preview {
        target: Target,
        path: PathBuf,
        content: String,
    },
}

/// Report data from a build.
#[derive(Debug)]
pub struct BuildReport {
    /// Structural warnings raised while compiling.
    pub warnings: Vec<String>,
    /// One entry per target, in order.
    pub results: Vec<TargetResult>,
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        for result in &self.results {
            match result {
                TargetResult::Written {
                    target,
                    path,
                    changed: true,
                } => out.added_item(&format!("{} ({})", path.display(), target)),
                TargetResult::Written {
                    target,
                    path,
                    changed: false,
                } => out.unchanged_item(&format!("{} ({}, unchanged)", path.display(), target)),
                TargetResult::Preview {
                    target,
                    path,
                    content,
                } => {
                    out.divider(&format!("{} ({})", path.display(), target));
                    out.preformatted(content);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_results() {
        let report = BuildReport {
            warnings: vec!["object 'Blob' has no properties".into()],
            results: vec![
                TargetResult::Written {
                    target: Target::Postgres,
                    path: "gen/schema.sql".into(),
                    changed: true,
                },
                TargetResult::Written {
                    target: Target::TypeScript,
                    path: "web/schema.ts".into(),
                    changed: false,
                },
            ],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "warning: object 'Blob' has no properties",
                "+ gen/schema.sql (postgres)",
                "= web/schema.ts (typescript, unchanged)",
            ]
        );
    }
}
