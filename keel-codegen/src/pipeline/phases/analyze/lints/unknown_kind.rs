//! Lint for nodes that match no kind.

use keel_ir::{Kind, SchemaDocument};

use super::super::{Lint, for_each_node};
use crate::pipeline::Diagnostic;

/// Warns about nodes that classify as unknown and fall back to an
/// unconstrained type.
pub struct UnknownKindLint;

impl Lint for UnknownKindLint {
    fn name(&self) -> &'static str {
        "unknown-kind"
    }

    fn description(&self) -> &'static str {
        "Nodes without a recognised type are emitted unconstrained"
    }

    fn check(&self, document: &SchemaDocument, diagnostics: &mut Vec<Diagnostic>) {
        for_each_node(document, &mut |location, def| {
            if matches!(def.kind, Kind::Unknown) {
                diagnostics.push(
                    Diagnostic::warning(
                        "analyze",
                        "type has no recognised kind and is treated as unconstrained",
                    )
                    .at(location),
                );
            }
        });
    }
}
