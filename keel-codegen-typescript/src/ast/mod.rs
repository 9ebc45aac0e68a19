//! TypeScript AST builders for declarations and imports.
//!
//! These provide a high-level API for constructing TypeScript syntax,
//! which can then be rendered via CodeBuilder.

mod imports;
mod interface;
mod types;

pub use imports::Import;
pub use interface::{Interface, InterfaceField};
pub use types::{TypeAlias, Union};

use keel_codegen::CodeFragment;

/// Lines for `prefix + ty + suffix` where `ty` may span several lines.
///
/// Continuation lines keep their own relative indentation, so nested
/// object literals indent under the line that opens them.
pub(crate) fn typed_lines(prefix: &str, ty: &str, suffix: &str) -> Vec<CodeFragment> {
    let mut lines: Vec<String> = ty.lines().map(str::to_string).collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    let last = lines.len() - 1;
    lines[0].insert_str(0, prefix);
    lines[last].push_str(suffix);
    lines.into_iter().map(CodeFragment::Line).collect()
}
