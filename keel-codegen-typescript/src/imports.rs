//! Import analysis run before any declaration is emitted.

use keel_codegen::generation::ImportCollector;
use keel_ir::{Kind, SchemaDocument};

/// Module providing the UUID alias type.
pub const UUID_MODULE: &str = "uuid";

/// Name of the UUID alias type.
pub const UUID_TYPE: &str = "UUID";

/// Walk every export and definition once and report the imports the
/// declarations will need.
///
/// Each `(module, symbol)` pair appears once no matter how many nodes use it.
pub fn collect_imports(doc: &SchemaDocument) -> ImportCollector {
    let mut imports = ImportCollector::new();
    doc.walk(&mut |def| {
        if let Kind::Primitive(primitive) = &def.kind
            && primitive.is_uuid()
        {
            imports.add(UUID_MODULE, UUID_TYPE);
        }
    });
    imports
}
