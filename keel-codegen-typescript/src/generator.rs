//! TypeScript declaration generator.

use eyre::Result;
use keel_codegen::{Backend, CodeBuilder, Renderable, SchemaVisitor, visit_root};
use keel_ir::{ObjectType, Primitive, SchemaDocument, TypeDef};
use serde_json::Value;

use crate::{
    ast::{Import, TypeAlias, Union},
    imports::{UUID_TYPE, collect_imports},
    type_mapper::{TypeScriptTypeMapper, literal},
};

/// Emits one declaration module per document.
///
/// Imports are decided up front by [`collect_imports`]; the emission pass
/// only reads that result.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptGenerator;

impl TypeScriptGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for TypeScriptGenerator {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn render(&self, doc: &SchemaDocument) -> Result<String> {
        let mut emitter = DeclarationEmitter::new(doc);
        visit_root(&mut emitter, doc)?;
        Ok(emitter.builder.build())
    }
}

struct DeclarationEmitter {
    mapper: TypeScriptTypeMapper,
    builder: CodeBuilder,
    declarations: usize,
}

impl DeclarationEmitter {
    fn new(doc: &SchemaDocument) -> Self {
        let mut builder = CodeBuilder::typescript();
        builder
            .push_line(&format!("// Auto-generated from {}", doc.source))
            .push_line("// Manual edits are really not a good idea.");

        for (module, symbols) in collect_imports(doc).iter() {
            let import = symbols
                .iter()
                .fold(Import::new(module), |import, symbol| import.named(symbol));
            builder.emit(&import);
        }
        builder.push_blank();

        Self {
            mapper: TypeScriptTypeMapper::new(),
            builder,
            declarations: 0,
        }
    }

    /// Append a declaration, separated from the previous one by a blank line.
    fn declare(&mut self, node: &impl Renderable) -> Result<()> {
        if self.declarations > 0 {
            self.builder.push_blank();
        }
        self.builder.emit(node);
        self.declarations += 1;
        Ok(())
    }
}

impl SchemaVisitor for DeclarationEmitter {
    fn visit_export_alias(&mut self, name: &str, target: &str) -> Result<()> {
        self.declare(&TypeAlias::new(name, target))
    }

    fn visit_ref_alias(&mut self, name: &str, target: &str, def: &TypeDef) -> Result<()> {
        self.declare(&TypeAlias::new(name, target).doc(def.doc_line()))
    }

    fn visit_enum_alias(&mut self, name: &str, values: &[Value], def: &TypeDef) -> Result<()> {
        let union = Union::new(name)
            .doc(def.doc_line())
            .variants(values.iter().map(literal));
        self.declare(&union)
    }

    fn visit_union_alias(&mut self, name: &str, variants: &[TypeDef], def: &TypeDef) -> Result<()> {
        let union = Union::new(name)
            .doc(def.doc_line())
            .variants(variants.iter().map(|v| self.mapper.type_expr(v)));
        self.declare(&union)
    }

    fn visit_object(&mut self, name: &str, object: &ObjectType, def: &TypeDef) -> Result<()> {
        let interface = self.mapper.interface(name, object).doc(def.doc_line());
        self.declare(&interface)
    }

    fn visit_array(&mut self, name: &str, items: &TypeDef, def: &TypeDef) -> Result<()> {
        self.declare(&TypeAlias::new(name, self.mapper.array(items)).doc(def.doc_line()))
    }

    fn visit_primitive_alias(
        &mut self,
        name: &str,
        primitive: &Primitive,
        def: &TypeDef,
    ) -> Result<()> {
        if name == UUID_TYPE && primitive.is_uuid() {
            tracing::debug!(name, "uuid alias is provided by the import");
            return Ok(());
        }
        let ty = self.mapper.type_expr(def);
        self.declare(&TypeAlias::new(name, ty).doc(def.doc_line()))
    }

    fn visit_unknown_alias(&mut self, name: &str, def: &TypeDef) -> Result<()> {
        tracing::debug!(name, "unknown kind emitted as any");
        self.declare(&TypeAlias::new(name, "any").doc(def.doc_line()))
    }
}
