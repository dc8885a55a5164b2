//! Schema-to-model compiler.
//!
//! Consumes a Swagger-style schema document (named type definitions plus
//! HTTP operation descriptors) and compiles it into a language-agnostic
//! structural model: type declarations, flattened field descriptors,
//! per-operation parameter/response views, and nested form-control trees.
//! Downstream template renderers turn the model into client source text;
//! none of that rendering lives here.

pub mod cli;
pub mod config;
pub mod definitions;
pub mod error;
pub mod flatten;
pub mod forms;
pub mod header;
pub mod ir;
pub mod naming;
pub mod path_de;
pub mod paths;
pub mod resolve;
pub mod responses;
pub mod schema;

use serde::Serialize;

/// Fully-compiled view of one schema document.
#[derive(Clone, Debug, Serialize)]
pub struct CompiledApi {
    pub header: header::DocumentHeader,
    pub definitions: Vec<ir::Definition>,
    pub exports: ir::ExportTable,
    pub groups: Vec<paths::ApiGroup>,
}

/// Single-pass compile: definitions first, then the operation pipeline,
/// both writing into the same export accumulator.
pub fn compile(
    doc: &schema::SwaggerDoc,
    cfg: &config::GenConfig,
) -> Result<CompiledApi, error::CompileError> {
    let definitions::CompiledDefinitions { index, mut exports } =
        definitions::compile_definitions(&doc.definitions, cfg);
    let groups = paths::compile_paths(doc, &index, &mut exports, cfg)?;
    Ok(CompiledApi {
        header: header::process_header(doc, cfg),
        definitions: index.into_values().collect(),
        exports,
        groups,
    })
}
