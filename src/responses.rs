//! Unification of an operation's successful responses.
//!
//! All 2xx responses that declare a schema collapse into one deduplicated
//! union type. Inline (anonymous) object shapes compile as synthetic named
//! definitions and grow the running export surface as they are discovered.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::GenConfig;
use crate::definitions::compile_definition;
use crate::flatten::{flatten, RequiredCtx};
use crate::ir::{Definition, EnumDecl, ExportTable};
use crate::schema::ResponseObject;

/// The "no value" sentinel when no 2xx response carries a schema.
const NO_VALUE_TYPE: &str = "void";

#[derive(Clone, Debug, Serialize)]
pub struct UnifiedResponse {
    /// Deduplicated union over the 2xx response types, first-seen order.
    pub type_name: String,
    pub enum_declarations: Vec<EnumDecl>,
    pub uses_non_native_type: bool,
    /// Synthetic definitions compiled from inline object shapes.
    pub inline_definitions: Vec<Definition>,
}

pub fn unify_responses(
    responses: &IndexMap<String, ResponseObject>,
    context_name: &str,
    exports: &mut ExportTable,
    cfg: &GenConfig,
) -> UnifiedResponse {
    let mut type_names: Vec<String> = Vec::new();
    let mut enum_declarations = Vec::new();
    let mut uses_non_native_type = false;
    let mut inline_definitions = Vec::new();

    for (status, response) in responses {
        if !is_success(status) {
            continue;
        }
        let Some(schema) = &response.schema else {
            continue;
        };
        if schema.properties.is_some() {
            // anonymous object shape: compile it as a synthetic named
            // definition and grow the export surface immediately
            let synthetic_name = format!("{context_name}GeneratedInlineModel");
            let definition = compile_definition(schema, &synthetic_name, cfg);
            exports.record(&definition.normalized_name, &synthetic_name);
            type_names.push(format!("{}.{}", cfg.model_module, definition.normalized_name));
            uses_non_native_type = true;
            inline_definitions.push(definition);
        } else {
            for field in flatten(schema, None, context_name, RequiredCtx::Absent, true, cfg) {
                uses_non_native_type |= !field.ty.is_native;
                type_names.push(field.ty.name);
                if let Some(declaration) = field.enum_decl {
                    enum_declarations.push(declaration);
                }
            }
        }
    }

    // exact duplicates collapse; first-seen order survives
    let mut members: Vec<String> = Vec::new();
    for name in type_names {
        if !members.contains(&name) {
            members.push(name);
        }
    }
    let type_name = if members.is_empty() {
        NO_VALUE_TYPE.to_string()
    } else {
        members.join(" | ")
    };

    UnifiedResponse {
        type_name,
        enum_declarations,
        uses_non_native_type,
        inline_definitions,
    }
}

fn is_success(status: &str) -> bool {
    status.parse::<u16>().is_ok_and(|code| code / 100 == 2)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
