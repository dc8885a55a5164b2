//! Compilation of the document's `paths` section.
//!
//! Operations group by controller (first tag, `-controller` suffixes
//! stripped), get a simple name from the last static URL segment, and
//! compile into per-operation records: interpolated URL, parameters
//! grouped by location and filtered through the per-verb allowed table,
//! the unified response type, and (when store generation is on) the form
//! model.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::GenConfig;
use crate::error::Result;
use crate::flatten::{flatten, RequiredCtx};
use crate::forms::{build_for_params, parameter_to_schema, FormModel};
use crate::header::base_path;
use crate::ir::{Definition, ExportTable, FieldDescriptor};
use crate::naming::{camel_case, lower_first, upper_first};
use crate::responses::{unify_responses, UnifiedResponse};
use crate::schema::{Operation, Parameter, PathItem, SwaggerDoc};

static PARAM_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/\{[^}]+\}").expect("param segment pattern")
});
static PATH_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^}]+)\}").expect("path param pattern")
});
static CONTROLLER_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(-rest)?-controller").expect("controller suffix pattern")
});
static CAPITAL: Lazy<Regex> = Lazy::new(|| Regex::new("([A-Z])").expect("capital pattern"));

#[derive(Clone, Debug, Serialize)]
pub struct ApiGroup {
    pub name: String,
    pub operations: Vec<CompiledOperation>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CompiledOperation {
    pub group: String,
    pub simple_name: String,
    pub method: String,
    /// Base path plus the URL with path parameters interpolated.
    pub url: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub params_type_name: String,
    /// Flattened parameter descriptors, declaration order.
    pub params: Vec<FieldDescriptor>,
    /// The same descriptors, required-first, for unwrapped signatures.
    pub signature: Vec<FieldDescriptor>,
    /// Location (`path`/`query`/`header`/`body`/`formData`) → descriptors.
    pub param_groups: IndexMap<String, Vec<FieldDescriptor>>,
    pub uses_non_native_type: bool,
    pub unwrap_single_param: bool,
    pub response: UnifiedResponse,
    pub form: Option<FormModel>,
}

pub fn compile_paths(
    doc: &SwaggerDoc,
    definitions: &IndexMap<String, Definition>,
    exports: &mut ExportTable,
    cfg: &GenConfig,
) -> Result<Vec<ApiGroup>> {
    let base = base_path(doc);
    let paths = merge_shared_parameters(&doc.paths);

    // group raw operations by controller name
    struct RawOp<'a> {
        url: &'a str,
        verb: &'a str,
        op: &'a Operation,
    }
    let mut grouped: IndexMap<String, Vec<RawOp<'_>>> = IndexMap::new();
    for (url, item) in &paths {
        for (verb, op) in &item.methods {
            let name = group_name(op);
            if cfg.group_ignores.contains(&name) {
                continue;
            }
            grouped.entry(name).or_default().push(RawOp {
                url: url.as_str(),
                verb: verb.as_str(),
                op,
            });
        }
    }

    let mut groups = Vec::with_capacity(grouped.len());
    for (name, raw_ops) in &grouped {
        // simple names must be unique within a controller; collisions fall
        // back to the operation id
        let mut simple_names: Vec<String> =
            raw_ops.iter().map(|raw| simple_name(raw.url)).collect();
        let original = simple_names.clone();
        for (i, simple) in simple_names.iter_mut().enumerate() {
            let collides = original.iter().filter(|n| *n == simple).count() > 1;
            if collides {
                if let Some(op_id) = &raw_ops[i].op.operation_id {
                    *simple = from_operation_id(op_id);
                }
            }
        }

        let mut operations = Vec::with_capacity(raw_ops.len());
        for (raw, simple) in raw_ops.iter().zip(simple_names) {
            operations.push(compile_operation(
                name,
                simple,
                raw.verb,
                raw.url,
                raw.op,
                &base,
                definitions,
                exports,
                cfg,
            )?);
        }
        groups.push(ApiGroup {
            name: name.clone(),
            operations,
        });
    }
    Ok(groups)
}

#[allow(clippy::too_many_arguments)]
fn compile_operation(
    group: &str,
    simple_name: String,
    verb: &str,
    url: &str,
    op: &Operation,
    base: &str,
    definitions: &IndexMap<String, Definition>,
    exports: &mut ExportTable,
    cfg: &GenConfig,
) -> Result<CompiledOperation> {
    let allowed = cfg
        .allowed_params
        .get(verb)
        .map_or(&[] as &[String], Vec::as_slice);
    let params_raw: Vec<Parameter> = op
        .parameters
        .iter()
        .filter(|p| allowed.contains(&p.location))
        .cloned()
        .collect();

    let params_type_name = upper_first(&format!("{simple_name}Params"));

    // flatten each parameter through the schema coercion; a parameter
    // yields exactly its leading descriptor
    let mut params = Vec::with_capacity(params_raw.len());
    let mut param_groups: IndexMap<String, Vec<FieldDescriptor>> = IndexMap::new();
    for param in &params_raw {
        let node = parameter_to_schema(param);
        let required = if param.required {
            RequiredCtx::All
        } else {
            RequiredCtx::Absent
        };
        if let Some(field) = flatten(&node, Some(param.name.as_str()), &params_type_name, required, true, cfg)
            .into_iter()
            .next()
        {
            param_groups
                .entry(param.location.clone())
                .or_default()
                .push(field.clone());
            params.push(field);
        }
    }

    // required-first stable order for unwrapped signatures
    let mut signature = params.clone();
    signature.sort_by_key(|field| field.optional);

    let response = unify_responses(&op.responses, &simple_name, exports, cfg);
    let uses_non_native_type =
        params.iter().any(|f| !f.ty.is_native) || response.uses_non_native_type;

    let form = if cfg.generate_store && !params_raw.is_empty() {
        let container = format!("{group}.{simple_name}");
        Some(build_for_params(&params_raw, definitions, &container, cfg)?)
    } else {
        None
    };

    Ok(CompiledOperation {
        group: group.to_string(),
        method: verb.to_string(),
        url: format!("{base}{}", interpolate_url(url)),
        operation_id: op.operation_id.clone(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        unwrap_single_param: cfg.unwrap_single_param_methods && params.len() == 1,
        simple_name,
        params_type_name,
        params,
        signature,
        param_groups,
        uses_non_native_type,
        response,
        form,
    })
}

/// Hoist shared path-level parameters into each method. Method-level
/// parameters win; duplicates are keyed on (`in`, `name`).
fn merge_shared_parameters(paths: &IndexMap<String, PathItem>) -> IndexMap<String, PathItem> {
    paths
        .iter()
        .map(|(url, item)| {
            let mut item = item.clone();
            if !item.parameters.is_empty() {
                for method in item.methods.values_mut() {
                    let extra: Vec<Parameter> = item
                        .parameters
                        .iter()
                        .filter(|shared| {
                            !method.parameters.iter().any(|own| {
                                own.location == shared.location && own.name == shared.name
                            })
                        })
                        .cloned()
                        .collect();
                    method.parameters.extend(extra);
                }
                item.parameters.clear();
            }
            (url.clone(), item)
        })
        .collect()
}

/// Controller name from the first tag: `items-rest-controller` → `Items`.
/// Untagged operations land in a catch-all group.
fn group_name(op: &Operation) -> String {
    match op.tags.first() {
        Some(tag) => upper_first(&camel_case(&CONTROLLER_SUFFIX.replace(tag, ""))),
        None => "Api".to_string(),
    }
}

/// Simple method name from the last static URL segment:
/// `/accounts/{accountId}/updateMothersName` → `updateMothersName`.
fn simple_name(url: &str) -> String {
    let stripped = PARAM_SEGMENT.replace_all(url, "");
    let stripped = stripped.trim_end_matches('/');
    let tail = stripped.rsplit('/').next().unwrap_or("");
    let mut name = camel_case(tail);
    name.retain(|c| c.is_alphanumeric() || c == '_');
    name
}

/// Collision fallback: re-derive the name from the operation id, keeping
/// capital runs intact (`getUserUsingGET` stays `getUserUsingGET`).
fn from_operation_id(operation_id: &str) -> String {
    let kebabbed = CAPITAL.replace_all(operation_id, "-$1");
    lower_first(&camel_case(&kebabbed))
}

fn interpolate_url(url: &str) -> String {
    // `$$` keeps the literal dollar out of the capture-reference syntax
    PATH_PARAM
        .replace_all(url, "$${pathParams.$1}")
        .into_owned()
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
