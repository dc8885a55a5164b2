//! Form-control model builder.
//!
//! Converts a schema node (or an operation's parameter list) into a nested
//! tree of form controls with attached validators. `$ref`s resolve against
//! the compiled-definition index; a ref already visited on the current
//! recursive path is omitted rather than re-entered, so recursion depth is
//! bounded by the number of distinct refs, not by document size. Each
//! branch receives its own extended copy of the visited list — sibling
//! branches never observe each other's extensions.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::Serialize;
use serde_json::Value;

use crate::config::GenConfig;
use crate::error::{CompileError, Result};
use crate::ir::Definition;
use crate::naming::normalize_def;
use crate::schema::{AdditionalProperties, Parameter, Required, SchemaNode};

const DEF_PREFIX: &str = "#/definitions/";

/// One node of the editable-representation tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "control")]
pub enum FormControlNode {
    Leaf {
        /// Schema `default` carried verbatim.
        default: Option<Value>,
        validators: Vec<Validator>,
    },
    Group {
        children: IndexMap<String, FormControlNode>,
        validators: Vec<Validator>,
    },
    ArrayOf {
        element: Box<FormControlNode>,
        validators: Vec<Validator>,
    },
    MapOf {
        value: Box<FormControlNode>,
        validators: Vec<Validator>,
    },
}

/// A validation constraint derived from schema keywords. The derivation
/// order is fixed so output is deterministic; `Required` always sorts
/// after the constraint-derived rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "arg")]
pub enum Validator {
    Email,
    Max(OrderedFloat<f64>),
    Min(OrderedFloat<f64>),
    MaxLength(u64),
    MinLength(u64),
    Pattern(String),
    Required,
}

/// A built form tree plus the distinct validators it uses anywhere,
/// first-seen order — consumers derive their imports from the latter.
#[derive(Clone, Debug, Serialize)]
pub struct FormModel {
    pub root: FormControlNode,
    pub validators: Vec<Validator>,
}

/// Build the form model for an operation's parameter list: one group whose
/// children are the per-parameter controls.
pub fn build_for_params(
    params: &[Parameter],
    definitions: &IndexMap<String, Definition>,
    container: &str,
    cfg: &GenConfig,
) -> Result<FormModel> {
    let mut children = IndexMap::new();
    for param in params {
        let node = parameter_to_schema(param);
        if let Some(control) = make_field(&node, param.required, definitions, &[], container, cfg)?
        {
            children.insert(param.name.clone(), control);
        }
    }
    let root = FormControlNode::Group {
        children,
        validators: Vec::new(),
    };
    let validators = collect_validators(&root);
    Ok(FormModel { root, validators })
}

/// Build the control tree for one schema node. `None` means the whole
/// branch was omitted by cycle breaking.
pub fn build_for_schema(
    node: &SchemaNode,
    definitions: &IndexMap<String, Definition>,
    container: &str,
    cfg: &GenConfig,
) -> Result<Option<FormControlNode>> {
    make_field(node, false, definitions, &[], container, cfg)
}

fn make_field(
    node: &SchemaNode,
    required: bool,
    definitions: &IndexMap<String, Definition>,
    visited: &[String],
    container: &str,
    cfg: &GenConfig,
) -> Result<Option<FormControlNode>> {
    if node.type_.is_none() {
        if let Some(reference) = &node.reference {
            // a ref already on the current path: omit the branch (cycle
            // breaking is control flow here, not an error)
            if visited.iter().any(|seen| seen == reference) {
                return Ok(None);
            }
            let target = reference.strip_prefix(DEF_PREFIX).unwrap_or(reference);
            let definition = definitions.get(&normalize_def(target)).ok_or_else(|| {
                CompileError::UnresolvedReference {
                    reference: reference.clone(),
                    container: container.to_string(),
                }
            })?;
            // extend a private copy: siblings outside this branch keep the
            // shorter path
            let mut extended = visited.to_vec();
            extended.push(reference.clone());
            return make_field(&definition.schema, required, definitions, &extended, container, cfg);
        }
    }

    let mapped_type = node.type_.as_deref().map(|token| {
        cfg.native_types
            .get(token)
            .map_or(token, String::as_str)
    });
    let validators = derive_validators(node, required);

    let control = match mapped_type {
        Some("array") => {
            let element = match node.items.as_deref() {
                Some(items) => make_field(items, required, definitions, visited, container, cfg)?,
                None => None,
            };
            match element {
                Some(element) => FormControlNode::ArrayOf {
                    element: Box::new(element),
                    validators,
                },
                // element omitted by cycle breaking: drop the array too
                None => return Ok(None),
            }
        }
        Some("object") => match &node.additional_properties {
            Some(AdditionalProperties::Node(value_schema)) => {
                match make_field(value_schema, required, definitions, visited, container, cfg)? {
                    Some(value) => FormControlNode::MapOf {
                        value: Box::new(value),
                        validators,
                    },
                    None => return Ok(None),
                }
            }
            Some(AdditionalProperties::Flag(true)) => FormControlNode::MapOf {
                value: Box::new(FormControlNode::Leaf {
                    default: None,
                    validators: Vec::new(),
                }),
                validators,
            },
            _ => {
                let mut children = IndexMap::new();
                if let Some(properties) = &node.properties {
                    for (child_name, child) in properties {
                        let child_required = is_required(node.required.as_ref(), child_name);
                        if let Some(control) =
                            make_field(child, child_required, definitions, visited, container, cfg)?
                        {
                            children.insert(child_name.clone(), control);
                        }
                    }
                }
                FormControlNode::Group {
                    children,
                    validators,
                }
            }
        },
        // scalars, unknown tokens and typeless nodes all end as leaves
        _ => FormControlNode::Leaf {
            default: node.default.clone(),
            validators,
        },
    };

    Ok(Some(control))
}

/// Constraint keywords map 1:1 to validators, in fixed order; the required
/// marker is appended last.
fn derive_validators(node: &SchemaNode, required: bool) -> Vec<Validator> {
    let mut validators = Vec::new();
    if node.format.as_deref() == Some("email") {
        validators.push(Validator::Email);
    }
    if let Some(max) = node.maximum {
        validators.push(Validator::Max(OrderedFloat(max)));
    }
    if let Some(min) = node.minimum {
        validators.push(Validator::Min(OrderedFloat(min)));
    }
    if let Some(max_length) = node.max_length {
        validators.push(Validator::MaxLength(max_length));
    }
    if let Some(min_length) = node.min_length {
        validators.push(Validator::MinLength(min_length));
    }
    if let Some(pattern) = &node.pattern {
        validators.push(Validator::Pattern(pattern.clone()));
    }
    if required {
        validators.push(Validator::Required);
    }
    validators
}

/// Canonical schema view of a parameter: scalar keys first, then the
/// embedded `schema` object's present keys override.
pub fn parameter_to_schema(param: &Parameter) -> SchemaNode {
    let mut node = SchemaNode {
        allow_empty_value: param.allow_empty_value,
        default: param.default.clone(),
        description: param.description.clone(),
        enum_: param.enum_.clone(),
        format: param.format.clone(),
        items: param.items.clone().map(Box::new),
        maximum: param.maximum,
        max_length: param.max_length,
        minimum: param.minimum,
        min_length: param.min_length,
        pattern: param.pattern.clone(),
        type_: param.type_.clone(),
        unique_items: param.unique_items,
        ..SchemaNode::default()
    };
    if let Some(schema) = &param.schema {
        overlay(&mut node, schema);
    }
    node
}

fn overlay(base: &mut SchemaNode, over: &SchemaNode) {
    macro_rules! take {
        ($field:ident) => {
            if over.$field.is_some() {
                base.$field = over.$field.clone();
            }
        };
    }
    take!(type_);
    take!(properties);
    take!(items);
    take!(additional_properties);
    take!(reference);
    take!(enum_);
    take!(required);
    take!(description);
    take!(example);
    take!(format);
    take!(default);
    take!(read_only);
    take!(maximum);
    take!(minimum);
    take!(max_length);
    take!(min_length);
    take!(pattern);
    take!(allow_empty_value);
    take!(unique_items);
}

fn is_required(required: Option<&Required>, name: &str) -> bool {
    match required {
        Some(Required::Names(names)) => names.iter().any(|candidate| candidate == name),
        Some(Required::Flag(flag)) => *flag,
        None => false,
    }
}

fn collect_validators(root: &FormControlNode) -> Vec<Validator> {
    let mut out = Vec::new();
    collect_into(root, &mut out);
    out
}

fn collect_into(node: &FormControlNode, out: &mut Vec<Validator>) {
    match node {
        FormControlNode::Leaf { validators, .. } => note(validators, out),
        FormControlNode::Group {
            children,
            validators,
        } => {
            note(validators, out);
            for child in children.values() {
                collect_into(child, out);
            }
        }
        FormControlNode::ArrayOf {
            element,
            validators,
        } => {
            note(validators, out);
            collect_into(element, out);
        }
        FormControlNode::MapOf { value, validators } => {
            note(validators, out);
            collect_into(value, out);
        }
    }
}

fn note(validators: &[Validator], out: &mut Vec<Validator>) {
    for validator in validators {
        if !out.contains(validator) {
            out.push(validator.clone());
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
