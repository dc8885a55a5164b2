//! Recursive property flattening.
//!
//! Turns one schema node (or a whole inline object) into a flat list of
//! `FieldDescriptor`s. A node with nested `properties` expands into one
//! descriptor per leaf property on a single sibling list — flattening, not
//! nesting — so output ordering and naming track the source document.
//! Every shape the input grammar recognizes maps to exactly one descriptor
//! list; unrecognized `type` tokens pass through as opaque identifiers.

use serde_json::Value;

use crate::config::GenConfig;
use crate::ir::{EnumDecl, FieldDescriptor, TypeReference};
use crate::naming::upper_first;
use crate::resolve::{translate_opt, translate_type};
use crate::schema::{AdditionalProperties, Required, SchemaNode};

/// Caller-side requiredness context for one flattening step.
#[derive(Clone, Copy, Debug)]
pub enum RequiredCtx<'a> {
    /// Nothing declared: every field is optional.
    Absent,
    /// The `true` sentinel (coerced parameters): the field is required.
    All,
    /// Only the listed names are required.
    Names(&'a [String]),
}

impl<'a> RequiredCtx<'a> {
    pub fn from_node(required: Option<&'a Required>) -> Self {
        match required {
            None | Some(Required::Flag(false)) => Self::Absent,
            Some(Required::Flag(true)) => Self::All,
            Some(Required::Names(names)) => Self::Names(names),
        }
    }

    fn includes(&self, name: Option<&str>) -> bool {
        match self {
            Self::Absent => false,
            Self::All => true,
            Self::Names(names) => {
                name.is_some_and(|n| names.iter().any(|candidate| candidate == n))
            }
        }
    }
}

/// Flatten one property (or pure-type position when `name` is `None`).
///
/// `namespace` keeps synthesized enum names unique across contexts;
/// `export_enums` controls whether the produced enum declarations are
/// marked exported.
pub fn flatten(
    node: &SchemaNode,
    name: Option<&str>,
    namespace: &str,
    required: RequiredCtx<'_>,
    export_enums: bool,
    cfg: &GenConfig,
) -> Vec<FieldDescriptor> {
    // 1) inline object: recurse into each child and concatenate, inheriting
    //    the node's own required set
    if let Some(properties) = &node.properties {
        let child_required = RequiredCtx::from_node(node.required.as_ref());
        return properties
            .iter()
            .flat_map(|(child_name, child)| {
                flatten(child, Some(child_name.as_str()), namespace, child_required, true, cfg)
            })
            .collect();
    }

    let mut name = name.map(str::to_string);
    let mut enum_decl = None;
    let mut is_map = false;

    // 2) enum, declared directly or on the array element
    let ty = if let Some(values) = enum_values(node) {
        let mut enum_name = format!(
            "{}{}",
            upper_first(name.as_deref().unwrap_or("")),
            upper_first(namespace)
        );
        if !enum_name.contains("Enum") {
            enum_name.push_str("Enum");
        }
        enum_decl = Some(EnumDecl {
            name: enum_name.clone(),
            values: values.iter().map(literal_string).collect(),
            exported: export_enums,
        });
        let type_name = if node.type_.as_deref() == Some("array") {
            format!("{enum_name}[]")
        } else {
            enum_name
        };
        TypeReference {
            name: type_name,
            is_native: true,
            is_array_simple: true,
        }
    } else {
        // 3) resolve through the type table
        match node.type_.as_deref() {
            // no type at all: the node is a reference (or degrades to one)
            None => translate_opt(node.reference.as_deref(), cfg),
            Some("array") => {
                let element = translate_opt(element_token(node.items.as_deref()), cfg);
                let type_name = if element.is_array_simple {
                    format!("{}[]", element.name)
                } else {
                    format!("Array<{}>", element.name)
                };
                TypeReference {
                    name: type_name,
                    is_native: element.is_native,
                    is_array_simple: true,
                }
            }
            Some(other) => match map_value_type(node, cfg) {
                Some(value_ty) => {
                    if name.is_some() {
                        TypeReference {
                            name: format!("{{[key: string]: {}}}", value_ty.name),
                            is_native: value_ty.is_native,
                            is_array_simple: false,
                        }
                    } else {
                        // anonymous map: index-signature position
                        name = Some("[key: string]".to_string());
                        is_map = true;
                        value_ty
                    }
                }
                None => translate_type(other, cfg),
            },
        }
    };

    // maps always suppress the optionality marker
    let optional = !is_map && !required.includes(name.as_deref());

    vec![FieldDescriptor {
        optional,
        read_only: node.read_only.unwrap_or(false),
        doc_lines: doc_lines(node),
        name,
        ty,
        enum_decl,
        is_map,
    }]
}

/// Value type of a string-keyed map, when the node declares one.
fn map_value_type(node: &SchemaNode, cfg: &GenConfig) -> Option<TypeReference> {
    match node.additional_properties.as_ref()? {
        AdditionalProperties::Flag(false) => None,
        AdditionalProperties::Flag(true) => Some(translate_opt(None, cfg)),
        AdditionalProperties::Node(ap) => {
            if ap.type_.as_deref() == Some("array") {
                let element = translate_opt(element_token(ap.items.as_deref()), cfg);
                Some(TypeReference {
                    name: format!("{}[]", element.name),
                    is_native: element.is_native,
                    is_array_simple: true,
                })
            } else {
                Some(translate_opt(
                    ap.type_.as_deref().or(ap.reference.as_deref()),
                    cfg,
                ))
            }
        }
    }
}

fn element_token(items: Option<&SchemaNode>) -> Option<&str> {
    items.and_then(|node| node.type_.as_deref().or(node.reference.as_deref()))
}

fn enum_values(node: &SchemaNode) -> Option<&[Value]> {
    node.enum_
        .as_deref()
        .or_else(|| node.items.as_ref().and_then(|items| items.enum_.as_deref()))
}

/// Documentation lines: description, then example, format and default with
/// their prefixes; absent keys are omitted.
fn doc_lines(node: &SchemaNode) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(description) = &node.description {
        lines.push(description.clone());
    }
    if let Some(example) = &node.example {
        lines.push(format!("example: {}", literal_string(example)));
    }
    if let Some(format) = &node.format {
        lines.push(format!("format: {format}"));
    }
    if let Some(default) = &node.default {
        lines.push(format!("default: {}", literal_string(default)));
    }
    lines
}

/// Plain rendering of a JSON literal: strings verbatim, everything else in
/// its JSON spelling.
pub(crate) fn literal_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: serde_json::Value) -> SchemaNode {
        serde_json::from_value(value).expect("schema node fixture")
    }

    #[test]
    fn required_set_drives_optionality() {
        let object = node(serde_json::json!({
            "type": "object",
            "required": ["a"],
            "properties": {
                "a": {"type": "string"},
                "b": {"type": "integer"}
            }
        }));
        let cfg = GenConfig::default();
        let fields = flatten(&object, None, "Ctx", RequiredCtx::Absent, true, &cfg);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name.as_deref(), Some("a"));
        assert!(!fields[0].optional);
        assert_eq!(fields[1].name.as_deref(), Some("b"));
        assert!(fields[1].optional);
    }

    #[test]
    fn nested_objects_flatten_to_sibling_lists() {
        let object = node(serde_json::json!({
            "type": "object",
            "properties": {
                "outer": {
                    "type": "object",
                    "required": ["x"],
                    "properties": {
                        "x": {"type": "string"},
                        "y": {"type": "string"}
                    }
                },
                "plain": {"type": "boolean"}
            }
        }));
        let cfg = GenConfig::default();
        let fields = flatten(&object, None, "Ctx", RequiredCtx::Absent, true, &cfg);
        let names: Vec<_> = fields.iter().filter_map(|f| f.name.as_deref()).collect();
        assert_eq!(names, ["x", "y", "plain"]);
        assert!(!fields[0].optional, "inner required set applies");
    }

    #[test]
    fn enums_synthesize_namespaced_names() {
        let status = node(serde_json::json!({
            "type": "string",
            "enum": ["on", "off"]
        }));
        let cfg = GenConfig::default();
        let field = flatten(&status, Some("status"), "Device", RequiredCtx::Absent, true, &cfg)
            .remove(0);
        let decl = field.enum_decl.expect("enum declaration");
        assert_eq!(decl.name, "StatusDeviceEnum");
        assert_eq!(decl.values, ["on", "off"]);
        assert!(decl.exported);
        assert_eq!(field.ty.name, "StatusDeviceEnum");
    }

    #[test]
    fn array_of_enum_appends_array_suffix() {
        let tags = node(serde_json::json!({
            "type": "array",
            "items": {"type": "string", "enum": ["a", "b"]}
        }));
        let cfg = GenConfig::default();
        let field = flatten(&tags, Some("tags"), "Item", RequiredCtx::Absent, false, &cfg)
            .remove(0);
        assert_eq!(field.ty.name, "TagsItemEnum[]");
        let decl = field.enum_decl.expect("enum declaration");
        assert_eq!(decl.name, "TagsItemEnum");
        assert!(!decl.exported);
    }

    #[test]
    fn enum_suffix_is_not_duplicated() {
        let status = node(serde_json::json!({"type": "string", "enum": ["x"]}));
        let cfg = GenConfig::default();
        let field = flatten(&status, Some("statusEnum"), "", RequiredCtx::Absent, true, &cfg)
            .remove(0);
        assert_eq!(field.ty.name, "StatusEnum");
    }

    #[test]
    fn ref_arrays_use_generic_spelling() {
        let items = node(serde_json::json!({
            "type": "array",
            "items": {"$ref": "#/definitions/ItemDto"}
        }));
        let cfg = GenConfig::default();
        let field = flatten(&items, Some("items"), "", RequiredCtx::Absent, true, &cfg)
            .remove(0);
        assert_eq!(field.ty.name, "Array<model.ItemDto>");
        assert!(!field.ty.is_native);
    }

    #[test]
    fn native_arrays_use_simple_spelling() {
        let counts = node(serde_json::json!({
            "type": "array",
            "items": {"type": "integer"}
        }));
        let cfg = GenConfig::default();
        let field = flatten(&counts, Some("counts"), "", RequiredCtx::Absent, true, &cfg)
            .remove(0);
        assert_eq!(field.ty.name, "number[]");
    }

    #[test]
    fn named_maps_render_index_signatures() {
        let lookup = node(serde_json::json!({
            "type": "object",
            "additionalProperties": {"type": "string"}
        }));
        let cfg = GenConfig::default();
        let field = flatten(&lookup, Some("lookup"), "", RequiredCtx::Absent, true, &cfg)
            .remove(0);
        assert_eq!(field.ty.name, "{[key: string]: string}");
        assert!(!field.is_map);
    }

    #[test]
    fn anonymous_maps_take_the_synthetic_name_and_stay_required() {
        let lookup = node(serde_json::json!({
            "type": "object",
            "additionalProperties": {"$ref": "#/definitions/ItemDto"}
        }));
        let cfg = GenConfig::default();
        let field = flatten(&lookup, None, "", RequiredCtx::Absent, true, &cfg).remove(0);
        assert!(field.is_map);
        assert_eq!(field.name.as_deref(), Some("[key: string]"));
        assert_eq!(field.ty.name, "model.ItemDto");
        assert!(!field.optional, "maps suppress the optionality marker");
    }

    #[test]
    fn doc_lines_keep_fixed_order() {
        let priced = node(serde_json::json!({
            "type": "number",
            "description": "unit price",
            "example": 12.5,
            "format": "double",
            "default": 0
        }));
        let cfg = GenConfig::default();
        let field = flatten(&priced, Some("price"), "", RequiredCtx::Absent, true, &cfg)
            .remove(0);
        assert_eq!(
            field.doc_lines,
            ["unit price", "example: 12.5", "format: double", "default: 0"]
        );
    }

    #[test]
    fn read_only_marks_do_not_affect_optionality() {
        let id = node(serde_json::json!({"type": "integer", "readOnly": true}));
        let cfg = GenConfig::default();
        let required = ["id".to_string()];
        let field = flatten(
            &id,
            Some("id"),
            "",
            RequiredCtx::Names(&required),
            true,
            &cfg,
        )
        .remove(0);
        assert!(field.read_only);
        assert!(!field.optional);
    }

    #[test]
    fn unrecognized_types_pass_through() {
        let odd = node(serde_json::json!({"type": "quaternion"}));
        let cfg = GenConfig::default();
        let field = flatten(&odd, Some("q"), "", RequiredCtx::Absent, true, &cfg).remove(0);
        assert_eq!(field.ty.name, "quaternion");
        assert!(field.ty.is_native);
    }
}
