//! Raw schema document data model.
//!
//! The recognized shape of a Swagger-style document: a `definitions` table
//! of named type schemas plus a `paths` table of per-URL operation
//! descriptors. Maps preserve authoring order so compiled output is stable
//! against the source document. Nodes are immutable once deserialized.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SwaggerDoc {
    #[serde(default)]
    pub info: Info,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(rename = "basePath", default)]
    pub base_path: Option<String>,
    #[serde(default)]
    pub schemes: Vec<String>,
    #[serde(default)]
    pub definitions: IndexMap<String, SchemaNode>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// One URL entry: HTTP methods keyed by verb, plus optional parameters
/// shared by every method under this URL.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(flatten)]
    pub methods: IndexMap<String, Operation>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Status code (or `default`) → response descriptor.
    #[serde(default)]
    pub responses: IndexMap<String, ResponseObject>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ResponseObject {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<SchemaNode>,
}

/// An operation parameter. Scalar constraint keys sit directly on the
/// parameter; body parameters carry a nested `schema` instead.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in", default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub items: Option<SchemaNode>,
    #[serde(default)]
    pub schema: Option<SchemaNode>,
    #[serde(rename = "enum", default)]
    pub enum_: Option<Vec<Value>>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(rename = "allowEmptyValue", default)]
    pub allow_empty_value: Option<bool>,
    #[serde(rename = "uniqueItems", default)]
    pub unique_items: Option<bool>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(rename = "maxLength", default)]
    pub max_length: Option<u64>,
    #[serde(rename = "minLength", default)]
    pub min_length: Option<u64>,
    #[serde(default)]
    pub pattern: Option<String>,
}

/// One schema node: a type, an inline object, an array, a map, a `$ref`,
/// or an enum, plus descriptive metadata and value constraints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(default)]
    pub items: Option<Box<SchemaNode>>,
    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    #[serde(rename = "enum", default)]
    pub enum_: Option<Vec<Value>>,
    #[serde(default)]
    pub required: Option<Required>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub example: Option<Value>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(rename = "readOnly", default)]
    pub read_only: Option<bool>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(rename = "maxLength", default)]
    pub max_length: Option<u64>,
    #[serde(rename = "minLength", default)]
    pub min_length: Option<u64>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(rename = "allowEmptyValue", default)]
    pub allow_empty_value: Option<bool>,
    #[serde(rename = "uniqueItems", default)]
    pub unique_items: Option<bool>,
}

/// `additionalProperties` is either a nested value schema or a boolean
/// switch.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Node(Box<SchemaNode>),
    Flag(bool),
}

/// `required` is a name list on object schemas, or a boolean sentinel when
/// a parameter's own requiredness is coerced into schema shape.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Required {
    Names(Vec<String>),
    Flag(bool),
}
