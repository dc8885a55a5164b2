// Strongly-typed compiled model. Raw schema values stay out of here except
// for verbatim literals (enum members, defaults) carried into the output.

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::SchemaNode;

/// A resolved type reference.
///
/// `is_native == false` means `name` is qualified against the
/// compiled-definitions namespace and the consumer must import it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeReference {
    pub name: String,
    pub is_native: bool,
    /// Bare element names may use the simple `T[]` array spelling;
    /// composed names take the generic `Array<T>` form.
    pub is_array_simple: bool,
}

/// One flattened property. A property with nested `properties` expands into
/// several sibling descriptors, never one nested descriptor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Absent for pure-type positions (array elements, response bodies).
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeReference,
    pub optional: bool,
    pub read_only: bool,
    /// Description / example / format / default lines, in that order.
    pub doc_lines: Vec<String>,
    pub enum_decl: Option<EnumDecl>,
    /// Anonymous string-keyed map (index-signature position).
    pub is_map: bool,
}

/// A synthesized enum declaration attached to a field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<String>,
    pub exported: bool,
}

/// A compiled, named type. Raw names that normalize to the same
/// `normalized_name` share one definition; `source_names` records all of
/// them in first-seen order.
#[derive(Clone, Debug, Serialize)]
pub struct Definition {
    pub normalized_name: String,
    #[serde(flatten)]
    pub kind: DefinitionKind,
    pub source_names: Vec<String>,
    pub description: Option<String>,
    /// First-seen raw body; the form builder resolves `$ref`s against it.
    #[serde(skip)]
    pub schema: SchemaNode,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind")]
pub enum DefinitionKind {
    Object { fields: Vec<FieldDescriptor> },
    ArrayAlias { element: FieldDescriptor },
    StringEnum { values: Vec<String>, value_map: Vec<ValueMapEntry> },
    /// None of the classified shapes matched; compiles to an empty body.
    Unclassified,
}

/// One companion value-map entry of a string enum: capitalized literal →
/// literal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValueMapEntry {
    pub key: String,
    pub value: String,
}

/// Aggregated export surface: normalized name → contributing raw names.
/// Explicit accumulator with a single owner per compile invocation; both
/// the definition compiler and the response unifier write into it.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ExportTable {
    entries: IndexMap<String, Vec<String>>,
}

impl ExportTable {
    pub fn record(&mut self, normalized: &str, source: &str) {
        self.entries
            .entry(normalized.to_string())
            .or_default()
            .push(source.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn sources(&self, normalized: &str) -> &[String] {
        self.entries.get(normalized).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
