//! Compilation of the document's named definitions.
//!
//! Each raw definition normalizes its name, classifies into one of three
//! shapes (array alias, object/interface, string enum) and lands in an
//! aggregated table. Raw names colliding after normalization share one
//! entry: the first compiled body wins, later raw names are recorded as
//! aliases only.

use indexmap::IndexMap;

use crate::config::GenConfig;
use crate::flatten::{flatten, literal_string, RequiredCtx};
use crate::ir::{Definition, DefinitionKind, ExportTable, ValueMapEntry};
use crate::naming::{normalize_def, upper_first};
use crate::schema::SchemaNode;

/// Output of one definitions pass: the first-write-wins index plus the
/// running export table (which the response unifier keeps growing later).
#[derive(Clone, Debug)]
pub struct CompiledDefinitions {
    pub index: IndexMap<String, Definition>,
    pub exports: ExportTable,
}

pub fn compile_definitions(
    definitions: &IndexMap<String, SchemaNode>,
    cfg: &GenConfig,
) -> CompiledDefinitions {
    let mut index: IndexMap<String, Definition> = IndexMap::new();
    let mut exports = ExportTable::default();

    for (source, node) in definitions {
        let compiled = compile_definition(node, source, cfg);
        exports.record(&compiled.normalized_name, source);
        match index.get_mut(&compiled.normalized_name) {
            // collision: keep the first compiled body, record the alias
            Some(existing) => existing.source_names.push(source.clone()),
            None => {
                index.insert(compiled.normalized_name.clone(), compiled);
            }
        }
    }

    CompiledDefinitions { index, exports }
}

/// Classify and compile one raw definition.
pub fn compile_definition(node: &SchemaNode, raw_name: &str, cfg: &GenConfig) -> Definition {
    let normalized_name = normalize_def(raw_name);

    let kind = if node.type_.as_deref() == Some("array") {
        match flatten(node, None, "", RequiredCtx::Absent, true, cfg)
            .into_iter()
            .next()
        {
            Some(element) => DefinitionKind::ArrayAlias { element },
            None => DefinitionKind::Unclassified,
        }
    } else if node.properties.is_some() || node.additional_properties.is_some() {
        // namespace = normalized name, so enum names stay unique across
        // definitions
        let fields = flatten(node, None, &normalized_name, RequiredCtx::Absent, true, cfg);
        DefinitionKind::Object { fields }
    } else if node.type_.as_deref() == Some("string") && node.enum_.is_some() {
        let values: Vec<String> = node
            .enum_
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(literal_string)
            .collect();
        let value_map = values
            .iter()
            .map(|value| ValueMapEntry {
                key: upper_first(value),
                value: value.clone(),
            })
            .collect();
        DefinitionKind::StringEnum { values, value_map }
    } else {
        // TODO: consider rejecting definitions that match none of the three
        // classified shapes instead of compiling an empty body.
        DefinitionKind::Unclassified
    };

    Definition {
        normalized_name,
        kind,
        source_names: vec![raw_name.to_string()],
        description: node.description.clone(),
        schema: node.clone(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    fn defs(value: serde_json::Value) -> IndexMap<String, SchemaNode> {
        serde_json::from_value(value).expect("definitions fixture")
    }

    #[test]
    fn colliding_names_merge_first_write_wins() {
        let input = defs(serde_json::json!({
            "fooBar": {
                "type": "object",
                "properties": {"first": {"type": "string"}}
            },
            "FooBar": {
                "type": "object",
                "properties": {"second": {"type": "integer"}}
            }
        }));
        let cfg = GenConfig::default();
        let compiled = compile_definitions(&input, &cfg);

        assert_eq!(compiled.index.len(), 1);
        let def = &compiled.index["FooBar"];
        assert_eq!(def.source_names, ["fooBar", "FooBar"]);
        match &def.kind {
            DefinitionKind::Object { fields } => {
                // the first compiled body survives
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].name.as_deref(), Some("first"));
            }
            other => panic!("expected object, got {other:?}"),
        }
        assert_eq!(compiled.exports.sources("FooBar"), ["fooBar", "FooBar"]);
    }

    #[test]
    fn string_enums_get_a_companion_value_map() {
        let input = defs(serde_json::json!({
            "Mode": {"type": "string", "enum": ["a", "b"]}
        }));
        let cfg = GenConfig::default();
        let compiled = compile_definitions(&input, &cfg);
        match &compiled.index["Mode"].kind {
            DefinitionKind::StringEnum { values, value_map } => {
                assert_eq!(values, &["a", "b"]);
                assert_eq!(
                    value_map,
                    &[
                        ValueMapEntry { key: "A".into(), value: "a".into() },
                        ValueMapEntry { key: "B".into(), value: "b".into() },
                    ]
                );
            }
            other => panic!("expected string enum, got {other:?}"),
        }
    }

    #[test]
    fn array_definitions_become_aliases() {
        let input = defs(serde_json::json!({
            "ItemList": {
                "type": "array",
                "items": {"$ref": "#/definitions/ItemDto"}
            }
        }));
        let cfg = GenConfig::default();
        let compiled = compile_definitions(&input, &cfg);
        match &compiled.index["ItemList"].kind {
            DefinitionKind::ArrayAlias { element } => {
                assert_eq!(element.ty.name, "Array<model.ItemDto>");
            }
            other => panic!("expected array alias, got {other:?}"),
        }
    }

    #[test]
    fn shapeless_definitions_compile_to_empty_bodies() {
        let input = defs(serde_json::json!({
            "Mystery": {"description": "nothing recognizable"}
        }));
        let cfg = GenConfig::default();
        let compiled = compile_definitions(&input, &cfg);
        let def = &compiled.index["Mystery"];
        assert!(matches!(def.kind, DefinitionKind::Unclassified));
        assert_eq!(def.description.as_deref(), Some("nothing recognizable"));
    }

    #[test]
    fn generic_names_normalize_before_aggregation() {
        let input = defs(serde_json::json!({
            "Page«ItemDto»": {
                "type": "object",
                "properties": {"content": {"type": "string"}}
            }
        }));
        let cfg = GenConfig::default();
        let compiled = compile_definitions(&input, &cfg);
        assert!(compiled.index.contains_key("ItemDtoPage"));
        assert_eq!(compiled.exports.sources("ItemDtoPage"), ["Page«ItemDto»"]);
    }
}
