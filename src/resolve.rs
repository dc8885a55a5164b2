//! Native vs. locally-defined type resolution.
//!
//! Pure and side-effect-free: the same token always resolves to the same
//! `TypeReference`, so callers may resolve eagerly and repeatedly.

use crate::config::GenConfig;
use crate::ir::TypeReference;
use crate::naming::normalize_def;

const DEF_PREFIX: &str = "#/definitions/";

/// Translate a raw type token or `$ref` string into a resolved reference.
///
/// Priority: configured native table → local definition pointer →
/// pass-through of the token as an opaque native identifier (unrecognized
/// types degrade, they do not fail).
pub fn translate_type(token: &str, cfg: &GenConfig) -> TypeReference {
    if let Some(native) = cfg.native_types.get(token) {
        return native_ref(native);
    }
    if let Some(subtype) = token.strip_prefix(DEF_PREFIX) {
        return resolve_def_type(subtype, cfg);
    }
    native_ref(token)
}

/// Missing tokens (schema nodes with neither `type` nor `$ref`, empty
/// `items`, boolean `additionalProperties`) resolve as plain objects.
pub fn translate_opt(token: Option<&str>, cfg: &GenConfig) -> TypeReference {
    translate_type(token.unwrap_or("object"), cfg)
}

/// Qualify a definition name against the compiled-definitions namespace.
/// Generic-notation names normalize first, so `Page«Item»` and `ItemPage`
/// resolve to the same reference.
fn resolve_def_type(name: &str, cfg: &GenConfig) -> TypeReference {
    // a ref can still point at a native token; keep the lookup symmetrical
    if let Some(native) = cfg.native_types.get(name) {
        return native_ref(native);
    }
    let qualified = format!("{}.{}", cfg.model_module, normalize_def(name));
    TypeReference {
        is_array_simple: is_bare_ident(&qualified),
        name: qualified,
        is_native: false,
    }
}

fn native_ref(name: &str) -> TypeReference {
    TypeReference {
        name: name.to_string(),
        is_native: true,
        is_array_simple: is_bare_ident(name),
    }
}

fn is_bare_ident(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_tokens_map_through_the_table() {
        let cfg = GenConfig::default();
        let r = translate_type("integer", &cfg);
        assert_eq!(r.name, "number");
        assert!(r.is_native);
        assert!(r.is_array_simple);
    }

    #[test]
    fn definition_refs_normalize_and_qualify() {
        let cfg = GenConfig::default();
        let r = translate_type("#/definitions/Page«Item»", &cfg);
        assert_eq!(r.name, "model.ItemPage");
        assert!(!r.is_native);
        // qualified names are not bare identifiers
        assert!(!r.is_array_simple);
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let cfg = GenConfig::default();
        let r = translate_type("SomethingOpaque", &cfg);
        assert_eq!(r.name, "SomethingOpaque");
        assert!(r.is_native);
    }

    #[test]
    fn resolution_is_idempotent() {
        let cfg = GenConfig::default();
        for token in ["string", "#/definitions/Foo", "Opaque"] {
            assert_eq!(translate_type(token, &cfg), translate_type(token, &cfg));
        }
    }
}
