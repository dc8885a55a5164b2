//! Type-name normalization.
//!
//! Raw schema names may carry nested generic notation, e.g.
//! `PagedResources«Page«ItemCategoryDto»»`. Normalization unwraps the
//! generics inside-out so the innermost argument becomes the prefix and
//! each wrapper a suffix (`Page«Item»` → `ItemPage`), then cleans the
//! result into a single capitalized identifier. Any input string is
//! normalizable; running out of generic matches is the loop's terminal
//! condition, not an error.

use once_cell::sync::Lazy;
use regex::Regex;

static GENERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new("([^«]+)«(.+)»").expect("generic pattern")
});

pub fn normalize_def(raw: &str) -> String {
    let mut acc = String::new();
    let mut rest = raw.to_string();
    while let Some(caps) = GENERIC.captures(&rest) {
        let outer = caps.get(1).map_or("", |m| m.as_str()).to_string();
        let inner = caps.get(2).map_or("", |m| m.as_str()).to_string();
        acc = format!("{outer}{acc}");
        rest = inner;
    }
    let mut res = format!("{rest}{acc}");
    res = res.trim().to_string();
    res = res.replace('.', " ");
    if res.contains(' ') {
        res = camel_case(&res);
    }
    upper_first(&res)
}

/// Word-split camel casing: `"update mothers-name"` → `"updateMothersName"`.
/// Splits on non-alphanumerics, lower→upper transitions, digit boundaries,
/// and acronym tails (`"HTTPResponse"` → `http`, `response`).
pub fn camel_case(s: &str) -> String {
    let mut out = String::new();
    for (i, word) in split_words(s).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            out.push_str(&upper_first(&lower));
        }
    }
    out
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut cur = String::new();
    for i in 0..chars.len() {
        let c = chars[i];
        if !c.is_alphanumeric() {
            if !cur.is_empty() {
                words.push(std::mem::take(&mut cur));
            }
            continue;
        }
        if let Some(prev) = cur.chars().last() {
            let acronym_tail = prev.is_uppercase()
                && c.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || prev.is_ascii_digit() != c.is_ascii_digit()
                || acronym_tail;
            if boundary {
                words.push(std::mem::take(&mut cur));
            }
        }
        cur.push(c);
    }
    if !cur.is_empty() {
        words.push(cur);
    }
    words
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generics_unwrap_inside_out() {
        assert_eq!(normalize_def("Page«Item»"), "ItemPage");
        assert_eq!(normalize_def("Page«Item«Foo»»"), "FooItemPage");
        assert_eq!(
            normalize_def("PagedResources«Page«ItemCategoryDto»»"),
            "ItemCategoryDtoPagePagedResources"
        );
    }

    #[test]
    fn dots_and_spaces_collapse_to_camel() {
        assert_eq!(normalize_def("com.acme.ItemDto"), "ComAcmeItemDto");
        assert_eq!(normalize_def("  fooBar  "), "FooBar");
        assert_eq!(normalize_def("foo bar"), "FooBar");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in [
            "Page«Item«Foo»»",
            "com.acme.ItemDto",
            "fooBar",
            "FooBar",
            "already Normal name",
            "",
        ] {
            let once = normalize_def(raw);
            assert_eq!(normalize_def(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn camel_case_splits_words() {
        assert_eq!(camel_case("update mothers-name"), "updateMothersName");
        assert_eq!(camel_case("get-User-Using-G-E-T"), "getUserUsingGET");
        assert_eq!(camel_case("HTTPResponse"), "httpResponse");
        assert_eq!(camel_case("v2items"), "v2Items");
    }
}
