//! Generator configuration.
//!
//! The native-type table and the per-verb parameter-location table are data,
//! not code: they arrive from the outside and the compiler only looks them
//! up. Defaults below mirror the conventional Swagger primitive set.

use indexmap::IndexMap;

/// Raw schema primitive token → target scalar type name.
const NATIVE_TYPES: &[(&str, &str)] = &[
    ("binary", "number"),
    ("boolean", "boolean"),
    ("byte", "number"),
    ("date", "string"),
    ("dateTime", "string"),
    ("double", "number"),
    ("file", "File"),
    ("float", "number"),
    ("integer", "number"),
    ("long", "number"),
    ("number", "number"),
    ("object", "object"),
    ("password", "string"),
    ("string", "string"),
];

/// Parameter locations each HTTP verb accepts.
const ALLOWED_PARAMS: &[(&str, &[&str])] = &[
    ("get", &["header", "path", "query"]),
    ("delete", &["header", "path", "query"]),
    ("head", &["header", "path", "query"]),
    ("options", &["header", "path", "query"]),
    ("patch", &["body", "formData", "header", "path", "query"]),
    ("post", &["body", "formData", "header", "path", "query"]),
    ("put", &["body", "formData", "header", "path", "query"]),
];

#[derive(Clone, Debug)]
pub struct GenConfig {
    pub native_types: IndexMap<String, String>,
    pub allowed_params: IndexMap<String, Vec<String>>,
    /// Controller groups skipped entirely.
    pub group_ignores: Vec<String>,
    /// Namespace compiled definition references are qualified under.
    pub model_module: String,
    /// Build a form-control model per operation with parameters.
    pub generate_store: bool,
    /// Mark single-parameter methods for an additional unwrapped overload.
    pub unwrap_single_param_methods: bool,
    /// Suppress version and timestamp info in the document header.
    pub omit_version: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            native_types: NATIVE_TYPES
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            allowed_params: ALLOWED_PARAMS
                .iter()
                .map(|(k, vs)| ((*k).to_string(), vs.iter().map(|s| (*s).to_string()).collect()))
                .collect(),
            group_ignores: Vec::new(),
            model_module: "model".to_string(),
            generate_store: true,
            unwrap_single_param_methods: false,
            omit_version: false,
        }
    }
}
