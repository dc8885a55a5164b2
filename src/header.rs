//! Document banner assembly.
//!
//! A compact header every emitted artifact can carry: API title,
//! description, version and resolved base URL. The omit flag suppresses
//! the churn-prone pieces (version, generation timestamp) so regenerated
//! output diffs stay quiet.

use serde::Serialize;

use crate::config::GenConfig;
use crate::schema::SwaggerDoc;

#[derive(Clone, Debug, Serialize)]
pub struct DocumentHeader {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub base_url: String,
    pub generated_at: Option<String>,
}

pub fn process_header(doc: &SwaggerDoc, cfg: &GenConfig) -> DocumentHeader {
    DocumentHeader {
        title: doc.info.title.clone(),
        description: doc.info.description.clone(),
        version: if cfg.omit_version {
            None
        } else {
            doc.info.version.clone()
        },
        base_url: format!(
            "{}{}",
            doc.host.as_deref().unwrap_or_default(),
            doc.base_path.as_deref().unwrap_or_default().trim_end_matches('/')
        ),
        generated_at: if cfg.omit_version {
            None
        } else {
            Some(chrono::Utc::now().to_rfc3339())
        },
    }
}

/// URL prefix operations resolve against: the document's `basePath` with
/// trailing slashes stripped, or scheme + host when no base path is given.
pub fn base_path(doc: &SwaggerDoc) -> String {
    match &doc.base_path {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => {
            let scheme = doc.schemes.first().map_or("http", String::as_str);
            let host = doc.host.as_deref().unwrap_or("localhost");
            format!("{scheme}://{host}")
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(value: serde_json::Value) -> SwaggerDoc {
        serde_json::from_value(value).expect("document fixture")
    }

    #[test]
    fn version_omission_also_drops_the_timestamp() {
        let doc = doc(serde_json::json!({
            "info": {"title": "Items API", "version": "1.2.3"},
            "host": "api.example.com",
            "basePath": "/v1/"
        }));
        let mut cfg = GenConfig::default();
        cfg.omit_version = true;
        let header = process_header(&doc, &cfg);
        assert_eq!(header.title.as_deref(), Some("Items API"));
        assert_eq!(header.version, None);
        assert_eq!(header.generated_at, None);
        assert_eq!(header.base_url, "api.example.com/v1");
    }

    #[test]
    fn base_path_falls_back_to_scheme_and_host() {
        let with_base = doc(serde_json::json!({"basePath": "/api//"}));
        assert_eq!(base_path(&with_base), "/api");

        let without = doc(serde_json::json!({
            "schemes": ["https"],
            "host": "api.example.com"
        }));
        assert_eq!(base_path(&without), "https://api.example.com");

        let bare = doc(serde_json::json!({}));
        assert_eq!(base_path(&bare), "http://localhost");
    }
}
