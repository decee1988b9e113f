#![deny(missing_docs)]

//! # OpenAPI Document Loading
//!
//! Entry points of the Schema Reader. Accepts YAML or JSON (JSON is valid YAML)
//! and validates that the document declares an OpenAPI 3.x version before any
//! extraction runs.

use crate::error::{AppError, AppResult};
use crate::oas::shims::ShimOpenApi;
use std::fs;
use std::path::Path;

/// Parses a raw OpenAPI document (YAML or JSON) into the shim representation.
///
/// # Errors
///
/// * `AppError::Document` when the content is not parseable or the `openapi`
///   version field is missing or not `3.x`.
pub fn load_document(content: &str) -> AppResult<ShimOpenApi> {
    let document: ShimOpenApi = serde_yaml::from_str(content)
        .map_err(|e| AppError::Document(format!("Failed to parse OpenAPI document: {}", e)))?;

    match document.openapi.as_deref() {
        Some(version) if version.starts_with("3.") => {
            tracing::debug!(version, "loaded OpenAPI document");
            Ok(document)
        }
        Some(version) => Err(AppError::Document(format!(
            "Unsupported OpenAPI version: {}. Only 3.x is supported.",
            version
        ))),
        None => Err(AppError::Document(
            "Invalid OpenAPI document: missing 'openapi' version field.".into(),
        )),
    }
}

/// Reads and parses an OpenAPI document from disk.
pub fn load_document_from_path(path: &Path) -> AppResult<ShimOpenApi> {
    tracing::debug!(path = %path.display(), "reading OpenAPI document");
    let content = fs::read_to_string(path)?;
    load_document(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_document() {
        let yaml = r#"
openapi: 3.0.3
info: {title: Counter API, version: "1.0"}
paths: {}
"#;
        let doc = load_document(yaml).unwrap();
        assert_eq!(doc.title(), Some("Counter API"));
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn test_load_json_document() {
        let json = r#"{"openapi": "3.1.0", "info": {"title": "T", "version": "1"}, "paths": {}}"#;
        let doc = load_document(json).unwrap();
        assert_eq!(doc.openapi.as_deref(), Some("3.1.0"));
    }

    #[test]
    fn test_missing_version_fails() {
        let yaml = r#"
info: {title: Missing Version, version: "1.0"}
paths: {}
"#;
        match load_document(yaml).unwrap_err() {
            AppError::Document(msg) => assert!(msg.contains("missing 'openapi'")),
            other => panic!("Wrong error type: {}", other),
        }
    }

    #[test]
    fn test_swagger_version_rejected() {
        let yaml = r#"
openapi: "2.0"
info: {title: Legacy, version: "1.0"}
paths: {}
"#;
        let err = load_document(yaml).unwrap_err();
        assert!(err.to_string().contains("Unsupported OpenAPI version: 2.0"));
    }

    #[test]
    fn test_malformed_document_fails() {
        let err = load_document("openapi: [unclosed").unwrap_err();
        assert!(matches!(err, AppError::Document(_)));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "openapi: 3.0.0\ninfo: {{title: File API, version: '1'}}\npaths: {{}}")
            .unwrap();
        let doc = load_document_from_path(file.path()).unwrap();
        assert_eq!(doc.title(), Some("File API"));
    }

    #[test]
    fn test_load_from_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document_from_path(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
