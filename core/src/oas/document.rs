#![deny(missing_docs)]

//! # Document Parsing
//!
//! Outer parsing of OpenAPI spec text (YAML or JSON) and the full
//! parse → resolve → normalize pipeline.

use crate::error::{AppError, AppResult};
use crate::oas::catalog::{build_catalog, Catalog};
use crate::oas::resolver::resolve_refs;
use serde_json::Value;

/// Decodes spec text into an untyped tree.
///
/// Accepts both YAML and JSON (JSON is a YAML subset). A decode failure is a
/// [`AppError::SpecLoad`]; a decoded document that is not a mapping is an
/// [`AppError::InvalidDocument`].
pub fn parse_spec_text(text: &str) -> AppResult<Value> {
    let value: Value = serde_yaml::from_str(text)
        .map_err(|e| AppError::SpecLoad(format!("Failed to parse OpenAPI spec: {}", e)))?;
    if !value.is_object() {
        return Err(AppError::InvalidDocument(
            "OpenAPI document must be a mapping".into(),
        ));
    }
    Ok(value)
}

/// Full pipeline: raw spec text → tree → reference resolution → catalog.
pub fn parse_catalog(text: &str) -> AppResult<Catalog> {
    let raw = parse_spec_text(text)?;
    let resolved = resolve_refs(&raw, &raw);
    build_catalog(&resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec_text_accepts_yaml_and_json() {
        let yaml = "openapi: 3.0.0\npaths: {}\n";
        assert!(parse_spec_text(yaml).unwrap().is_object());

        let json = r#"{ "openapi": "3.0.0", "paths": {} }"#;
        assert!(parse_spec_text(json).unwrap().is_object());
    }

    #[test]
    fn test_parse_spec_text_rejects_garbage() {
        let err = parse_spec_text(": not : valid : yaml : [").unwrap_err();
        assert!(matches!(err, AppError::SpecLoad(_)));
    }

    #[test]
    fn test_parse_spec_text_rejects_non_mapping() {
        let err = parse_spec_text("- just\n- a\n- list\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidDocument(_)));
    }

    #[test]
    fn test_parse_catalog_resolves_refs_end_to_end() {
        let yaml = r##"
openapi: 3.0.0
info:
  title: Minimal
  version: "1.0"
paths:
  /widgets:
    get:
      operationId: ListWidgets
      tags: [Widgets]
      responses:
        "200":
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Widget"
components:
  schemas:
    Widget:
      type: object
      properties:
        name:
          type: string
"##;
        let catalog = parse_catalog(yaml).unwrap();
        assert_eq!(catalog.endpoints.len(), 1);
        let endpoint = &catalog.endpoints[0];
        assert_eq!(
            endpoint.responses["200"]["properties"]["name"]["type"],
            "string"
        );
    }

    #[test]
    fn test_parse_catalog_empty_paths_is_valid() {
        let catalog = parse_catalog("openapi: 3.0.0\npaths: {}\n").unwrap();
        assert!(catalog.endpoints.is_empty());
    }
}
