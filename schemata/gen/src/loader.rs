//! Reading API description documents from disk.
//!
//! `.yaml` and `.yml` files are parsed with `serde_yaml`; everything else is
//! treated as JSON. Verb keys are normalised to PascalCase (`get` becomes
//! `Get`) so they line up with the protocol's verb table.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use schemata_define::ApiDocument;
use tracing::debug;

use crate::errors::GeneratorError;
use crate::names::case::capitalize_first;

/// Input syntax of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Reads and parses the document at `path`.
///
/// ## Errors
///
/// - `ReadError` if the file cannot be read
/// - `ParseError` if the content is not a valid document
pub fn load_document(path: &Path) -> Result<ApiDocument, GeneratorError> {
    let content = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let document = parse_document(&content, DocumentFormat::from_path(path))?;
    debug!(
        path = %path.display(),
        schemas = document.components.schemas.len(),
        paths = document.paths.len(),
        "loaded document"
    );
    Ok(document)
}

/// Parses a document from text.
///
/// ## Examples
///
/// ```
/// use schemata_gen::loader::{DocumentFormat, parse_document};
///
/// let doc = parse_document(
///     r#"{"title": "Petstore", "paths": {"/pets": {"get": {"operationId": "listPets"}}}}"#,
///     DocumentFormat::Json,
/// )
/// .unwrap();
/// assert!(doc.paths["/pets"].operations.contains_key("Get"));
/// ```
///
/// ## Errors
///
/// Returns `ParseError` if the content is not a valid document.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<ApiDocument, GeneratorError> {
    let mut document: ApiDocument = match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| GeneratorError::ParseError(e.to_string()))?,
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| GeneratorError::ParseError(e.to_string()))?,
    };
    normalize_verbs(&mut document);
    Ok(document)
}

fn normalize_verbs(document: &mut ApiDocument) {
    for item in document.paths.values_mut() {
        let operations = std::mem::take(&mut item.operations);
        item.operations = operations
            .into_iter()
            .map(|(verb, operation)| (capitalize_first(&verb.to_lowercase()), operation))
            .collect::<IndexMap<_, _>>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemata_define::ParameterLocation;
    use tempfile::TempDir;

    const PETSTORE_YAML: &str = r##"
title: Petstore
paths:
  /pets/{petId}:
    GET:
      operationId: getPet
      tags: [pets]
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: integer
      responses:
        "200":
          schema:
            $ref: "#/components/schemas/Pet"
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
      required: [name]
tags:
  - name: pets
"##;

    #[test]
    fn yaml_documents_load_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("petstore.yaml");
        fs::write(&path, PETSTORE_YAML).unwrap();

        let doc = load_document(&path).unwrap();

        assert_eq!(doc.title, "Petstore");
        assert!(doc.schema("Pet").is_some());
        let get_pet = &doc.paths["/pets/{petId}"].operations["Get"];
        assert_eq!(get_pet.parameters[0].location, ParameterLocation::Path);
    }

    #[test]
    fn verbs_are_normalised_to_pascal_case() {
        let doc = parse_document(PETSTORE_YAML, DocumentFormat::Yaml).unwrap();
        let verbs: Vec<&str> = doc.paths["/pets/{petId}"].operations.keys().map(String::as_str).collect();
        assert_eq!(verbs, vec!["Get"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        match load_document(&path) {
            Err(GeneratorError::ReadError { path: reported, .. }) => assert!(reported.ends_with("absent.json")),
            other => panic!("Expected ReadError, got: {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_document("{ not json", DocumentFormat::Json),
            Err(GeneratorError::ParseError(_))
        ));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.YML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a")), DocumentFormat::Json);
    }
}
