//! The API description document.
//!
//! [`ApiDocument`] is the root of the description graph: paths with their
//! operations, the named schema table and the tag list. It arrives already
//! reference-syntax-checked but with compositions unresolved.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::operation::{Operation, Parameter};
use crate::schema::SchemaRef;

/// The operations available on one path.
///
/// Operations are keyed by verb (`Get`, `Post`, ..., or an extension verb
/// such as `Purge`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters shared by every operation on this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Operations keyed by verb.
    #[serde(flatten)]
    pub operations: IndexMap<String, Operation>,
}

impl PathItem {
    /// Adds an operation under `verb`.
    pub fn with_operation(mut self, verb: impl Into<String>, operation: Operation) -> Self {
        self.operations.insert(verb.into(), operation);
        self
    }
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// The named schema table.
    ///
    /// An entry may itself be a pure `$ref`, which makes it an alias of the
    /// referenced schema.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, SchemaRef>,
}

/// A tag grouping operations into an API surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tag {
    /// A tag with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// A complete API description.
///
/// ## Examples
///
/// ```
/// use schemata_define::{ApiDocument, Operation, SchemaNode, SchemaRef};
///
/// let doc = ApiDocument::new("Petstore")
///     .with_schema("Pet", SchemaNode::object().with_property("name", SchemaNode::string()))
///     .with_operation("/pets/{petId}", "Get", Operation::new("getPet"));
///
/// assert!(doc.schema("Pet").and_then(SchemaRef::as_inline).is_some());
/// assert_eq!(doc.operations().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    /// Document title.
    #[serde(default)]
    pub title: String,
    /// Document version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Paths in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(default)]
    pub components: Components,
    /// Declared tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl ApiDocument {
    /// An empty document with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Adds a named schema.
    pub fn with_schema(mut self, name: impl Into<String>, schema: impl Into<SchemaRef>) -> Self {
        self.components.schemas.insert(name.into(), schema.into());
        self
    }

    /// Adds an operation under `path` and `verb`.
    pub fn with_operation(
        mut self,
        path: impl Into<String>,
        verb: impl Into<String>,
        operation: Operation,
    ) -> Self {
        self.paths
            .entry(path.into())
            .or_default()
            .operations
            .insert(verb.into(), operation);
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Looks up a named schema.
    pub fn schema(&self, name: &str) -> Option<&SchemaRef> {
        self.components.schemas.get(name)
    }

    /// Iterates `(path, verb, operation)` in declaration order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &str, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations
                .iter()
                .map(move |(verb, op)| (path.as_str(), verb.as_str(), op))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::ParameterLocation;

    const PETSTORE: &str = r##"{
        "title": "Petstore",
        "paths": {
            "/pets/{petId}": {
                "parameters": [{ "name": "petId", "in": "path", "required": true }],
                "Get": {
                    "operationId": "getPet",
                    "responses": {
                        "200": { "schema": { "$ref": "#/components/schemas/Pet" } },
                        "404": { "description": "Not found" }
                    }
                },
                "Purge": { "operationId": "purgePet", "deprecated": true }
            }
        },
        "components": {
            "schemas": {
                "Pet": { "type": "object", "properties": { "name": { "type": "string" } } }
            }
        },
        "tags": [{ "name": "pets" }]
    }"##;

    #[test]
    fn deserializes_paths_operations_and_components() {
        let doc: ApiDocument = serde_json::from_str(PETSTORE).unwrap();

        let item = &doc.paths["/pets/{petId}"];
        assert_eq!(item.parameters[0].location, ParameterLocation::Path);
        let verbs: Vec<_> = item.operations.keys().cloned().collect();
        assert_eq!(verbs, vec!["Get", "Purge"]);
        assert!(item.operations["Purge"].deprecated);

        let get = &item.operations["Get"];
        assert_eq!(get.responses.len(), 2);
        assert!(get.responses["404"].schema.is_none());

        assert!(doc.schema("Pet").and_then(SchemaRef::as_inline).is_some());
        assert_eq!(doc.tags[0].name, "pets");
    }

    #[test]
    fn component_may_alias_another_component() {
        let json = r##"{
            "components": {
                "schemas": {
                    "Pet": { "type": "object" },
                    "Animal": { "$ref": "#/components/schemas/Pet" }
                }
            }
        }"##;

        let doc: ApiDocument = serde_json::from_str(json).unwrap();
        let alias = doc.schema("Animal").and_then(SchemaRef::as_reference);
        assert_eq!(alias.map(|r| r.name()), Some("Pet"));
    }

    #[test]
    fn operations_iterate_in_declaration_order() {
        let doc = ApiDocument::new("T")
            .with_operation("/b", "Get", Operation::new("second"))
            .with_operation("/a", "Post", Operation::new("third"))
            .with_operation("/b", "Delete", Operation::new("first-path-again"));

        let seen: Vec<_> = doc.operations().map(|(path, verb, _)| (path, verb)).collect();
        assert_eq!(seen, vec![("/b", "Get"), ("/b", "Delete"), ("/a", "Post")]);
    }
}
