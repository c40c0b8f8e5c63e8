//! Request types: one field per parameter plus the body.

use std::sync::Arc;

use indexmap::IndexMap;
use schemata_define::{Parameter, ParameterLocation, SchemaType};
use tracing::debug;

use crate::context::{GeneratedElement, GenerationContext};
use crate::decl::{DeclarationBody, Node, RequestParameter, TypeRef};
use crate::errors::GeneratorError;
use crate::locate::{LocatedElement, OperationRef};
use crate::names::NameKind;

use super::build_request::build_request_method;

/// Extracts `{name}` placeholders from a path template.
///
/// ## Examples
///
/// ```
/// use schemata_gen::request::path_placeholders;
///
/// assert_eq!(
///     path_placeholders("/stores/{store_id}/pets/{petId}"),
///     vec!["store_id", "petId"]
/// );
/// assert!(path_placeholders("/pets").is_empty());
/// ```
pub fn path_placeholders(path: &str) -> Vec<&str> {
    let mut placeholders = Vec::new();
    let mut start = None;

    for (idx, c) in path.char_indices() {
        match c {
            '{' => start = Some(idx + 1),
            '}' => {
                if let Some(from) = start.take() {
                    let name = &path[from..idx];
                    if !name.is_empty() {
                        placeholders.push(name);
                    }
                }
            }
            _ => {}
        }
    }

    placeholders
}

/// Path-item parameters overridden by operation parameters with the same
/// name and location, in first-declared order.
fn effective_parameters<'a>(operation: &OperationRef<'a>) -> Vec<&'a Parameter> {
    let mut merged: IndexMap<(&'a str, ParameterLocation), &'a Parameter> = IndexMap::new();
    for parameter in operation
        .item
        .parameters
        .iter()
        .chain(&operation.operation.parameters)
    {
        merged.insert((parameter.name.as_str(), parameter.location), parameter);
    }
    merged.into_values().collect()
}

/// Generates the request declaration for the operation at `element`.
///
/// ## Errors
///
/// - `UnsupportedSchemaShape` naming the operation when its path template
///   has a placeholder without a matching path parameter.
/// - `DanglingReference` when a parameter or body schema has no target.
pub fn generate_request<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
) -> Result<GeneratedElement, GeneratorError> {
    let Some(operation) = element.operation() else {
        return Err(GeneratorError::UnsupportedSchemaShape {
            path: element.path().clone(),
            reason: "element is not an operation".to_string(),
        });
    };

    let mut dependencies = Vec::new();
    let mut parameters = Vec::new();

    for parameter in effective_parameters(&operation) {
        if parameter.location == ParameterLocation::Cookie {
            debug!(path = %element.path(), parameter = %parameter.name, "skipping cookie parameter");
            continue;
        }
        let type_ref = match &parameter.schema {
            Some(schema) => {
                context.type_ref_for(element, &["parameters", parameter.name.as_str()], schema, &mut dependencies)?
            }
            None => TypeRef::primitive(SchemaType::String),
        };
        parameters.push(RequestParameter {
            name: context.names().format(NameKind::Parameter, &parameter.name),
            raw_name: parameter.name.clone(),
            location: parameter.location,
            type_ref,
            required: parameter.required || parameter.location == ParameterLocation::Path,
        });
    }

    for placeholder in path_placeholders(operation.path) {
        let declared = parameters
            .iter()
            .any(|p| p.location == ParameterLocation::Path && p.raw_name == placeholder);
        if !declared {
            return Err(GeneratorError::UnsupportedSchemaShape {
                path: element.path().clone(),
                reason: format!(
                    "path placeholder '{{{placeholder}}}' in {} has no matching path parameter",
                    operation.path
                ),
            });
        }
    }

    let body = operation
        .operation
        .request_body
        .as_ref()
        .map(|schema| context.type_ref_for(element, &["requestBody"], schema, &mut dependencies))
        .transpose()?;

    let method = build_request_method(
        operation.verb,
        context.settings().protocol(),
        context.settings().formatters(),
    );
    let build_request = match context.enrich(Node::Method(method), element)? {
        Node::Method(method) => method,
        Node::Type(_) => {
            return Err(GeneratorError::CodeGenError(format!(
                "enrichment turned the request method at {} into a type",
                element.path()
            )));
        }
    };

    let body = DeclarationBody::Request {
        operation_id: operation.identifier(),
        path: operation.path.to_string(),
        parameters,
        body,
        build_request,
    };
    context.finish(element, body, dependencies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::Compiler;
    use crate::config::GeneratorSettings;
    use crate::decl::{Annotation, RequestStep, Verb};
    use crate::locate::ElementPath;
    use crate::test_utils::{declaration, petstore_document};
    use schemata_define::{ApiDocument, Operation, PathItem, SchemaNode};

    #[test]
    fn placeholders_ignore_unbalanced_braces() {
        assert_eq!(path_placeholders("/a/{}/b/{c"), Vec::<&str>::new());
        assert_eq!(path_placeholders("/a}/{b}"), vec!["b"]);
    }

    #[test]
    fn petstore_requests_have_parameters_and_body() {
        let doc = petstore_document();
        let output = Compiler::new(&doc, GeneratorSettings::new("petstore")).unwrap().compile();

        let get_pet = declaration(&output, "GetPetRequest");
        assert_eq!(get_pet.namespace, "petstore::requests");
        let DeclarationBody::Request { parameters, body, .. } = &get_pet.body else {
            panic!("Expected request, got: {:?}", get_pet.body);
        };
        assert_eq!(parameters[0].name, "pet_id");
        assert_eq!(parameters[0].location, ParameterLocation::Path);
        assert!(parameters[0].required);
        assert_eq!(*body, None);

        let add_pet = declaration(&output, "AddPetRequest");
        let DeclarationBody::Request { body, .. } = &add_pet.body else {
            panic!("Expected request");
        };
        assert_eq!(body, &Some(TypeRef::named("petstore::models", "Pet")));
    }

    #[test]
    fn deprecated_operation_marks_method_obsolete() {
        let doc = petstore_document();
        let output = Compiler::new(&doc, GeneratorSettings::new("petstore")).unwrap().compile();

        let purge = declaration(&output, "PurgePetsRequest");
        let method = purge.build_request().unwrap();
        assert!(method.has_annotation(|a| matches!(
            a,
            Annotation::Obsolete { message } if message.contains("purgePets")
        )));
        assert!(matches!(
            &method.steps[0],
            RequestStep::CreateMessage { verb: Verb::Custom(v), .. } if v == "PURGE"
        ));

        let get_pet = declaration(&output, "GetPetRequest").build_request().unwrap();
        assert!(!get_pet.has_annotation(|a| matches!(a, Annotation::Obsolete { .. })));
        assert!(matches!(
            &get_pet.steps[0],
            RequestStep::CreateMessage { verb: Verb::Constant(v), .. } if v == "GET"
        ));
    }

    #[test]
    fn undeclared_placeholder_names_the_operation() {
        let doc = ApiDocument::new("Bad").with_operation("/pets/{petId}", "Get", Operation::new("getPet"));
        let output = Compiler::new(&doc, GeneratorSettings::new("bad")).unwrap().compile();

        let expected = ElementPath::operation("/pets/{petId}", "Get");
        let failure = output.failures.iter().find(|f| f.path == expected).unwrap();
        assert!(matches!(
            &*failure.error,
            GeneratorError::UnsupportedSchemaShape { path, reason }
                if *path == expected && reason.contains("petId")
        ));
    }

    #[test]
    fn operation_parameters_override_path_item_parameters() {
        let mut item = PathItem::default()
            .with_operation("Get", Operation::new("listPets").with_parameter(
                Parameter::query("limit").with_schema(SchemaNode::integer()).required(),
            ));
        item.parameters.push(Parameter::query("limit"));
        item.parameters.push(Parameter::header("X-Trace"));
        let mut doc = ApiDocument::new("Merge");
        doc.paths.insert("/pets".into(), item);

        let output = Compiler::new(&doc, GeneratorSettings::new("merge")).unwrap().compile();
        let DeclarationBody::Request { parameters, .. } = &declaration(&output, "ListPetsRequest").body else {
            panic!("Expected request");
        };

        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0].raw_name, "limit");
        assert!(parameters[0].required);
        assert_eq!(parameters[0].type_ref, TypeRef::primitive(SchemaType::Integer));
        assert_eq!(parameters[1].raw_name, "X-Trace");
        assert_eq!(parameters[1].name, "x_trace");
    }
}
