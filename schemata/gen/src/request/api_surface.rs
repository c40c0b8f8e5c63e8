//! API surfaces: the operations grouped under one tag.

use std::sync::Arc;

use crate::context::{GeneratedElement, GenerationContext};
use crate::decl::{ApiOperation, DeclarationBody};
use crate::errors::GeneratorError;
use crate::locate::{ElementPath, ElementRef, LocatedElement, OperationRef};

/// Every operation in document order, with its request and response roots.
pub fn operation_elements<'a>(
    context: &GenerationContext<'a>,
) -> Vec<(Arc<LocatedElement<'a>>, Arc<LocatedElement<'a>>)> {
    context
        .document()
        .paths
        .iter()
        .flat_map(|(path, item)| {
            item.operations.iter().map(move |(verb, operation)| {
                let op = OperationRef {
                    path: path.as_str(),
                    verb: verb.as_str(),
                    item,
                    operation,
                };
                let request_path = ElementPath::operation(path, verb);
                let response_path = request_path.child("responses");
                (
                    LocatedElement::root(ElementRef::Operation(op), request_path),
                    LocatedElement::root(ElementRef::Response(op, &operation.responses), response_path),
                )
            })
        })
        .collect()
}

pub fn generate_api_surface<'a>(
    context: &GenerationContext<'a>,
    element: &Arc<LocatedElement<'a>>,
) -> Result<GeneratedElement, GeneratorError> {
    let ElementRef::Tag(tag) = element.element() else {
        return Err(GeneratorError::UnsupportedSchemaShape {
            path: element.path().clone(),
            reason: "element is not a tag".to_string(),
        });
    };

    let mut dependencies = Vec::new();
    let mut operations = Vec::new();

    for (request, response) in operation_elements(context) {
        let Some(op) = request.operation() else {
            continue;
        };
        if !op.operation.tags.iter().any(|t| *t == tag.name) {
            continue;
        }

        operations.push(ApiOperation {
            name: context.names().operation_method_name(&op),
            request: context.named(&request),
            response: context.named(&response),
            deprecated: op.operation.deprecated,
        });
        dependencies.push(request.path().clone());
        dependencies.push(response.path().clone());
    }

    context.finish(element, DeclarationBody::ApiSurface { operations }, dependencies)
}

#[cfg(test)]
mod tests {
    use crate::compile::Compiler;
    use crate::config::GeneratorSettings;
    use crate::decl::{DeclarationBody, TypeRef};
    use crate::test_utils::{declaration, petstore_document};

    #[test]
    fn pets_api_lists_tagged_operations_in_document_order() {
        let doc = petstore_document();
        let output = Compiler::new(&doc, GeneratorSettings::new("petstore")).unwrap().compile();

        let api = declaration(&output, "PetsApi");
        assert_eq!(api.namespace, "petstore::api");
        let DeclarationBody::ApiSurface { operations } = &api.body else {
            panic!("Expected API surface, got: {:?}", api.body);
        };
        let names: Vec<&str> = operations.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["ListPets", "AddPet", "PurgePets", "GetPet"]);
        assert_eq!(operations[3].request, TypeRef::named("petstore::requests", "GetPetRequest"));
        assert_eq!(operations[3].response, TypeRef::named("petstore::responses", "GetPetResponse"));
        assert!(operations[2].deprecated);
    }

    #[test]
    fn api_surface_is_emitted_after_its_operations() {
        let doc = petstore_document();
        let output = Compiler::new(&doc, GeneratorSettings::new("petstore")).unwrap().compile();

        let last = output.declarations.last().unwrap();
        assert_eq!(last.declaration.name, "PetsApi");
        assert_eq!(last.file_group, "api");
    }
}
