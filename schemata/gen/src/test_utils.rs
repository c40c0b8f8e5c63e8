//! Shared test fixtures for schemata-gen unit tests.

use schemata_define::{ApiDocument, Operation, Parameter, Response, SchemaNode, SchemaRef, Tag};

use crate::compile::GenerationOutput;
use crate::decl::TypeDeclaration;

/// A small pet store.
///
/// - `Pet`: `id` (int64), required `name`, `owner` (`$ref Owner`), `tags`
///   (array of an inline object) and `status` (string enum)
/// - `Owner`: `name`
/// - `/pets`: `Get listPets` (inline 200 body), `Post addPet` (Pet body),
///   `Purge purgePets` (deprecated, custom verb)
/// - `/pets/{petId}`: `Get getPet` (200 Pet, bodiless 404)
///
/// Every operation is tagged `pets`.
pub fn petstore_document() -> ApiDocument {
    let pet = SchemaNode::object()
        .with_description("A pet for sale.")
        .with_property("id", SchemaNode::integer().with_format("int64"))
        .with_property("name", SchemaNode::string())
        .with_property("owner", SchemaRef::reference("Owner"))
        .with_property(
            "tags",
            SchemaNode::array(SchemaNode::object().with_property("label", SchemaNode::string())),
        )
        .with_property("status", SchemaNode::string_enum(["available", "pending", "sold"]))
        .with_required("name");

    let owner = SchemaNode::object()
        .with_property("name", SchemaNode::string())
        .with_required("name");

    let listing = SchemaNode::object()
        .with_property("items", SchemaNode::array(SchemaRef::reference("Pet")))
        .with_property("next", SchemaNode::string())
        .with_required("items");

    let list_pets = Operation::new("listPets")
        .with_tag("pets")
        .with_description("Lists every pet.")
        .with_parameter(Parameter::query("limit").with_schema(SchemaNode::integer().with_format("int32")))
        .with_response("200", Response::with_body(listing));

    let add_pet = Operation::new("addPet")
        .with_tag("pets")
        .with_request_body(SchemaRef::reference("Pet"))
        .with_response("201", Response::with_body(SchemaRef::reference("Pet")));

    let purge_pets = Operation::new("purgePets")
        .with_tag("pets")
        .deprecated()
        .with_response("204", Response::empty());

    let get_pet = Operation::new("getPet")
        .with_tag("pets")
        .with_parameter(
            Parameter::path("petId")
                .with_schema(SchemaNode::integer().with_format("int64"))
                .required(),
        )
        .with_response("200", Response::with_body(SchemaRef::reference("Pet")))
        .with_response("404", Response::empty());

    ApiDocument::new("Petstore")
        .with_schema("Pet", pet)
        .with_schema("Owner", owner)
        .with_operation("/pets", "Get", list_pets)
        .with_operation("/pets", "Post", add_pet)
        .with_operation("/pets", "Purge", purge_pets)
        .with_operation("/pets/{petId}", "Get", get_pet)
        .with_tag(Tag::new("pets"))
}

/// `Shape` is a `oneOf` over the `Circle`, `Square` and `Triangle` objects.
pub fn shapes_document() -> ApiDocument {
    ApiDocument::new("Shapes")
        .with_schema("Circle", SchemaNode::object().with_property("radius", SchemaNode::number()))
        .with_schema("Square", SchemaNode::object().with_property("side", SchemaNode::number()))
        .with_schema(
            "Triangle",
            SchemaNode::object()
                .with_property("base", SchemaNode::number())
                .with_property("height", SchemaNode::number()),
        )
        .with_schema(
            "Shape",
            SchemaNode::one_of([
                SchemaRef::reference("Circle"),
                SchemaRef::reference("Square"),
                SchemaRef::reference("Triangle"),
            ]),
        )
}

/// The emitted declaration called `name`.
///
/// ## Panics
///
/// When no declaration has that name.
pub fn declaration<'o>(output: &'o GenerationOutput, name: &str) -> &'o TypeDeclaration {
    output
        .declarations
        .iter()
        .map(|emitted| &emitted.declaration)
        .find(|declaration| declaration.name == name)
        .unwrap_or_else(|| panic!("no declaration named {name}; failures: {:?}", output.failures))
}
