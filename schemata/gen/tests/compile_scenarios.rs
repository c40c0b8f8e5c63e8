//! Whole-document compilation scenarios.

use std::sync::Arc;

use schemata_define::{ApiDocument, EnumValue, Operation, Parameter, Response, SchemaNode, SchemaRef, SchemaType};
use schemata_gen::compile::Compiler;
use schemata_gen::config::GeneratorSettings;
use schemata_gen::decl::{Annotation, DeclarationBody, Node, NodeKind, TypeDeclaration, TypeRef};
use schemata_gen::enrich::{EnrichmentContext, Enricher};
use schemata_gen::errors::GeneratorError;
use schemata_gen::locate::{ElementPath, SourceKind};
use schemata_gen::names::NamespaceProvider;
use schemata_gen::test_utils::{declaration, petstore_document, shapes_document};

fn names(output: &schemata_gen::GenerationOutput) -> Vec<&str> {
    output
        .declarations
        .iter()
        .map(|d| d.declaration.name.as_str())
        .collect()
}

#[test]
fn string_enum_gets_members_and_string_conversion() {
    let doc = ApiDocument::new("Paint").with_schema("Color", SchemaNode::string_enum(["Red", "Green", "Blue"]));
    let output = Compiler::new(&doc, GeneratorSettings::new("paint")).unwrap().compile();

    let color = declaration(&output, "Color");
    let DeclarationBody::Enum { underlying, members } = &color.body else {
        panic!("Expected enum, got: {:?}", color.body);
    };
    assert_eq!(*underlying, SchemaType::String);
    let member_names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(member_names, vec!["Red", "Green", "Blue"]);
    assert_eq!(members[0].value, EnumValue::String("Red".into()));
    assert!(color.has_annotation(|a| *a == Annotation::StringConversion));
}

#[test]
fn without_enrichers_declarations_carry_no_annotations() {
    let doc = ApiDocument::new("Paint").with_schema("Color", SchemaNode::string_enum(["Red"]));
    let settings = GeneratorSettings::new("paint").without_enrichers();
    let output = Compiler::new(&doc, settings).unwrap().compile();

    assert!(declaration(&output, "Color").annotations.is_empty());
}

#[test]
fn all_of_with_reference_becomes_subclass() {
    let doc = ApiDocument::new("Zoo")
        .with_schema("Animal", SchemaNode::object().with_property("name", SchemaNode::string()))
        .with_schema(
            "Dog",
            SchemaNode::all_of([
                SchemaRef::reference("Animal"),
                SchemaNode::object()
                    .with_property("barks", SchemaNode::boolean())
                    .with_required("barks")
                    .into(),
            ]),
        );
    let output = Compiler::new(&doc, GeneratorSettings::new("zoo")).unwrap().compile();

    assert!(output.is_success(), "{:?}", output.failures);
    let dog = declaration(&output, "Dog");
    assert_eq!(dog.base(), Some(&TypeRef::named("zoo::models", "Animal")));
    assert_eq!(dog.properties().len(), 1);
    assert_eq!(dog.properties()[0].raw_name, "barks");
    assert!(dog.properties()[0].required);

    let order = names(&output);
    let animal = order.iter().position(|n| *n == "Animal").unwrap();
    let dog = order.iter().position(|n| *n == "Dog").unwrap();
    assert!(animal < dog, "base must precede derived: {order:?}");
}

#[test]
fn one_of_references_become_closed_union() {
    let doc = shapes_document();
    let output = Compiler::new(&doc, GeneratorSettings::new("shapes")).unwrap().compile();

    let shape = declaration(&output, "Shape");
    let DeclarationBody::Union { exclusive, variants } = &shape.body else {
        panic!("Expected union, got: {:?}", shape.body);
    };
    assert!(*exclusive);
    let branches: Vec<&str> = variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(branches, vec!["Circle", "Square", "Triangle"]);
    assert_eq!(names(&output).last(), Some(&"Shape"));
}

#[test]
fn cyclic_references_compile_once_each() {
    let doc = ApiDocument::new("Tree")
        .with_schema(
            "Node",
            SchemaNode::object()
                .with_property("parent", SchemaRef::reference("Node"))
                .with_property("children", SchemaNode::array(SchemaRef::reference("Node")))
                .with_property("owner", SchemaRef::reference("Forest")),
        )
        .with_schema(
            "Forest",
            SchemaNode::object().with_property("root", SchemaRef::reference("Node")),
        );
    let output = Compiler::new(&doc, GeneratorSettings::new("tree")).unwrap().compile();

    assert!(output.is_success(), "{:?}", output.failures);
    assert_eq!(names(&output), vec!["Node", "Forest"]);
}

#[test]
fn deprecated_schema_is_obsolete() {
    let doc = ApiDocument::new("Legacy").with_schema(
        "OldPet",
        SchemaNode::object()
            .with_property("name", SchemaNode::string())
            .deprecated(),
    );
    let output = Compiler::new(&doc, GeneratorSettings::new("legacy")).unwrap().compile();

    let old = declaration(&output, "OldPet");
    assert!(old.has_annotation(|a| matches!(
        a,
        Annotation::Obsolete { message } if message == "Schema OldPet has been marked deprecated."
    )));
}

#[test]
fn request_suffix_is_configurable() {
    let doc = petstore_document();
    let settings = GeneratorSettings::new("petstore").with_request_suffix("Params");
    let output = Compiler::new(&doc, settings).unwrap().compile();

    assert!(output.is_success(), "{:?}", output.failures);
    let params = declaration(&output, "GetPetParams");
    assert_eq!(params.namespace, "petstore::requests");
    assert!(!names(&output).contains(&"GetPetRequest"));
}

#[test]
fn petstore_compiles_deterministically() {
    let doc = petstore_document();
    let runs: Vec<_> = (0..3)
        .map(|_| Compiler::new(&doc, GeneratorSettings::new("petstore")).unwrap().compile())
        .collect();

    assert!(runs.iter().all(|run| run.is_success()));
    assert_eq!(runs[0].declarations, runs[1].declarations);
    assert_eq!(runs[1].declarations, runs[2].declarations);
}

#[test]
fn every_identity_is_emitted_once() {
    let doc = petstore_document();
    let output = Compiler::new(&doc, GeneratorSettings::new("petstore")).unwrap().compile();

    let mut identities: Vec<&ElementPath> = output.declarations.iter().map(|d| &d.identity).collect();
    let total = identities.len();
    identities.sort_by_key(|p| p.to_string());
    identities.dedup();
    assert_eq!(identities.len(), total);
}

#[test]
fn dangling_reference_does_not_hide_other_operations() {
    let doc = ApiDocument::new("Broken")
        .with_operation(
            "/a",
            "Get",
            Operation::new("getA").with_response("200", Response::with_body(SchemaRef::reference("Missing"))),
        )
        .with_operation(
            "/b",
            "Get",
            Operation::new("getB").with_parameter(Parameter::query("q").with_schema(SchemaNode::string())),
        );
    let output = Compiler::new(&doc, GeneratorSettings::new("broken")).unwrap().compile();

    assert!(!output.failures.is_empty());
    assert!(output.failures.iter().all(|f| matches!(&*f.error, GeneratorError::DanglingReference { .. })));
    assert!(names(&output).contains(&"GetBRequest"));
    assert!(names(&output).contains(&"GetARequest"));
    assert!(!names(&output).contains(&"GetAResponse"));

    match output.into_result() {
        Err(GeneratorError::GenerationFailed { failures }) => assert!(!failures.is_empty()),
        other => panic!("Expected GenerationFailed error, got: {:?}", other.map(|d| d.len())),
    }
}

/// Turns every class into an alias.
#[derive(Debug)]
struct KindChanger;

impl Enricher for KindChanger {
    fn name(&self) -> &str {
        "KindChanger"
    }

    fn applies_to(&self, node: NodeKind, _source: SourceKind) -> bool {
        node == NodeKind::Class
    }

    fn enrich(&self, node: Node, _context: &EnrichmentContext<'_, '_>) -> Node {
        match node {
            Node::Type(decl) => Node::Type(decl.with_body(DeclarationBody::Alias { target: TypeRef::Any })),
            other => other,
        }
    }
}

#[test]
fn enricher_changing_kind_is_a_contract_violation() {
    let doc = ApiDocument::new("Rogue")
        .with_schema("Pet", SchemaNode::object().with_property("name", SchemaNode::string()))
        .with_schema("Color", SchemaNode::string_enum(["Red"]));
    let settings = GeneratorSettings::new("rogue").with_enricher(Arc::new(KindChanger));
    let output = Compiler::new(&doc, settings).unwrap().compile();

    assert_eq!(output.failures.len(), 1);
    match &*output.failures[0].error {
        GeneratorError::EnricherContractViolation {
            enricher,
            path,
            expected,
            actual,
        } => {
            assert_eq!(enricher, "KindChanger");
            assert_eq!(*path, ElementPath::component("Pet"));
            assert_eq!(*expected, NodeKind::Class);
            assert_eq!(*actual, NodeKind::Alias);
        }
        other => panic!("Expected EnricherContractViolation error, got: {:?}", other),
    }
    assert!(names(&output).contains(&"Color"));
}

/// Puts everything in one `types` namespace.
#[derive(Debug)]
struct FlatNamespaces;

impl NamespaceProvider for FlatNamespaces {
    fn namespace(&self, root: &str, _kind: SourceKind) -> String {
        format!("{root}::types")
    }
}

#[test]
fn namespace_provider_controls_placement() {
    let doc = petstore_document();
    let settings = GeneratorSettings::new("petstore").with_namespace_provider(Arc::new(FlatNamespaces));
    let output = Compiler::new(&doc, settings).unwrap().compile();

    assert!(output.is_success(), "{:?}", output.failures);
    assert!(output.declarations.iter().all(|d| d.namespace == "petstore::types"));
    assert!(output.declarations.iter().all(|d| d.file_group == "types"));
    let pet: &TypeDeclaration = declaration(&output, "Pet");
    assert_eq!(pet.type_ref(), TypeRef::named("petstore::types", "Pet"));
}
