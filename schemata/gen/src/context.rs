//! Shared generation state.
//!
//! A [`GenerationContext`] owns the registry and the services every
//! generator uses: reference resolution, naming, namespacing and the
//! enrichment pipeline. Generators never embed another declaration; they
//! refer to it through a [`TypeRef`] computed from its canonical location
//! and ask the context to make sure it gets generated. Because a slot is
//! claimed before its generator runs and a claimed slot is never waited on,
//! cyclic schema graphs terminate.

use std::sync::Arc;

use schemata_define::{ApiDocument, SchemaRef};
use tracing::{debug, trace};

use crate::config::GeneratorSettings;
use crate::decl::{DeclarationBody, Node, TypeDeclaration, TypeRef};
use crate::enrich::{EnrichmentContext, EnrichmentPipeline};
use crate::errors::GeneratorError;
use crate::locate::{ElementPath, ElementRef, LocatedElement, SourceKind};
use crate::names::TypeNameResolver;
use crate::registry::{Registry, Slot};
use crate::request;
use crate::resolve::DocumentResolver;
use crate::schema::{self, SchemaShape};

/// A finished declaration plus the identities it must be emitted after.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedElement {
    pub declaration: TypeDeclaration,
    pub dependencies: Vec<ElementPath>,
}

/// What a registry slot ends up holding.
pub type Outcome = Result<Arc<GeneratedElement>, Arc<GeneratorError>>;

/// How an element is turned into a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Schema(SchemaShape),
    Request,
    Response,
    ApiSurface,
}

/// The memoized generator for one identity.
#[derive(Debug)]
pub struct ElementGenerator<'a> {
    element: Arc<LocatedElement<'a>>,
    strategy: Strategy,
}

impl<'a> ElementGenerator<'a> {
    pub fn new(element: Arc<LocatedElement<'a>>) -> Self {
        let strategy = match element.element() {
            ElementRef::Schema(schema) => Strategy::Schema(SchemaShape::classify(schema)),
            ElementRef::Operation(_) => Strategy::Request,
            ElementRef::Response(..) => Strategy::Response,
            ElementRef::Tag(_) => Strategy::ApiSurface,
        };
        Self { element, strategy }
    }

    pub fn element(&self) -> &Arc<LocatedElement<'a>> {
        &self.element
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn generate(&self, context: &GenerationContext<'a>) -> Result<GeneratedElement, GeneratorError> {
        match self.strategy {
            Strategy::Schema(shape) => schema::generate(context, &self.element, shape),
            Strategy::Request => request::generate_request(context, &self.element),
            Strategy::Response => request::generate_responses(context, &self.element),
            Strategy::ApiSurface => request::generate_api_surface(context, &self.element),
        }
    }
}

pub type GeneratorSlot<'a> = Slot<ElementGenerator<'a>, Outcome>;

/// Services and memoized state for one compilation.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    settings: GeneratorSettings,
    resolver: DocumentResolver<'a>,
    names: TypeNameResolver,
    pipeline: EnrichmentPipeline,
    registry: Registry<ElementGenerator<'a>, Outcome>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(document: &'a ApiDocument, settings: GeneratorSettings) -> Self {
        let resolver = DocumentResolver::new(document, Arc::clone(settings.reference_resolver()));
        let names = TypeNameResolver::new(settings.formatters().clone(), settings.request_suffix());
        let pipeline = EnrichmentPipeline::new(settings.enrichers().iter().cloned());

        Self {
            settings,
            resolver,
            names,
            pipeline,
            registry: Registry::new(),
        }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn resolver(&self) -> &DocumentResolver<'a> {
        &self.resolver
    }

    pub fn names(&self) -> &TypeNameResolver {
        &self.names
    }

    pub fn registry(&self) -> &Registry<ElementGenerator<'a>, Outcome> {
        &self.registry
    }

    pub fn document(&self) -> &'a ApiDocument {
        self.resolver.document()
    }

    /// Target namespace for declarations generated from `kind`.
    pub fn namespace(&self, kind: SourceKind) -> String {
        self.settings
            .namespace_provider()
            .namespace(self.settings.root_namespace(), kind)
    }

    /// A reference to the declaration generated for `element`.
    pub fn named(&self, element: &LocatedElement<'a>) -> TypeRef {
        TypeRef::named(self.namespace(element.kind()), self.names.type_name(element))
    }

    /// Registers `element` and generates it unless another request already
    /// claimed it.
    ///
    /// Never blocks: a slot claimed elsewhere (including further up the
    /// current call stack) is returned as is and gets filled by its owner.
    pub fn ensure_generated(&self, element: Arc<LocatedElement<'a>>) -> Arc<GeneratorSlot<'a>> {
        let path = element.path().clone();
        let slot = self
            .registry
            .get_or_create(&path, || ElementGenerator::new(element));

        if slot.try_claim() {
            trace!(%path, strategy = ?slot.generator().strategy(), "generating");
            let outcome = slot.generator().generate(self);
            if let Err(error) = &outcome {
                debug!(%path, %error, "generation failed");
            }
            slot.fill(outcome.map(Arc::new).map_err(Arc::new));
        }
        slot
    }

    /// The type used where `schema` appears `segments` below `owner`.
    ///
    /// Named references resolve to their canonical declaration. Inline
    /// schemas that need a declaration of their own are generated under
    /// their located path, which is pushed onto `dependencies`. Scalars and
    /// lists need no declaration.
    ///
    /// ## Errors
    ///
    /// `DanglingReference` when a reference has no target.
    pub fn type_ref_for(
        &self,
        owner: &Arc<LocatedElement<'a>>,
        segments: &[&str],
        schema: &'a SchemaRef,
        dependencies: &mut Vec<ElementPath>,
    ) -> Result<TypeRef, GeneratorError> {
        let node = match schema {
            SchemaRef::Reference(reference) => {
                let from = segments
                    .iter()
                    .fold(owner.path().clone(), |path, segment| path.child(*segment));
                let target = self.resolver.resolve(reference, &from)?;
                return Ok(self.named(&target));
            }
            SchemaRef::Inline(node) => node,
        };

        match SchemaShape::of_node(node) {
            SchemaShape::Primitive(Some(kind)) => Ok(TypeRef::Primitive {
                kind,
                format: node.format.clone(),
            }),
            SchemaShape::Primitive(None) => Ok(TypeRef::Any),
            SchemaShape::Array => {
                let array = LocatedElement::child(owner, segments.iter().copied(), ElementRef::Schema(schema));
                let item = match node.items.as_deref() {
                    Some(items) => self.type_ref_for(&array, &["items"], items, dependencies)?,
                    None => TypeRef::Any,
                };
                Ok(TypeRef::List(Box::new(item)))
            }
            SchemaShape::Object
            | SchemaShape::Enum(_)
            | SchemaShape::AllOf
            | SchemaShape::OneOf
            | SchemaShape::AnyOf
            | SchemaShape::Reference => {
                let child = LocatedElement::child(owner, segments.iter().copied(), ElementRef::Schema(schema));
                let type_ref = self.named(&child);
                dependencies.push(child.path().clone());
                self.ensure_generated(child);
                Ok(type_ref)
            }
        }
    }

    /// Resolves a reference that must be generated before `from`'s
    /// declaration, such as a union branch or an inherited base.
    pub fn require_reference(
        &self,
        schema: &'a SchemaRef,
        from: &ElementPath,
        dependencies: &mut Vec<ElementPath>,
    ) -> Result<Option<(Arc<LocatedElement<'a>>, TypeRef)>, GeneratorError> {
        let Some(reference) = schema.as_reference() else {
            return Ok(None);
        };
        let target = self.resolver.resolve(reference, from)?;
        let type_ref = self.named(&target);
        dependencies.push(target.path().clone());
        self.ensure_generated(Arc::clone(&target));
        Ok(Some((target, type_ref)))
    }

    /// Names `body`, runs the enrichment pipeline over it and packages the
    /// result.
    pub fn finish(
        &self,
        element: &LocatedElement<'a>,
        body: DeclarationBody,
        dependencies: Vec<ElementPath>,
    ) -> Result<GeneratedElement, GeneratorError> {
        let declaration = TypeDeclaration::new(
            self.names.type_name(element),
            self.namespace(element.kind()),
            body,
        );
        match self.enrich(Node::Type(declaration), element)? {
            Node::Type(declaration) => Ok(GeneratedElement {
                declaration,
                dependencies,
            }),
            Node::Method(_) => Err(GeneratorError::CodeGenError(format!(
                "enrichment turned the declaration at {} into a method",
                element.path()
            ))),
        }
    }

    /// Folds `node` through the enrichment pipeline.
    pub fn enrich(&self, node: Node, element: &LocatedElement<'a>) -> Result<Node, GeneratorError> {
        self.pipeline.apply(node, &EnrichmentContext::new(element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SlotPhase;
    use crate::test_utils::petstore_document;
    use schemata_define::SchemaType;

    #[test]
    fn ensure_generated_memoizes_per_identity() {
        let doc = petstore_document();
        let context = GenerationContext::new(&doc, GeneratorSettings::new("petstore"));

        let first = context.ensure_generated(context.resolver().component("Pet").unwrap());
        let second = context.ensure_generated(context.resolver().component("Pet").unwrap());

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.phase(), SlotPhase::Ready);
    }

    #[test]
    fn referenced_property_is_a_lazy_named_type() {
        let doc = petstore_document();
        let context = GenerationContext::new(&doc, GeneratorSettings::new("petstore"));
        let pet = context.resolver().component("Pet").unwrap();
        let owner = doc.schema("Pet").unwrap().as_inline().unwrap();
        let mut dependencies = Vec::new();

        let type_ref = context
            .type_ref_for(&pet, &["properties", "owner"], &owner.properties["owner"], &mut dependencies)
            .unwrap();

        assert_eq!(type_ref, TypeRef::named("petstore::models", "Owner"));
        assert!(dependencies.is_empty());
        // the referenced schema is not generated eagerly
        assert!(context.registry().get(&ElementPath::component("Owner")).is_none());
    }

    #[test]
    fn scalar_property_keeps_format() {
        let doc = petstore_document();
        let context = GenerationContext::new(&doc, GeneratorSettings::new("petstore"));
        let pet = context.resolver().component("Pet").unwrap();
        let owner = doc.schema("Pet").unwrap().as_inline().unwrap();

        let type_ref = context
            .type_ref_for(&pet, &["properties", "id"], &owner.properties["id"], &mut Vec::new())
            .unwrap();

        assert_eq!(
            type_ref,
            TypeRef::Primitive {
                kind: SchemaType::Integer,
                format: Some("int64".into())
            }
        );
    }
}
