//! Batch driver.
//!
//! [`Compiler::compile`] runs in three steps:
//!
//! 1. **Preprocess**: register every root identity (component schemas,
//!    operation body models, requests, responses, tags) and generate the
//!    model roots in parallel. Operations that share a model type find it
//!    already generated.
//! 2. **Generate**: build requests, responses and API surfaces in parallel.
//! 3. **Collect**: walk the roots in document order, emitting each
//!    declaration after its dependencies. Failures are collected, not
//!    raised, so one broken element never hides another. An element whose
//!    dependency failed is itself failed with `DependencyFailed`, so no
//!    emitted declaration refers to one that was not emitted.
//!
//! The [`CancellationFlag`] is checked before each element. Work already
//! started finishes, so every emitted declaration is complete.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use schemata_define::{ApiDocument, SchemaRef};
use tracing::{debug, info, warn};

use crate::config::GeneratorSettings;
use crate::context::{ElementGenerator, GenerationContext};
use crate::decl::TypeDeclaration;
use crate::errors::{ElementFailure, GeneratorError};
use crate::locate::{ElementPath, ElementRef, LocatedElement};
use crate::names::file_group;
use crate::registry::EmissionLog;
use crate::request::api_surface::operation_elements;
use crate::schema::SchemaShape;
use crate::validation::validate_settings;

/// Cooperative cancellation shared between a compiler and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A declaration ready for an emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedDeclaration {
    /// Path of the element it was generated from.
    pub identity: ElementPath,
    pub namespace: String,
    /// Logical file the declaration belongs in, e.g. `models`.
    pub file_group: String,
    pub declaration: TypeDeclaration,
}

/// Everything one compilation produced.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    /// Dependency-first, then document order.
    pub declarations: Vec<EmittedDeclaration>,
    pub failures: Vec<ElementFailure>,
    pub cancelled: bool,
}

impl GenerationOutput {
    pub fn is_success(&self) -> bool {
        !self.cancelled && self.failures.is_empty()
    }

    /// The declarations, or one error covering the whole run.
    ///
    /// ## Errors
    ///
    /// `Cancelled` when the run was cancelled, otherwise `GenerationFailed`
    /// listing every failure.
    pub fn into_result(self) -> Result<Vec<EmittedDeclaration>, GeneratorError> {
        if self.cancelled {
            Err(GeneratorError::Cancelled)
        } else if !self.failures.is_empty() {
            Err(GeneratorError::GenerationFailed {
                failures: self.failures,
            })
        } else {
            Ok(self.declarations)
        }
    }
}

/// Root elements of a document.
struct Roots<'a> {
    /// Component schemas and operation body models.
    models: Vec<Arc<LocatedElement<'a>>>,
    /// Requests, responses and API surfaces.
    operations: Vec<Arc<LocatedElement<'a>>>,
    /// Every root identity in emission order.
    order: Vec<ElementPath>,
}

impl<'a> Roots<'a> {
    fn collect(context: &GenerationContext<'a>) -> Self {
        let document = context.document();
        let mut roots = Roots {
            models: Vec::new(),
            operations: Vec::new(),
            order: Vec::new(),
        };

        for (name, schema) in &document.components.schemas {
            roots.push_model(LocatedElement::root(
                ElementRef::Schema(schema),
                ElementPath::component(name),
            ));
        }

        for (request, response) in operation_elements(context) {
            let Some(op) = request.operation() else {
                continue;
            };

            if let Some(body) = &op.operation.request_body
                && is_model(body)
            {
                roots.push_model(LocatedElement::child(&request, ["requestBody"], ElementRef::Schema(body)));
            }
            roots.push_operation(request);

            for (status, declared) in &op.operation.responses {
                if let Some(schema) = &declared.schema
                    && is_model(schema)
                {
                    roots.push_model(LocatedElement::child(&response, [status.as_str()], ElementRef::Schema(schema)));
                }
            }
            roots.push_operation(response);

            for tag in &op.operation.tags {
                if !document.tags.iter().any(|t| t.name == *tag) {
                    debug!(operation = %op.identifier(), %tag, "tag is not declared, no API surface");
                }
            }
        }

        for tag in &document.tags {
            roots.push_operation(LocatedElement::root(ElementRef::Tag(tag), ElementPath::tag(&tag.name)));
        }

        roots
    }

    fn push_model(&mut self, element: Arc<LocatedElement<'a>>) {
        self.order.push(element.path().clone());
        self.models.push(element);
    }

    fn push_operation(&mut self, element: Arc<LocatedElement<'a>>) {
        self.order.push(element.path().clone());
        self.operations.push(element);
    }
}

fn is_model(schema: &SchemaRef) -> bool {
    schema
        .as_inline()
        .is_some_and(|node| SchemaShape::of_node(node).is_declared())
}

/// Compiles one document under one set of settings.
///
/// ## Examples
///
/// ```
/// use schemata_define::{ApiDocument, SchemaNode};
/// use schemata_gen::compile::Compiler;
/// use schemata_gen::config::GeneratorSettings;
///
/// let doc = ApiDocument::new("Petstore").with_schema(
///     "Pet",
///     SchemaNode::object().with_property("name", SchemaNode::string()),
/// );
///
/// let output = Compiler::new(&doc, GeneratorSettings::new("petstore"))?.compile();
/// let pet = &output.declarations[0];
/// assert_eq!(pet.declaration.name, "Pet");
/// assert_eq!(pet.namespace, "petstore::models");
/// assert_eq!(pet.file_group, "models");
/// # Ok::<(), schemata_gen::errors::GeneratorError>(())
/// ```
#[derive(Debug)]
pub struct Compiler<'a> {
    document: &'a ApiDocument,
    settings: GeneratorSettings,
    cancellation: CancellationFlag,
}

impl<'a> Compiler<'a> {
    /// ## Errors
    ///
    /// Returns an error when `settings` fail validation.
    pub fn new(document: &'a ApiDocument, settings: GeneratorSettings) -> Result<Self, GeneratorError> {
        validate_settings(&settings)?;
        Ok(Self {
            document,
            settings,
            cancellation: CancellationFlag::new(),
        })
    }

    /// Uses `flag` for cooperative cancellation.
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = flag;
        self
    }

    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    pub fn compile(&self) -> GenerationOutput {
        let context = GenerationContext::new(self.document, self.settings.clone());
        let roots = Roots::collect(&context);
        info!(
            title = %self.document.title,
            models = roots.models.len(),
            operations = roots.operations.len(),
            "compiling"
        );

        for element in roots.models.iter().chain(&roots.operations) {
            context
                .registry()
                .get_or_create(element.path(), || ElementGenerator::new(Arc::clone(element)));
        }

        self.generate_pass(&context, &roots.models);
        self.generate_pass(&context, &roots.operations);

        let output = self.collect(&context, &roots.order);
        info!(
            declarations = output.declarations.len(),
            failures = output.failures.len(),
            cancelled = output.cancelled,
            "compiled"
        );
        output
    }

    fn generate_pass(&self, context: &GenerationContext<'a>, elements: &[Arc<LocatedElement<'a>>]) {
        elements.par_iter().for_each(|element| {
            if self.cancellation.is_cancelled() {
                return;
            }
            context.ensure_generated(Arc::clone(element));
        });
    }

    fn collect(&self, context: &GenerationContext<'a>, order: &[ElementPath]) -> GenerationOutput {
        let mut collector = Collector {
            context,
            visited: HashSet::new(),
            failed: HashSet::new(),
            skipped: HashSet::new(),
            log: EmissionLog::new(),
            output: GenerationOutput::default(),
        };
        for path in order {
            collector.visit(path);
        }

        let mut output = collector.output;
        output.cancelled = self.cancellation.is_cancelled();
        output
    }
}

/// Depth-first, dependency-first walk over generated slots.
struct Collector<'c, 'a> {
    context: &'c GenerationContext<'a>,
    visited: HashSet<ElementPath>,
    failed: HashSet<ElementPath>,
    /// Identities left ungenerated by cancellation.
    skipped: HashSet<ElementPath>,
    log: EmissionLog,
    output: GenerationOutput,
}

impl Collector<'_, '_> {
    fn visit(&mut self, path: &ElementPath) {
        if !self.visited.insert(path.clone()) {
            return;
        }
        // unclaimed slots were skipped by cancellation
        let Some(outcome) = self.context.registry().get(path).and_then(|slot| slot.outcome()) else {
            self.skipped.insert(path.clone());
            return;
        };

        match outcome {
            Ok(generated) => {
                for dependency in &generated.dependencies {
                    self.visit(dependency);
                }
                if let Some(dependency) = generated.dependencies.iter().find(|d| self.failed.contains(*d)) {
                    let error = GeneratorError::DependencyFailed {
                        path: path.clone(),
                        dependency: dependency.clone(),
                    };
                    self.fail(path, Arc::new(error));
                    return;
                }
                if generated.dependencies.iter().any(|d| self.skipped.contains(d)) {
                    debug!(%path, "dependency skipped by cancellation");
                    self.skipped.insert(path.clone());
                    return;
                }
                match self.log.record(path, &generated.declaration) {
                    Ok(true) => {
                        let namespace = generated.declaration.namespace.clone();
                        self.output.declarations.push(EmittedDeclaration {
                            identity: path.clone(),
                            file_group: file_group(&namespace).to_string(),
                            namespace,
                            declaration: generated.declaration.clone(),
                        });
                    }
                    Ok(false) => {}
                    Err(error) => self.fail(path, Arc::new(error)),
                }
            }
            Err(error) => self.fail(path, error),
        }
    }

    fn fail(&mut self, path: &ElementPath, error: Arc<GeneratorError>) {
        warn!(%path, %error, "element failed");
        self.failed.insert(path.clone());
        self.output.failures.push(ElementFailure {
            path: path.clone(),
            error,
        });
    }
}
